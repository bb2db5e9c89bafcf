//! Document accumulation
//!
//! Applies one resolved placement to the in-progress output document:
//! walks the slot path from the matched ancestor's object, creating
//! intermediate objects (and arrays, for list-marked segments) on demand,
//! then writes the value as a scalar set or a list append.

use kubeweave_core::{Arity, PathExpr, PathSegment, TypeIdentity};
use serde_json::{Map, Value as JsonValue};

use crate::frame::DocPath;
use crate::warning::CompileWarning;

/// Result of one placement: the cursor to the value just written (the
/// child frame for the placed node) plus any diagnostics raised on the way
#[derive(Debug)]
pub(crate) struct Applied {
    pub at: DocPath,
    pub warnings: Vec<CompileWarning>,
}

/// Write `value` at `path` relative to the object addressed by `base`.
///
/// Intermediate list segments descend into the most recently opened group:
/// the last element of the array if one exists, else a fresh element. A
/// scalar terminal overwrites silently (last write wins) but reports the
/// overwrite; traversal through an existing non-container value replaces it
/// and reports that too.
pub(crate) fn apply(
    document: &mut JsonValue,
    base: &DocPath,
    path: &PathExpr,
    value: JsonValue,
    arity: Arity,
    identity: &TypeIdentity,
) -> Applied {
    let mut cursor = base.clone();
    let mut warnings = Vec::new();

    let (terminal, intermediates) = path
        .segments()
        .split_last()
        .expect("path expressions always have a terminal segment");

    for segment in intermediates {
        descend(document, &mut cursor, &mut warnings, segment, identity);
    }

    let map = object_at(document, &cursor);
    match arity {
        Arity::Scalar => {
            let occupied = matches!(map.get(terminal.name()), Some(existing) if !existing.is_null());
            map.insert(terminal.name().to_string(), value);
            cursor.push_key(terminal.name());
            if occupied {
                warnings.push(CompileWarning::DuplicateScalarWrite {
                    identity: identity.to_string(),
                    path: cursor.to_string(),
                });
            }
        }
        Arity::List => {
            let slot = map.entry(terminal.name()).or_insert(JsonValue::Null);
            let clobbered = ensure_array(slot);
            let list = slot.as_array_mut().expect("slot was coerced to an array");
            list.push(value);
            let index = list.len() - 1;
            cursor.push_key(terminal.name());
            if clobbered {
                warnings.push(CompileWarning::ClobberedValue {
                    identity: identity.to_string(),
                    path: cursor.to_string(),
                });
            }
            cursor.push_index(index);
        }
    }

    Applied { at: cursor, warnings }
}

/// Enter one intermediate segment, creating the container it names
fn descend(
    document: &mut JsonValue,
    cursor: &mut DocPath,
    warnings: &mut Vec<CompileWarning>,
    segment: &PathSegment,
    identity: &TypeIdentity,
) {
    let map = object_at(document, cursor);
    let slot = map.entry(segment.name()).or_insert(JsonValue::Null);

    if segment.is_list() {
        let clobbered = ensure_array(slot);
        let list = slot.as_array_mut().expect("slot was coerced to an array");
        if list.is_empty() {
            list.push(JsonValue::Object(Map::new()));
        }
        let index = list.len() - 1;
        let group_clobbered = ensure_object(&mut list[index]);
        cursor.push_key(segment.name());
        if clobbered || group_clobbered {
            warnings.push(CompileWarning::ClobberedValue {
                identity: identity.to_string(),
                path: cursor.to_string(),
            });
        }
        cursor.push_index(index);
    } else {
        let clobbered = ensure_object(slot);
        cursor.push_key(segment.name());
        if clobbered {
            warnings.push(CompileWarning::ClobberedValue {
                identity: identity.to_string(),
                path: cursor.to_string(),
            });
        }
    }
}

/// The object the cursor addresses, rebuilt if a later write retyped it.
/// The write that did the retyping already raised a warning.
fn object_at<'doc>(
    document: &'doc mut JsonValue,
    cursor: &DocPath,
) -> &'doc mut Map<String, JsonValue> {
    let target = cursor.locate(document);
    ensure_object(target);
    target
        .as_object_mut()
        .expect("target was coerced to an object")
}

/// Make the slot an object, returning whether an existing non-container
/// value was thrown away
fn ensure_object(slot: &mut JsonValue) -> bool {
    match slot {
        JsonValue::Object(_) => false,
        JsonValue::Null => {
            *slot = JsonValue::Object(Map::new());
            false
        }
        _ => {
            *slot = JsonValue::Object(Map::new());
            true
        }
    }
}

/// Array counterpart of [`ensure_object`]
fn ensure_array(slot: &mut JsonValue) -> bool {
    match slot {
        JsonValue::Array(_) => false,
        JsonValue::Null => {
            *slot = JsonValue::Array(Vec::new());
            false
        }
        _ => {
            *slot = JsonValue::Array(Vec::new());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(name: &str) -> TypeIdentity {
        TypeIdentity::from(name)
    }

    fn path(text: &str) -> PathExpr {
        PathExpr::parse(text).unwrap()
    }

    #[test]
    fn test_scalar_creates_intermediate_objects() {
        let mut doc = json!({});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("spec.strategy.rollingUpdate"),
            json!({"maxSurge": 1}),
            Arity::Scalar,
            &id("test.Strategy"),
        );

        assert!(applied.warnings.is_empty());
        assert_eq!(doc, json!({"spec": {"strategy": {"rollingUpdate": {"maxSurge": 1}}}}));
        assert_eq!(applied.at.to_string(), "spec.strategy.rollingUpdate");
    }

    #[test]
    fn test_list_appends_in_call_order() {
        let mut doc = json!({});
        let first = apply(
            &mut doc,
            &DocPath::root(),
            &path("env"),
            json!({"name": "A"}),
            Arity::List,
            &id("test.EnvVar"),
        );
        let second = apply(
            &mut doc,
            &DocPath::root(),
            &path("env"),
            json!({"name": "B"}),
            Arity::List,
            &id("test.EnvVar"),
        );

        assert_eq!(doc, json!({"env": [{"name": "A"}, {"name": "B"}]}));
        assert_eq!(first.at.to_string(), "env[0]");
        assert_eq!(second.at.to_string(), "env[1]");
    }

    #[test]
    fn test_intermediate_list_creates_first_group() {
        let mut doc = json!({});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("subsets[].ports"),
            json!({"port": 80}),
            Arity::List,
            &id("test.Port"),
        );

        assert_eq!(doc, json!({"subsets": [{"ports": [{"port": 80}]}]}));
        assert_eq!(applied.at.to_string(), "subsets[0].ports[0]");
    }

    #[test]
    fn test_intermediate_list_descends_last_group() {
        let mut doc = json!({"subsets": [{"tag": "old"}, {"tag": "new"}]});
        apply(
            &mut doc,
            &DocPath::root(),
            &path("subsets[].ports"),
            json!({"port": 443}),
            Arity::List,
            &id("test.Port"),
        );

        assert_eq!(
            doc,
            json!({"subsets": [
                {"tag": "old"},
                {"tag": "new", "ports": [{"port": 443}]}
            ]})
        );
    }

    #[test]
    fn test_empty_intermediate_list_gets_fresh_group() {
        let mut doc = json!({"subsets": []});
        apply(
            &mut doc,
            &DocPath::root(),
            &path("subsets[].ports"),
            json!({"port": 8080}),
            Arity::List,
            &id("test.Port"),
        );

        assert_eq!(doc, json!({"subsets": [{"ports": [{"port": 8080}]}]}));
    }

    #[test]
    fn test_scalar_overwrite_warns_and_wins() {
        let mut doc = json!({"spec": {"replicas": 1}});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("spec"),
            json!({"replicas": 3}),
            Arity::Scalar,
            &id("test.Spec"),
        );

        assert_eq!(doc, json!({"spec": {"replicas": 3}}));
        assert_eq!(applied.warnings.len(), 1);
        assert!(matches!(
            &applied.warnings[0],
            CompileWarning::DuplicateScalarWrite { path, .. } if path == "spec"
        ));
    }

    #[test]
    fn test_traversing_scalar_clobbers_with_warning() {
        let mut doc = json!({"spec": "oops"});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("spec.template"),
            json!({"x": 1}),
            Arity::Scalar,
            &id("test.Template"),
        );

        assert_eq!(doc, json!({"spec": {"template": {"x": 1}}}));
        assert_eq!(applied.warnings.len(), 1);
        assert!(matches!(
            &applied.warnings[0],
            CompileWarning::ClobberedValue { path, .. } if path == "spec"
        ));
    }

    #[test]
    fn test_list_terminal_over_scalar_clobbers() {
        let mut doc = json!({"env": "not-a-list"});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("env"),
            json!({"name": "A"}),
            Arity::List,
            &id("test.EnvVar"),
        );

        assert_eq!(doc, json!({"env": [{"name": "A"}]}));
        assert_eq!(applied.warnings.len(), 1);
    }

    #[test]
    fn test_null_slot_treated_as_missing() {
        let mut doc = json!({"spec": null});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("spec"),
            json!({"replicas": 2}),
            Arity::Scalar,
            &id("test.Spec"),
        );

        assert!(applied.warnings.is_empty());
        assert_eq!(doc, json!({"spec": {"replicas": 2}}));
    }

    #[test]
    fn test_applied_cursor_addresses_written_value() {
        let mut doc = json!({});
        let applied = apply(
            &mut doc,
            &DocPath::root(),
            &path("spec.containers"),
            json!({"name": "web"}),
            Arity::List,
            &id("test.Container"),
        );

        let written = applied.at.locate(&mut doc);
        assert_eq!(written, &json!({"name": "web"}));
    }

    #[test]
    fn test_apply_rebuilds_overwritten_base_region() {
        let mut doc = json!({});
        let template = apply(
            &mut doc,
            &DocPath::root(),
            &path("spec.template"),
            json!({}),
            Arity::Scalar,
            &id("test.Template"),
        );
        // a later write replaces the object the first cursor runs through
        apply(
            &mut doc,
            &DocPath::root(),
            &path("spec"),
            json!({}),
            Arity::Scalar,
            &id("test.Spec"),
        );

        let applied = apply(
            &mut doc,
            &template.at,
            &path("metadata"),
            json!({"name": "web"}),
            Arity::Scalar,
            &id("test.Meta"),
        );

        assert!(applied.warnings.is_empty());
        assert_eq!(doc, json!({"spec": {"template": {"metadata": {"name": "web"}}}}));
    }

    #[test]
    fn test_apply_rebuilds_base_retyped_to_list() {
        let mut doc = json!({});
        let slot = apply(
            &mut doc,
            &DocPath::root(),
            &path("data"),
            json!({}),
            Arity::Scalar,
            &id("test.Slot"),
        );
        let retyped = apply(
            &mut doc,
            &DocPath::root(),
            &path("data"),
            json!({"n": 1}),
            Arity::List,
            &id("test.Row"),
        );
        assert_eq!(retyped.warnings.len(), 1);

        let applied = apply(
            &mut doc,
            &slot.at,
            &path("value"),
            json!(5),
            Arity::Scalar,
            &id("test.Leaf"),
        );

        assert!(applied.warnings.is_empty());
        assert_eq!(doc, json!({"data": {"value": 5}}));
    }

    #[test]
    fn test_apply_relative_to_non_root_base() {
        let mut doc = json!({"spec": {"template": {}}});
        let mut base = DocPath::root();
        base.push_key("spec");
        base.push_key("template");

        apply(
            &mut doc,
            &base,
            &path("metadata.labels"),
            json!({"app": "web"}),
            Arity::Scalar,
            &id("test.Labels"),
        );

        assert_eq!(
            doc,
            json!({"spec": {"template": {"metadata": {"labels": {"app": "web"}}}}})
        );
    }
}
