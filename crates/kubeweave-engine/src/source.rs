//! Declarative tree sources
//!
//! Turns authored node documents into [`TreeNode`] trees. A document
//! declares one root; `---` separates multiple roots in a single file:
//!
//! ```yaml
//! kind: Deployment
//! props:
//!   metadata:
//!     name: web
//! children:
//!   - kind: Container
//!     props: { name: web, image: "nginx:1.27" }
//!     children:
//!       - kind: Probe
//!         as: readinessProbe
//!         props: { httpGet: { path: /ready, port: 8080 } }
//! ```
//!
//! `kind` accepts a full identity or a unique short name. A node without a
//! `kind` must carry a `key` and is treated as an anonymous item placed at
//! that literal path. Top-level nodes that resolve to a registered resource
//! get `apiVersion`/`kind` stamped into their fields unless the author
//! already set them.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use kubeweave_core::{Arity, PathExpr, TreeNode, TypeIdentity};
use kubeweave_registry::ContextRegistry;

use crate::error::SourceError;

/// Identity given to keyed nodes declared without a `kind`
const ANONYMOUS_ITEM: &str = "Item";

/// One authored node declaration
#[derive(Debug, Clone, Deserialize)]
pub struct NodeSource {
    #[serde(default)]
    pub kind: Option<String>,

    /// Disambiguator selection (`as: initContainers`)
    #[serde(default, rename = "as")]
    pub selector: Option<String>,

    /// Literal fallback path under the immediate parent
    #[serde(default)]
    pub key: Option<String>,

    /// Arity of the keyed slot; scalar when omitted
    #[serde(default)]
    pub arity: Option<Arity>,

    #[serde(default)]
    pub props: Map<String, JsonValue>,

    #[serde(default)]
    pub children: Vec<NodeSource>,
}

/// Parse a source file into root declarations, one per `---` document.
/// Empty and comment-only documents are skipped.
pub fn parse_sources(text: &str) -> Result<Vec<NodeSource>, SourceError> {
    let mut sources = Vec::new();

    for (index, document) in text.split("---").enumerate() {
        let document = document.trim();
        if document.is_empty() {
            continue;
        }
        if document
            .lines()
            .all(|line| line.trim().is_empty() || line.trim().starts_with('#'))
        {
            continue;
        }

        let source: NodeSource = serde_yaml::from_str(document)
            .map_err(|source| SourceError::Parse { index, source })?;
        sources.push(source);
    }

    Ok(sources)
}

/// Resolve one root declaration into a tree, stamping the manifest header
/// for registered resources
pub fn build_tree(registry: &ContextRegistry, source: NodeSource) -> Result<TreeNode, SourceError> {
    convert(registry, source, true)
}

/// Parse and resolve a whole source file
pub fn load_trees(registry: &ContextRegistry, text: &str) -> Result<Vec<TreeNode>, SourceError> {
    parse_sources(text)?
        .into_iter()
        .map(|source| build_tree(registry, source))
        .collect()
}

fn convert(
    registry: &ContextRegistry,
    source: NodeSource,
    top_level: bool,
) -> Result<TreeNode, SourceError> {
    let NodeSource {
        kind,
        selector,
        key,
        arity,
        props,
        children,
    } = source;

    let id = match kind.as_deref() {
        Some(name) => registry.lookup(name)?,
        None if key.is_some() => TypeIdentity::new(ANONYMOUS_ITEM),
        None => return Err(SourceError::MissingKind),
    };

    // the stamped header goes in front of the author's fields; an
    // author-supplied header wins outright
    let mut fields = Map::new();
    if top_level {
        if let Some(meta) = registry.resource_meta(&id) {
            if !props.contains_key("apiVersion") {
                fields.insert(
                    "apiVersion".to_string(),
                    JsonValue::String(meta.api_version.clone()),
                );
            }
            if !props.contains_key("kind") {
                fields.insert("kind".to_string(), JsonValue::String(meta.kind.clone()));
            }
        }
    }
    fields.extend(props);

    let mut node = TreeNode::new(id).with_fields(fields);
    if let Some(name) = selector {
        node = node.select(name);
    }
    if let Some(text) = key {
        let path = PathExpr::parse(&text)?;
        node = match arity.unwrap_or(Arity::Scalar) {
            Arity::Scalar => node.at_key(path),
            Arity::List => node.append_key(path),
        };
    }

    for child in children {
        node = node.child(convert(registry, child, false)?);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use kubeweave_registry::builtin;
    use serde_json::json;

    #[test]
    fn test_parse_skips_empty_and_comment_documents() {
        let text = "\
# leading comment
---
kind: Pod
---

---
# only a comment
---
kind: Service
";
        let sources = parse_sources(text).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].kind.as_deref(), Some("Pod"));
        assert_eq!(sources[1].kind.as_deref(), Some("Service"));
    }

    #[test]
    fn test_parse_reports_document_index() {
        let text = "kind: Pod\n---\nkind: [not, a, string]\n";
        let err = parse_sources(text).unwrap_err();
        assert!(matches!(err, SourceError::Parse { index: 1, .. }));
    }

    #[test]
    fn test_short_name_resolves_to_full_identity() {
        let source: NodeSource = serde_yaml::from_str("kind: Deployment").unwrap();
        let tree = build_tree(builtin(), source).unwrap();
        assert_eq!(tree.id().as_str(), "io.k8s.api.apps.v1.Deployment");
    }

    #[test]
    fn test_resource_header_is_stamped_first() {
        let text = "\
kind: Deployment
props:
  metadata:
    name: web
";
        let source: NodeSource = serde_yaml::from_str(text).unwrap();
        let tree = build_tree(builtin(), source).unwrap();

        let keys: Vec<&str> = tree.own_fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["apiVersion", "kind", "metadata"]);
        assert_eq!(tree.own_fields()["apiVersion"], json!("apps/v1"));
        assert_eq!(tree.own_fields()["kind"], json!("Deployment"));
    }

    #[test]
    fn test_author_header_wins_over_stamp() {
        let text = "\
kind: Deployment
props:
  apiVersion: apps/v1beta2
  metadata: { name: old }
";
        let source: NodeSource = serde_yaml::from_str(text).unwrap();
        let tree = build_tree(builtin(), source).unwrap();

        assert_eq!(tree.own_fields()["apiVersion"], json!("apps/v1beta2"));
        // the missing half is still stamped
        assert_eq!(tree.own_fields()["kind"], json!("Deployment"));
    }

    #[test]
    fn test_children_are_not_stamped() {
        let text = "\
kind: StatefulSet
children:
  - kind: PersistentVolumeClaim
    props: { metadata: { name: data } }
";
        let source: NodeSource = serde_yaml::from_str(text).unwrap();
        let tree = build_tree(builtin(), source).unwrap();

        let claim = &tree.children()[0];
        assert_eq!(claim.own_fields().get("apiVersion"), None);
        assert_eq!(claim.own_fields().get("kind"), None);
    }

    #[test]
    fn test_unknown_kind_suggests_neighbors() {
        let source: NodeSource = serde_yaml::from_str("kind: Contaner").unwrap();
        let err = build_tree(builtin(), source).unwrap_err();
        assert!(err.to_string().contains("Container"));
    }

    #[test]
    fn test_keyed_node_without_kind_is_anonymous_item() {
        let text = "\
kind: ConfigMap
children:
  - key: data
    props: { LOG_LEVEL: debug }
";
        let source: NodeSource = serde_yaml::from_str(text).unwrap();
        let tree = build_tree(builtin(), source).unwrap();

        let item = &tree.children()[0];
        assert_eq!(item.id().as_str(), "Item");
        assert_eq!(item.slot().unwrap().path.to_string(), "data");
        assert_eq!(item.slot().unwrap().arity, Arity::Scalar);
    }

    #[test]
    fn test_keyed_list_arity() {
        let text = "key: spec.ephemeralContainers\narity: list\nprops: { name: dbg }";
        let source: NodeSource = serde_yaml::from_str(text).unwrap();
        let tree = build_tree(builtin(), source).unwrap();
        assert_eq!(tree.slot().unwrap().arity, Arity::List);
    }

    #[test]
    fn test_node_without_kind_or_key_is_rejected() {
        let source: NodeSource = serde_yaml::from_str("props: { a: 1 }").unwrap();
        let err = build_tree(builtin(), source).unwrap_err();
        assert!(matches!(err, SourceError::MissingKind));
    }

    #[test]
    fn test_invalid_key_path_is_rejected() {
        let source: NodeSource = serde_yaml::from_str("key: spec..data").unwrap();
        let err = build_tree(builtin(), source).unwrap_err();
        assert!(matches!(err, SourceError::Key(_)));
    }

    #[test]
    fn test_selector_is_carried_through() {
        let text = "\
kind: Container
props: { name: setup }
as: initContainers
";
        let source: NodeSource = serde_yaml::from_str(text).unwrap();
        let tree = build_tree(builtin(), source).unwrap();
        assert_eq!(tree.selector(), Some("initContainers"));
    }

    #[test]
    fn test_source_to_document_pipeline() {
        let text = "\
kind: Deployment
props:
  metadata: { name: web }
children:
  - kind: Container
    props: { name: web, image: \"nginx:1.27\" }
    children:
      - kind: EnvVar
        props: { name: PORT, value: \"8080\" }
      - kind: Probe
        as: readinessProbe
        props: { httpGet: { path: /ready, port: 8080 } }
";
        let trees = load_trees(builtin(), text).unwrap();
        assert_eq!(trees.len(), 1);

        let out = Compiler::new(builtin()).compile(&trees[0]).unwrap();
        assert_eq!(
            out.document,
            json!({
                "apiVersion": "apps/v1",
                "kind": "Deployment",
                "metadata": {"name": "web"},
                "spec": {
                    "template": {
                        "spec": {
                            "containers": [{
                                "name": "web",
                                "image": "nginx:1.27",
                                "env": [{"name": "PORT", "value": "8080"}],
                                "readinessProbe": {"httpGet": {"path": "/ready", "port": 8080}}
                            }]
                        }
                    }
                }
            })
        );
        assert!(out.warnings.is_empty());
    }
}
