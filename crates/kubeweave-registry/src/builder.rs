//! Registry construction and validation

use std::collections::HashMap;

use kubeweave_core::{Arity, Context, Disambiguator, PathExpr, TypeIdentity};
use tracing::debug;

use crate::builtin;
use crate::error::{RegistryError, Result};
use crate::registry::{ContextRegistry, ResourceMeta};

#[derive(Debug, Clone)]
pub(crate) struct ContextDecl {
    pub child: TypeIdentity,
    pub parent: TypeIdentity,
    pub path: String,
    pub arity: Arity,
    pub disambiguator: Option<Disambiguator>,
}

/// Collects resource and context declarations, then validates the whole set
/// at once in [`finish`].
///
/// Declarations accumulate in call order; for contexts that order is
/// preserved into the registry and is observable wherever resolution walks
/// a type's context list. Re-declaring a resource identity overrides its
/// manifest header, which lets extension files adjust builtins.
///
/// [`finish`]: RegistryBuilder::finish
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    resources: Vec<(TypeIdentity, ResourceMeta)>,
    contexts: Vec<ContextDecl>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-seeded with the built-in Kubernetes table
    pub fn with_builtin() -> Self {
        builtin::seed(Self::new())
    }

    /// Register a document-root type with its manifest header
    pub fn resource(
        mut self,
        id: impl Into<TypeIdentity>,
        api_version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        self.resources.push((
            id.into(),
            ResourceMeta {
                api_version: api_version.into(),
                kind: kind.into(),
            },
        ));
        self
    }

    /// Register a context with full control over arity and disambiguator
    pub fn context(
        mut self,
        child: impl Into<TypeIdentity>,
        parent: impl Into<TypeIdentity>,
        path: impl Into<String>,
        arity: Arity,
        disambiguator: Option<Disambiguator>,
    ) -> Self {
        self.contexts.push(ContextDecl {
            child: child.into(),
            parent: parent.into(),
            path: path.into(),
            arity,
            disambiguator,
        });
        self
    }

    /// Shorthand for a scalar slot without a disambiguator
    pub fn scalar(
        self,
        child: impl Into<TypeIdentity>,
        parent: impl Into<TypeIdentity>,
        path: impl Into<String>,
    ) -> Self {
        self.context(child, parent, path, Arity::Scalar, None)
    }

    /// Shorthand for an accumulating list slot without a disambiguator
    pub fn list(
        self,
        child: impl Into<TypeIdentity>,
        parent: impl Into<TypeIdentity>,
        path: impl Into<String>,
    ) -> Self {
        self.context(child, parent, path, Arity::List, None)
    }

    pub(crate) fn push_decl(&mut self, decl: ContextDecl) {
        self.contexts.push(decl);
    }

    /// Validate every declaration and build the immutable registry.
    ///
    /// Checks that paths parse, that each parent identity is registered
    /// (as a resource or as a context child), and that contexts sharing a
    /// (child, parent) pair form a well-formed disambiguator family: every
    /// member named, names unique, one kind of disambiguator, at most one
    /// default.
    pub fn finish(self) -> Result<ContextRegistry> {
        let mut resources: HashMap<TypeIdentity, ResourceMeta> = HashMap::new();
        for (id, meta) in self.resources {
            resources.insert(id, meta);
        }

        let mut contexts: HashMap<TypeIdentity, Vec<Context>> = HashMap::new();
        for decl in &self.contexts {
            let path = PathExpr::parse(&decl.path).map_err(|source| {
                RegistryError::InvalidPath {
                    child: decl.child.to_string(),
                    path: decl.path.clone(),
                    source,
                }
            })?;
            let mut context = Context::new(decl.parent.clone(), path, decl.arity);
            context.disambiguator = decl.disambiguator.clone();
            contexts.entry(decl.child.clone()).or_default().push(context);
        }

        for decl in &self.contexts {
            let known = resources.contains_key(&decl.parent) || contexts.contains_key(&decl.parent);
            if !known {
                return Err(RegistryError::UnknownParent {
                    child: decl.child.to_string(),
                    parent: decl.parent.to_string(),
                });
            }
        }

        for (child, list) in &contexts {
            validate_families(child, list)?;
        }

        debug!(
            resources = resources.len(),
            contexts = contexts.values().map(Vec::len).sum::<usize>(),
            "registry validated"
        );

        Ok(ContextRegistry::assemble(resources, contexts))
    }
}

/// Check disambiguator rules for every (child, parent) family in `list`
fn validate_families(child: &TypeIdentity, list: &[Context]) -> Result<()> {
    let mut families: HashMap<&TypeIdentity, Vec<&Context>> = HashMap::new();
    for context in list {
        families.entry(&context.parent).or_default().push(context);
    }

    for (parent, members) in families {
        if members.len() < 2 {
            continue;
        }

        if members.iter().any(|m| m.disambiguator.is_none()) {
            return Err(RegistryError::BareFamilyMember {
                child: child.to_string(),
                parent: parent.to_string(),
                count: members.len(),
            });
        }

        let kinds: Vec<&str> = members
            .iter()
            .filter_map(|m| m.disambiguator.as_ref())
            .map(|d| d.kind_str())
            .collect();
        if kinds.windows(2).any(|pair| pair[0] != pair[1]) {
            return Err(RegistryError::MixedDisambiguators {
                child: child.to_string(),
                parent: parent.to_string(),
            });
        }

        let mut seen_names: Vec<&str> = Vec::new();
        for member in &members {
            if let Some(name) = member.selector_name() {
                if seen_names.contains(&name) {
                    return Err(RegistryError::DuplicateSelector {
                        child: child.to_string(),
                        parent: parent.to_string(),
                        name: name.to_string(),
                    });
                }
                seen_names.push(name);
            }
        }

        let defaults: Vec<&str> = members
            .iter()
            .filter(|m| m.is_default())
            .filter_map(|m| m.selector_name())
            .collect();
        if defaults.len() > 1 {
            return Err(RegistryError::DuplicateDefault {
                child: child.to_string(),
                parent: parent.to_string(),
                first: defaults[0].to_string(),
                second: defaults[1].to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const POD: &str = "io.k8s.api.core.v1.Pod";
    const POD_SPEC: &str = "io.k8s.api.core.v1.PodSpec";
    const CONTAINER: &str = "io.k8s.api.core.v1.Container";
    const PROBE: &str = "io.k8s.api.core.v1.Probe";

    fn base() -> RegistryBuilder {
        RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec")
            .context(
                CONTAINER,
                POD_SPEC,
                "containers",
                Arity::List,
                Some(Disambiguator::default_alias("containers")),
            )
            .context(
                CONTAINER,
                POD_SPEC,
                "initContainers",
                Arity::List,
                Some(Disambiguator::alias("initContainers")),
            )
    }

    #[test]
    fn test_valid_family_builds() {
        let registry = base().finish().unwrap();
        assert_eq!(registry.resource_count(), 1);
        assert_eq!(registry.context_count(), 3);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let registry = base().finish().unwrap();
        let id = TypeIdentity::from(CONTAINER);
        let contexts = registry.resolve(&id);
        assert_eq!(contexts[0].selector_name(), Some("containers"));
        assert_eq!(contexts[1].selector_name(), Some("initContainers"));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = RegistryBuilder::new()
            .scalar(POD_SPEC, "com.example.Ghost", "spec")
            .finish()
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownParent { .. }));
    }

    #[test]
    fn test_invalid_path_rejected() {
        let err = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec..containers")
            .finish()
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPath { .. }));
    }

    #[test]
    fn test_bare_family_member_rejected() {
        let err = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec")
            .list(CONTAINER, POD_SPEC, "containers")
            .context(
                CONTAINER,
                POD_SPEC,
                "initContainers",
                Arity::List,
                Some(Disambiguator::alias("initContainers")),
            )
            .finish()
            .unwrap_err();
        assert!(matches!(err, RegistryError::BareFamilyMember { count: 2, .. }));
    }

    #[test]
    fn test_duplicate_selector_rejected() {
        let err = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec")
            .scalar(CONTAINER, POD_SPEC, "c")
            .context(
                PROBE,
                CONTAINER,
                "livenessProbe",
                Arity::Scalar,
                Some(Disambiguator::alias("livenessProbe")),
            )
            .context(
                PROBE,
                CONTAINER,
                "readinessProbe",
                Arity::Scalar,
                Some(Disambiguator::alias("livenessProbe")),
            )
            .finish()
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::DuplicateSelector { ref name, .. } if name == "livenessProbe"
        ));
    }

    #[test]
    fn test_duplicate_default_rejected() {
        let err = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec")
            .context(
                CONTAINER,
                POD_SPEC,
                "containers",
                Arity::List,
                Some(Disambiguator::default_alias("containers")),
            )
            .context(
                CONTAINER,
                POD_SPEC,
                "initContainers",
                Arity::List,
                Some(Disambiguator::default_alias("initContainers")),
            )
            .finish()
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateDefault { .. }));
    }

    #[test]
    fn test_mixed_disambiguators_rejected() {
        let err = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec")
            .context(
                CONTAINER,
                POD_SPEC,
                "containers",
                Arity::List,
                Some(Disambiguator::alias("containers")),
            )
            .context(
                CONTAINER,
                POD_SPEC,
                "initContainers",
                Arity::List,
                Some(Disambiguator::flag("initContainers")),
            )
            .finish()
            .unwrap_err();
        assert!(matches!(err, RegistryError::MixedDisambiguators { .. }));
    }

    #[test]
    fn test_redeclared_resource_overrides_meta() {
        let registry = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .resource(POD, "v2", "Pod")
            .finish()
            .unwrap();
        let id = TypeIdentity::from(POD);
        assert_eq!(registry.resource_meta(&id).unwrap().api_version, "v2");
    }

    #[test]
    fn test_single_member_without_disambiguator_is_fine() {
        let registry = RegistryBuilder::new()
            .resource(POD, "v1", "Pod")
            .scalar(POD_SPEC, POD, "spec")
            .finish()
            .unwrap();
        assert_eq!(registry.context_count(), 1);
    }
}
