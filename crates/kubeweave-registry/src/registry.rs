//! Immutable context registry and identity lookup

use std::collections::{BTreeMap, HashMap};

use kubeweave_core::{Context, TypeIdentity};
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::suggest;

/// Manifest header stamped onto documents compiled from a resource root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMeta {
    pub api_version: String,
    pub kind: String,
}

/// The placement knowledge base.
///
/// Maps each schema type identity to the list of contexts declared for it,
/// and marks which identities are document roots (resources) together with
/// their manifest headers. Built once through [`RegistryBuilder`] and read
/// concurrently afterwards; nothing here mutates.
///
/// [`RegistryBuilder`]: crate::builder::RegistryBuilder
#[derive(Debug, Clone)]
pub struct ContextRegistry {
    resources: HashMap<TypeIdentity, ResourceMeta>,
    contexts: HashMap<TypeIdentity, Vec<Context>>,
    // short name -> identities carrying it, for kind lookup in source files
    index: BTreeMap<String, Vec<TypeIdentity>>,
}

impl ContextRegistry {
    pub(crate) fn assemble(
        resources: HashMap<TypeIdentity, ResourceMeta>,
        contexts: HashMap<TypeIdentity, Vec<Context>>,
    ) -> Self {
        let mut index: BTreeMap<String, Vec<TypeIdentity>> = BTreeMap::new();
        for id in resources.keys().chain(contexts.keys()) {
            let bucket = index.entry(id.short_name().to_string()).or_default();
            if !bucket.contains(id) {
                bucket.push(id.clone());
            }
        }
        for bucket in index.values_mut() {
            bucket.sort();
        }
        Self {
            resources,
            contexts,
            index,
        }
    }

    /// All contexts declared for `id`, in declaration order.
    ///
    /// Unknown identities resolve to an empty slice, not an error; a type
    /// with no contexts may still be placed through a keyed slot.
    pub fn resolve(&self, id: &TypeIdentity) -> &[Context] {
        self.contexts.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Manifest header for a resource root, `None` for sub-object types
    pub fn resource_meta(&self, id: &TypeIdentity) -> Option<&ResourceMeta> {
        self.resources.get(id)
    }

    pub fn is_resource(&self, id: &TypeIdentity) -> bool {
        self.resources.contains_key(id)
    }

    /// Whether `id` (a full identity) is registered at all
    pub fn is_known(&self, id: &str) -> bool {
        self.resources.contains_key(id) || self.contexts.contains_key(id)
    }

    /// Resolve a kind name from a source file into a full identity.
    ///
    /// Accepts either a full identity or a short name that is unique across
    /// the registry. Unknown names fail with fuzzy-matched suggestions,
    /// ambiguous short names fail listing every candidate.
    pub fn lookup(&self, name: &str) -> Result<TypeIdentity> {
        if self.is_known(name) {
            return Ok(TypeIdentity::from(name));
        }
        match self.index.get(name) {
            Some(ids) if ids.len() == 1 => Ok(ids[0].clone()),
            Some(ids) => Err(RegistryError::AmbiguousKind {
                name: name.to_string(),
                candidates: ids.iter().map(ToString::to_string).collect(),
            }),
            None => Err(RegistryError::UnknownKind {
                name: name.to_string(),
                suggestions: self.suggest_names(name),
            }),
        }
    }

    fn suggest_names(&self, input: &str) -> Vec<String> {
        let mut candidates: Vec<&str> = self.index.keys().map(String::as_str).collect();
        candidates.extend(self.identities().iter().map(|id| id.as_str()));
        suggest::find_closest(input, &candidates, 3)
    }

    /// Every registered identity, sorted and deduplicated
    pub fn identities(&self) -> Vec<&TypeIdentity> {
        let mut ids: Vec<&TypeIdentity> =
            self.resources.keys().chain(self.contexts.keys()).collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Resource roots with their manifest headers, sorted by identity
    pub fn resources(&self) -> Vec<(&TypeIdentity, &ResourceMeta)> {
        let mut rows: Vec<_> = self.resources.iter().collect();
        rows.sort_by_key(|(id, _)| *id);
        rows
    }

    /// All contexts whose parent is `parent`, sorted by child identity.
    ///
    /// Linear scan over the registry; meant for inspection commands, not
    /// for the compile path.
    pub fn children_of(&self, parent: &TypeIdentity) -> Vec<(&TypeIdentity, &Context)> {
        let mut rows: Vec<(&TypeIdentity, &Context)> = Vec::new();
        for (child, contexts) in &self.contexts {
            for context in contexts {
                if context.parent == *parent {
                    rows.push((child, context));
                }
            }
        }
        rows.sort_by(|a, b| (a.0, a.1.path.to_string()).cmp(&(b.0, b.1.path.to_string())));
        rows
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn context_count(&self) -> usize {
        self.contexts.values().map(Vec::len).sum()
    }
}
