//! Registry extension files
//!
//! Users extend the built-in table with YAML or JSON declaration files,
//! typically to teach the compiler about custom resources:
//!
//! ```yaml
//! kinds:
//!   - id: com.example.stable.v1.CronTab
//!     apiVersion: stable.example.com/v1
//!     kind: CronTab
//! contexts:
//!   - type: io.k8s.api.core.v1.PodTemplateSpec
//!     parent: com.example.stable.v1.CronTab
//!     path: spec.template
//! ```
//!
//! Declarations are appended to a [`RegistryBuilder`]; all validation runs
//! once in `finish`, so an extension file can reference builtin types and
//! vice versa.

use std::path::Path;

use kubeweave_core::{Arity, Disambiguator, TypeIdentity};
use serde::{Deserialize, Serialize};

use crate::builder::{ContextDecl, RegistryBuilder};
use crate::error::Result;

/// One parsed extension file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Document-root types to add or override
    #[serde(default)]
    pub kinds: Vec<KindDecl>,

    /// Embedding contexts to append
    #[serde(default)]
    pub contexts: Vec<ContextEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindDecl {
    /// Full type identity (e.g. `com.example.stable.v1.CronTab`)
    pub id: String,

    /// Manifest apiVersion stamped onto compiled documents
    pub api_version: String,

    /// Manifest kind stamped onto compiled documents
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextEntry {
    /// Type being placed
    #[serde(rename = "type")]
    pub type_id: String,

    /// Ancestor type the placement applies under
    pub parent: String,

    /// Slot path relative to the ancestor's object
    pub path: String,

    #[serde(default)]
    pub arity: Arity,

    #[serde(default)]
    pub disambiguator: Option<Disambiguator>,
}

impl RegistryFile {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a file, picking the parser from the extension (`.json` parses
    /// as JSON, anything else as YAML)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty() && self.contexts.is_empty()
    }
}

impl RegistryBuilder {
    /// Append every declaration from an extension file
    pub fn extend(mut self, file: RegistryFile) -> Self {
        for kind in file.kinds {
            self = self.resource(kind.id, kind.api_version, kind.kind);
        }
        for entry in file.contexts {
            self.push_decl(ContextDecl {
                child: TypeIdentity::from(entry.type_id),
                parent: TypeIdentity::from(entry.parent),
                path: entry.path,
                arity: entry.arity,
                disambiguator: entry.disambiguator,
            });
        }
        self
    }
}
