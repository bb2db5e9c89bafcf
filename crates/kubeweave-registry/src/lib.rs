//! Kubeweave Registry - placement knowledge for the manifest compiler
//!
//! This crate owns the context registry:
//! - A built-in table covering the common Kubernetes kinds
//! - YAML/JSON extension files for custom resources
//! - Validation of disambiguator families at build time
//! - Kind lookup with fuzzy suggestions for typos

pub mod builder;
pub mod builtin;
pub mod error;
pub mod load;
pub mod registry;
pub mod suggest;

pub use builder::RegistryBuilder;
pub use builtin::builtin;
pub use error::{RegistryError, Result};
pub use load::{ContextEntry, KindDecl, RegistryFile};
pub use registry::{ContextRegistry, ResourceMeta};
