//! Kubeweave Engine - tree-to-manifest compilation
//!
//! This crate turns declared node trees into Kubernetes manifests:
//! - Ancestor-stack placement resolution against a context registry
//! - Path accumulation with scalar and list slots
//! - Declarative YAML node sources with did-you-mean kind lookup
//! - Non-fatal overwrite diagnostics alongside fatal placement errors

pub mod compiler;
pub mod emit;
pub mod error;
pub mod source;
pub mod warning;

mod accumulate;
mod frame;
mod resolver;

pub use compiler::{Compilation, Compiler};
pub use error::{CompileError, EngineError, Result, SourceError};
pub use source::{build_tree, load_trees, parse_sources, NodeSource};
pub use warning::CompileWarning;
