//! Core types for Kubeweave
//!
//! This crate defines the vocabulary shared by the registry and the
//! compiler: schema type identities, placement path expressions, context
//! descriptors with their disambiguators, and the declared tree nodes that
//! compilation consumes. It holds no resolution logic of its own.

pub mod context;
pub mod error;
pub mod identity;
pub mod node;
pub mod path;

pub use context::{Arity, Context, Disambiguator};
pub use error::{CoreError, Result};
pub use identity::TypeIdentity;
pub use node::{KeyedSlot, TreeNode};
pub use path::{PathExpr, PathSegment};
