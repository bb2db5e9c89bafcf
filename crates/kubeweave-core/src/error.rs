//! Core error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Empty path expression")]
    EmptyPath,

    #[error("Path '{path}' contains an empty segment")]
    EmptySegment { path: String },

    #[error("Path '{path}' marks its terminal segment as a list; the slot arity decides that")]
    TrailingListMarker { path: String },

    #[error("Path '{path}' crosses more than one intermediate list segment")]
    DeepListPath { path: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
