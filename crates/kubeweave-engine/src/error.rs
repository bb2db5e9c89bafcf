//! Compiler error types

use kubeweave_core::CoreError;
use kubeweave_registry::RegistryError;
use miette::Diagnostic;
use thiserror::Error;

/// Fatal placement failures. Any of these aborts the whole compilation;
/// a partially built document is never returned.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("No placement is registered for '{identity}' and the node carries no key")]
    #[diagnostic(
        code(kubeweave::compile::unknown_identity),
        help("register a context for this type or place the node with an explicit `key`")
    )]
    UnknownIdentity { identity: String },

    #[error(
        "'{identity}' cannot be placed here: none of its registered parents \
         ({parents}) is an ancestor (ancestors in scope: {ancestors})"
    )]
    #[diagnostic(
        code(kubeweave::compile::no_matching_ancestor),
        help("move the node under one of its registered parents or give it an explicit `key`")
    )]
    NoMatchingAncestor {
        identity: String,
        parents: String,
        ancestors: String,
    },

    #[error(
        "Placement of '{identity}' under '{ancestor}' is ambiguous: \
         pick one of {options}"
    )]
    #[diagnostic(
        code(kubeweave::compile::ambiguous_placement),
        help("set `as: <name>` on the node, or mark one registry entry as the default")
    )]
    AmbiguousPlacement {
        identity: String,
        ancestor: String,
        options: String,
    },

    #[error(
        "Selector '{selector}' does not name a slot for '{identity}' under \
         '{ancestor}' (known selectors: {options})"
    )]
    #[diagnostic(code(kubeweave::compile::unknown_selector))]
    UnknownSelector {
        identity: String,
        ancestor: String,
        selector: String,
        options: String,
    },
}

/// Errors raised while turning source documents into node trees
#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("Node document {index} is invalid: {source}")]
    #[diagnostic(code(kubeweave::source::parse))]
    Parse {
        index: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("A node must declare a `kind` or be placed with a `key`")]
    #[diagnostic(code(kubeweave::source::missing_kind))]
    MissingKind,

    #[error("Invalid `key` path: {0}")]
    #[diagnostic(code(kubeweave::source::key_path))]
    Key(#[from] CoreError),

    #[error(transparent)]
    #[diagnostic(code(kubeweave::source::kind))]
    Registry(#[from] RegistryError),
}

/// Umbrella error for the full source-to-manifest pipeline
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
