//! Registry error types

use kubeweave_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Context for '{child}' names unregistered parent type '{parent}'")]
    UnknownParent { child: String, parent: String },

    #[error("Invalid placement path '{path}' declared for '{child}': {source}")]
    InvalidPath {
        child: String,
        path: String,
        source: CoreError,
    },

    #[error(
        "Contexts for '{child}' under '{parent}' declare more than one default (\
         '{first}' and '{second}')"
    )]
    DuplicateDefault {
        child: String,
        parent: String,
        first: String,
        second: String,
    },

    #[error("Contexts for '{child}' under '{parent}' reuse selector name '{name}'")]
    DuplicateSelector {
        child: String,
        parent: String,
        name: String,
    },

    #[error(
        "Contexts for '{child}' under '{parent}' mix alias and flag disambiguators; \
         a family must use one kind"
    )]
    MixedDisambiguators { child: String, parent: String },

    #[error(
        "Type '{child}' has {count} contexts under '{parent}' but at least one \
         carries no disambiguator"
    )]
    BareFamilyMember {
        child: String,
        parent: String,
        count: usize,
    },

    #[error("Unknown kind '{name}'{}", format_suggestions(.suggestions))]
    UnknownKind {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Kind '{name}' is ambiguous; use a full identity: {}", .candidates.join(", "))]
    AmbiguousKind {
        name: String,
        candidates: Vec<String>,
    },

    #[error("Failed to parse registry file: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse registry file: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        let quoted: Vec<String> = suggestions.iter().map(|s| format!("`{s}`")).collect();
        format!(". Did you mean {}?", quoted.join(" or "))
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
