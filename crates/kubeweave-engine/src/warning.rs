//! Non-fatal compile diagnostics

use std::fmt;

/// A diagnostic surfaced alongside a successful compilation.
///
/// Warnings never abort a compile; they flag shapes that are almost always
/// author mistakes even though the output document is well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileWarning {
    /// Two placements wrote the same scalar slot; the last one won
    DuplicateScalarWrite { identity: String, path: String },

    /// A path descended through an existing non-container value, which was
    /// replaced by a fresh container
    ClobberedValue { identity: String, path: String },
}

impl CompileWarning {
    /// Document path the warning refers to
    pub fn path(&self) -> &str {
        match self {
            Self::DuplicateScalarWrite { path, .. } | Self::ClobberedValue { path, .. } => path,
        }
    }
}

impl fmt::Display for CompileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateScalarWrite { identity, path } => write!(
                f,
                "'{identity}' overwrote an existing value at '{path}' (last write wins)"
            ),
            Self::ClobberedValue { identity, path } => write!(
                f,
                "placing '{identity}' replaced a non-container value at '{path}'"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = CompileWarning::DuplicateScalarWrite {
            identity: "io.k8s.api.core.v1.PodSpec".to_string(),
            path: "spec".to_string(),
        };
        let text = warning.to_string();
        assert!(text.contains("last write wins"));
        assert!(text.contains("'spec'"));
        assert_eq!(warning.path(), "spec");
    }
}
