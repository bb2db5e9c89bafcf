//! Dotted field paths with list markers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// A single path segment: a field name, optionally marking a list container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathSegment {
    name: String,
    list: bool,
}

impl PathSegment {
    /// Field name of this segment
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this segment traverses a list container
    pub fn is_list(&self) -> bool {
        self.list
    }
}

/// A dotted field path under an ancestor, e.g. `spec.template.spec` or
/// `subsets[].ports`.
///
/// A `[]` suffix marks an intermediate list container: the accumulator
/// descends into the last element of that list, creating the first element
/// on demand. Whether the *terminal* slot is a list comes from the context's
/// arity, never from the path, so `[]` on the last segment is rejected.
/// At most one intermediate list segment is allowed per path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PathExpr {
    segments: Vec<PathSegment>,
}

impl PathExpr {
    /// Parse a path from its text form
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(CoreError::EmptyPath);
        }

        let mut segments = Vec::new();
        for part in text.split('.') {
            let (name, list) = match part.strip_suffix("[]") {
                Some(name) => (name, true),
                None => (part, false),
            };
            if name.is_empty() {
                return Err(CoreError::EmptySegment {
                    path: text.to_string(),
                });
            }
            segments.push(PathSegment {
                name: name.to_string(),
                list,
            });
        }

        let last = segments.last().expect("non-empty path has a last segment");
        if last.list {
            return Err(CoreError::TrailingListMarker {
                path: text.to_string(),
            });
        }
        if segments.iter().filter(|s| s.list).count() > 1 {
            return Err(CoreError::DeepListPath {
                path: text.to_string(),
            });
        }

        Ok(Self { segments })
    }

    /// Path of a single plain field name
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment {
                name: name.into(),
                list: false,
            }],
        }
    }

    /// The parsed segments, in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether the path traverses an intermediate list container
    pub fn crosses_list(&self) -> bool {
        self.segments.iter().any(|s| s.list)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&segment.name)?;
            if segment.list {
                f.write_str("[]")?;
            }
        }
        Ok(())
    }
}

impl FromStr for PathExpr {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PathExpr {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<PathExpr> for String {
    fn from(path: PathExpr) -> String {
        path.to_string()
    }
}
