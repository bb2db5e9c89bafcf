//! Embedding contexts and their disambiguators

use serde::{Deserialize, Serialize};

use crate::identity::TypeIdentity;
use crate::path::PathExpr;

/// Whether a placement fills a single slot or accumulates into an array
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    #[default]
    Scalar,
    List,
}

impl Arity {
    pub fn is_list(self) -> bool {
        matches!(self, Arity::List)
    }
}

/// Discriminator carried by contexts that compete for the same ancestor.
///
/// Families of contexts sharing one parent need a way to tell their slots
/// apart. An `Alias` is selected through an optional named boolean prop
/// (`readinessProbe: true` on a probe); a `Flag` is an explicit closed tag
/// (`scaleUp` vs `scaleDown` on scaling rules). Selection semantics are
/// identical; the distinction is kept for data fidelity and error messages.
/// At most one member of a family may be marked `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum Disambiguator {
    Alias {
        name: String,
        #[serde(default)]
        default: bool,
    },
    Flag {
        name: String,
        #[serde(default)]
        default: bool,
    },
}

impl Disambiguator {
    /// Non-default alias
    pub fn alias(name: impl Into<String>) -> Self {
        Self::Alias {
            name: name.into(),
            default: false,
        }
    }

    /// Alias selected when the author supplies no discriminator
    pub fn default_alias(name: impl Into<String>) -> Self {
        Self::Alias {
            name: name.into(),
            default: true,
        }
    }

    /// Non-default flag
    pub fn flag(name: impl Into<String>) -> Self {
        Self::Flag {
            name: name.into(),
            default: false,
        }
    }

    /// The discriminator name the author supplies to select this slot
    pub fn name(&self) -> &str {
        match self {
            Self::Alias { name, .. } | Self::Flag { name, .. } => name,
        }
    }

    /// Whether this member is selected when no discriminator is supplied
    pub fn is_default(&self) -> bool {
        match self {
            Self::Alias { default, .. } | Self::Flag { default, .. } => *default,
        }
    }

    /// `"alias"` or `"flag"`, for diagnostics
    pub fn kind_str(&self) -> &'static str {
        match self {
            Self::Alias { .. } => "alias",
            Self::Flag { .. } => "flag",
        }
    }
}

/// A registered embedding rule: a node of some type may nest under an
/// ancestor of `parent`, its value landing at `path` with the given arity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Ancestor type this context applies under
    pub parent: TypeIdentity,

    /// Field path of the slot, relative to the ancestor's object
    pub path: PathExpr,

    /// Scalar slot or accumulating list
    pub arity: Arity,

    /// Discriminator, present when several contexts share `parent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disambiguator: Option<Disambiguator>,
}

impl Context {
    pub fn new(parent: impl Into<TypeIdentity>, path: PathExpr, arity: Arity) -> Self {
        Self {
            parent: parent.into(),
            path,
            arity,
            disambiguator: None,
        }
    }

    pub fn with_disambiguator(mut self, disambiguator: Disambiguator) -> Self {
        self.disambiguator = Some(disambiguator);
        self
    }

    /// Discriminator name, if this context belongs to a family
    pub fn selector_name(&self) -> Option<&str> {
        self.disambiguator.as_ref().map(|d| d.name())
    }

    /// Whether this context is its family's default member
    pub fn is_default(&self) -> bool {
        self.disambiguator.as_ref().is_some_and(|d| d.is_default())
    }
}
