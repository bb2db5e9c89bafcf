//! Declared tree nodes

use serde_json::{Map, Value as JsonValue};

use crate::context::Arity;
use crate::identity::TypeIdentity;
use crate::path::PathExpr;

/// Author-supplied fallback placement for a node without a usable
/// registered context: a literal path under the immediate parent, plus the
/// slot's arity. Registered contexts always win over a keyed slot.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedSlot {
    pub path: PathExpr,
    pub arity: Arity,
}

/// A node in a declared tree.
///
/// Carries the schema type identity, the node's own already-resolved field
/// values, an optional disambiguator selection, an optional keyed fallback
/// slot, and the ordered child nodes. Trees are constructed once (by the
/// schema layer or the builder methods here) and consumed read-only by the
/// compiler; compilation output is always a fresh document.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    id: TypeIdentity,
    own_fields: Map<String, JsonValue>,
    selector: Option<String>,
    slot: Option<KeyedSlot>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<TypeIdentity>) -> Self {
        Self {
            id: id.into(),
            own_fields: Map::new(),
            selector: None,
            slot: None,
            children: Vec::new(),
        }
    }

    /// Set one direct field value
    pub fn field(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.own_fields.insert(name.into(), value);
        self
    }

    /// Merge a map of direct field values, later keys overriding earlier ones
    pub fn with_fields(mut self, fields: Map<String, JsonValue>) -> Self {
        self.own_fields.extend(fields);
        self
    }

    /// Select a slot by disambiguator name (`readinessProbe`, `scaleUp`, ...)
    pub fn select(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Place this node at a literal scalar key when no context applies
    pub fn at_key(mut self, path: PathExpr) -> Self {
        self.slot = Some(KeyedSlot {
            path,
            arity: Arity::Scalar,
        });
        self
    }

    /// Append this node to a literal list key when no context applies
    pub fn append_key(mut self, path: PathExpr) -> Self {
        self.slot = Some(KeyedSlot {
            path,
            arity: Arity::List,
        });
        self
    }

    /// Append a child node; sibling order is placement order
    pub fn child(mut self, node: TreeNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn id(&self) -> &TypeIdentity {
        &self.id
    }

    pub fn own_fields(&self) -> &Map<String, JsonValue> {
        &self.own_fields
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn slot(&self) -> Option<&KeyedSlot> {
        self.slot.as_ref()
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    /// The JSON value this node contributes to the document
    pub fn value(&self) -> JsonValue {
        JsonValue::Object(self.own_fields.clone())
    }
}
