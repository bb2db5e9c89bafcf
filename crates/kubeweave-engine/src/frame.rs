//! Ancestor frames and document cursors

use std::fmt;

use kubeweave_core::TypeIdentity;
use serde_json::{Map, Value as JsonValue};

/// One step from a document node to a child
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Key(String),
    Index(usize),
}

/// Cursor addressing a node inside the output document by replaying steps
/// from the root. A later placement can overwrite part of the region the
/// steps run through (last write wins), so replay rebuilds whatever a write
/// removed instead of assuming the recorded shape survived.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DocPath {
    steps: Vec<Step>,
}

impl DocPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.steps.push(Step::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.steps.push(Step::Index(index));
    }

    /// Resolve the cursor against the document.
    ///
    /// A step can miss only after a later write replaced the container it
    /// runs through, and every such write already raised a warning. Replay
    /// recreates the missing key, element, or container type and carries on,
    /// so the surviving frame keeps addressing a live value.
    pub fn locate<'doc>(&self, root: &'doc mut JsonValue) -> &'doc mut JsonValue {
        let mut current = root;
        for step in &self.steps {
            current = match step {
                Step::Key(key) => {
                    if !current.is_object() {
                        *current = JsonValue::Object(Map::new());
                    }
                    current
                        .as_object_mut()
                        .expect("step target was coerced to an object")
                        .entry(key.clone())
                        .or_insert(JsonValue::Null)
                }
                Step::Index(index) => {
                    if !current.is_array() {
                        *current = JsonValue::Array(Vec::new());
                    }
                    let items = current
                        .as_array_mut()
                        .expect("step target was coerced to an array");
                    while items.len() <= *index {
                        items.push(JsonValue::Object(Map::new()));
                    }
                    &mut items[*index]
                }
            };
        }
        current
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Step::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A live ancestor during the tree walk: its type identity plus the cursor
/// to its in-progress output object
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub id: TypeIdentity,
    pub at: DocPath,
}

impl Frame {
    pub fn new(id: TypeIdentity, at: DocPath) -> Self {
        Self { id, at }
    }
}
