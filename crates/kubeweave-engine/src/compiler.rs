//! Tree-to-document compilation
//!
//! Walks a declared tree depth-first in declaration order, resolving each
//! node's placement against the live ancestor stack and accumulating the
//! result into a single JSON document per tree.

use serde_json::Value as JsonValue;
use tracing::debug;

use kubeweave_core::TreeNode;
use kubeweave_registry::ContextRegistry;

use crate::accumulate;
use crate::error::CompileError;
use crate::frame::{DocPath, Frame};
use crate::resolver;
use crate::warning::CompileWarning;

/// One compiled document plus the non-fatal diagnostics raised while
/// building it
#[derive(Debug, Clone)]
pub struct Compilation {
    pub document: JsonValue,
    pub warnings: Vec<CompileWarning>,
}

/// Compiles declared trees into manifest documents against one registry
#[derive(Debug, Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r ContextRegistry,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r ContextRegistry) -> Self {
        Self { registry }
    }

    /// Compile one tree into one document.
    ///
    /// The root's own fields become the document verbatim; every descendant
    /// is resolved against the ancestor stack and written at its slot. Any
    /// resolution failure aborts the whole compilation: a tree either
    /// compiles completely or not at all.
    pub fn compile(&self, root: &TreeNode) -> Result<Compilation, CompileError> {
        debug!(root = %root.id(), "compiling tree");

        let mut document = root.value();
        let mut warnings = Vec::new();
        let mut stack = vec![Frame::new(root.id().clone(), DocPath::root())];

        for child in root.children() {
            self.place(child, &mut stack, &mut document, &mut warnings)?;
        }

        Ok(Compilation { document, warnings })
    }

    /// Compile a batch of trees, stopping at the first failure
    pub fn compile_all(&self, roots: &[TreeNode]) -> Result<Vec<Compilation>, CompileError> {
        roots.iter().map(|root| self.compile(root)).collect()
    }

    fn place(
        &self,
        node: &TreeNode,
        stack: &mut Vec<Frame>,
        document: &mut JsonValue,
        warnings: &mut Vec<CompileWarning>,
    ) -> Result<(), CompileError> {
        let placement = resolver::resolve(self.registry, node, stack)?;
        let base = stack[placement.frame].at.clone();
        let applied = accumulate::apply(
            document,
            &base,
            &placement.path,
            node.value(),
            placement.arity,
            node.id(),
        );
        warnings.extend(applied.warnings);

        // the node's frame stays on the stack for its whole subtree, so
        // descendants can resolve against it or any outer ancestor
        stack.push(Frame::new(node.id().clone(), applied.at));
        for child in node.children() {
            self.place(child, stack, document, warnings)?;
        }
        stack.pop();
        Ok(())
    }
}
