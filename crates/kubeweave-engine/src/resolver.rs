//! Placement resolution against the ancestor stack

use kubeweave_core::{Arity, Context, PathExpr, TreeNode, TypeIdentity};
use kubeweave_registry::ContextRegistry;

use crate::error::CompileError;
use crate::frame::Frame;

/// A resolved placement: which ancestor frame to apply under, the slot path
/// relative to that frame's object, and the slot arity
#[derive(Debug, Clone)]
pub(crate) struct Placement {
    pub frame: usize,
    pub path: PathExpr,
    pub arity: Arity,
}

/// Select the placement for `node` given the live ancestor stack.
///
/// The innermost frame whose identity parents any of the node's registered
/// contexts wins; outer frames are never consulted once a frame matches,
/// even if disambiguation then fails. The author's keyed slot is a fallback
/// for nodes the registry cannot place at all, applied under the immediate
/// parent frame.
pub(crate) fn resolve(
    registry: &ContextRegistry,
    node: &TreeNode,
    stack: &[Frame],
) -> Result<Placement, CompileError> {
    let contexts = registry.resolve(node.id());

    if contexts.is_empty() {
        return keyed_fallback(node, stack).ok_or_else(|| CompileError::UnknownIdentity {
            identity: node.id().to_string(),
        });
    }

    let matched = stack.iter().enumerate().rev().find_map(|(depth, frame)| {
        let candidates: Vec<&Context> = contexts
            .iter()
            .filter(|context| context.parent == frame.id)
            .collect();
        if candidates.is_empty() {
            None
        } else {
            Some((depth, candidates))
        }
    });

    let Some((depth, candidates)) = matched else {
        return keyed_fallback(node, stack).ok_or_else(|| CompileError::NoMatchingAncestor {
            identity: node.id().to_string(),
            parents: registered_parents(contexts),
            ancestors: join(stack.iter().map(|frame| frame.id.as_str())),
        });
    };

    let context = pick(node, &candidates, &stack[depth].id)?;
    Ok(Placement {
        frame: depth,
        path: context.path.clone(),
        arity: context.arity,
    })
}

/// Disambiguate among contexts that all matched the chosen frame
fn pick<'c>(
    node: &TreeNode,
    candidates: &[&'c Context],
    ancestor: &TypeIdentity,
) -> Result<&'c Context, CompileError> {
    if candidates.len() == 1 {
        // a lone candidate needs no disambiguation; a stray selector on the
        // node is ignored
        return Ok(candidates[0]);
    }

    if let Some(selector) = node.selector() {
        return candidates
            .iter()
            .find(|context| context.selector_name() == Some(selector))
            .copied()
            .ok_or_else(|| CompileError::UnknownSelector {
                identity: node.id().to_string(),
                ancestor: ancestor.to_string(),
                selector: selector.to_string(),
                options: selector_names(candidates),
            });
    }

    let defaults: Vec<&Context> = candidates
        .iter()
        .filter(|context| context.is_default())
        .copied()
        .collect();
    match defaults.as_slice() {
        // registry validation guarantees at most one default per family
        [context] => Ok(context),
        _ => Err(CompileError::AmbiguousPlacement {
            identity: node.id().to_string(),
            ancestor: ancestor.to_string(),
            options: selector_names(candidates),
        }),
    }
}

fn keyed_fallback(node: &TreeNode, stack: &[Frame]) -> Option<Placement> {
    node.slot().map(|slot| Placement {
        frame: stack.len() - 1,
        path: slot.path.clone(),
        arity: slot.arity,
    })
}

fn registered_parents(contexts: &[Context]) -> String {
    let mut parents: Vec<&str> = Vec::new();
    for context in contexts {
        if !parents.contains(&context.parent.as_str()) {
            parents.push(context.parent.as_str());
        }
    }
    join(parents.into_iter())
}

fn selector_names(candidates: &[&Context]) -> String {
    join(candidates.iter().filter_map(|context| context.selector_name()))
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::DocPath;
    use kubeweave_core::Disambiguator;
    use kubeweave_registry::RegistryBuilder;

    const ALPHA: &str = "test.v1.Alpha";
    const BETA: &str = "test.v1.Beta";
    const LEAF: &str = "test.v1.Leaf";
    const WIDE: &str = "test.v1.Wide";
    const TOGGLE: &str = "test.v1.Toggle";

    fn registry() -> ContextRegistry {
        RegistryBuilder::new()
            .resource(ALPHA, "test/v1", "Alpha")
            .scalar(BETA, ALPHA, "beta")
            .scalar(LEAF, ALPHA, "fromAlpha")
            .scalar(LEAF, BETA, "fromBeta")
            .context(
                WIDE,
                ALPHA,
                "first",
                Arity::List,
                Some(Disambiguator::default_alias("first")),
            )
            .context(
                WIDE,
                ALPHA,
                "second",
                Arity::List,
                Some(Disambiguator::alias("second")),
            )
            .context(
                TOGGLE,
                BETA,
                "up",
                Arity::Scalar,
                Some(Disambiguator::flag("up")),
            )
            .context(
                TOGGLE,
                BETA,
                "down",
                Arity::Scalar,
                Some(Disambiguator::flag("down")),
            )
            .finish()
            .unwrap()
    }

    fn frame(id: &str) -> Frame {
        Frame::new(TypeIdentity::from(id), DocPath::root())
    }

    #[test]
    fn test_innermost_ancestor_wins() {
        let registry = registry();
        let stack = vec![frame(ALPHA), frame(BETA)];
        let node = TreeNode::new(LEAF);

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.frame, 1);
        assert_eq!(placement.path.to_string(), "fromBeta");
    }

    #[test]
    fn test_outer_ancestor_used_when_inner_does_not_match() {
        let registry = registry();
        let stack = vec![frame(ALPHA), frame("test.v1.Wrapper")];
        let node = TreeNode::new(LEAF);

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.frame, 0);
        assert_eq!(placement.path.to_string(), "fromAlpha");
    }

    #[test]
    fn test_default_alias_selected_without_selector() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new(WIDE);

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.path.to_string(), "first");
        assert!(placement.arity.is_list());
    }

    #[test]
    fn test_selector_overrides_default() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new(WIDE).select("second");

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.path.to_string(), "second");
    }

    #[test]
    fn test_unknown_selector_reports_options() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new(WIDE).select("third");

        let err = resolve(&registry, &node, &stack).unwrap_err();
        match err {
            CompileError::UnknownSelector { selector, options, .. } => {
                assert_eq!(selector, "third");
                assert!(options.contains("'first'"));
                assert!(options.contains("'second'"));
            }
            other => panic!("expected UnknownSelector, got {other:?}"),
        }
    }

    #[test]
    fn test_flags_without_default_are_ambiguous() {
        let registry = registry();
        let stack = vec![frame(ALPHA), frame(BETA)];
        let node = TreeNode::new(TOGGLE);

        let err = resolve(&registry, &node, &stack).unwrap_err();
        assert!(matches!(err, CompileError::AmbiguousPlacement { .. }));
    }

    #[test]
    fn test_flag_selected_explicitly() {
        let registry = registry();
        let stack = vec![frame(ALPHA), frame(BETA)];
        let node = TreeNode::new(TOGGLE).select("down");

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.path.to_string(), "down");
    }

    #[test]
    fn test_lone_candidate_ignores_selector() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new(BETA).select("whatever");

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.path.to_string(), "beta");
    }

    #[test]
    fn test_keyed_fallback_for_unknown_identity() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new("Item").at_key(PathExpr::parse("extras.notes").unwrap());

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.frame, 0);
        assert_eq!(placement.path.to_string(), "extras.notes");
    }

    #[test]
    fn test_unknown_identity_without_key_fails() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new("Item");

        let err = resolve(&registry, &node, &stack).unwrap_err();
        assert!(matches!(err, CompileError::UnknownIdentity { .. }));
    }

    #[test]
    fn test_registry_placement_wins_over_key() {
        let registry = registry();
        let stack = vec![frame(ALPHA)];
        let node = TreeNode::new(BETA).at_key(PathExpr::parse("elsewhere").unwrap());

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.path.to_string(), "beta");
    }

    #[test]
    fn test_key_used_when_no_ancestor_matches() {
        let registry = registry();
        let stack = vec![frame(BETA)];
        let node = TreeNode::new(WIDE).at_key(PathExpr::parse("stash").unwrap());

        let placement = resolve(&registry, &node, &stack).unwrap();
        assert_eq!(placement.path.to_string(), "stash");
    }

    #[test]
    fn test_no_matching_ancestor_reports_both_sides() {
        let registry = registry();
        let stack = vec![frame(BETA)];
        let node = TreeNode::new(WIDE);

        let err = resolve(&registry, &node, &stack).unwrap_err();
        match err {
            CompileError::NoMatchingAncestor { parents, ancestors, .. } => {
                assert!(parents.contains(ALPHA));
                assert!(ancestors.contains(BETA));
            }
            other => panic!("expected NoMatchingAncestor, got {other:?}"),
        }
    }
}
