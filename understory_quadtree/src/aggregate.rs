// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic tree folds.
//!
//! An [`Aggregate`] describes a fold in five stages. [`fold`] runs it over a
//! subtree in a single traversal: for each node that is not filtered out it
//! calls `init` and `accumulate` on the way down, then `merge` once per
//! surviving child in quadrant order, then `finalize` on the way back up.
//!
//! The level-of-detail [`Cut`](crate::Cut) is expressed this way, and
//! [`Tree::aggregate`](crate::Tree::aggregate) lets callers run their own.
//! [`Tree::filter`](crate::Tree::filter) is not a fold: it rewrites point
//! activity in place and refreshes aggregates as it unwinds.
//!
//! ```
//! use kurbo::Point;
//! use understory_quadtree::{Aggregate, NodeRef, Quadrant, Tree, TreeConfig, XyAccessor};
//!
//! /// Count the active leaves.
//! struct Leaves;
//!
//! impl<'a, P: 'a> Aggregate<'a, P> for Leaves {
//!     type State = usize;
//!
//!     fn filter(&mut self, node: NodeRef<'a, P>) -> bool {
//!         !node.is_active()
//!     }
//!
//!     fn init(&mut self) -> usize {
//!         0
//!     }
//!
//!     fn accumulate(&mut self, state: usize, node: NodeRef<'a, P>) -> usize {
//!         state + usize::from(node.is_leaf())
//!     }
//!
//!     fn merge(&mut self, state: usize, child: usize, _: Quadrant) -> usize {
//!         state + child
//!     }
//! }
//!
//! let pts = [Point::new(0.0, 0.0), Point::new(9.0, 9.0), Point::new(0.0, 9.0)];
//! let tree = Tree::new(pts, XyAccessor, TreeConfig::default()).unwrap();
//! assert_eq!(tree.aggregate(&mut Leaves), 3);
//! ```

use crate::node::NodeRef;
use crate::types::Quadrant;

/// A five-stage fold over the nodes of a tree.
///
/// Only `init` is required. The other stages default to "visit everything",
/// "no local contribution", "ignore the child", and "no post-processing".
pub trait Aggregate<'a, P: 'a> {
    /// Value folded up the tree.
    type State;

    /// Return `true` to skip `node` and its whole subtree. A skipped node
    /// contributes nothing to its parent and runs no other stage.
    fn filter(&mut self, node: NodeRef<'a, P>) -> bool {
        let _ = node;
        false
    }

    /// Starting state of a node that was not skipped.
    fn init(&mut self) -> Self::State;

    /// Fold in the node's own contribution, before any child is merged.
    fn accumulate(&mut self, state: Self::State, node: NodeRef<'a, P>) -> Self::State {
        let _ = node;
        state
    }

    /// Fold in the state of one surviving child. Called in quadrant order.
    fn merge(&mut self, state: Self::State, child: Self::State, quadrant: Quadrant) -> Self::State {
        let _ = (child, quadrant);
        state
    }

    /// Last stage for a node, after all its children were merged.
    fn finalize(&mut self, state: Self::State, node: NodeRef<'a, P>) -> Self::State {
        let _ = node;
        state
    }
}

/// Fold `agg` over the subtree rooted at `node`.
///
/// Returns `None` when `node` itself is filtered out.
pub fn fold<'a, P, A>(node: NodeRef<'a, P>, agg: &mut A) -> Option<A::State>
where
    P: 'a,
    A: Aggregate<'a, P> + ?Sized,
{
    if agg.filter(node) {
        return None;
    }
    let state = agg.init();
    let mut state = agg.accumulate(state, node);
    for (quadrant, child) in node.children() {
        if let Some(child_state) = fold(child, agg) {
            state = agg.merge(state, child_state, quadrant);
        }
    }
    Some(agg.finalize(state, node))
}

/// Fold `agg` over the subtree rooted at `node`, falling back to `init` when
/// the whole subtree is filtered out.
pub fn aggregate<'a, P, A>(node: NodeRef<'a, P>, agg: &mut A) -> A::State
where
    P: 'a,
    A: Aggregate<'a, P> + ?Sized,
{
    match fold(node, agg) {
        Some(state) => state,
        None => agg.init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, TreeConfig, XyAccessor};
    use alloc::vec;
    use alloc::vec::Vec;
    use kurbo::Point;

    #[derive(Default)]
    struct Trace {
        events: Vec<(&'static str, u32)>,
    }

    impl<'a, P: 'a> Aggregate<'a, P> for Trace {
        type State = ();

        fn filter(&mut self, node: NodeRef<'a, P>) -> bool {
            self.events.push(("filter", node.id().0));
            false
        }

        fn init(&mut self) {}

        fn accumulate(&mut self, (): (), node: NodeRef<'a, P>) {
            self.events.push(("accumulate", node.id().0));
        }

        fn merge(&mut self, (): (), (): (), quadrant: Quadrant) {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Quadrant indices are below four."
            )]
            self.events.push(("merge", quadrant.index() as u32));
        }

        fn finalize(&mut self, (): (), node: NodeRef<'a, P>) {
            self.events.push(("finalize", node.id().0));
        }
    }

    struct SkipEverything;

    impl<'a, P: 'a> Aggregate<'a, P> for SkipEverything {
        type State = Vec<u32>;

        fn filter(&mut self, _: NodeRef<'a, P>) -> bool {
            true
        }

        fn init(&mut self) -> Vec<u32> {
            vec![42]
        }
    }

    /// Keeps borrowed views of the active leaves, for any payload type.
    struct LeafRefs;

    impl<'a, P: 'a> Aggregate<'a, P> for LeafRefs {
        type State = Vec<NodeRef<'a, P>>;

        fn filter(&mut self, node: NodeRef<'a, P>) -> bool {
            !node.is_active()
        }

        fn init(&mut self) -> Self::State {
            Vec::new()
        }

        fn accumulate(&mut self, mut state: Self::State, node: NodeRef<'a, P>) -> Self::State {
            if node.is_leaf() {
                state.push(node);
            }
            state
        }

        fn merge(&mut self, mut state: Self::State, child: Self::State, _: Quadrant) -> Self::State {
            state.extend(child);
            state
        }
    }

    fn leaf_refs<'a, P: 'a, A>(tree: &'a Tree<P, A>) -> Vec<NodeRef<'a, P>> {
        tree.aggregate(&mut LeafRefs)
    }

    #[test]
    fn generic_fold_can_hold_node_views() {
        let pts = [Point::new(0.0, 0.0), Point::new(4.0, 4.0), Point::new(0.0, 4.0)];
        let tree = Tree::new(pts, XyAccessor, TreeConfig::default()).unwrap();
        let leaves = leaf_refs(&tree);
        assert_eq!(leaves.len(), 3);
        assert!(leaves.iter().all(|n| n.is_leaf() && n.mass() == 1));

        let tuples = [(1.0, 1.0), (1.05, 1.05)];
        let tree = Tree::new(tuples, XyAccessor, TreeConfig::default()).unwrap();
        assert_eq!(leaf_refs(&tree), vec![tree.root()]);
    }

    #[test]
    fn stages_run_top_down_then_bottom_up() {
        let pts = [Point::new(0.0, 0.0), Point::new(4.0, 4.0)];
        let tree = Tree::new(pts, XyAccessor, TreeConfig::default()).unwrap();
        let mut trace = Trace::default();
        tree.aggregate(&mut trace);
        // Root (0) has children in bottom-left (1) and top-right (2).
        assert_eq!(
            trace.events,
            vec![
                ("filter", 0),
                ("accumulate", 0),
                ("filter", 1),
                ("accumulate", 1),
                ("finalize", 1),
                ("merge", 0),
                ("filter", 2),
                ("accumulate", 2),
                ("finalize", 2),
                ("merge", 3),
                ("finalize", 0),
            ]
        );
    }

    #[test]
    fn fully_filtered_tree_yields_init() {
        let tree = Tree::new([Point::new(1.0, 1.0)], XyAccessor, TreeConfig::default()).unwrap();
        assert!(fold(tree.root(), &mut SkipEverything).is_none());
        assert_eq!(tree.aggregate(&mut SkipEverything), vec![42]);
    }
}
