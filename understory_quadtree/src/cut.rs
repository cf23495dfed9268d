// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level-of-detail cuts.
//!
//! A cut is an ancestor-disjoint list of active nodes that stands in for the
//! active point set at a chosen granularity. It is a fold over the tree:
//!
//! - A node is skipped (with its subtree) when it is inactive, when its bounds
//!   do not touch the viewport, or, unless it is the root, when its footprint
//!   is already within the threshold divided by the per-level shrink factor.
//!   Such a node's parent satisfies the threshold too, so the decision is left
//!   to the parent, which yields fewer nodes.
//! - Children's selections are concatenated in quadrant order.
//! - A node whose subtree selected nothing selects itself, provided its
//!   centroid lies in the viewport. A node that only partly overlaps the
//!   viewport and whose centroid falls outside is dropped.
//!
//! A node's footprint is derived from the root bounds and the node's depth,
//! never from its own bounds or from the extent of the points a leaf holds.
//! Sibling bounds can differ in the last bit after the midpoint split, and
//! measuring them directly could prune one sibling while keeping the other,
//! losing the pruned sibling's points. Dividing by a power of two is exact, so
//! every node of a level compares the same way.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::aggregate::Aggregate;
use crate::node::NodeRef;
use crate::types::Quadrant;
use crate::util::{contains, intersects};

/// How the size of a node is measured against the cut threshold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Footprint {
    /// Area of the node bounds. Shrinks by four per level.
    #[default]
    Area,
    /// Width of the node bounds. Shrinks by two per level.
    Width,
}

impl Footprint {
    /// Footprint of `bounds` under this measure.
    pub fn measure(self, bounds: &Rect) -> f64 {
        match self {
            Self::Area => bounds.width() * bounds.height(),
            Self::Width => bounds.width(),
        }
    }

    /// Ratio between a node's footprint and its children's.
    pub const fn shrink_per_level(self) -> f64 {
        match self {
            Self::Area => 4.0,
            Self::Width => 2.0,
        }
    }

    /// Footprint of every node at `depth` below a root covering `root`.
    pub fn measure_at_depth(self, root: &Rect, depth: u32) -> f64 {
        let shrink = self.shrink_per_level();
        let mut m = self.measure(root);
        for _ in 0..depth {
            m /= shrink;
        }
        m
    }
}

/// Options for [`Tree::cut_with`](crate::Tree::cut_with), also usable directly
/// with [`Tree::aggregate`](crate::Tree::aggregate).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cut {
    viewport: Rect,
    size_threshold: f64,
    footprint: Footprint,
}

impl Cut {
    /// Cut limited to `viewport` with nodes no larger than `size_threshold`.
    ///
    /// The viewport is normalized, so its corners may be given in any order.
    pub fn new(viewport: Rect, size_threshold: f64) -> Self {
        Self {
            viewport: Rect::from_points(
                Point::new(viewport.x0, viewport.y0),
                Point::new(viewport.x1, viewport.y1),
            ),
            size_threshold,
            footprint: Footprint::default(),
        }
    }

    /// Measure nodes with `footprint` instead of by area.
    pub const fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    /// The normalized viewport.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Maximum footprint of a selected node.
    pub fn size_threshold(&self) -> f64 {
        self.size_threshold
    }

    /// The footprint measure.
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }
}

impl<'a, P: 'a> Aggregate<'a, P> for Cut {
    type State = Vec<NodeRef<'a, P>>;

    fn filter(&mut self, node: NodeRef<'a, P>) -> bool {
        if !node.is_active() {
            return true;
        }
        if !intersects(&node.bounds(), &self.viewport) {
            return true;
        }
        let depth = node.depth();
        depth > 0
            && self.footprint.measure_at_depth(&node.root().bounds(), depth)
                <= self.size_threshold / self.footprint.shrink_per_level()
    }

    fn init(&mut self) -> Self::State {
        Vec::new()
    }

    fn merge(&mut self, mut state: Self::State, child: Self::State, _: Quadrant) -> Self::State {
        state.extend(child);
        state
    }

    fn finalize(&mut self, mut state: Self::State, node: NodeRef<'a, P>) -> Self::State {
        let c = node.centroid();
        if state.is_empty() && contains(&self.viewport, c.x, c.y) {
            state.push(node);
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tree, TreeConfig, XyAccessor};
    use alloc::vec;

    fn grid_tree() -> Tree<Point, XyAccessor> {
        // One point at the center of each unit cell of a 4x4 grid.
        let mut pts = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                pts.push(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
            }
        }
        let cfg = TreeConfig::default().with_bounds(Rect::new(0.0, 0.0, 4.0, 4.0));
        Tree::new(pts, XyAccessor, cfg).unwrap()
    }

    #[test]
    fn huge_threshold_returns_root() {
        let tree = grid_tree();
        let cut = tree.cut(tree.bounds(), f64::MAX);
        assert_eq!(cut, vec![tree.root()]);
    }

    #[test]
    fn zero_threshold_returns_every_leaf() {
        let tree = grid_tree();
        let cut = tree.cut(tree.bounds(), 0.0);
        assert_eq!(cut.len(), 16);
        assert!(cut.iter().all(|n| n.is_leaf() && n.mass() == 1));
    }

    #[test]
    fn threshold_picks_coarsest_level() {
        let tree = grid_tree();
        // Level-one nodes have area 4, level-two nodes area 1.
        let cut = tree.cut(tree.bounds(), 4.0);
        assert_eq!(cut.len(), 4);
        assert!(cut.iter().all(|n| n.depth() == 1 && n.mass() == 4));

        let cut = tree.cut(tree.bounds(), 3.9);
        assert_eq!(cut.len(), 16);
    }

    #[test]
    fn width_footprint_uses_halving() {
        let tree = grid_tree();
        let by_width = Cut::new(tree.bounds(), 2.0).with_footprint(Footprint::Width);
        let cut = tree.cut_with(by_width);
        assert_eq!(cut.len(), 4);
        assert!(cut.iter().all(|n| n.bounds().width() == 2.0));
    }

    #[test]
    fn level_footprint_ignores_sibling_rounding() {
        let (lo, hi) = (524.560_164_915_883_9, 525.712_980_986_104_1);
        let bounds = Rect::new(lo, lo, hi, hi);
        let w = hi - lo;
        let pts = [
            Point::new(lo + 0.1 * w, lo + 0.1 * w),
            Point::new(lo + 0.9 * w, lo + 0.9 * w),
        ];
        let cfg = TreeConfig::default().with_epsilon(0.01).with_bounds(bounds);
        let tree = Tree::new(pts, XyAccessor, cfg).unwrap();

        let bl = tree.root().child(Quadrant::BottomLeft).unwrap();
        let tr = tree.root().child(Quadrant::TopRight).unwrap();
        // The split rounds, so the two quadrants differ in size.
        assert_ne!(
            Footprint::Area.measure(&bl.bounds()),
            Footprint::Area.measure(&tr.bounds())
        );

        for footprint in [Footprint::Area, Footprint::Width] {
            for quadrant in [bl, tr] {
                let threshold =
                    footprint.shrink_per_level() * footprint.measure(&quadrant.bounds());
                let cut = tree.cut_with(Cut::new(bounds, threshold).with_footprint(footprint));
                let covered: usize = cut.iter().map(|n| n.mass()).sum();
                assert_eq!(covered, tree.active_len(), "{footprint:?} at {threshold}");
            }
        }
    }

    #[test]
    fn measure_at_depth_divides_per_level() {
        let root = Rect::new(0.0, 0.0, 8.0, 4.0);
        assert_eq!(Footprint::Area.measure_at_depth(&root, 0), 32.0);
        assert_eq!(Footprint::Area.measure_at_depth(&root, 2), 2.0);
        assert_eq!(Footprint::Width.measure_at_depth(&root, 3), 1.0);
    }

    #[test]
    fn viewport_limits_selection() {
        let tree = grid_tree();
        let viewport = Rect::new(0.0, 0.0, 1.9, 1.9);
        let cut = tree.cut(viewport, 0.0);
        // Only the bottom-left quadrant reaches the viewport.
        assert_eq!(cut.len(), 4);
        for n in &cut {
            let c = n.centroid();
            assert!(c.x < 2.0 && c.y < 2.0);
        }
    }

    #[test]
    fn centroid_outside_viewport_is_dropped() {
        let tree = grid_tree();
        // Overlaps only the bottom-left quadrant, whose centroid (1, 1) is
        // outside. The root centroid (2, 2) is outside too.
        let viewport = Rect::new(1.2, 1.2, 1.8, 1.8);
        let cut = tree.cut(viewport, 4.0);
        assert!(cut.is_empty());
    }

    #[test]
    fn inverted_viewport_is_normalized() {
        let tree = grid_tree();
        let cut = tree.cut(Rect::new(4.0, 4.0, 0.0, 0.0), f64::MAX);
        assert_eq!(cut, vec![tree.root()]);
    }

    #[test]
    fn inactive_nodes_are_skipped() {
        let mut tree = grid_tree();
        tree.filter(|p| p.x > 2.0 && p.y > 2.0);
        let cut = tree.cut(tree.bounds(), 0.0);
        assert_eq!(cut.len(), 4);
        assert!(cut.iter().all(|n| n.centroid().x > 2.0));
        tree.filter(|_| false);
        assert!(tree.cut(tree.bounds(), 0.0).is_empty());
    }
}
