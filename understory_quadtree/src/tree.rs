// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, insertion, aggregates, filtering.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::accessor::PointAccessor;
use crate::aggregate::{self, Aggregate};
use crate::config::TreeConfig;
use crate::cut::Cut;
use crate::error::{Error, Result};
use crate::node::{Member, Node, NodeRef};
use crate::types::{NodeFlags, NodeId, Quadrant};
use crate::util::{abs_diff, contains, envelope, midpoint, quadrant_bounds, squarify};

/// Adaptive point quadtree with weighted centroids.
///
/// Points are opaque values of type `P`; their coordinates come from the
/// accessor `A`. See the [crate docs](crate) for an overview.
pub struct Tree<P, A> {
    arena: Vec<Node<P>>,
    accessor: A,
    epsilon: f64,
    bounds: Rect,
    len: usize,
}

impl<P, A> fmt::Debug for Tree<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves = self.arena.iter().filter(|n| n.is_leaf()).count();
        f.debug_struct("Tree")
            .field("bounds", &self.bounds)
            .field("epsilon", &self.epsilon)
            .field("points", &self.len)
            .field("active", &self.arena[0].mass)
            .field("nodes_total", &self.arena.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}

impl<P, A: PointAccessor<P>> Tree<P, A> {
    /// Build a tree from `points`.
    ///
    /// Without explicit bounds the root covers the envelope of the points,
    /// extended to a square from its minimum corner. Fails with
    /// [`Error::Configuration`] for an invalid epsilon or bounds, or when there
    /// are no points and no bounds, and with [`Error::OutOfBounds`] when a point
    /// has non-finite coordinates or lies outside explicit bounds. Nothing is
    /// indexed unless every check passes.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "quadtree::new"))]
    pub fn new(points: impl IntoIterator<Item = P>, accessor: A, config: TreeConfig) -> Result<Self> {
        config.validate()?;
        let points: Vec<P> = points.into_iter().collect();
        for p in &points {
            let (x, y) = accessor.xy_of(p);
            if !(x.is_finite() && y.is_finite()) {
                return Err(Error::OutOfBounds { x, y });
            }
        }
        let bounds = match config.bounds {
            Some(b) => b,
            None => {
                let env = envelope(points.iter().map(|p| accessor.xy_of(p))).ok_or(
                    Error::Configuration("no points and no bounds to derive the root from"),
                )?;
                squarify(env)
            }
        };
        let mut tree = Self {
            arena: vec![Node::new(bounds, None, 0)],
            accessor,
            epsilon: config.epsilon,
            bounds,
            len: 0,
        };
        for p in &points {
            tree.check_in_bounds(p)?;
        }
        tree.index_all(points)?;
        Ok(tree)
    }

    /// Insert one point and refresh every aggregate.
    ///
    /// The new point is active until the next [`filter`](Self::filter).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "quadtree::add"))]
    pub fn add(&mut self, point: P) -> Result<()> {
        let (x, y) = self.check_in_bounds(&point)?;
        let changed = self.insert_from(NodeId::ROOT, Member { point, active: true }, x, y)?;
        self.len += 1;
        self.compute_aggregates(changed, true);
        let mut up = self.arena[changed.idx()].parent;
        while let Some(id) = up {
            self.compute_aggregates(id, false);
            up = self.arena[id.idx()].parent;
        }
        Ok(())
    }

    /// Not supported. Rebuild the tree from the remaining points instead,
    /// for example with [`rebuild`](Self::rebuild).
    pub fn remove(&mut self, point: &P) -> Result<()> {
        let _ = point;
        Err(Error::UnsupportedOperation(
            "single points cannot be removed; rebuild the tree",
        ))
    }

    /// Mark as active exactly the points for which `predicate` returns `true`
    /// and refresh every aggregate.
    ///
    /// Each call starts from the full point set, so filters do not compound.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "quadtree::filter"))]
    pub fn filter(&mut self, mut predicate: impl FnMut(&P) -> bool) {
        self.filter_node(NodeId::ROOT, &mut predicate);
    }

    /// Level-of-detail cut with the default [`Footprint`](crate::Footprint).
    ///
    /// Returns the coarsest ancestor-disjoint set of active nodes whose
    /// footprint is at most `size_threshold` and whose centroid lies in
    /// `viewport`. See [`Cut`] for the exact rules.
    pub fn cut(&self, viewport: Rect, size_threshold: f64) -> Vec<NodeRef<'_, P>> {
        self.cut_with(Cut::new(viewport, size_threshold))
    }

    /// Level-of-detail cut with explicit options.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "quadtree::cut"))]
    pub fn cut_with(&self, mut cut: Cut) -> Vec<NodeRef<'_, P>> {
        let nodes = self.aggregate(&mut cut);
        #[cfg(feature = "tracing")]
        tracing::debug!(nodes = nodes.len(), "cut");
        nodes
    }

    /// Discard every point and start over from the original bounds.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.arena.push(Node::new(self.bounds, None, 0));
        self.len = 0;
    }

    /// Replace the point set, keeping bounds, epsilon, and accessor.
    ///
    /// Every point is checked first; on error the tree is unchanged.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "quadtree::rebuild"))]
    pub fn rebuild(&mut self, points: impl IntoIterator<Item = P>) -> Result<()> {
        let points: Vec<P> = points.into_iter().collect();
        for p in &points {
            self.check_in_bounds(p)?;
        }
        self.clear();
        self.index_all(points)
    }
}

impl<P, A> Tree<P, A> {
    /// Run a custom fold over the whole tree.
    ///
    /// Returns `agg.init()` when the root itself is filtered out.
    pub fn aggregate<'a, S>(&'a self, agg: &mut S) -> S::State
    where
        P: 'a,
        S: Aggregate<'a, P> + ?Sized,
    {
        aggregate::aggregate(self.root(), agg)
    }

    /// The root node.
    pub fn root(&self) -> NodeRef<'_, P> {
        NodeRef {
            arena: &self.arena,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, P>> {
        (id.idx() < self.arena.len()).then_some(NodeRef {
            arena: &self.arena,
            id,
        })
    }

    /// Every active point, in depth-first quadrant order.
    pub fn active_points(&self) -> Vec<&P> {
        self.root().active_points()
    }

    /// Every stored point, active or not.
    pub fn points(&self) -> impl Iterator<Item = &P> + '_ {
        self.arena
            .iter()
            .flat_map(|n| n.members.iter())
            .map(|m| &m.point)
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no point is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of active points.
    pub fn active_len(&self) -> usize {
        self.arena[0].mass
    }

    /// Root bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Per-axis co-location distance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// The coordinate accessor.
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Number of materialized nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Depth of the deepest node. A lone root has depth `0`.
    pub fn depth(&self) -> u32 {
        self.arena.iter().map(|n| n.depth).max().unwrap_or(0)
    }
}

impl<P, A: PointAccessor<P>> Tree<P, A> {
    fn check_in_bounds(&self, p: &P) -> Result<(f64, f64)> {
        let (x, y) = self.accessor.xy_of(p);
        if x.is_finite() && y.is_finite() && contains(&self.bounds, x, y) {
            Ok((x, y))
        } else {
            Err(Error::OutOfBounds { x, y })
        }
    }

    fn index_all(&mut self, points: Vec<P>) -> Result<()> {
        for point in points {
            let (x, y) = self.accessor.xy_of(&point);
            self.insert_from(NodeId::ROOT, Member { point, active: true }, x, y)?;
            self.len += 1;
        }
        self.compute_aggregates(NodeId::ROOT, true);
        Ok(())
    }

    /// Route `member` down from `start` and store it in a leaf.
    ///
    /// Returns the highest node whose subtree changed: the first leaf that had
    /// to be converted on the way, or else the leaf that received the point.
    fn insert_from(&mut self, start: NodeId, member: Member<P>, x: f64, y: f64) -> Result<NodeId> {
        let mut id = start;
        let mut converted = None;
        loop {
            let node = &self.arena[id.idx()];
            if !node.is_leaf() {
                id = self.child_for(id, x, y);
                continue;
            }
            if node.members.is_empty() {
                let node = &mut self.arena[id.idx()];
                node.anchor = Point::new(x, y);
                node.members.push(member);
                return Ok(converted.unwrap_or(id));
            }
            if abs_diff(x, node.anchor.x) < self.epsilon && abs_diff(y, node.anchor.y) < self.epsilon
            {
                self.arena[id.idx()].members.push(member);
                return Ok(converted.unwrap_or(id));
            }
            self.convert(id)?;
            converted.get_or_insert(id);
        }
    }

    /// Turn a populated leaf into an internal node and push its points down.
    fn convert(&mut self, id: NodeId) -> Result<()> {
        let node = &mut self.arena[id.idx()];
        if !node.is_leaf() {
            return Err(Error::InvariantViolation("node is already internal"));
        }
        if node.members.is_empty() {
            return Err(Error::InvariantViolation("cannot split an empty leaf"));
        }
        node.flags.remove(NodeFlags::LEAF);
        node.anchor = Point::ZERO;
        let members = core::mem::take(&mut node.members);
        #[cfg(feature = "tracing")]
        tracing::trace!(node = id.0, points = members.len(), "split leaf");
        for member in members {
            let (x, y) = self.accessor.xy_of(&member.point);
            self.insert_from(id, member, x, y)?;
        }
        Ok(())
    }

    /// Child of internal node `id` that covers `(x, y)`, created on demand.
    fn child_for(&mut self, id: NodeId, x: f64, y: f64) -> NodeId {
        let parent = &self.arena[id.idx()];
        let mid = midpoint(&parent.bounds);
        let q = Quadrant::select(x, y, mid.x, mid.y);
        if let Some(child) = parent.children[q.index()] {
            return child;
        }
        let child = Node::new(quadrant_bounds(&parent.bounds, q), Some(id), parent.depth + 1);
        let child_id = NodeId::new(self.arena.len());
        self.arena.push(child);
        self.arena[id.idx()].children[q.index()] = Some(child_id);
        child_id
    }

    /// Refresh mass, centroid, and activity of `id`, optionally of its whole
    /// subtree first.
    fn compute_aggregates(&mut self, id: NodeId, recurse: bool) {
        let node = &self.arena[id.idx()];
        if node.is_leaf() {
            let mut sum = Point::ZERO;
            let mut n = 0_usize;
            for m in node.members.iter().filter(|m| m.active) {
                let (x, y) = self.accessor.xy_of(&m.point);
                sum.x += x;
                sum.y += y;
                n += 1;
            }
            let centroid = if n > 0 {
                Point::new(sum.x / n as f64, sum.y / n as f64)
            } else {
                Point::ZERO
            };
            self.arena[id.idx()].set_aggregate(n, centroid);
            return;
        }

        let children = node.children;
        let mut mass = 0_usize;
        let mut centroid = Point::ZERO;
        for child in children.into_iter().flatten() {
            if recurse {
                self.compute_aggregates(child, true);
            }
            let c = &self.arena[child.idx()];
            if !c.is_active() {
                continue;
            }
            let total = (mass + c.mass) as f64;
            let keep = mass as f64 / total;
            let take = c.mass as f64 / total;
            centroid = Point::new(
                centroid.x * keep + c.centroid.x * take,
                centroid.y * keep + c.centroid.y * take,
            );
            mass += c.mass;
        }
        self.arena[id.idx()].set_aggregate(mass, centroid);
    }

    fn filter_node<F: FnMut(&P) -> bool>(&mut self, id: NodeId, predicate: &mut F) {
        let node = &mut self.arena[id.idx()];
        if node.is_leaf() {
            for m in &mut node.members {
                m.active = predicate(&m.point);
            }
        } else {
            let children = node.children;
            for child in children.into_iter().flatten() {
                self.filter_node(child, predicate);
            }
        }
        self.compute_aggregates(id, false);
    }
}
