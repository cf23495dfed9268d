// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena nodes and their read-only view.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect};

use crate::types::{NodeFlags, NodeId, Quadrant};
use crate::util::midpoint;

/// A stored point and whether the last filter kept it.
#[derive(Clone, Debug)]
pub(crate) struct Member<P> {
    pub(crate) point: P,
    pub(crate) active: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<P> {
    pub(crate) bounds: Rect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: [Option<NodeId>; 4],
    pub(crate) flags: NodeFlags,
    pub(crate) depth: u32,
    // Leaf only. The first member is the co-location reference.
    pub(crate) members: Vec<Member<P>>,
    pub(crate) anchor: Point,
    pub(crate) mass: usize,
    pub(crate) centroid: Point,
}

impl<P> Node<P> {
    pub(crate) fn new(bounds: Rect, parent: Option<NodeId>, depth: u32) -> Self {
        Self {
            bounds,
            parent,
            children: [None; 4],
            flags: NodeFlags::LEAF,
            depth,
            members: Vec::new(),
            anchor: Point::ZERO,
            mass: 0,
            centroid: midpoint(&bounds),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.flags.contains(NodeFlags::LEAF)
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.flags.contains(NodeFlags::ACTIVE)
    }

    /// Store the aggregate and keep `ACTIVE` and the neutral centroid in step
    /// with the mass.
    pub(crate) fn set_aggregate(&mut self, mass: usize, centroid: Point) {
        self.mass = mass;
        if mass > 0 {
            self.centroid = centroid;
            self.flags.insert(NodeFlags::ACTIVE);
        } else {
            self.centroid = midpoint(&self.bounds);
            self.flags.remove(NodeFlags::ACTIVE);
        }
    }
}

/// Borrowed view of one node of a [`Tree`](crate::Tree).
///
/// Returned by [`Tree::root`](crate::Tree::root), [`Tree::node`](crate::Tree::node),
/// and [`Tree::cut`](crate::Tree::cut). It is cheap to copy.
pub struct NodeRef<'a, P> {
    pub(crate) arena: &'a [Node<P>],
    pub(crate) id: NodeId,
}

impl<P> Clone for NodeRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for NodeRef<'_, P> {}

impl<P> PartialEq for NodeRef<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && core::ptr::eq(self.arena, other.arena)
    }
}

impl<P> fmt::Debug for NodeRef<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("bounds", &self.bounds())
            .field("mass", &self.mass())
            .field("centroid", &self.centroid())
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

impl<'a, P> NodeRef<'a, P> {
    #[inline]
    fn node(&self) -> &'a Node<P> {
        &self.arena[self.id.idx()]
    }

    #[inline]
    fn at(&self, id: NodeId) -> Self {
        Self {
            arena: self.arena,
            id,
        }
    }

    /// Identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Region covered by this node.
    pub fn bounds(&self) -> Rect {
        self.node().bounds
    }

    /// Mass-weighted average of the active points below this node.
    ///
    /// For an inactive node this is the center of its bounds.
    pub fn centroid(&self) -> Point {
        self.node().centroid
    }

    /// Number of active points below this node.
    pub fn mass(&self) -> usize {
        self.node().mass
    }

    /// True when at least one point below this node is active.
    pub fn is_active(&self) -> bool {
        self.node().is_active()
    }

    /// True when this node holds a point cluster rather than children.
    pub fn is_leaf(&self) -> bool {
        self.node().is_leaf()
    }

    /// Structural and activity flags.
    pub fn flags(&self) -> NodeFlags {
        self.node().flags
    }

    /// Distance from the root, which has depth `0`.
    pub fn depth(&self) -> u32 {
        self.node().depth
    }

    /// Enclosing node, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|p| self.at(p))
    }

    /// Root of the tree this node belongs to.
    pub fn root(&self) -> Self {
        self.at(NodeId::ROOT)
    }

    /// Child in the given quadrant, if it was ever populated.
    pub fn child(&self, q: Quadrant) -> Option<Self> {
        self.node().children[q.index()].map(|c| self.at(c))
    }

    /// Present children in quadrant order.
    pub fn children(&self) -> impl Iterator<Item = (Quadrant, Self)> + use<'a, P> {
        let this = *self;
        Quadrant::ALL
            .into_iter()
            .filter_map(move |q| this.child(q).map(|c| (q, c)))
    }

    /// Active points stored directly in this leaf. Empty for internal nodes.
    pub fn local_points(&self) -> impl Iterator<Item = &'a P> + use<'a, P> {
        self.node()
            .members
            .iter()
            .filter(|m| m.active)
            .map(|m| &m.point)
    }

    /// Every active point below this node, in depth-first quadrant order.
    pub fn active_points(&self) -> Vec<&'a P> {
        let mut out = Vec::with_capacity(self.mass());
        self.collect_active_points(&mut out);
        out
    }

    /// Append every active point below this node to `out`.
    ///
    /// Inactive subtrees are skipped without being visited.
    pub fn collect_active_points(&self, out: &mut Vec<&'a P>) {
        if !self.is_active() {
            return;
        }
        if self.is_leaf() {
            out.extend(self.local_points());
            return;
        }
        for (_, child) in self.children() {
            child.collect_active_points(out);
        }
    }

    /// True when `other` lies strictly below this node.
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        let mut cur = other.node().parent;
        while let Some(id) = cur {
            if id == self.id {
                return true;
            }
            cur = self.arena[id.idx()].parent;
        }
        false
    }
}
