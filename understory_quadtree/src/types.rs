// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the quadtree: node identifiers, quadrants, and node flags.

/// Identifier for a node in a [`Tree`](crate::Tree).
///
/// Nodes live in a contiguous arena and are never removed individually, so a
/// `NodeId` stays valid until the tree is cleared or rebuilt. After
/// [`Tree::clear`](crate::Tree::clear) only the root id is live again.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One of the four child slots of an internal node.
///
/// The discriminant is the slot index, and slots are always visited in
/// ascending order. "Bottom" is the half with the smaller `y`, "left" the half
/// with the smaller `x`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    /// Minimum `x`, minimum `y`.
    BottomLeft = 0,
    /// Maximum `x`, minimum `y`.
    BottomRight = 1,
    /// Minimum `x`, maximum `y`.
    TopLeft = 2,
    /// Maximum `x`, maximum `y`.
    TopRight = 3,
}

impl Quadrant {
    /// All quadrants in visitation order.
    pub const ALL: [Self; 4] = [
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopLeft,
        Self::TopRight,
    ];

    /// Pick the quadrant for a coordinate pair given the split point.
    ///
    /// Coordinates equal to the split go to the bottom/left side.
    #[inline]
    pub fn select(x: f64, y: f64, mid_x: f64, mid_y: f64) -> Self {
        match (x > mid_x, y > mid_y) {
            (false, false) => Self::BottomLeft,
            (true, false) => Self::BottomRight,
            (false, true) => Self::TopLeft,
            (true, true) => Self::TopRight,
        }
    }

    /// Slot index in `0..4`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// True for the two quadrants on the maximum-`x` side.
    #[inline]
    pub const fn is_right(self) -> bool {
        matches!(self, Self::BottomRight | Self::TopRight)
    }

    /// True for the two quadrants on the maximum-`y` side.
    #[inline]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

bitflags::bitflags! {
    /// Structural and activity state of a node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node holds a co-located point cluster instead of children.
        const LEAF   = 0b0000_0001;
        /// Node covers at least one active point.
        const ACTIVE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::LEAF
    }
}
