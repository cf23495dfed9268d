// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a Kurbo-native adaptive point quadtree for level-of-detail clustering.
//!
//! Understory Quadtree indexes a dynamic set of 2D points and derives, on demand, a *cut*:
//! a small set of representative nodes appropriate to a viewport and a maximum node size.
//! Typical consumers are map and chart views that draw one marker per returned node,
//! a single marker when its mass is one and a cluster marker otherwise.
//!
//! - Points are opaque values; coordinates come from a [`PointAccessor`].
//! - Points closer than `epsilon` on both axes to a leaf's first point share that leaf.
//! - Every node keeps the count (mass) and weighted centroid of the active points below it.
//! - [`Tree::filter`] changes which points are active and refreshes those aggregates.
//! - [`Tree::cut`] extracts the coarsest ancestor-disjoint node set that fits a size bound.
//! - [`Tree::aggregate`] runs any five-stage [`Aggregate`] fold over the tree.
//!
//! ## Structure
//!
//! Nodes live in a contiguous arena and refer to each other by [`NodeId`]. A node is
//! created the first time a point lands in its quadrant. Children always split their
//! parent at the midpoint, so widths and heights halve exactly per level. Without
//! explicit bounds the root covers the envelope of the initial points, extended to a
//! square from its minimum corner, which keeps every node square.
//!
//! A leaf becomes internal, for good, the first time a point arrives that is not within
//! `epsilon` of the leaf's first point; its points are then pushed down into children.
//! Points are never removed individually: [`Tree::remove`] reports
//! [`Error::UnsupportedOperation`], and [`Tree::rebuild`] replaces the point set.
//!
//! ## Quadrant order
//!
//! Child slots are ordered bottom-left, bottom-right, top-left, top-right, where
//! "bottom" is the smaller `y`. A coordinate equal to the split goes to the
//! bottom/left side. Folds see children in this order and receive the [`Quadrant`] in
//! [`Aggregate::merge`].
//!
//! ## Concurrency
//!
//! All operations are synchronous. Readers (`cut`, `aggregate`, `active_points`) borrow
//! the tree shared and may run side by side; `add`, `filter`, `clear`, and `rebuild`
//! borrow it exclusively.
//!
//! ## Float semantics
//!
//! Points must have finite coordinates inside the root bounds; others are rejected with
//! [`Error::OutOfBounds`]. Tree depth is not capped: chains of points each just over
//! `epsilon` apart produce deep, narrow paths.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to Kurbo.
//! - `tracing`: spans on the public operations, and events for leaf splits and cut sizes.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quadtree::{Tree, TreeConfig, XyAccessor};
//!
//! let cfg = TreeConfig::default().with_epsilon(0.1);
//! let mut tree = Tree::new(
//!     [Point::new(0.0, 0.0), Point::new(0.01, 0.01)],
//!     XyAccessor,
//!     cfg.with_bounds(Rect::new(0.0, 0.0, 8.0, 8.0)),
//! )
//! .unwrap();
//! tree.add(Point::new(5.0, 5.0)).unwrap();
//!
//! // The first two points share a leaf.
//! assert_eq!(tree.root().mass(), 3);
//!
//! // One node for the whole view when the size bound is loose...
//! let coarse = tree.cut(tree.bounds(), f64::INFINITY);
//! assert_eq!(coarse.len(), 1);
//!
//! // ...and one per cluster when it is tight.
//! let fine = tree.cut(tree.bounds(), 0.0);
//! assert_eq!(fine.len(), 2);
//! assert_eq!(fine[0].active_points().len(), 2);
//!
//! // Deactivate the cluster near the origin.
//! tree.filter(|p| p.x > 1.0);
//! assert_eq!(tree.root().centroid(), Point::new(5.0, 5.0));
//! ```

#![no_std]

extern crate alloc;

pub mod accessor;
pub mod aggregate;
pub mod config;
pub mod cut;
pub mod error;
pub mod node;
pub mod tree;
pub mod types;

mod util;

pub use accessor::{FnAccessor, PointAccessor, XyAccessor};
pub use aggregate::Aggregate;
pub use config::{DEFAULT_EPSILON, TreeConfig};
pub use cut::{Cut, Footprint};
pub use error::{Error, Result};
pub use node::NodeRef;
pub use tree::Tree;
pub use types::{NodeFlags, NodeId, Quadrant};
