// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for tree construction and mutation.

use thiserror::Error;

/// Errors reported by [`Tree`](crate::Tree) operations.
///
/// Every check runs before the tree is touched, so an `Err` leaves the tree
/// exactly as it was.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// Construction options cannot produce a usable tree.
    #[error("invalid configuration: {0}")]
    Configuration(&'static str),

    /// An internal structural precondition was broken. Not reachable through
    /// the public API.
    #[error("invariant violation: {0}")]
    InvariantViolation(&'static str),

    /// The operation is deliberately not provided.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// A point has non-finite coordinates or lies outside the root bounds.
    #[error("point ({x}, {y}) is outside the tree bounds")]
    OutOfBounds {
        /// Horizontal coordinate reported by the accessor.
        x: f64,
        /// Vertical coordinate reported by the accessor.
        y: f64,
    },
}

/// Result alias for quadtree operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
