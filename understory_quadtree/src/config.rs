// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction options for [`Tree`](crate::Tree).

use kurbo::Rect;

use crate::error::{Error, Result};
use crate::util::is_finite_rect;

/// Default per-axis co-location distance.
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Options used when building a [`Tree`](crate::Tree).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TreeConfig {
    /// Two points whose coordinates differ by less than this on both axes
    /// share a leaf.
    pub epsilon: f64,
    /// Root bounds. When `None` the envelope of the input points is used,
    /// extended to a square from its minimum corner.
    pub bounds: Option<Rect>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            bounds: None,
        }
    }
}

impl TreeConfig {
    /// Replace the co-location distance.
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Use explicit root bounds instead of the point envelope.
    ///
    /// Explicit bounds are taken as given. Squareness (and therefore the
    /// exact four-to-one area ratio between levels) is only guaranteed for
    /// square bounds.
    pub const fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::Configuration(
                "epsilon must be finite and greater than zero",
            ));
        }
        if let Some(b) = self.bounds {
            if !is_finite_rect(&b) {
                return Err(Error::Configuration("bounds must be finite"));
            }
            if b.x1 < b.x0 || b.y1 < b.y0 {
                return Err(Error::Configuration("bounds must not be inverted"));
            }
        }
        Ok(())
    }
}
