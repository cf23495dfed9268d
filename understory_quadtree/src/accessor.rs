// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate accessors.
//!
//! The tree never inspects a point directly. It asks a [`PointAccessor`] for
//! the two coordinates, so any payload type can be indexed as long as the
//! accessor is pure and stable for the lifetime of the point in the tree.

use core::fmt;

use kurbo::Point;

/// Maps a point to its two coordinates.
pub trait PointAccessor<P> {
    /// Horizontal coordinate of `p`.
    fn x_of(&self, p: &P) -> f64;

    /// Vertical coordinate of `p`.
    fn y_of(&self, p: &P) -> f64;

    /// Both coordinates of `p`.
    #[inline]
    fn xy_of(&self, p: &P) -> (f64, f64) {
        (self.x_of(p), self.y_of(p))
    }
}

/// Accessor for values that already are coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct XyAccessor;

impl PointAccessor<Point> for XyAccessor {
    #[inline]
    fn x_of(&self, p: &Point) -> f64 {
        p.x
    }

    #[inline]
    fn y_of(&self, p: &Point) -> f64 {
        p.y
    }
}

impl PointAccessor<(f64, f64)> for XyAccessor {
    #[inline]
    fn x_of(&self, p: &(f64, f64)) -> f64 {
        p.0
    }

    #[inline]
    fn y_of(&self, p: &(f64, f64)) -> f64 {
        p.1
    }
}

impl PointAccessor<[f64; 2]> for XyAccessor {
    #[inline]
    fn x_of(&self, p: &[f64; 2]) -> f64 {
        p[0]
    }

    #[inline]
    fn y_of(&self, p: &[f64; 2]) -> f64 {
        p[1]
    }
}

/// Accessor built from a pair of closures.
///
/// ```
/// use understory_quadtree::{FnAccessor, PointAccessor};
///
/// struct Poi { lon: f64, lat: f64 }
///
/// let acc = FnAccessor::new(|p: &Poi| p.lon, |p: &Poi| p.lat);
/// assert_eq!(acc.xy_of(&Poi { lon: 2.35, lat: 48.85 }), (2.35, 48.85));
/// ```
#[derive(Copy, Clone)]
pub struct FnAccessor<FX, FY> {
    x: FX,
    y: FY,
}

impl<FX, FY> FnAccessor<FX, FY> {
    /// Wrap the two coordinate functions.
    pub const fn new(x: FX, y: FY) -> Self {
        Self { x, y }
    }
}

impl<FX, FY> fmt::Debug for FnAccessor<FX, FY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAccessor").finish_non_exhaustive()
    }
}

impl<P, FX, FY> PointAccessor<P> for FnAccessor<FX, FY>
where
    FX: Fn(&P) -> f64,
    FY: Fn(&P) -> f64,
{
    #[inline]
    fn x_of(&self, p: &P) -> f64 {
        (self.x)(p)
    }

    #[inline]
    fn y_of(&self, p: &P) -> f64 {
        (self.y)(p)
    }
}
