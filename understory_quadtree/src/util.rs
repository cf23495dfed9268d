// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle predicates and split helpers.
//!
//! Kurbo's `Rect::contains` is half-open; quadtree bounds need closed edges so
//! points on the outer boundary still belong to the root.

use kurbo::{Point, Rect};

use crate::types::Quadrant;

/// Closed-interval overlap test. Touching edges count as intersecting.
#[inline]
pub(crate) fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Closed-interval containment test.
#[inline]
pub(crate) fn contains(r: &Rect, x: f64, y: f64) -> bool {
    r.x0 <= x && x <= r.x1 && r.y0 <= y && y <= r.y1
}

#[inline]
pub(crate) fn abs_diff(a: f64, b: f64) -> f64 {
    if a > b { a - b } else { b - a }
}

#[inline]
pub(crate) fn is_finite_rect(r: &Rect) -> bool {
    r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite()
}

/// Split point of `r`.
#[inline]
pub(crate) fn midpoint(r: &Rect) -> Point {
    Point::new(0.5 * (r.x0 + r.x1), 0.5 * (r.y0 + r.y1))
}

/// The quadrant of `r` selected by `q`, split at the midpoint.
pub(crate) fn quadrant_bounds(r: &Rect, q: Quadrant) -> Rect {
    let mid = midpoint(r);
    let (x0, x1) = if q.is_right() { (mid.x, r.x1) } else { (r.x0, mid.x) };
    let (y0, y1) = if q.is_top() { (mid.y, r.y1) } else { (r.y0, mid.y) };
    Rect::new(x0, y0, x1, y1)
}

/// Extend the shorter side of `r` from its minimum corner so both sides match.
pub(crate) fn squarify(r: Rect) -> Rect {
    let w = r.x1 - r.x0;
    let h = r.y1 - r.y0;
    if w > h {
        Rect::new(r.x0, r.y0, r.x1, r.y0 + w)
    } else {
        Rect::new(r.x0, r.y0, r.x0 + h, r.y1)
    }
}

/// Min/max envelope of a set of coordinates. `None` when empty.
pub(crate) fn envelope(coords: impl IntoIterator<Item = (f64, f64)>) -> Option<Rect> {
    let mut it = coords.into_iter();
    let (x, y) = it.next()?;
    let mut acc = Rect::new(x, y, x, y);
    for (x, y) in it {
        acc.x0 = acc.x0.min(x);
        acc.y0 = acc.y0.min(y);
        acc.x1 = acc.x1.max(x);
        acc.y1 = acc.y1.max(y);
    }
    Some(acc)
}
