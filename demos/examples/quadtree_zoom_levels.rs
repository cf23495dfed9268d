// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree zoom levels.
//!
//! Index a few clusters of points, then cut the tree for a sequence of zoom
//! levels and print the markers a map view would draw at each one.
//!
//! Run:
//! - `cargo run -p understory_examples --example quadtree_zoom_levels`

use kurbo::{Point, Rect};
use understory_quadtree::{Tree, TreeConfig, XyAccessor};

fn main() {
    // Three clusters on a 1024x1024 map plus a few loners.
    let mut points = Vec::new();
    for (cx, cy) in [(120.0, 140.0), (700.0, 300.0), (512.0, 900.0)] {
        for i in 0..12 {
            let t = f64::from(i);
            points.push(Point::new(cx + (t * 1.7) % 9.0, cy + (t * 2.3) % 7.0));
        }
    }
    points.extend([
        Point::new(30.0, 980.0),
        Point::new(1000.0, 20.0),
        Point::new(400.0, 400.0),
    ]);

    let cfg = TreeConfig::default()
        .with_epsilon(0.5)
        .with_bounds(Rect::new(0.0, 0.0, 1024.0, 1024.0));
    let tree = Tree::new(points, XyAccessor, cfg).unwrap();
    println!(
        "indexed {} points in {} nodes (depth {})",
        tree.len(),
        tree.node_count(),
        tree.depth()
    );

    let viewport = tree.bounds();
    let area = viewport.area();
    for zoom in [1.0, 16.0, 256.0, 4096.0, f64::INFINITY] {
        let markers = tree.cut(viewport, area / zoom);
        println!("zoom {zoom}: {} markers", markers.len());
        for node in &markers {
            let c = node.centroid();
            if node.mass() == 1 {
                println!("  point   at ({:.1}, {:.1})", c.x, c.y);
            } else {
                println!("  cluster at ({:.1}, {:.1}) x{}", c.x, c.y, node.mass());
            }
        }
    }

    // A zoomed-in viewport only sees the nodes it overlaps.
    let street = Rect::new(600.0, 250.0, 800.0, 350.0);
    let markers = tree.cut(street, street.area() / 64.0);
    println!("street view {street:?}: {} markers", markers.len());
}
