// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree filtering and custom folds.
//!
//! Index user-defined records through an accessor, narrow the active set with
//! a filter, and run a custom fold that totals a payload field per cluster.
//!
//! Run:
//! - `cargo run -p understory_examples --example quadtree_filter_aggregate`

use understory_quadtree::{Aggregate, FnAccessor, NodeRef, Quadrant, Tree, TreeConfig};

#[derive(Clone, Debug)]
struct Shop {
    name: &'static str,
    open: bool,
    lon: f64,
    lat: f64,
    visitors: u32,
}

/// Sums `visitors` over the active points, keeping the per-quadrant totals of the root.
#[derive(Debug, Default)]
struct Visitors {
    by_quadrant: [u32; 4],
}

impl<'a> Aggregate<'a, Shop> for Visitors {
    type State = u32;

    fn filter(&mut self, node: NodeRef<'a, Shop>) -> bool {
        !node.is_active()
    }

    fn init(&mut self) -> u32 {
        0
    }

    fn accumulate(&mut self, state: u32, node: NodeRef<'a, Shop>) -> u32 {
        if !node.is_leaf() {
            return state;
        }
        state + node.active_points().iter().map(|s| s.visitors).sum::<u32>()
    }

    fn merge(&mut self, state: u32, child: u32, _: Quadrant) -> u32 {
        state + child
    }

    fn finalize(&mut self, state: u32, node: NodeRef<'a, Shop>) -> u32 {
        if node.depth() == 1 {
            for (q, c) in node.parent().into_iter().flat_map(|p| p.children()) {
                if c == node {
                    self.by_quadrant[q.index()] = state;
                }
            }
        }
        state
    }
}

fn main() {
    let shops = vec![
        Shop { name: "bakery", open: true, lon: 2.35, lat: 48.85, visitors: 120 },
        Shop { name: "bakery annex", open: false, lon: 2.35, lat: 48.85, visitors: 40 },
        Shop { name: "florist", open: true, lon: 2.29, lat: 48.86, visitors: 35 },
        Shop { name: "books", open: true, lon: 2.40, lat: 48.83, visitors: 80 },
        Shop { name: "records", open: false, lon: 2.41, lat: 48.88, visitors: 15 },
    ];
    let acc = FnAccessor::new(|s: &Shop| s.lon, |s: &Shop| s.lat);
    let cfg = TreeConfig::default().with_epsilon(0.001);
    let mut tree = Tree::new(shops, acc, cfg).unwrap();

    let mut all = Visitors::default();
    println!("all shops: {} visitors", tree.aggregate(&mut all));
    println!("per quadrant (BL, BR, TL, TR): {:?}", all.by_quadrant);

    tree.filter(|s| s.open);
    let mut open = Visitors::default();
    println!(
        "open shops ({} of {}): {} visitors",
        tree.active_len(),
        tree.len(),
        tree.aggregate(&mut open)
    );
    for s in tree.active_points() {
        println!("  {}", s.name);
    }

    let clusters = tree.cut(tree.bounds(), 0.0);
    for node in clusters {
        let c = node.centroid();
        println!(
            "cluster of {} at ({:.3}, {:.3})",
            node.mass(),
            c.x,
            c.y
        );
    }
}
