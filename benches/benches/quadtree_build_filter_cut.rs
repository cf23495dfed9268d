// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_quadtree::{Cut, Footprint, Tree, TreeConfig, XyAccessor};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_uniform_points(count: usize, extent: f64) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * extent, rng.next_f64() * extent))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Point> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Point::new(cx + dx, cy + dy));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[1_000usize, 10_000, 100_000] {
        let pts = gen_uniform_points(n, 2000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("uniform_n{}", n), |b| {
            b.iter(|| {
                let tree =
                    Tree::new(pts.iter().copied(), XyAccessor, TreeConfig::default()).unwrap();
                black_box(tree.node_count());
            })
        });
    }
    let pts = gen_clustered_points(64, 256, 8.0);
    group.throughput(Throughput::Elements(pts.len() as u64));
    group.bench_function("clustered", |b| {
        b.iter(|| {
            let tree = Tree::new(pts.iter().copied(), XyAccessor, TreeConfig::default()).unwrap();
            black_box(tree.node_count());
        })
    });
    group.finish();
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    let pts = gen_uniform_points(10_000, 2000.0);
    let extra = gen_uniform_points(64, 1999.0);
    let cfg = TreeConfig::default().with_bounds(Rect::new(0.0, 0.0, 2000.0, 2000.0));
    group.throughput(Throughput::Elements(extra.len() as u64));
    group.bench_function("add_64_into_10k", |b| {
        b.iter_batched(
            || Tree::new(pts.iter().copied(), XyAccessor, cfg).unwrap(),
            |mut tree| {
                for p in extra.iter().copied() {
                    tree.add(p).unwrap();
                }
                black_box(tree.active_len());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let pts = gen_uniform_points(100_000, 2000.0);
    let mut tree = Tree::new(pts, XyAccessor, TreeConfig::default()).unwrap();
    group.throughput(Throughput::Elements(tree.len() as u64));
    let mut flip = false;
    group.bench_function("half_plane_n100000", |b| {
        b.iter(|| {
            flip = !flip;
            let split = if flip { 800.0 } else { 1200.0 };
            tree.filter(|p| p.x < split);
            black_box(tree.active_len());
        })
    });
    group.finish();
}

fn bench_cut(c: &mut Criterion) {
    let mut group = c.benchmark_group("cut");
    let pts = gen_clustered_points(256, 256, 40.0);
    let tree = Tree::new(pts, XyAccessor, TreeConfig::default()).unwrap();
    let full = tree.bounds();
    let area = full.area();
    for (name, viewport) in [
        ("full_view", full),
        ("quarter_view", Rect::new(500.0, 500.0, 1500.0, 1500.0)),
        ("street_view", Rect::new(900.0, 900.0, 1000.0, 1000.0)),
    ] {
        for &zoom in &[16.0f64, 256.0, 4096.0] {
            group.bench_function(format!("{}_zoom{}", name, zoom), |b| {
                b.iter(|| {
                    let nodes = tree.cut(black_box(viewport), area / zoom);
                    black_box(nodes.len());
                })
            });
        }
    }
    let by_width = Cut::new(full, full.width() / 64.0).with_footprint(Footprint::Width);
    group.bench_function("full_view_width64", |b| {
        b.iter(|| black_box(tree.cut_with(by_width).len()))
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_add, bench_filter, bench_cut);
criterion_main!(benches);
