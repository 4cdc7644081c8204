//! Benchmark edge calculation for one node against growing candidate sets.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Rotation3, Vector3};
use navgraph_core::Pose;
use navgraph_edges::{EdgeCalculator, EdgeCalculatorSettings, FullMetadata, Node, Sequence};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::hint::black_box;

/// Captures scattered on a disc of `radius` meters around the origin.
fn scattered_nodes(count: usize, radius: f64) -> Vec<Node> {
    let east = Rotation3::new(Vector3::new(0.0, -FRAC_PI_2, 0.0));
    (0..count)
        .map(|i| {
            // Golden-angle spiral: deterministic and evenly spread.
            let t = i as f64 / count as f64;
            let angle = i as f64 * 2.399_963;
            let r = radius * t.sqrt();
            let center = Vector3::new(r * angle.cos(), r * angle.sin(), 0.0);
            let yaw = (i as f64 * 0.37) % TAU;
            let rotation =
                (east * Rotation3::from_axis_angle(&Vector3::z_axis(), -yaw)).scaled_axis();
            Node::merged(
                format!("n{i}"),
                format!("s{}", i % 7),
                FullMetadata::default(),
                Pose::from_optical_center(rotation, center),
            )
        })
        .collect()
}

fn bench_compute_edges(c: &mut Criterion) {
    let calculator = EdgeCalculator::new(EdgeCalculatorSettings::default()).unwrap();
    let mut group = c.benchmark_group("compute_edges");

    for count in [50, 500, 5000] {
        let nodes = scattered_nodes(count, 60.0);
        let source = &nodes[0];
        let sequence = Sequence::new("s0", vec![source.id.clone()]);
        group.bench_with_input(BenchmarkId::from_parameter(count), &nodes, |b, nodes| {
            b.iter(|| {
                calculator
                    .compute_edges(black_box(source), &sequence, black_box(nodes))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_potential_edges(c: &mut Criterion) {
    let calculator = EdgeCalculator::new(EdgeCalculatorSettings::default()).unwrap();
    let nodes = scattered_nodes(1000, 30.0);
    c.bench_function("get_potential_edges_1000", |b| {
        b.iter(|| {
            calculator
                .get_potential_edges(black_box(&nodes[0]), black_box(&nodes), &[])
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_compute_edges, bench_potential_edges);
criterion_main!(benches);
