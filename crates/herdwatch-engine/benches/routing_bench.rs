//! Route query benchmarks over the built-in network and a synthetic grid.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use herdwatch_core::types::Season;
use herdwatch_engine::clusters::OutbreakClusterer;
use herdwatch_engine::routing::RoutingGraph;
use herdwatch_engine::seed::SeedNetwork;

fn seeded_graph() -> RoutingGraph {
    let mut graph = RoutingGraph::new();
    let mut clusterer = OutbreakClusterer::new();
    SeedNetwork::builtin()
        .unwrap()
        .apply(&mut graph, &mut clusterer)
        .unwrap();
    graph
}

fn grid_graph(side: usize) -> RoutingGraph {
    let mut graph = RoutingGraph::new();
    for row in 0..side {
        for col in 0..side {
            let region = if (row + col) % 3 == 0 { "Adamawa" } else { "West" };
            graph
                .add_location(&format!("g{row}-{col}"), region, false, 0.0)
                .unwrap();
        }
    }
    for row in 0..side {
        for col in 0..side {
            let here = format!("g{row}-{col}");
            if col + 1 < side {
                let right = format!("g{row}-{}", col + 1);
                graph.add_corridor(&here, &right, 10.0, col % 2 == 0, "track").unwrap();
            }
            if row + 1 < side {
                let down = format!("g{}-{col}", row + 1);
                graph.add_corridor(&here, &down, 12.0, row % 2 == 0, "track").unwrap();
            }
        }
    }
    graph
}

fn bench_seed_routes(c: &mut Criterion) {
    let graph = seeded_graph();
    c.bench_function("seed_route_dry", |b| {
        b.iter(|| {
            graph
                .shortest_safe_route(
                    black_box("Bafoussam"),
                    black_box("Logone Floodplain"),
                    Season::Dry,
                    true,
                )
                .unwrap()
        })
    });
    c.bench_function("seed_seasonal_impact", |b| {
        b.iter(|| graph.seasonal_impact(black_box("Garoua"), black_box("Maga"), true).unwrap())
    });
}

fn bench_grid_routes(c: &mut Criterion) {
    let graph = grid_graph(40);
    c.bench_function("grid_40x40_wet", |b| {
        b.iter(|| {
            graph
                .shortest_safe_route(black_box("g0-0"), black_box("g39-39"), Season::Wet, true)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_seed_routes, bench_grid_routes);
criterion_main!(benches);
