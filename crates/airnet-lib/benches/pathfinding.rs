use airnet_lib::{
    diameter, load_dataset, plan_route, scc_count, AirlineFilter, Dataset, RouteRequest,
};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/minimal")
}

static DATASET: Lazy<Dataset> = Lazy::new(|| load_dataset(&fixture_path()).expect("fixture loads"));
static ANY_AIRLINE_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(
        "OPO".parse().expect("valid endpoint"),
        "LHR".parse().expect("valid endpoint"),
    )
});
static CITY_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new(
        "OPO".parse().expect("valid endpoint"),
        "city:Paris,France".parse().expect("valid endpoint"),
    )
    .with_airlines(AirlineFilter::Only(vec!["TAP".to_string()]))
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let dataset = &*DATASET;

    c.bench_function("route_opo_lhr_any_airline", |b| {
        let request = &*ANY_AIRLINE_REQUEST;
        b.iter(|| {
            let plan = plan_route(dataset, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("route_opo_paris_tap", |b| {
        let request = &*CITY_REQUEST;
        b.iter(|| {
            let plan = plan_route(dataset, request).expect("route exists");
            black_box(plan.itineraries.len())
        });
    });
}

fn benchmark_topology(c: &mut Criterion) {
    let graph = &DATASET.graph;

    c.bench_function("diameter", |b| b.iter(|| black_box(diameter(graph))));
    c.bench_function("scc_count", |b| b.iter(|| black_box(scc_count(graph))));
}

criterion_group!(benches, benchmark_pathfinding, benchmark_topology);
criterion_main!(benches);
