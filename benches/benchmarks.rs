use criterion::*;


criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = triangulate_benchmark::triangulate_benchmark, voronoi_benchmark::voronoi_benchmark
}

criterion_main!(benches);
