#![no_main]
mod fuzz_shared;
use fuzz_shared::FuzzPoint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<FuzzPoint>| {
    if !data.iter().all(FuzzPoint::is_small) {
        return;
    }
    let Ok(triangulation) = delaunay_dual::triangulate(data.clone()) else {
        return;
    };
    let diagram = triangulation.voronoi_diagram();
    for edge in diagram.edges() {
        let [f0, f1] = edge.faces;
        assert!(f0 < f1);
        assert_eq!(triangulation.triangles()[f0].circumcenter(), Some(edge.from));
        assert_eq!(triangulation.triangles()[f1].circumcenter(), Some(edge.to));
    }
    for site in triangulation.fixed_vertices() {
        let cell = diagram.cell(site);
        if let Some(polygon) = cell.polygon() {
            assert!(cell.is_closed());
            assert_eq!(polygon.len(), cell.edges().len());
        }
    }
});
