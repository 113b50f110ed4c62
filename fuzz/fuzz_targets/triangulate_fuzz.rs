#![no_main]
mod fuzz_shared;
use fuzz_shared::FuzzPoint;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<FuzzPoint>| {
    if !data.iter().all(FuzzPoint::is_small) {
        return;
    }
    match delaunay_dual::triangulate(data.clone()) {
        Ok(triangulation) => triangulation.sanity_check(),
        Err(error) => assert!(error.is_degenerate_input(), "{error}"),
    }
});
