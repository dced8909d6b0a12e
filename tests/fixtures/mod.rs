//! Test fixtures for route-segmenter.
//!
//! Provides realistic route geometry (from OpenStreetMap) and small
//! synthetic routes with known lengths.

pub mod las_vegas_routes;

pub use las_vegas_routes::*;

use route_segmenter::{Coordinate, Segment, SegmentedRoute};
use route_segmenter::haversine::EARTH_RADIUS_KM;

/// Degrees of latitude per kilometer on the haversine sphere.
pub const DEG_PER_KM: f64 = 180.0 / (std::f64::consts::PI * EARTH_RADIUS_KM);

/// Straight northbound line along the prime meridian.
pub fn meridian_line(lats: &[f64]) -> Vec<Coordinate> {
    lats.iter().map(|&lat| Coordinate::new(0.0, lat)).collect()
}

// ============================================================================
// Shared assertions
// ============================================================================

/// Tolerance for comparing reconstructed coordinates, in degrees.
pub const COORD_TOLERANCE_DEG: f64 = 1e-9;

/// Segments produced for a route of `total_km` at `spacing_km`: one per
/// started spacing interval, except that a route ending within `epsilon_km`
/// of a whole multiple gets no extra tail segment.
pub fn expected_segment_count(total_km: f64, spacing_km: f64, epsilon_km: f64) -> usize {
    let whole = (total_km / spacing_km).floor();
    if whole >= 1.0 && total_km - whole * spacing_km <= epsilon_km {
        whole as usize
    } else {
        whole as usize + 1
    }
}

/// Concatenates segments, keeping each shared boundary point once.
pub fn reconstruct(segments: &[Segment]) -> Vec<Coordinate> {
    let mut path: Vec<Coordinate> = Vec::new();
    for segment in segments {
        let skip = usize::from(!path.is_empty());
        path.extend(segment.coordinates.iter().skip(skip).copied());
    }
    path
}

/// Every segment ends exactly where the next one starts.
pub fn assert_contiguous(route: &SegmentedRoute) {
    for pair in route.segments.windows(2) {
        let end = pair[0].coordinates.last().expect("segment has points");
        let start = pair[1].coordinates.first().expect("segment has points");
        assert!(
            end.approx_eq(start, COORD_TOLERANCE_DEG),
            "gap between segment {} and {}: {:?} vs {:?}",
            pair[0].ordinal,
            pair[1].ordinal,
            end,
            start
        );
    }
}

/// Segment lengths add up to the route length.
pub fn assert_length_conserved(route: &SegmentedRoute) {
    let sum: f64 = route.segments.iter().map(|s| s.length_km).sum();
    assert!(
        (sum - route.total_length_km).abs() < 1e-6,
        "segment lengths sum to {sum}, route is {}",
        route.total_length_km
    );
}

/// The reconstructed path is the original path with only cut points added.
pub fn assert_covers(original: &[Coordinate], route: &SegmentedRoute) {
    let path = reconstruct(&route.segments);
    let is_cut = |p: &Coordinate| {
        route
            .cut_points
            .iter()
            .any(|cut| cut.coordinate.approx_eq(p, COORD_TOLERANCE_DEG))
    };

    let mut originals: Vec<Coordinate> = Vec::new();
    for p in original {
        match originals.last() {
            Some(last) if last.approx_eq(p, COORD_TOLERANCE_DEG) => {}
            _ => originals.push(*p),
        }
    }

    let without_cuts: Vec<Coordinate> = path.iter().filter(|p| !is_cut(p)).copied().collect();
    let expected: Vec<Coordinate> = originals.iter().filter(|p| !is_cut(p)).copied().collect();

    assert_eq!(
        without_cuts.len(),
        expected.len(),
        "reconstructed path lost or duplicated vertices"
    );
    for (got, want) in without_cuts.iter().zip(&expected) {
        assert!(got.approx_eq(want, COORD_TOLERANCE_DEG), "{:?} != {:?}", got, want);
    }

    assert!(path.first().unwrap().approx_eq(&original[0], COORD_TOLERANCE_DEG));
    assert!(path.last().unwrap().approx_eq(original.last().unwrap(), COORD_TOLERANCE_DEG));
}
