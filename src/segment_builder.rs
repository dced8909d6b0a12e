//! Reconstructs the exact vertex sequence between two route distances.

use crate::coordinate::{Coordinate, dedup_consecutive};
use crate::distance_index::CumulativeDistanceIndex;

/// Along-route range covered by one segment.
///
/// A missing cut means the boundary is the true route start (for
/// `start_cut`) or the true route end (for `end_cut`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentRange {
    pub start_km: f64,
    pub end_km: f64,
    pub start_cut: Option<Coordinate>,
    pub end_cut: Option<Coordinate>,
}

impl SegmentRange {
    pub fn is_final(&self) -> bool {
        self.end_cut.is_none()
    }
}

/// Coordinates of the sub-path covered by `range`.
///
/// The result starts at the start cut (or the first vertex), carries every
/// original vertex strictly inside the range, and ends at the end cut (or
/// the last vertex). Never panics; indices are clamped to the route.
pub fn build_segment(
    points: &[Coordinate],
    index: &CumulativeDistanceIndex,
    range: &SegmentRange,
    tolerance_deg: f64,
) -> Vec<Coordinate> {
    let Some(last) = points.len().checked_sub(1) else {
        return Vec::new();
    };
    let distances = index.as_slice();

    let start_coord = range.start_cut.unwrap_or(points[0]);
    let end_coord = range.end_cut.unwrap_or(points[last]);

    // First vertex past the start boundary.
    let start_idx = distances.partition_point(|&d| d <= range.start_km).min(last);
    // Last vertex before the end boundary; the final segment always runs to
    // the last vertex so float noise cannot drop the true endpoint.
    let end_idx = if range.is_final() {
        last
    } else {
        distances
            .partition_point(|&d| d < range.end_km)
            .saturating_sub(1)
            .min(last)
    };
    let end_idx = end_idx.max(start_idx);

    let interior: Vec<Coordinate> = (start_idx..=end_idx)
        .filter(|&k| {
            let d = distances.get(k).copied().unwrap_or(f64::INFINITY);
            d > range.start_km && d < range.end_km
        })
        .map(|k| points[k])
        .collect();

    // Both boundaries on the same original edge.
    if interior.is_empty() {
        if start_coord.approx_eq(&end_coord, tolerance_deg) {
            return vec![start_coord];
        }
        return vec![start_coord, end_coord];
    }

    let mut raw = Vec::with_capacity(interior.len() + 2);
    raw.push(start_coord);
    raw.extend(interior.into_iter().filter(|p| {
        !p.approx_eq(&start_coord, tolerance_deg) && !p.approx_eq(&end_coord, tolerance_deg)
    }));
    raw.push(end_coord);

    let cleaned = dedup_consecutive(&raw, tolerance_deg);
    if cleaned.len() < 2 { raw } else { cleaned }
}
