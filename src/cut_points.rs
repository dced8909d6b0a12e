//! Locates the cut points that split a route every `spacing_km`.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::distance_index::CumulativeDistanceIndex;
use crate::traits::DistanceMetric;

const MAX_PREALLOCATED_CUTS: usize = 4096;

/// A segment boundary lying exactly on the route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutPoint {
    /// Index of the first original vertex after the cut; the cut lies on
    /// the edge `[source_segment_index - 1, source_segment_index]`.
    pub source_segment_index: usize,
    pub coordinate: Coordinate,
    pub distance_along_route_km: f64,
}

/// Cuts at every multiple of `spacing_km` strictly below the route length.
///
/// Cuts within `end_epsilon_km` of the route end are dropped so the last
/// segment always absorbs the remainder. `spacing_km` must be positive;
/// callers validate it.
pub fn locate_cut_points<M: DistanceMetric>(
    points: &[Coordinate],
    index: &CumulativeDistanceIndex,
    spacing_km: f64,
    end_epsilon_km: f64,
    metric: &M,
) -> Vec<CutPoint> {
    let total = index.total_km();
    let limit = total - end_epsilon_km;
    if spacing_km.is_nan() || spacing_km <= 0.0 || spacing_km >= limit {
        return Vec::new();
    }

    let distances = index.as_slice();
    // The float-to-int cast saturates; cap it so a tiny spacing cannot
    // request an absurd allocation up front.
    let expected = (limit / spacing_km).floor() as usize;
    let mut cuts = Vec::with_capacity(expected.min(MAX_PREALLOCATED_CUTS));

    // Targets are computed as k * spacing rather than accumulated so that
    // rounding does not drift over many cuts.
    let mut k = 1usize;
    loop {
        let target = k as f64 * spacing_km;
        if target >= limit {
            break;
        }
        k += 1;

        let Some(edge) = index.edge_containing(target) else {
            continue;
        };
        let edge_start = distances[edge];
        let edge_length = distances[edge + 1] - edge_start;
        if edge_length <= 0.0 {
            continue;
        }

        let fraction = (target - edge_start) / edge_length;
        let coordinate = metric.interpolate(points[edge], points[edge + 1], fraction);

        cuts.push(CutPoint {
            source_segment_index: edge + 1,
            coordinate,
            distance_along_route_km: target,
        });
    }

    cuts
}
