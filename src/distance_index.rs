//! Cumulative along-route distances.

use crate::coordinate::Coordinate;
use crate::traits::DistanceMetric;

/// Running great-circle distance from the first vertex to each vertex.
///
/// `distances[0]` is always `0.0` and the sequence never decreases; two
/// neighbours share a value only when their vertices coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistanceIndex {
    distances: Vec<f64>,
}

impl CumulativeDistanceIndex {
    /// Walks the polyline edge by edge, summing edge lengths.
    pub fn build<M: DistanceMetric>(points: &[Coordinate], metric: &M) -> Self {
        let mut distances = Vec::with_capacity(points.len());
        if points.is_empty() {
            return Self { distances };
        }

        let mut total = 0.0;
        distances.push(total);
        for edge in points.windows(2) {
            total += metric.distance_km(edge[0], edge[1]);
            distances.push(total);
        }

        Self { distances }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn get(&self, vertex: usize) -> Option<f64> {
        self.distances.get(vertex).copied()
    }

    /// Total route length in kilometers.
    pub fn total_km(&self) -> f64 {
        self.distances.last().copied().unwrap_or(0.0)
    }

    /// Index `i` of the non-degenerate edge `[i, i + 1]` containing
    /// `distance_km`, i.e. `d[i] < distance_km <= d[i + 1]`.
    ///
    /// A distance that lands exactly on a vertex resolves to the edge ending
    /// at that vertex. Returns `None` when the distance is outside
    /// `(0, total_km]` or the route has no edges.
    pub fn edge_containing(&self, distance_km: f64) -> Option<usize> {
        if self.distances.len() < 2
            || distance_km.is_nan()
            || distance_km <= 0.0
            || distance_km > self.total_km()
        {
            return None;
        }

        // First vertex at or beyond the target; the vertex before it is
        // strictly behind, so the edge between them has non-zero length.
        let end = self.distances.partition_point(|&d| d < distance_km);
        Some(end - 1)
    }

    /// Point on the route at `distance_km` from its start, clamped to the
    /// route's extent.
    pub fn point_at<M: DistanceMetric>(
        &self,
        points: &[Coordinate],
        metric: &M,
        distance_km: f64,
    ) -> Option<Coordinate> {
        let first = *points.first()?;
        let last = *points.last()?;

        if distance_km <= 0.0 {
            return Some(first);
        }
        if distance_km >= self.total_km() {
            return Some(last);
        }

        let edge = self.edge_containing(distance_km)?;
        let start = self.distances[edge];
        let length = self.distances[edge + 1] - start;
        let fraction = (distance_km - start) / length;

        Some(metric.interpolate(points[edge], points[edge + 1], fraction))
    }
}
