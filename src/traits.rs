//! Core seams for the segmenter.
//!
//! These are intentionally minimal. The segmentation stages only need a way to
//! measure and walk great-circle edges, and the orchestrator only needs a way
//! to turn caller input into a polyline.

use crate::coordinate::Coordinate;
use crate::error::SegmentError;
use crate::polyline::Polyline;

/// Measures and interpolates along edges between two coordinates.
pub trait DistanceMetric {
    /// Distance between `from` and `to` in kilometers.
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64;

    /// Point on the edge `from -> to` at `fraction` of its length.
    ///
    /// `fraction` is in `[0, 1]`; `0` yields `from` and `1` yields `to`.
    fn interpolate(&self, from: Coordinate, to: Coordinate, fraction: f64) -> Coordinate;
}

impl<M: DistanceMetric + ?Sized> DistanceMetric for &M {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        (**self).distance_km(from, to)
    }

    fn interpolate(&self, from: Coordinate, to: Coordinate, fraction: f64) -> Coordinate {
        (**self).interpolate(from, to, fraction)
    }
}

/// Turns caller-provided route geometry into a decoded [`Polyline`].
///
/// Implementations must reject empty or malformed input with
/// [`SegmentError::InvalidGeometry`].
pub trait GeometryDecoder {
    type Input: ?Sized;

    fn decode(&self, input: &Self::Input) -> Result<Polyline, SegmentError>;
}
