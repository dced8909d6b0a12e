//! Spherical great-circle metric.
//!
//! Distances use the haversine formula and interpolation follows the same
//! great circle, so a point found at a fraction of an edge measures back to
//! that fraction of the edge length.

use crate::coordinate::Coordinate;
use crate::traits::DistanceMetric;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this angular distance (radians) edges are interpolated linearly.
const MIN_ANGULAR_DISTANCE: f64 = 1e-12;

/// Haversine-based distance metric on a sphere.
#[derive(Debug, Clone, Copy)]
pub struct Haversine {
    /// Sphere radius in kilometers.
    pub radius_km: f64,
}

impl Default for Haversine {
    fn default() -> Self {
        Self {
            radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl Haversine {
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    /// Central angle between two points in radians.
    fn central_angle(from: Coordinate, to: Coordinate) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lon = (to.lon - from.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

        2.0 * a.sqrt().min(1.0).asin()
    }
}

impl DistanceMetric for Haversine {
    fn distance_km(&self, from: Coordinate, to: Coordinate) -> f64 {
        self.radius_km * Self::central_angle(from, to)
    }

    fn interpolate(&self, from: Coordinate, to: Coordinate, fraction: f64) -> Coordinate {
        if fraction <= 0.0 {
            return from;
        }
        if fraction >= 1.0 {
            return to;
        }

        let delta = Self::central_angle(from, to);
        if delta < MIN_ANGULAR_DISTANCE {
            return Coordinate::new(
                from.lon + (to.lon - from.lon) * fraction,
                from.lat + (to.lat - from.lat) * fraction,
            );
        }

        let (lat1, lon1) = (from.lat.to_radians(), from.lon.to_radians());
        let (lat2, lon2) = (to.lat.to_radians(), to.lon.to_radians());

        let sin_delta = delta.sin();
        let a = ((1.0 - fraction) * delta).sin() / sin_delta;
        let b = (fraction * delta).sin() / sin_delta;

        let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
        let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
        let z = a * lat1.sin() + b * lat2.sin();

        let lat = z.atan2((x * x + y * y).sqrt());
        let lon = y.atan2(x);

        Coordinate::new(lon.to_degrees(), lat.to_degrees())
    }
}
