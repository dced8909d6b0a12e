//! Tunables for the segmenter.

use std::str::FromStr;

use crate::haversine::EARTH_RADIUS_KM;
use crate::polyline::DEFAULT_PRECISION;

#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Points closer than this (per axis, degrees) are treated as the same point.
    pub coincidence_tolerance_deg: f64,
    /// Cuts closer than this to the route end are not emitted.
    pub distance_epsilon_km: f64,
    /// Decimal digits carried by encoded polylines.
    pub polyline_precision: u32,
    /// Sphere radius used for great-circle distances.
    pub earth_radius_km: f64,
    /// Upper bound on segments per route; finer spacings are rejected.
    pub max_segments: usize,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            coincidence_tolerance_deg: 1e-10,
            distance_epsilon_km: 1e-9,
            polyline_precision: DEFAULT_PRECISION,
            earth_radius_km: EARTH_RADIUS_KM,
            max_segments: 1_000_000,
        }
    }
}

impl SegmentOptions {
    /// Defaults overridden by `ROUTE_SEGMENTER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        override_from(
            &lookup,
            "ROUTE_SEGMENTER_COINCIDENCE_TOLERANCE_DEG",
            &mut options.coincidence_tolerance_deg,
        );
        override_from(
            &lookup,
            "ROUTE_SEGMENTER_DISTANCE_EPSILON_KM",
            &mut options.distance_epsilon_km,
        );
        override_from(
            &lookup,
            "ROUTE_SEGMENTER_POLYLINE_PRECISION",
            &mut options.polyline_precision,
        );
        override_from(
            &lookup,
            "ROUTE_SEGMENTER_EARTH_RADIUS_KM",
            &mut options.earth_radius_km,
        );
        override_from(
            &lookup,
            "ROUTE_SEGMENTER_MAX_SEGMENTS",
            &mut options.max_segments,
        );
        options
    }
}

fn override_from<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, slot: &mut T) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparsable setting"),
    }
}
