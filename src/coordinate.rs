//! Geographic coordinate type shared by every stage of the segmenter.
//!
//! Coordinates are always `(longitude, latitude)` in degrees. Ordering is
//! decided once at the input boundary; nothing downstream guesses it.

use serde::{Deserialize, Serialize};

use crate::error::SegmentError;

/// A WGS84 position in degrees.
///
/// Serializes as a GeoJSON position, `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// True when both components differ by at most `tolerance_deg`.
    pub fn approx_eq(&self, other: &Self, tolerance_deg: f64) -> bool {
        (self.lon - other.lon).abs() <= tolerance_deg && (self.lat - other.lat).abs() <= tolerance_deg
    }

    /// Rejects non-finite values and positions outside the valid degree ranges.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if !self.lon.is_finite() || !self.lat.is_finite() {
            return Err(SegmentError::InvalidGeometry(format!(
                "non-finite coordinate ({}, {})",
                self.lon, self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) || !(-90.0..=90.0).contains(&self.lat) {
            return Err(SegmentError::InvalidGeometry(format!(
                "coordinate ({}, {}) out of range",
                self.lon, self.lat
            )));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lon, coord.lat]
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    /// Bounding box of `points`, or `None` when empty.
    pub fn of(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let init = Bounds {
            min_lon: first.lon,
            min_lat: first.lat,
            max_lon: first.lon,
            max_lat: first.lat,
        };

        Some(points.iter().skip(1).fold(init, |acc, p| Bounds {
            min_lon: acc.min_lon.min(p.lon),
            min_lat: acc.min_lat.min(p.lat),
            max_lon: acc.max_lon.max(p.lon),
            max_lat: acc.max_lat.max(p.lat),
        }))
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lon..=self.max_lon).contains(&coord.lon)
            && (self.min_lat..=self.max_lat).contains(&coord.lat)
    }
}

/// Drops consecutive points that coincide within `tolerance_deg`.
pub(crate) fn dedup_consecutive(points: &[Coordinate], tolerance_deg: f64) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(points.len());
    for point in points {
        match out.last() {
            Some(last) if last.approx_eq(point, tolerance_deg) => {}
            _ => out.push(*point),
        }
    }
    out
}
