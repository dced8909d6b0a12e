//! Polyline representation for route geometries.
//!
//! This module provides a type for working with polylines as decoded
//! coordinate sequences, plus the encoded polyline codec used at the
//! boundary. Encoding/decoding happens when geometry enters the segmenter
//! or when segments are handed back out, never in between.

use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::SegmentError;
use crate::traits::GeometryDecoder;

/// Default number of decimal digits carried by encoded polylines.
pub const DEFAULT_PRECISION: u32 = 5;

/// Highest precision accepted by the codec.
const MAX_PRECISION: u32 = 10;

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, SegmentError> {
        decode(encoded, precision).map(Self::new)
    }

    /// Encodes the points as an encoded polyline string.
    pub fn encode(&self, precision: u32) -> String {
        encode(&self.points, precision)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Route geometry as supplied by a caller.
///
/// Deserializes from either a JSON string (encoded polyline) or a JSON array
/// of `[lon, lat]` positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteGeometry {
    Encoded(String),
    Coordinates(Vec<Coordinate>),
}

impl RouteGeometry {
    /// Interprets raw text: a JSON array of `[lon, lat]` positions when it
    /// starts with `[`, otherwise an encoded polyline.
    pub fn parse(text: &str) -> Result<Self, SegmentError> {
        let trimmed = text.trim();
        if trimmed.starts_with('[') {
            serde_json::from_str::<Vec<Coordinate>>(trimmed)
                .map(RouteGeometry::Coordinates)
                .map_err(|err| {
                    SegmentError::InvalidGeometry(format!("malformed coordinate array: {err}"))
                })
        } else {
            Ok(RouteGeometry::Encoded(trimmed.to_string()))
        }
    }
}

impl From<Vec<Coordinate>> for RouteGeometry {
    fn from(points: Vec<Coordinate>) -> Self {
        RouteGeometry::Coordinates(points)
    }
}

/// Decodes [`RouteGeometry`] into a [`Polyline`].
#[derive(Debug, Clone, Copy)]
pub struct RouteGeometryDecoder {
    pub precision: u32,
}

impl Default for RouteGeometryDecoder {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl GeometryDecoder for RouteGeometryDecoder {
    type Input = RouteGeometry;

    fn decode(&self, input: &RouteGeometry) -> Result<Polyline, SegmentError> {
        let polyline = match input {
            RouteGeometry::Encoded(encoded) => Polyline::decode(encoded, self.precision)?,
            RouteGeometry::Coordinates(points) => Polyline::new(points.clone()),
        };

        if polyline.is_empty() {
            return Err(SegmentError::InvalidGeometry("geometry has no coordinates".into()));
        }
        Ok(polyline)
    }
}

fn precision_factor(precision: u32) -> Result<f64, SegmentError> {
    if precision > MAX_PRECISION {
        return Err(SegmentError::InvalidGeometry(format!(
            "polyline precision {precision} exceeds {MAX_PRECISION}"
        )));
    }
    Ok(10f64.powi(precision as i32))
}

/// Decodes an encoded polyline into `(lon, lat)` coordinates.
///
/// The wire format stores latitude before longitude for every point.
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Coordinate>, SegmentError> {
    let factor = precision_factor(precision)?;
    if encoded.is_empty() {
        return Err(SegmentError::InvalidGeometry("empty encoded polyline".into()));
    }

    let mut values = Vec::with_capacity(encoded.len() / 2);
    let mut result: i64 = 0;
    let mut shift = 0u32;

    for (pos, byte) in encoded.bytes().enumerate() {
        if !(63..=126).contains(&byte) {
            return Err(SegmentError::InvalidGeometry(format!(
                "invalid polyline character {:?} at offset {pos}",
                byte as char
            )));
        }
        if shift > 60 {
            return Err(SegmentError::InvalidGeometry(format!(
                "polyline value too long at offset {pos}"
            )));
        }

        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            let delta = if result & 1 != 0 { !(result >> 1) } else { result >> 1 };
            values.push(delta);
            result = 0;
            shift = 0;
        }
    }

    if shift != 0 {
        return Err(SegmentError::InvalidGeometry("truncated encoded polyline".into()));
    }
    if values.len() % 2 != 0 {
        return Err(SegmentError::InvalidGeometry(
            "encoded polyline has a latitude without a longitude".into(),
        ));
    }

    let mut lat = 0i64;
    let mut lon = 0i64;
    let points = values
        .chunks_exact(2)
        .map(|pair| {
            lat += pair[0];
            lon += pair[1];
            Coordinate::new(lon as f64 / factor, lat as f64 / factor)
        })
        .collect();

    Ok(points)
}

/// Encodes coordinates as an encoded polyline.
///
/// Precisions above the supported maximum are clamped.
pub fn encode(points: &[Coordinate], precision: u32) -> String {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lon = 0i64;

    for point in points {
        let lat = (point.lat * factor).round() as i64;
        let lon = (point.lon * factor).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn encode_value(delta: i64, out: &mut String) {
    let mut value = if delta < 0 { !(delta << 1) } else { delta << 1 };
    while value >= 0x20 {
        out.push(char::from((0x20 | (value & 0x1f)) as u8 + 63));
        value >>= 5;
    }
    out.push(char::from(value as u8 + 63));
}
