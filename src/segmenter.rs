//! Distance-based route segmentation.
//!
//! Drives the pipeline for one route: decode the geometry, build the
//! cumulative distance index once, locate the cuts, then build one segment
//! per consecutive pair of boundaries.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SegmentOptions;
use crate::coordinate::{Bounds, Coordinate};
use crate::cut_points::{CutPoint, locate_cut_points};
use crate::distance_index::CumulativeDistanceIndex;
use crate::error::SegmentError;
use crate::haversine::Haversine;
use crate::polyline::{Polyline, RouteGeometry, RouteGeometryDecoder};
use crate::segment_builder::{SegmentRange, build_segment};
use crate::traits::{DistanceMetric, GeometryDecoder};

/// One contiguous piece of a segmented route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position along the route.
    pub ordinal: u32,
    pub coordinates: Vec<Coordinate>,
    /// Length of the covered range, taken from the distance index rather
    /// than re-measured from `coordinates`.
    pub length_km: f64,
}

impl Segment {
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(&self.coordinates)
    }

    /// Point halfway along the segment's own geometry.
    pub fn midpoint<M: DistanceMetric>(&self, metric: &M) -> Option<Coordinate> {
        let index = CumulativeDistanceIndex::build(&self.coordinates, metric);
        index.point_at(&self.coordinates, metric, index.total_km() / 2.0)
    }

    pub fn to_polyline(&self) -> Polyline {
        Polyline::new(self.coordinates.clone())
    }

    pub fn encode(&self, precision: u32) -> String {
        self.to_polyline().encode(precision)
    }
}

/// Full result of segmenting one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedRoute {
    pub route_id: String,
    pub spacing_km: f64,
    pub total_length_km: f64,
    pub cut_points: Vec<CutPoint>,
    pub segments: Vec<Segment>,
}

/// A route queued for batch segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInput {
    pub route_id: String,
    pub geometry: RouteGeometry,
}

/// Stateless segmentation engine; every call is independent.
#[derive(Debug, Clone)]
pub struct Segmenter<M = Haversine> {
    options: SegmentOptions,
    metric: M,
    decoder: RouteGeometryDecoder,
}

impl Default for Segmenter<Haversine> {
    fn default() -> Self {
        Self::new(SegmentOptions::default())
    }
}

impl Segmenter<Haversine> {
    pub fn new(options: SegmentOptions) -> Self {
        let metric = Haversine::new(options.earth_radius_km);
        Self::with_metric(options, metric)
    }
}

impl<M: DistanceMetric> Segmenter<M> {
    pub fn with_metric(options: SegmentOptions, metric: M) -> Self {
        let decoder = RouteGeometryDecoder {
            precision: options.polyline_precision,
        };
        Self {
            options,
            metric,
            decoder,
        }
    }

    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Decodes `geometry` and splits it every `spacing_km`.
    pub fn segment(
        &self,
        route_id: &str,
        geometry: &RouteGeometry,
        spacing_km: f64,
    ) -> Result<SegmentedRoute, SegmentError> {
        validate_spacing(spacing_km)?;
        let polyline = self.decoder.decode(geometry)?;
        self.segment_points(route_id, polyline.points(), spacing_km)
    }

    /// Splits an already decoded `(lon, lat)` vertex list every `spacing_km`.
    pub fn segment_points(
        &self,
        route_id: &str,
        points: &[Coordinate],
        spacing_km: f64,
    ) -> Result<SegmentedRoute, SegmentError> {
        validate_spacing(spacing_km)?;
        validate_points(points)?;

        let index = CumulativeDistanceIndex::build(points, &self.metric);
        let total = index.total_km();

        if total <= 0.0 {
            debug!(route_id, vertices = points.len(), "zero-length route, single segment");
            return Ok(SegmentedRoute {
                route_id: route_id.to_string(),
                spacing_km,
                total_length_km: total,
                cut_points: Vec::new(),
                segments: vec![Segment {
                    ordinal: 1,
                    coordinates: points.to_vec(),
                    length_km: total,
                }],
            });
        }

        // Bounds the number of targets the cut walk visits.
        let max_segments = self.options.max_segments as f64;
        if total / spacing_km > max_segments {
            warn!(route_id, total_km = total, spacing_km, max_segments, "spacing too fine for route");
            return Err(SegmentError::InvalidSpacing(spacing_km));
        }

        let cut_points = locate_cut_points(
            points,
            &index,
            spacing_km,
            self.options.distance_epsilon_km,
            &self.metric,
        );

        let mut boundaries: Vec<(f64, Option<Coordinate>)> = Vec::with_capacity(cut_points.len() + 2);
        boundaries.push((0.0, None));
        boundaries.extend(
            cut_points
                .iter()
                .map(|cut| (cut.distance_along_route_km, Some(cut.coordinate))),
        );
        boundaries.push((total, None));

        let segments: Vec<Segment> = boundaries
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let (start_km, start_cut) = pair[0];
                let (end_km, end_cut) = pair[1];
                let range = SegmentRange {
                    start_km,
                    end_km,
                    start_cut,
                    end_cut,
                };
                Segment {
                    ordinal: (i + 1) as u32,
                    coordinates: build_segment(
                        points,
                        &index,
                        &range,
                        self.options.coincidence_tolerance_deg,
                    ),
                    length_km: end_km - start_km,
                }
            })
            .collect();

        debug!(
            route_id,
            vertices = points.len(),
            cuts = cut_points.len(),
            segments = segments.len(),
            total_km = total,
            spacing_km,
            "segmented route"
        );

        Ok(SegmentedRoute {
            route_id: route_id.to_string(),
            spacing_km,
            total_length_km: total,
            cut_points,
            segments,
        })
    }
}

impl<M: DistanceMetric + Sync> Segmenter<M> {
    /// Segments many routes in parallel. Results keep input order and each
    /// route succeeds or fails on its own.
    pub fn segment_many(
        &self,
        routes: &[RouteInput],
        spacing_km: f64,
    ) -> Vec<Result<SegmentedRoute, SegmentError>> {
        routes
            .par_iter()
            .map(|route| {
                self.segment(&route.route_id, &route.geometry, spacing_km)
                    .inspect_err(|err| warn!(route_id = %route.route_id, %err, "route not segmented"))
            })
            .collect()
    }
}

/// Segments `points` with default options.
pub fn segment_route(points: &[Coordinate], spacing_km: f64) -> Result<Vec<Segment>, SegmentError> {
    Segmenter::default()
        .segment_points("", points, spacing_km)
        .map(|route| route.segments)
}

fn validate_spacing(spacing_km: f64) -> Result<(), SegmentError> {
    if spacing_km.is_finite() && spacing_km > 0.0 {
        Ok(())
    } else {
        Err(SegmentError::InvalidSpacing(spacing_km))
    }
}

fn validate_points(points: &[Coordinate]) -> Result<(), SegmentError> {
    if points.len() < 2 {
        return Err(SegmentError::InvalidGeometry(format!(
            "route needs at least 2 coordinates, got {}",
            points.len()
        )));
    }
    points.iter().try_for_each(Coordinate::validate)
}
