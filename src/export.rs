//! GeoJSON export of segmented routes.
//!
//! One `LineString` feature per segment, ready for a map layer.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};

use crate::segmenter::{Segment, SegmentedRoute};
use crate::traits::DistanceMetric;

/// Builds a collection covering every segment of every route, in order.
pub fn feature_collection<M: DistanceMetric>(
    routes: &[SegmentedRoute],
    metric: &M,
    precision: u32,
) -> FeatureCollection {
    routes
        .iter()
        .flat_map(|route| {
            route
                .segments
                .iter()
                .enumerate()
                .map(move |(segment_index, segment)| {
                    segment_feature(&route.route_id, segment_index, segment, metric, precision)
                })
        })
        .collect()
}

/// `segment_index` is 0-based; `ordinal` keeps the segment's 1-based position.
pub fn segment_feature<M: DistanceMetric>(
    route_id: &str,
    segment_index: usize,
    segment: &Segment,
    metric: &M,
    precision: u32,
) -> Feature {
    let line = segment
        .coordinates
        .iter()
        .map(|c| vec![c.lon, c.lat])
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("parent_route_id".to_string(), JsonValue::from(route_id));
    properties.insert("segment_index".to_string(), JsonValue::from(segment_index));
    properties.insert("ordinal".to_string(), JsonValue::from(segment.ordinal));
    properties.insert("length_km".to_string(), JsonValue::from(segment.length_km));
    properties.insert(
        "segment_encoded".to_string(),
        JsonValue::from(segment.encode(precision)),
    );
    if let Some(center) = segment.midpoint(metric) {
        properties.insert(
            "center".to_string(),
            JsonValue::from(vec![center.lon, center.lat]),
        );
    }

    Feature {
        bbox: segment
            .bounds()
            .map(|b| vec![b.min_lon, b.min_lat, b.max_lon, b.max_lat]),
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Serializes a collection, optionally pretty-printed.
pub fn to_json(collection: &FeatureCollection, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(collection)
    } else {
        serde_json::to_string(collection)
    }
}
