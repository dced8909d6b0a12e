//! route-segmenter core
//!
//! Splits route polylines into consecutive segments of a target length,
//! with cut points lying exactly on the original path.

pub mod config;
pub mod coordinate;
pub mod cut_points;
pub mod distance_index;
pub mod error;
pub mod export;
pub mod haversine;
pub mod polyline;
pub mod segment_builder;
pub mod segmenter;
pub mod traits;
pub mod worker;

pub use config::SegmentOptions;
pub use coordinate::Coordinate;
pub use error::{SegmentError, WorkerError};
pub use polyline::RouteGeometry;
pub use segmenter::{Segment, SegmentedRoute, Segmenter, segment_route};
