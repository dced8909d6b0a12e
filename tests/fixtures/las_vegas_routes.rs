//! Real Las Vegas routes for realistic segmentation fixtures.
//!
//! Vertices are OpenStreetMap points along Las Vegas Boulevard and out to
//! Henderson, listed in driving order.

use route_segmenter::Coordinate;

/// A named route vertex.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }
}

// ============================================================================
// Las Vegas Strip, south to north
// ============================================================================

pub const STRIP_NORTHBOUND: &[Location] = &[
    Location::new("Welcome Sign", 36.0820, -115.1728),
    Location::new("Mandalay Bay", 36.0917, -115.1742),
    Location::new("Outback Steakhouse Strip", 36.1037287, -115.1724577),
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("The Crack Shack", 36.1050709, -115.1735287),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("Caesars Palace", 36.1162, -115.1745),
    Location::new("Flour & Barley", 36.1173688, -115.1702674),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Location::new("Yard House", 36.1177147, -115.1691992),
    Location::new("Public House", 36.1219193, -115.1689317),
    Location::new("SW Steakhouse", 36.1262145, -115.1669146),
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("Encore at Wynn", 36.1289345, -115.1653620),
    Location::new("Sinatra", 36.1300035, -115.1654850),
    Location::new("Stratosphere", 36.1474, -115.1566),
];

// ============================================================================
// Strip to Henderson (long, sparse edges)
// ============================================================================

pub const STRIP_TO_HENDERSON: &[Location] = &[
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
    Location::new("Sunset Station", 36.0634, -115.0364),
    Location::new("Green Valley Ranch", 36.0137, -115.0833),
];

pub fn strip_route() -> Vec<Coordinate> {
    STRIP_NORTHBOUND.iter().map(Location::coordinate).collect()
}

pub fn henderson_route() -> Vec<Coordinate> {
    STRIP_TO_HENDERSON.iter().map(Location::coordinate).collect()
}

/// The Strip route with one vertex repeated mid-way, as drawn routes often have.
pub fn strip_route_with_duplicate() -> Vec<Coordinate> {
    let mut points = strip_route();
    let dup = points[6];
    points.insert(7, dup);
    points
}
