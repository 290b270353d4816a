//! Derives straight connections and bowed curves for every unordered pair of points.
//!
//! Pairs are visited with the outer index strictly below the inner one, both ascending,
//! so the same input always yields the same output in the same order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bezier::CubicCurve;
use crate::geodesy::{along, bearing, destination, haversine_km, LonLat};

/// Number of parameter steps a curve is sampled with, giving `CURVE_STEPS + 1` vertices
pub const CURVE_STEPS: usize = 50;

/// Fractions of the straight distance at which the inner control points are anchored
pub const ANCHOR_FRACTIONS: [f64; 2] = [0.25, 0.75];

/// Perpendicular offset of the inner control points relative to the straight distance
pub const OFFSET_RATIO: f64 = 0.3;

/// Turn applied to the source bearing to get the offset direction
pub const OFFSET_TURN_DEG: f64 = 90.0;

/// A named location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Human readable label
    pub name: String,

    /// `[lon, lat]` in decimal degrees
    pub coordinates: LonLat,

    /// Marker size, positive, without geometric meaning
    #[serde(alias = "size")]
    pub weight: f64,
}

impl Point {
    /// Creates a point from a name, `(lon, lat)` and a weight
    pub fn new(name: impl Into<String>, coordinates: impl Into<LonLat>, weight: f64) -> Self {
        Point {
            name: name.into(),
            coordinates: coordinates.into(),
            weight,
        }
    }
}

/// Straight connection between two points
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Indices of source and target in the input
    pub pair: (usize, usize),
    /// Source position
    pub source: LonLat,
    /// Target position
    pub target: LonLat,
    /// Great-circle distance rounded to whole kilometres
    pub distance_km: f64,
    /// Planar mean of both endpoints, used as label anchor
    pub midpoint: LonLat,
}

/// Bowed bezier connection between two points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curve {
    /// Indices of source and target in the input
    pub pair: (usize, usize),
    /// `CURVE_STEPS + 1` vertices from source to target
    pub path: Vec<LonLat>,
    /// Great-circle distance of the straight connection rounded to whole kilometres
    pub distance_km: f64,
    /// Vertex at the path's middle index, used as label anchor
    pub midpoint: LonLat,
}

/// Every connection and curve derived from one point set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    /// One straight connection per pair
    pub connections: Vec<Connection>,
    /// One curve per pair
    pub curves: Vec<Curve>,
}

/// Iterates all unordered index pairs `(i, j)` with `i < j < n`.
///
/// ```
/// let pairs: Vec<_> = geocurve::pipeline::pairs(3).collect();
/// assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
/// ```
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Straight connection for the input pair `pair`, with its rounded distance and planar midpoint
pub fn connection(pair: (usize, usize), source: LonLat, target: LonLat) -> Connection {
    Connection {
        pair,
        source,
        target,
        distance_km: haversine_km(source, target).round(),
        midpoint: source.midpoint(target),
    }
}

/// Control points of the curve bowing away from the straight line between `source` and `target`.
///
/// The inner control points sit on the straight line at a quarter and three quarters of the
/// distance, pushed sideways by [`OFFSET_RATIO`] of the distance.
/// Both are pushed towards `bearing + 90°`, so every curve bows to the right of its direction
/// of travel.
pub fn bow_control_points(source: LonLat, target: LonLat) -> CubicCurve {
    let distance = haversine_km(source, target);
    let heading = bearing(source, target);
    let offset = distance * OFFSET_RATIO;
    let line = [source, target];

    let [c1, c2] = ANCHOR_FRACTIONS.map(|fraction| {
        let anchor = along(&line, distance * fraction).unwrap_or(source);
        destination(anchor, offset, heading + OFFSET_TURN_DEG)
    });

    CubicCurve::cubic(source, c1, c2, target)
}

/// Vertices of the bowed curve from `source` to `target`
pub fn bow_curve(source: LonLat, target: LonLat) -> Vec<LonLat> {
    bow_control_points(source, target).sample(CURVE_STEPS)
}

/// Bowed curve for the input pair `pair`, with the straight distance and the middle vertex as
/// label anchor
pub fn curve(pair: (usize, usize), source: LonLat, target: LonLat) -> Curve {
    let path = bow_curve(source, target);
    let midpoint = path[path.len() / 2];
    Curve {
        pair,
        path,
        distance_km: haversine_km(source, target).round(),
        midpoint,
    }
}

/// Straight connections for every pair of `points`
pub fn connections(points: &[Point]) -> Vec<Connection> {
    pairs(points.len())
        .map(|(i, j)| connection((i, j), points[i].coordinates, points[j].coordinates))
        .collect()
}

/// Bowed curves for every pair of `points`
pub fn curves(points: &[Point]) -> Vec<Curve> {
    pairs(points.len())
        .map(|(i, j)| curve((i, j), points[i].coordinates, points[j].coordinates))
        .collect()
}

/// Connections and curves for every pair of `points`
pub fn derive(points: &[Point]) -> Derived {
    let derived = Derived {
        connections: connections(points),
        curves: curves(points),
    };
    for connection in derived.connections.iter() {
        let (i, j) = connection.pair;
        debug!(
            from = %points[i].name,
            to = %points[j].name,
            distance_km = connection.distance_km,
            "derived pair"
        );
    }
    derived
}
