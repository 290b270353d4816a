//! Spherical earth helpers working on `(longitude, latitude)` pairs in decimal degrees.
//!
//! Every function here is closed-form arithmetic on a sphere of radius [`EARTH_RADIUS_KM`].
//! Inputs are not validated: out-of-range or non-finite coordinates simply flow through the
//! formulas and produce whatever floating point yields.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Mean earth radius used by every function in this module
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position stored longitude first, serialized as `[lon, lat]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat(pub f64, pub f64);

impl LonLat {
    /// Creates a position from longitude and latitude in degrees
    pub fn new(lon: f64, lat: f64) -> Self {
        LonLat(lon, lat)
    }

    /// Longitude in degrees
    pub fn lon(&self) -> f64 {
        self.0
    }

    /// Latitude in degrees
    pub fn lat(&self) -> f64 {
        self.1
    }

    /// Component-wise mean of two positions.
    ///
    /// This is a planar average, not the geodesic midpoint.
    /// It is only a sensible label anchor for pairs a few hundred kilometres apart.
    pub fn midpoint(&self, other: LonLat) -> LonLat {
        LonLat((self.0 + other.0) / 2.0, (self.1 + other.1) / 2.0)
    }

    /// View the position as a vector with `x = lon` and `y = lat`
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.0, self.1)
    }
}

/* Conversions from and to nalgebra and plain tuples */
impl From<Vector2<f64>> for LonLat {
    fn from(v: Vector2<f64>) -> Self {
        LonLat(v.x, v.y)
    }
}
impl From<LonLat> for Vector2<f64> {
    fn from(p: LonLat) -> Self {
        p.to_vector()
    }
}
impl From<(f64, f64)> for LonLat {
    fn from(p: (f64, f64)) -> Self {
        LonLat(p.0, p.1)
    }
}
impl From<[f64; 2]> for LonLat {
    fn from(p: [f64; 2]) -> Self {
        LonLat(p[0], p[1])
    }
}

impl Display for LonLat {
    /// Formats as `lon,lat`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// Great-circle distance in kilometres using the haversine formula.
///
/// ```
/// use geocurve::geodesy::{haversine_km, LonLat};
///
/// let culiacan = LonLat(-107.3943, 24.8091);
/// let los_mochis = LonLat(-108.9921, 25.7933);
/// assert_eq!(haversine_km(culiacan, los_mochis).round(), 194.0);
/// assert_eq!(haversine_km(culiacan, culiacan), 0.0);
/// ```
pub fn haversine_km(a: LonLat, b: LonLat) -> f64 {
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lon = (b.lon() - a.lon()).to_radians();
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing from `from` towards `to` in degrees clockwise from north.
///
/// The result lies in `(-180, 180]`. Identical positions yield `0`.
pub fn bearing(from: LonLat, to: LonLat) -> f64 {
    let lon1 = from.lon().to_radians();
    let lon2 = to.lon().to_radians();
    let lat1 = from.lat().to_radians();
    let lat2 = to.lat().to_radians();

    let y = (lon2 - lon1).sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * (lon2 - lon1).cos();
    y.atan2(x).to_degrees()
}

/// Position reached when travelling `distance_km` from `origin` with the initial bearing `bearing_deg`.
///
/// A negative distance travels backwards.
pub fn destination(origin: LonLat, distance_km: f64, bearing_deg: f64) -> LonLat {
    let lon1 = origin.lon().to_radians();
    let lat1 = origin.lat().to_radians();
    let theta = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());
    LonLat(lon2.to_degrees(), lat2.to_degrees())
}

/// Position `distance_km` along a polyline, measured from its first vertex.
///
/// The walk stops at the first vertex whose accumulated length reaches the distance
/// and steps back from it by the overshoot.
/// Distances past the end clamp to the last vertex, distances of zero (or less) to the first.
/// Returns `None` for an empty line.
pub fn along(line: &[LonLat], distance_km: f64) -> Option<LonLat> {
    let last = line.len().checked_sub(1)?;
    let mut travelled = 0.0;
    for i in 0..=last {
        if travelled >= distance_km {
            let overshot = distance_km - travelled;
            if overshot == 0.0 || i == 0 {
                return Some(line[i]);
            }
            let direction = bearing(line[i], line[i - 1]) - 180.0;
            return Some(destination(line[i], overshot, direction));
        }
        if i == last {
            break;
        }
        travelled += haversine_km(line[i], line[i + 1]);
    }
    // Past the end, or a NaN distance no comparison can place.
    Some(line[last])
}
