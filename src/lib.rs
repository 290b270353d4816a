#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod bezier;
pub mod bounding_box;
pub mod dataset;
pub mod draw;
pub mod error;
pub mod geodesy;
pub mod overlay;
pub mod pipeline;

pub use crate::bezier::{BezierCurve, CubicCurve};
pub use crate::error::{Error, Result};
pub use crate::geodesy::LonLat;
pub use crate::overlay::{Scene, Style};
pub use crate::pipeline::{derive, Connection, Curve, Derived, Point};
