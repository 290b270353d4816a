//! Defines [`DrawOverlay`], implemented by the various output formats a scene can be drawn into.
//!
//! A map widget wants three things: polylines for the connections, markers for the points
//! and text for the labels. Every back end receives them through the same three calls,
//! in the order [`Scene::render`](crate::overlay::Scene::render) emits them.
use crate::overlay::{Label, Marker, Polyline};

/// Draw overlay elements on different "drawing contexts" with ease.
///
/// Use different crate features to enable different contexts:
/// - `draw-svg` to draw into a standalone svg document
///
/// GeoJSON output is always available.
pub trait DrawOverlay {
    /// Add a connection or curve.
    fn add_polyline(&mut self, line: &Polyline);

    /// Add a point's marker.
    fn add_marker(&mut self, marker: &Marker);

    /// Add a name or distance label.
    fn add_label(&mut self, label: &Label);
}

pub mod geojson;
#[cfg(feature = "draw-svg")]
pub mod svg;
