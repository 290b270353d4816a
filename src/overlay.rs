//! Renderer-neutral overlay: markers, name labels, connections or curves, and distance labels.
//!
//! A [`Scene`] is built once from a point set and then handed to any [`DrawOverlay`] or
//! serialized as [`Layers`] for a map widget.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::{debug, info};

use crate::bounding_box::BoundingBox;
use crate::draw::DrawOverlay;
use crate::error::Error;
use crate::geodesy::{haversine_km, LonLat};
use crate::pipeline::{derive, Derived, Point};

/// Colour as `[r, g, b, a]`
pub type Rgba = [u8; 4];

/// Marker radius in metres per unit of point weight
pub const RADIUS_SCALE: f64 = 10.0;
/// Smallest rendered marker radius in pixels
pub const RADIUS_MIN_PX: f64 = 10.0;
/// Largest rendered marker radius in pixels
pub const RADIUS_MAX_PX: f64 = 100.0;

const MARKER_OUTLINE: Rgba = [0, 0, 0, 255];
const LABEL_COLOR: Rgba = [255, 255, 255, 255];
const NAME_BACKGROUND: Rgba = [0, 0, 0, 128];
const NAME_SIZE_PX: f64 = 16.0;
const NAME_PADDING_PX: f64 = 2.0;
const DISTANCE_SIZE_PX: f64 = 12.0;
const DISTANCE_PADDING_PX: f64 = 1.0;

/// Which connections the overlay draws between points
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Straight lines labelled at their planar midpoint
    Straight,
    /// Bowed bezier curves labelled at their middle vertex
    #[default]
    Curved,
}

/// Colours and widths of a [`Style`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Palette {
    /// Marker fill
    pub marker_fill: Rgba,
    /// Connection or curve stroke
    pub link_color: Rgba,
    /// Connection or curve width in pixels
    pub link_width_px: f64,
    /// Background behind distance labels
    pub distance_background: Rgba,
}

impl Style {
    /// The colour scheme used with this style
    pub fn palette(self) -> Palette {
        match self {
            Style::Straight => Palette {
                marker_fill: [255, 140, 0, 200],
                link_color: [255, 255, 255, 150],
                link_width_px: 2.0,
                distance_background: [0, 0, 0, 180],
            },
            Style::Curved => Palette {
                marker_fill: [0, 255, 140, 200],
                link_color: [0, 255, 140, 180],
                link_width_px: 3.0,
                distance_background: [0, 100, 0, 180],
            },
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Style::Straight),
            "curved" => Ok(Style::Curved),
            other => Err(Error::UnknownStyle(other.to_string())),
        }
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Straight => write!(f, "straight"),
            Style::Curved => write!(f, "curved"),
        }
    }
}

/// Initial camera of the map widget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Map centre
    pub center: LonLat,
    /// Zoom level
    pub zoom: u8,
    /// Base map imagery
    pub map_type: String,
}

impl Default for MapView {
    fn default() -> Self {
        MapView {
            center: LonLat(-107.5, 24.5),
            zoom: 9,
            map_type: "satellite".to_string(),
        }
    }
}

impl MapView {
    /// Default view with overrides from `GEOCURVE_MAP_LAT`, `GEOCURVE_MAP_LON` and `GEOCURVE_MAP_ZOOM`.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Default view with overrides looked up by variable name through `var`
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let default = MapView::default();
        let lat = var("GEOCURVE_MAP_LAT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default.center.lat());
        let lon = var("GEOCURVE_MAP_LON")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default.center.lon());
        let zoom = var("GEOCURVE_MAP_ZOOM")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default.zoom);
        MapView {
            center: LonLat(lon, lat),
            zoom,
            ..default
        }
    }
}

/// A point's marker
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Name of the point
    pub name: String,
    /// Centre
    pub position: LonLat,
    /// Radius on the ground, clamped to `[radius_min_px, radius_max_px]` once rendered
    pub radius_m: f64,
    /// Smallest rendered radius
    pub radius_min_px: f64,
    /// Largest rendered radius
    pub radius_max_px: f64,
    /// Fill colour
    pub fill: Rgba,
    /// Outline colour
    pub outline: Rgba,
}

impl Marker {
    /// Text shown when the marker is clicked: the name and `(lon,lat)` on a second line.
    ///
    /// ```
    /// # use geocurve::{dataset, overlay::{Scene, Style}};
    /// let scene = Scene::build(dataset::sinaloa(), Style::Curved);
    /// let marker = &scene.markers()[3];
    /// assert_eq!(marker.describe(), "Navolato\n(-107.7008,24.7669)");
    /// ```
    pub fn describe(&self) -> String {
        format!("{}\n({})", self.name, self.position)
    }
}

/// Polyline drawn between two points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    /// Indices of the connected points
    pub pair: (usize, usize),
    /// Vertices from source to target
    pub vertices: Vec<LonLat>,
    /// Stroke colour
    pub color: Rgba,
    /// Stroke width in pixels
    pub width_px: f64,
}

/// What a label annotates
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelKind {
    /// A point's name, sitting on top of its marker
    Name,
    /// A pair's distance, centred on its anchor
    Distance,
}

/// Vertical placement of a label relative to its anchor
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    /// Text sits above the anchor
    Bottom,
    /// Text is vertically centred on the anchor
    Center,
}

/// Text anchored at a position, horizontally centred
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    /// Name or distance
    pub kind: LabelKind,
    /// Displayed text
    pub text: String,
    /// Anchor
    pub position: LonLat,
    /// Font size in pixels
    pub size_px: f64,
    /// Text colour
    pub color: Rgba,
    /// Background box colour
    pub background: Rgba,
    /// Padding of the background box in pixels
    pub padding_px: f64,
    /// Bold font
    pub bold: bool,
    /// Vertical placement
    pub baseline: Baseline,
}

/// All layers of a scene in draw order, as handed to a map widget
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layers {
    /// Initial camera
    pub view: MapView,
    /// Connections or curves
    pub links: Vec<Polyline>,
    /// One marker per point
    pub markers: Vec<Marker>,
    /// One name label per point
    pub name_labels: Vec<Label>,
    /// One distance label per pair
    pub distance_labels: Vec<Label>,
}

/// Points and everything derived from them, built once and read afterwards
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Straight or curved connections
    pub style: Style,
    /// Initial camera
    pub view: MapView,
    /// Input points in their declared order
    pub points: Vec<Point>,
    /// Connections and curves of every pair
    pub derived: Derived,
}

impl Scene {
    /// Derives connections and curves for `points`
    pub fn build(points: Vec<Point>, style: Style) -> Scene {
        let derived = derive(&points);
        info!(
            points = points.len(),
            pairs = derived.connections.len(),
            %style,
            "built scene"
        );
        Scene {
            style,
            view: MapView::default(),
            points,
            derived,
        }
    }

    /// Replaces the initial camera
    pub fn with_view(mut self, view: MapView) -> Scene {
        self.view = view;
        self
    }

    /// One marker per point, in input order
    pub fn markers(&self) -> Vec<Marker> {
        let fill = self.style.palette().marker_fill;
        self.points
            .iter()
            .map(|point| Marker {
                name: point.name.clone(),
                position: point.coordinates,
                radius_m: point.weight * RADIUS_SCALE,
                radius_min_px: RADIUS_MIN_PX,
                radius_max_px: RADIUS_MAX_PX,
                fill,
                outline: MARKER_OUTLINE,
            })
            .collect()
    }

    /// Straight connections or curves, depending on the style
    pub fn links(&self) -> Vec<Polyline> {
        let palette = self.style.palette();
        let line = |pair, vertices| Polyline {
            pair,
            vertices,
            color: palette.link_color,
            width_px: palette.link_width_px,
        };
        match self.style {
            Style::Straight => self
                .derived
                .connections
                .iter()
                .map(|c| line(c.pair, vec![c.source, c.target]))
                .collect(),
            Style::Curved => self
                .derived
                .curves
                .iter()
                .map(|c| line(c.pair, c.path.clone()))
                .collect(),
        }
    }

    /// One bold name label per point, sitting on the point
    pub fn name_labels(&self) -> Vec<Label> {
        self.points
            .iter()
            .map(|point| Label {
                kind: LabelKind::Name,
                text: point.name.clone(),
                position: point.coordinates,
                size_px: NAME_SIZE_PX,
                color: LABEL_COLOR,
                background: NAME_BACKGROUND,
                padding_px: NAME_PADDING_PX,
                bold: true,
                baseline: Baseline::Bottom,
            })
            .collect()
    }

    /// One `"<distance> km"` label per pair, at the connection's or curve's anchor
    pub fn distance_labels(&self) -> Vec<Label> {
        let background = self.style.palette().distance_background;
        let label = |distance_km: f64, position| Label {
            kind: LabelKind::Distance,
            text: format!("{} km", distance_km),
            position,
            size_px: DISTANCE_SIZE_PX,
            color: LABEL_COLOR,
            background,
            padding_px: DISTANCE_PADDING_PX,
            bold: false,
            baseline: Baseline::Center,
        };
        match self.style {
            Style::Straight => self
                .derived
                .connections
                .iter()
                .map(|c| label(c.distance_km, c.midpoint))
                .collect(),
            Style::Curved => self
                .derived
                .curves
                .iter()
                .map(|c| label(c.distance_km, c.midpoint))
                .collect(),
        }
    }

    /// Every layer, ready to be serialized for a map widget
    pub fn layers(&self) -> Layers {
        Layers {
            view: self.view.clone(),
            links: self.links(),
            markers: self.markers(),
            name_labels: self.name_labels(),
            distance_labels: self.distance_labels(),
        }
    }

    /// Feeds every layer to `canvas`: links first, then markers, names and distances on top
    pub fn render<D: DrawOverlay + ?Sized>(&self, canvas: &mut D) {
        for link in self.links().iter() {
            canvas.add_polyline(link);
        }
        for marker in self.markers().iter() {
            canvas.add_marker(marker);
        }
        for label in self.name_labels().iter().chain(self.distance_labels().iter()) {
            canvas.add_label(label);
        }
    }

    /// Box around every point and link vertex in `(lon, lat)`, `None` for an empty scene
    pub fn bounds(&self) -> Option<BoundingBox<f64>> {
        let points = self.points.iter().map(|p| p.coordinates);
        let vertices = self.links().into_iter().flat_map(|l| l.vertices);
        BoundingBox::from_iter(points.chain(vertices).map(LonLat::to_vector))
    }

    /// Resolves a click at `at` to the closest marker.
    ///
    /// A marker is hit when the click lies within its ground radius or within `tolerance_km`,
    /// whichever is larger.
    pub fn pick(&self, at: LonLat, tolerance_km: f64) -> Option<Marker> {
        let hit = self
            .markers()
            .into_iter()
            .map(|marker| (haversine_km(marker.position, at), marker))
            .filter(|(distance, marker)| *distance <= tolerance_km.max(marker.radius_m / 1000.0))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, marker)| marker);
        debug!(%at, hit = ?hit.as_ref().map(|m| &m.name), "picked");
        hit
    }
}
