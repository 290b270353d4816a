//! Draw an overlay into a GeoJSON `FeatureCollection`
//!
//! Every element becomes one feature; styling travels in its `properties`,
//! under a `layer` key naming the layer it belongs to.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::draw::DrawOverlay;
use crate::geodesy::LonLat;
use crate::overlay::{Label, LabelKind, Marker, Polyline};

/// GeoJSON geometry, tagged by `type` with its `coordinates`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    /// Single position
    Point(LonLat),
    /// Open polyline
    LineString(Vec<LonLat>),
}

/// A geometry with free-form properties
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Feature {
    /// Where the feature is
    pub geometry: Geometry,
    /// Styling and annotations
    pub properties: Map<String, Value>,
}

/// Collection of features in paint order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    /// Features in the order they were drawn
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the collection as indented json
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn push(&mut self, geometry: Geometry, properties: Value) {
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self.features.push(Feature {
            geometry,
            properties,
        });
    }
}

impl DrawOverlay for FeatureCollection {
    fn add_polyline(&mut self, line: &Polyline) {
        let layer = if line.vertices.len() > 2 {
            "curves"
        } else {
            "connections"
        };
        self.push(
            Geometry::LineString(line.vertices.clone()),
            json!({
                "layer": layer,
                "pair": line.pair,
                "color": line.color,
                "widthPx": line.width_px,
            }),
        );
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.push(
            Geometry::Point(marker.position),
            json!({
                "layer": "markers",
                "name": marker.name,
                "radiusM": marker.radius_m,
                "radiusMinPx": marker.radius_min_px,
                "radiusMaxPx": marker.radius_max_px,
                "fillColor": marker.fill,
                "lineColor": marker.outline,
            }),
        );
    }

    fn add_label(&mut self, label: &Label) {
        let layer = match label.kind {
            LabelKind::Name => "names",
            LabelKind::Distance => "distances",
        };
        self.push(
            Geometry::Point(label.position),
            json!({
                "layer": layer,
                "text": label.text,
                "sizePx": label.size_px,
                "color": label.color,
                "backgroundColor": label.background,
                "paddingPx": label.padding_px,
                "fontWeight": if label.bold { "bold" } else { "normal" },
                "baseline": label.baseline,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sinaloa;
    use crate::overlay::{Scene, Style};

    fn collection(style: Style) -> Value {
        let mut features = FeatureCollection::new();
        Scene::build(sinaloa(), style).render(&mut features);
        serde_json::from_str(&features.to_json().unwrap()).unwrap()
    }

    #[test]
    fn curved_collection() {
        let value = collection(Style::Curved);
        assert_eq!(value["type"], "FeatureCollection");
        let features = value["features"].as_array().unwrap();
        assert_eq!(features.len(), 6 + 4 + 4 + 6);

        let curve = &features[0];
        assert_eq!(curve["type"], "Feature");
        assert_eq!(curve["geometry"]["type"], "LineString");
        assert_eq!(curve["geometry"]["coordinates"].as_array().unwrap().len(), 51);
        assert_eq!(curve["properties"]["layer"], "curves");
        assert_eq!(curve["properties"]["pair"], json!([0, 1]));

        let marker = &features[6];
        assert_eq!(marker["geometry"], json!({"type": "Point", "coordinates": [-107.3943, 24.8091]}));
        assert_eq!(marker["properties"]["name"], "Culiacán Valle");
        assert_eq!(marker["properties"]["fillColor"], json!([0, 255, 140, 200]));

        let distance = &features[14];
        assert_eq!(distance["properties"]["layer"], "distances");
        assert_eq!(distance["properties"]["text"], "194 km");
        assert_eq!(distance["properties"]["baseline"], "center");
    }

    #[test]
    fn straight_collection() {
        let value = collection(Style::Straight);
        let line = &value["features"][0];
        assert_eq!(line["properties"]["layer"], "connections");
        assert_eq!(
            line["geometry"]["coordinates"],
            json!([[-107.3943, 24.8091], [-108.9921, 25.7933]])
        );
    }
}
