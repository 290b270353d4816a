use geocurve::overlay::{Scene, Style};
use geocurve::{dataset, Error, Point};
use js_sys::Array;
use wasm_bindgen::prelude::*;

/// Overlay built once and handed to the page when its map widget reports ready.
///
/// The page creates it from the widget's own load callback; nothing here polls for the widget.
#[wasm_bindgen]
pub struct Overlay(Scene);

#[wasm_bindgen]
impl Overlay {
    /// Overlay of the built-in Sinaloa points, `style` is `"straight"` or `"curved"`
    #[wasm_bindgen(constructor)]
    pub fn new(style: &str) -> Result<Overlay, JsValue> {
        let style = style.parse::<Style>().map_err(to_js)?;
        Ok(Overlay(Scene::build(dataset::sinaloa(), style)))
    }

    /// Overlay of caller supplied points `[{name, coordinates: [lon, lat], weight}]`
    #[wasm_bindgen(js_name = fromPoints)]
    pub fn from_points(points: JsValue, style: &str) -> Result<Overlay, JsValue> {
        let style = style.parse::<Style>().map_err(to_js)?;
        let points: Vec<Point> = serde_wasm_bindgen::from_value(points)?;
        if points.is_empty() {
            return Err(to_js(Error::EmptyDataset));
        }
        Ok(Overlay(Scene::build(points, style)))
    }

    /// Every layer as plain objects: `{view, links, markers, nameLabels, distanceLabels}`
    #[wasm_bindgen]
    pub fn layers(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.0.layers())?)
    }

    /// Text for a click at `(lon, lat)`, `undefined` if no marker was hit
    #[wasm_bindgen]
    pub fn pick(&self, lon: f64, lat: f64, tolerance_km: f64) -> Option<String> {
        self.0
            .pick((lon, lat).into(), tolerance_km)
            .map(|marker| marker.describe())
    }

    /// Point names in input order
    #[wasm_bindgen(js_name = pointNames)]
    pub fn point_names(&self) -> Array {
        self.0
            .points
            .iter()
            .map(|point| JsValue::from_str(&point.name))
            .collect()
    }
}

fn to_js(err: Error) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
