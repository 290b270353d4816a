use geocurve_wasm::Overlay;
use js_sys::Reflect;
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[derive(Deserialize)]
struct Link {
    vertices: Vec<[f64; 2]>,
}

#[wasm_bindgen_test]
fn curved_layers() {
    let overlay = Overlay::new("curved").unwrap();
    let layers = overlay.layers().unwrap();

    let links = Reflect::get(&layers, &JsValue::from_str("links")).unwrap();
    let links: Vec<Link> = serde_wasm_bindgen::from_value(links).unwrap();
    assert_eq!(links.len(), 6);
    assert!(links.iter().all(|l| l.vertices.len() == 51));

    let labels = Reflect::get(&layers, &JsValue::from_str("distanceLabels")).unwrap();
    let first = Reflect::get(&labels, &JsValue::from_f64(0.0)).unwrap();
    let text = Reflect::get(&first, &JsValue::from_str("text")).unwrap();
    assert_eq!(text.as_string().as_deref(), Some("194 km"));
}

#[wasm_bindgen_test]
fn picking_and_names() {
    let overlay = Overlay::new("straight").unwrap();
    assert_eq!(
        overlay.pick(-107.395, 24.809, 0.0).as_deref(),
        Some("Culiacán Valle\n(-107.3943,24.8091)")
    );
    assert_eq!(overlay.pick(-100.0, 20.0, 1.0), None);
    assert_eq!(overlay.point_names().length(), 4);
}

#[wasm_bindgen_test]
fn rejects_bad_input() {
    assert!(Overlay::new("wavy").is_err());
    let empty = serde_wasm_bindgen::to_value(&Vec::<u8>::new()).unwrap();
    assert!(Overlay::from_points(empty, "curved").is_err());
}
