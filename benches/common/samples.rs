use geocurve::geodesy::LonLat;
use geocurve::Point;
use once_cell::sync::Lazy;

/// Pairs spanning a few metres up to a few hundred kilometres,
/// plus a coincident pair
pub static PAIRS: [(LonLat, LonLat); 5] = [
    (LonLat(-107.3943, 24.8091), LonLat(-108.9921, 25.7933)),
    (LonLat(-107.3943, 24.8091), LonLat(-107.7008, 24.7669)),
    (LonLat(-108.9921, 25.7933), LonLat(-106.4245, 23.2494)),
    (LonLat(-107.5000, 24.5000), LonLat(-107.5001, 24.5001)),
    (LonLat(-107.7008, 24.7669), LonLat(-107.7008, 24.7669)),
];

/// A 4x4 grid of points around Culiacán, giving 120 pairs
pub static GRID: Lazy<Vec<Point>> = Lazy::new(|| {
    (0..16)
        .map(|i| {
            let lon = -108.5 + (i % 4) as f64 * 0.5;
            let lat = 24.0 + (i / 4) as f64 * 0.5;
            Point::new(format!("grid {}", i), (lon, lat), 50.0 + i as f64)
        })
        .collect()
});
