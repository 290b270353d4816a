//! Point sets: the built-in Sinaloa locations and JSON files of the same shape.
//!
//! A dataset file is a JSON array of points:
//!
//! ```json
//! [{ "name": "Navolato", "coordinates": [-107.7008, 24.7669], "weight": 90 }]
//! ```
//!
//! `size` is accepted as an alias of `weight`.

use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};
use crate::pipeline::Point;

/// Four agricultural locations in Sinaloa, Mexico
pub fn sinaloa() -> Vec<Point> {
    vec![
        Point::new("Culiacán Valle", (-107.3943, 24.8091), 120.0),
        Point::new("Los Mochis", (-108.9921, 25.7933), 100.0),
        Point::new("Mazatlán Agricultural", (-106.4245, 23.2494), 110.0),
        Point::new("Navolato", (-107.7008, 24.7669), 90.0),
    ]
}

/// Parses a dataset from JSON text
pub fn from_json(text: &str) -> Result<Vec<Point>> {
    let points: Vec<Point> = serde_json::from_str(text)?;
    if points.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(points)
}

/// Reads and parses a dataset file
pub fn load(path: &Path) -> Result<Vec<Point>> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points = from_json(&text)?;
    info!(path = %path.display(), points = points.len(), "loaded dataset");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::LonLat;

    #[test]
    fn builtin_dataset() {
        let points = sinaloa();
        assert_eq!(points.len(), 4);
        assert_eq!(points[1].name, "Los Mochis");
        assert_eq!(points[3].coordinates, LonLat(-107.7008, 24.7669));
        assert!(points.iter().all(|p| p.weight > 0.0));
    }

    #[test]
    fn parses_weight_and_size() {
        let points = from_json(
            r#"[
                {"name": "A", "coordinates": [-107.0, 24.0], "weight": 3},
                {"name": "B", "coordinates": [-108.5, 25.5], "size": 7.5}
            ]"#,
        )
        .unwrap();
        assert_eq!(points[0], Point::new("A", (-107.0, 24.0), 3.0));
        assert_eq!(points[1].weight, 7.5);
    }

    #[test]
    fn roundtrips_builtin() {
        let text = serde_json::to_string(&sinaloa()).unwrap();
        assert!(text.contains(r#""coordinates":[-107.3943,24.8091]"#));
        assert_eq!(from_json(&text).unwrap(), sinaloa());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(from_json("[]"), Err(Error::EmptyDataset)));
        assert!(matches!(from_json("{}"), Err(Error::Json(_))));
        assert!(matches!(
            from_json(r#"[{"name": "A", "coordinates": [1.0], "weight": 1}]"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
