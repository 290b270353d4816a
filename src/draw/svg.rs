//! Draw an overlay into a standalone svg document
//!
//! Positions are projected equirectangularly: `x = lon` and `y = -lat`, so north is up.
//! Pixel sizes (stroke widths, marker clamps, fonts) are converted to user units using the
//! document's pixel width.

use nalgebra::Vector2;
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};

use crate::bounding_box::BoundingBox;
use crate::draw::DrawOverlay;
use crate::geodesy::{LonLat, EARTH_RADIUS_KM};
use crate::overlay::{Baseline, Label, Marker, Polyline, Rgba};

/// Share of the larger side added around the fitted scene
const PADDING: f64 = 0.05;

/// Rough advance of a glyph relative to the font size, used to size label backgrounds
const GLYPH_ADVANCE: f64 = 0.6;

/// Svg document collecting elements
pub struct SvgDocument {
    /// Visible region in projected units
    pub view_box: BoundingBox<f64>,
    /// Rendered width in pixels
    pub width_px: f64,
    /// Elements in paint order
    pub elements: Vec<Box<dyn Display>>,
}

impl SvgDocument {
    /// Creates an empty document whose view box fits `bounds` (in `(lon, lat)`) plus some padding.
    pub fn fitted(bounds: &BoundingBox<f64>, width_px: f64) -> SvgDocument {
        let projected = BoundingBox {
            min: Vector2::new(bounds.min.x, -bounds.max.y),
            max: Vector2::new(bounds.max.x, -bounds.min.y),
        };
        SvgDocument {
            view_box: projected.padded(PADDING),
            width_px,
            elements: Vec::new(),
        }
    }

    /// Appends an element
    pub fn add_elem<E: Display + 'static>(&mut self, elem: E) {
        self.elements.push(Box::new(elem));
    }

    /// Rendered height in pixels, keeping the view box' aspect ratio
    pub fn height_px(&self) -> f64 {
        let size = self.view_box.size();
        self.width_px * size.y / size.x
    }

    /// User units covered by one pixel
    fn units_per_px(&self) -> f64 {
        self.view_box.size().x / self.width_px
    }
}

fn project(p: LonLat) -> Vector2<f64> {
    Vector2::new(p.lon(), -p.lat())
}

/// Degrees of latitude per metre on the ground
fn degrees_per_metre() -> f64 {
    180.0 / (PI * EARTH_RADIUS_KM * 1000.0)
}

impl Display for SvgDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let size = self.view_box.size();
        writeln!(
            f,
            "<svg viewBox=\"{} {} {} {}\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.view_box.min.x,
            self.view_box.min.y,
            size.x,
            size.y,
            self.width_px,
            self.height_px(),
        )?;
        for elem in self.elements.iter() {
            elem.fmt(f)?;
        }
        writeln!(f, "</svg>")?;
        Ok(())
    }
}

/// Writes a colour as `rgb(..)` to go with a separate opacity attribute
struct Paint(Rgba);

impl Paint {
    fn opacity(&self) -> f64 {
        self.0[3] as f64 / 255.0
    }
}

impl Display for Paint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({},{},{})", self.0[0], self.0[1], self.0[2])
    }
}

/// Escapes the characters svg text content and attributes can't contain
struct Escaped<'s>(&'s str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

/// Open polyline
pub struct Path {
    /// Stroke colour
    pub stroke: Rgba,
    /// Stroke width in user units
    pub width: f64,
    /// Projected vertices
    pub vertices: Vec<Vector2<f64>>,
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let stroke = Paint(self.stroke);
        write!(
            f,
            "<path stroke=\"{}\" stroke-opacity=\"{}\" fill=\"none\" stroke-width=\"{}\" stroke-linejoin=\"round\" d=\"",
            stroke,
            stroke.opacity(),
            self.width
        )?;
        for (i, p) in self.vertices.iter().enumerate() {
            write!(f, "{} {} {} ", if i == 0 { "M" } else { "L" }, p.x, p.y)?;
        }
        writeln!(f, "\"/>")?;
        Ok(())
    }
}

/// Filled and outlined circle
pub struct Circle {
    /// Projected centre
    pub center: Vector2<f64>,
    /// Radius in user units
    pub radius: f64,
    /// Fill colour
    pub fill: Rgba,
    /// Outline colour
    pub stroke: Rgba,
    /// Outline width in user units
    pub stroke_width: f64,
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fill = Paint(self.fill);
        let stroke = Paint(self.stroke);
        writeln!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"/>",
            self.center.x,
            self.center.y,
            self.radius,
            fill,
            fill.opacity(),
            stroke,
            stroke.opacity(),
            self.stroke_width,
        )
    }
}

/// Horizontally centred text on a background box
pub struct Text {
    /// Projected anchor
    pub anchor: Vector2<f64>,
    /// Content
    pub text: String,
    /// Font size in user units
    pub size: f64,
    /// Padding of the background box in user units
    pub padding: f64,
    /// Text colour
    pub color: Rgba,
    /// Background box colour
    pub background: Rgba,
    /// Bold font
    pub bold: bool,
    /// Vertical placement relative to the anchor
    pub baseline: Baseline,
}

impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.text.chars().count() as f64 * self.size * GLYPH_ADVANCE + 2.0 * self.padding;
        let height = self.size + 2.0 * self.padding;
        let top = match self.baseline {
            Baseline::Bottom => self.anchor.y - height,
            Baseline::Center => self.anchor.y - height / 2.0,
        };
        let background = Paint(self.background);
        writeln!(
            f,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" fill-opacity=\"{}\"/>",
            self.anchor.x - width / 2.0,
            top,
            width,
            height,
            background,
            background.opacity(),
        )?;

        let color = Paint(self.color);
        let baseline = match self.baseline {
            Baseline::Bottom => "text-after-edge",
            Baseline::Center => "central",
        };
        writeln!(
            f,
            "<text x=\"{}\" y=\"{}\" font-family=\"Arial, sans-serif\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\" fill-opacity=\"{}\" text-anchor=\"middle\" dominant-baseline=\"{}\">{}</text>",
            self.anchor.x,
            match self.baseline {
                Baseline::Bottom => self.anchor.y - self.padding,
                Baseline::Center => self.anchor.y,
            },
            self.size,
            if self.bold { "bold" } else { "normal" },
            color,
            color.opacity(),
            baseline,
            Escaped(&self.text),
        )
    }
}

impl DrawOverlay for SvgDocument {
    fn add_polyline(&mut self, line: &Polyline) {
        if line.vertices.len() < 2 {
            return;
        }
        let width = line.width_px * self.units_per_px();
        self.add_elem(Path {
            stroke: line.color,
            width,
            vertices: line.vertices.iter().map(|&p| project(p)).collect(),
        });
    }

    fn add_marker(&mut self, marker: &Marker) {
        let units_per_px = self.units_per_px();
        let radius_px = (marker.radius_m * degrees_per_metre() / units_per_px)
            .clamp(marker.radius_min_px, marker.radius_max_px);
        self.add_elem(Circle {
            center: project(marker.position),
            radius: radius_px * units_per_px,
            fill: marker.fill,
            stroke: marker.outline,
            stroke_width: units_per_px,
        });
    }

    fn add_label(&mut self, label: &Label) {
        let units_per_px = self.units_per_px();
        self.add_elem(Text {
            anchor: project(label.position),
            text: label.text.clone(),
            size: label.size_px * units_per_px,
            padding: label.padding_px * units_per_px,
            color: label.color,
            background: label.background,
            bold: label.bold,
            baseline: label.baseline,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sinaloa;
    use crate::overlay::{Scene, Style};

    fn document(style: Style) -> String {
        let scene = Scene::build(sinaloa(), style);
        let mut svg = SvgDocument::fitted(&scene.bounds().unwrap(), 1000.0);
        scene.render(&mut svg);
        svg.to_string()
    }

    #[test]
    fn curved_document() {
        let svg = document(Style::Curved);
        assert!(svg.starts_with("<svg viewBox=\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<path ").count(), 6);
        assert_eq!(svg.matches("<circle ").count(), 4);
        assert_eq!(svg.matches("<text ").count(), 10);
        assert!(svg.contains(">194 km</text>"));
        assert!(svg.contains(">Culiacán Valle</text>"));
        assert!(svg.contains("rgb(0,255,140)"));
    }

    #[test]
    fn curve_paths_have_every_vertex() {
        let svg = document(Style::Curved);
        let first = svg.lines().find(|l| l.starts_with("<path ")).unwrap();
        assert_eq!(first.matches("M ").count(), 1);
        assert_eq!(first.matches("L ").count(), 50);
    }

    #[test]
    fn straight_paths_are_segments() {
        let svg = document(Style::Straight);
        let first = svg.lines().find(|l| l.starts_with("<path ")).unwrap();
        assert_eq!(first.matches("L ").count(), 1);
        assert!(first.contains("stroke=\"rgb(255,255,255)\""));
    }

    #[test]
    fn north_is_up() {
        let bounds = BoundingBox::from([Vector2::new(-109.0, 23.0), Vector2::new(-106.0, 26.0)]);
        let svg = SvgDocument::fitted(&bounds, 300.0);
        assert!(svg.view_box.min.y < -26.0);
        assert!(svg.view_box.max.y > -23.0);
        assert!((svg.height_px() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn markers_are_clamped_to_pixels() {
        let bounds = BoundingBox::from([Vector2::new(-109.0, 23.0), Vector2::new(-106.0, 26.0)]);
        let mut svg = SvgDocument::fitted(&bounds, 330.0);
        let scene = Scene::build(sinaloa(), Style::Curved);
        // 1.2 km is well below ten pixels at this scale.
        svg.add_marker(&scene.markers()[0]);
        let circle = svg.elements[0].to_string();
        let expected_radius = 10.0 * svg.units_per_px();
        assert!(circle.contains(&format!("r=\"{}\"", expected_radius)), "{}", circle);
    }

    #[test]
    fn escapes_text() {
        assert_eq!(Escaped("a<b & \"c\">").to_string(), "a&lt;b &amp; &quot;c&quot;&gt;");
    }
}
