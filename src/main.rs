use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use geocurve::dataset;
use geocurve::draw::geojson::FeatureCollection;
use geocurve::overlay::{MapView, Scene, Style};
use geocurve::Point;

#[derive(Parser)]
#[command(name = "geocurve", version, about = "Distances and bowed connections between map points")]
struct Cli {
    /// JSON file of points, the built-in Sinaloa locations if omitted
    #[arg(long, global = true)]
    points: Option<PathBuf>,

    /// straight or curved connections
    #[arg(long, global = true, default_value = "curved")]
    style: Style,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the overlay
    Render {
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Write here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Svg width in pixels
        #[arg(long, default_value_t = 1024.0)]
        width: f64,
    },
    /// Describe the marker under a clicked position
    Pick {
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Hit radius around each marker in kilometres
        #[arg(long, default_value_t = 1.0)]
        tolerance_km: f64,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    /// Standalone svg document
    Svg,
    /// GeoJSON feature collection
    Geojson,
    /// Points with their derived connections and curves
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let points = load_points(cli.points.as_ref())?;
    let scene = Scene::build(points, cli.style).with_view(MapView::from_env());

    match cli.command {
        Command::Render {
            format,
            output,
            width,
        } => {
            let text = render(&scene, format, width)?;
            match output {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote overlay");
                }
                None => print!("{}", text),
            }
        }
        Command::Pick {
            lon,
            lat,
            tolerance_km,
        } => match scene.pick((lon, lat).into(), tolerance_km) {
            Some(marker) => println!("{}", marker.describe()),
            None => info!(lon, lat, "no marker at position"),
        },
    }
    Ok(())
}

fn load_points(path: Option<&PathBuf>) -> Result<Vec<Point>> {
    match path {
        Some(path) => dataset::load(path)
            .with_context(|| format!("failed to load points from {}", path.display())),
        None => Ok(dataset::sinaloa()),
    }
}

fn render(scene: &Scene, format: Format, width: f64) -> Result<String> {
    match format {
        Format::Svg => render_svg(scene, width),
        Format::Geojson => {
            let mut features = FeatureCollection::new();
            scene.render(&mut features);
            Ok(features.to_json()?)
        }
        Format::Json => {
            let json = serde_json::json!({
                "points": scene.points,
                "connections": scene.derived.connections,
                "curves": scene.derived.curves,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

#[cfg(feature = "draw-svg")]
fn render_svg(scene: &Scene, width: f64) -> Result<String> {
    use geocurve::draw::svg::SvgDocument;

    let bounds = scene.bounds().context("nothing to draw")?;
    let mut svg = SvgDocument::fitted(&bounds, width);
    scene.render(&mut svg);
    Ok(svg.to_string())
}

#[cfg(not(feature = "draw-svg"))]
fn render_svg(_scene: &Scene, _width: f64) -> Result<String> {
    anyhow::bail!("built without the draw-svg feature")
}
