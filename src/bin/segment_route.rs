use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use route_segmenter::{RouteGeometry, SegmentOptions, Segmenter, export};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Split a route into segments of a fixed length and print them as GeoJSON"
)]
struct Args {
    /// File holding an encoded polyline or a JSON array of [lon, lat] pairs ("-" for stdin)
    #[arg(long, default_value = "-")]
    input: PathBuf,

    /// Target segment length in kilometers
    #[arg(long)]
    spacing_km: f64,

    /// Identifier copied into each feature's parent_route_id
    #[arg(long, default_value = "route")]
    route_id: String,

    /// Encoded polyline precision (overrides ROUTE_SEGMENTER_POLYLINE_PRECISION)
    #[arg(long)]
    precision: Option<u32>,

    /// Pretty-print the GeoJSON output
    #[arg(long)]
    pretty: bool,
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_segmenter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut options = SegmentOptions::from_env();
    if let Some(precision) = args.precision {
        options.polyline_precision = precision;
    }
    let precision = options.polyline_precision;

    let raw = read_input(&args.input)?;
    let geometry = RouteGeometry::parse(&raw)?;

    let segmenter = Segmenter::new(options);
    let route = segmenter.segment(&args.route_id, &geometry, args.spacing_km)?;
    tracing::info!(
        "route {} ({:.3} km) split into {} segments",
        route.route_id,
        route.total_length_km,
        route.segments.len()
    );

    let collection = export::feature_collection(&[route], segmenter.metric(), precision);
    println!("{}", export::to_json(&collection, args.pretty)?);

    Ok(())
}
