//! Gate layout tool
//!
//! Reads gate records from a CSV export, clusters co-located gates and fits a map
//! viewport, then writes the render-ready layout as JSON.

use clap::{Parser, ValueEnum};
use csv::{ReaderBuilder, Trim};
use gate_layout::{
    Canvas, CoordinateSystem, ExcludedGate, ExclusionReason, GateRecord, ImageExtent, Layout,
    LayoutConfig, ZoomRange, build_layout_from_rows,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

#[cfg(test)]
mod main_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SystemArg {
    Geo,
    Image,
}

#[derive(Parser)]
#[command(name = "gate_layout")]
#[command(about = "Gate clustering and viewport fitting tool", long_about = None)]
struct Args {
    /// Input CSV file with id,name,latitude,longitude,x,y,status,health_score,activity_count columns
    #[arg(short, long, default_value = "gates.csv", env = "GATE_LAYOUT_INPUT")]
    input: PathBuf,

    /// Output JSON file with the layout (default: stdout)
    #[arg(short, long, env = "GATE_LAYOUT_OUTPUT")]
    output: Option<PathBuf>,

    /// Coordinate system of the gates (default: taken from the first placeable gate)
    #[arg(short, long, value_enum, env = "GATE_LAYOUT_SYSTEM")]
    system: Option<SystemArg>,

    /// Clustering threshold in source units (default: 0.0005 degrees or 20 px)
    #[arg(short, long, env = "GATE_LAYOUT_THRESHOLD")]
    threshold: Option<f64>,

    /// Bounding box padding as a fraction of the span
    #[arg(short, long, default_value_t = 0.1, env = "GATE_LAYOUT_PADDING")]
    padding: f64,

    #[arg(long, default_value_t = 800.0, env = "GATE_LAYOUT_CANVAS_WIDTH")]
    canvas_width: f64,

    #[arg(long, default_value_t = 600.0, env = "GATE_LAYOUT_CANVAS_HEIGHT")]
    canvas_height: f64,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true, env = "GATE_LAYOUT_MIN_ZOOM")]
    min_zoom: f64,

    #[arg(long, default_value_t = 18.0, allow_negative_numbers = true, env = "GATE_LAYOUT_MAX_ZOOM")]
    max_zoom: f64,

    /// Pixel margin around the fitted viewport
    #[arg(long, default_value_t = 40.0, env = "GATE_LAYOUT_FIT_PADDING")]
    fit_padding: f64,

    /// Width of the background image for image-space gates
    #[arg(long, env = "GATE_LAYOUT_IMAGE_WIDTH")]
    image_width: Option<f64>,

    /// Height of the background image for image-space gates
    #[arg(long, env = "GATE_LAYOUT_IMAGE_HEIGHT")]
    image_height: Option<f64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = if args.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let config = config_from_args(&args)?;
    let records = read_gate_records(&args.input)?;
    log::debug!("Read {} gate records from {:?}", records.len(), args.input);

    let layout = build_layout_from_rows(records, &config)?;

    if layout.is_empty() {
        log::warn!("No gates could be placed, writing empty layout");
    } else {
        log::info!(
            "{} markers, {} excluded gates",
            layout.markers.len(),
            layout.excluded.len()
        );
        for marker in &layout.markers {
            log::debug!(
                "marker {}: {} gates, status {}, tone {}, emphasis {}",
                marker.id,
                marker.gate_ids.len(),
                marker.status,
                marker.tone,
                marker.emphasis
            );
        }
    }

    match args.output {
        None => write_layout(io::stdout().lock(), &layout)?,
        Some(ref output_file) => {
            write_layout(File::create(output_file)?, &layout)?;
            log::debug!("Layout written to {:?}", output_file);
        }
    }

    Ok(())
}

/// Builds the engine configuration from command line flags
fn config_from_args(args: &Args) -> Result<LayoutConfig, Box<dyn Error>> {
    let extent = match (args.image_width, args.image_height) {
        (Some(width), Some(height)) => Some(ImageExtent { width, height }),
        (None, None) => None,
        _ => return Err("--image-width and --image-height must be given together".into()),
    };

    let system = match (args.system, extent) {
        (Some(SystemArg::Geo), _) => Some(CoordinateSystem::Geographic),
        (Some(SystemArg::Image), extent) | (None, extent @ Some(_)) => {
            Some(CoordinateSystem::Image { extent })
        }
        (None, None) => None,
    };

    let config = LayoutConfig {
        system,
        padding_fraction: args.padding,
        distance_threshold: args.threshold,
        canvas: Canvas::new(args.canvas_width, args.canvas_height)?,
        zoom_range: ZoomRange::new(args.min_zoom, args.max_zoom)?,
        fit_padding_px: args.fit_padding,
        ..Default::default()
    };
    config.validate()?;

    Ok(config)
}

/// Reads gate records from a CSV file with a header row
///
/// Empty cells are read as absent values. A row whose cells do not decode (e.g. a
/// non-numeric latitude or an unknown status) becomes a `MalformedRecord` exclusion when
/// its id is readable, and is skipped otherwise. File, UTF-8 and row shape problems still
/// fail the whole read.
fn read_gate_records(
    filename: &PathBuf,
) -> Result<Vec<Result<GateRecord, ExcludedGate>>, Box<dyn Error>> {
    let file = File::open(filename)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let id_column = headers.iter().position(|h| h == "id");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        match record.deserialize::<GateRecord>(Some(&headers)) {
            Ok(gate) => rows.push(Ok(gate)),
            Err(err) => {
                let id = id_column
                    .and_then(|i| record.get(i))
                    .filter(|id| !id.is_empty());
                match id {
                    Some(id) => {
                        log::warn!("Malformed record for gate {}: {}", id, err);
                        rows.push(Err(ExcludedGate {
                            id: id.to_string(),
                            reason: ExclusionReason::MalformedRecord,
                        }));
                    }
                    None => log::warn!("Skipping malformed record without an id: {}", err),
                }
            }
        }
    }

    Ok(rows)
}

/// Writes the layout as pretty-printed JSON
fn write_layout<W: Write>(mut out: W, layout: &Layout) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut out, layout)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
