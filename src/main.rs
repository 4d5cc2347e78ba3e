#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, ValueEnum};
use pointinpoly_rs::geo::LabelOptions;
use pointinpoly_rs::orientation::Winding;
use pointinpoly_rs::parse::ParseOptions;
use pointinpoly_rs::writer::{Destination, WriterOptions};
use pointinpoly_rs::{constants, processor};
use std::{fs::File, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WindingArg {
    /// Rewind every polygon before labeling; works for any input.
    Auto,
    /// Outer rings clockwise, holes counter-clockwise (shapefile order).
    CwOuter,
    /// Outer rings counter-clockwise, holes clockwise (OGC/GeoJSON order).
    CcwOuter,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of horizontal scan-lines sampled per polygon.
    #[arg(required = true)]
    quality: u32,

    /// Input FlatGeobuf file paths (.fgb or .zip).
    #[arg(required = true, num_args = 1..)]
    src_files: Vec<PathBuf>,

    /// Write the points to this FlatGeobuf file instead of printing them.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Ring order of the input polygons.
    #[arg(short, long, value_enum, default_value_t = WindingArg::Auto)]
    winding: WindingArg,

    /// EPSG code to record as the output layer's CRS.
    #[arg(short, long)]
    epsg: Option<i32>,

    /// Disable FlatGeobuf index creation (turn this off for large exports).
    #[arg(short, long, default_value_t = false)]
    disable_fgb_index: bool,

    /// Enable logging. Will log to pointinpoly.log in the current directory.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        simplelog::WriteLogger::init(
            simplelog::LevelFilter::Info,
            simplelog::Config::default(),
            File::create(constants::LOG_FILE_NAME)?,
        )?;
    }

    let parse_options = ParseOptions {
        normalize_winding: cli.winding == WindingArg::Auto,
    };
    let winding = match cli.winding {
        WindingArg::Auto | WindingArg::CwOuter => Winding::ClockwiseOuter,
        WindingArg::CcwOuter => Winding::CounterClockwiseOuter,
    };
    let label_options = LabelOptions::new(cli.quality, winding)?;
    let destination = match &cli.output {
        Some(path) => Destination::Fgb {
            path: path.clone(),
            options: WriterOptions {
                write_index: !cli.disable_fgb_index,
                epsg: cli.epsg,
            },
        },
        None => Destination::Text(Box::new(std::io::stdout())),
    };

    eprintln!(
        "Labeling with quality {} and {:?}...",
        label_options.quality(),
        label_options.winding()
    );

    let summary =
        processor::process_files(cli.src_files, parse_options, label_options, destination)?;

    eprintln!(
        "Labeled {} polygon(s) from {} file(s); {} without interior, {} non-polygon record(s) skipped.",
        summary.labeled, summary.files, summary.failed, summary.skipped
    );
    if let Some(path) = &cli.output {
        eprintln!("Destination: {:?}", path);
    }

    Ok(())
}
