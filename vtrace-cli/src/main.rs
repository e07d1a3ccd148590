use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use vtrace::config::{ColorMode, Config, Hierarchical, PathSimplifyMode};
use vtrace::vtrace;

/// Raster-to-SVG vectorization CLI — convert a PNG into a layered SVG
#[derive(Parser)]
#[command(name = "vtrace", version)]
struct Args {
    /// Input PNG path
    input: String,

    /// Output SVG path (stdout if omitted)
    output: Option<String>,

    /// Minimum cluster area eligible to become its own output layer
    #[arg(long, default_value_t = Config::default().filter_speckle)]
    filter_speckle: u32,

    /// Color quantization precision, 1..8
    #[arg(long, default_value_t = Config::default().color_precision)]
    color_precision: u8,

    /// Manhattan RGB distance threshold for emitting a distinct layer
    #[arg(long, default_value_t = Config::default().layer_difference)]
    layer_difference: u32,

    /// Degrees; turning angle above which a vertex is a preserved corner
    #[arg(long, default_value_t = Config::default().corner_threshold)]
    corner_threshold: f64,

    /// Pixels; edges at or below this length are not subdivided
    #[arg(long, default_value_t = Config::default().length_threshold)]
    length_threshold: f64,

    /// Degrees; cumulative turning angle that forces a new Bezier splice
    #[arg(long, default_value_t = Config::default().splice_threshold)]
    splice_threshold: f64,

    /// Maximum smoothing passes
    #[arg(long, default_value_t = Config::default().max_iterations)]
    max_iterations: u32,

    /// Decimal places in emitted path coordinates
    #[arg(long, default_value_t = Config::default().path_precision)]
    path_precision: usize,

    /// Path output mode
    #[arg(long, value_enum, default_value_t = Mode::Spline)]
    mode: Mode,

    /// Color handling before clustering
    #[arg(long, value_enum, default_value_t = ColorModeArg::Color)]
    color_mode: ColorModeArg,

    /// Layer pixel-ownership rule
    #[arg(long, value_enum, default_value_t = HierarchicalArg::Stacked)]
    hierarchical: HierarchicalArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Polygon,
    Spline,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorModeArg {
    Color,
    Binary,
}

#[derive(Clone, Copy, ValueEnum)]
enum HierarchicalArg {
    Stacked,
    Cutout,
}

fn build_config(args: &Args) -> Config {
    Config {
        filter_speckle: args.filter_speckle,
        color_precision: args.color_precision,
        layer_difference: args.layer_difference,
        corner_threshold: args.corner_threshold,
        length_threshold: args.length_threshold,
        splice_threshold: args.splice_threshold,
        max_iterations: args.max_iterations,
        path_precision: args.path_precision,
        mode: match args.mode {
            Mode::Polygon => PathSimplifyMode::Polygon,
            Mode::Spline => PathSimplifyMode::Spline,
        },
        color_mode: match args.color_mode {
            ColorModeArg::Color => ColorMode::Color,
            ColorModeArg::Binary => ColorMode::Binary,
        },
        hierarchical: match args.hierarchical {
            HierarchicalArg::Stacked => Hierarchical::Stacked,
            HierarchicalArg::Cutout => Hierarchical::Cutout,
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args);

    let img = image::open(&args.input)
        .with_context(|| format!("failed to open image: {}", args.input))?
        .into_rgba8();
    let (width, height) = (img.width(), img.height());
    let mut pixels = img.into_raw();

    let svg = vtrace(&mut pixels, width, height, &config)
        .with_context(|| format!("vectorizing {}", args.input))?;

    match &args.output {
        Some(path) => {
            fs::write(path, svg).with_context(|| format!("writing output: {path}"))?;
        }
        None => {
            io::stdout()
                .write_all(svg.as_bytes())
                .context("writing SVG to stdout")?;
        }
    }

    Ok(())
}
