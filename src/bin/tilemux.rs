use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tilemux::{LayoutOptions, StreamInput, Tiler, calibration_raster};

#[derive(Parser, Debug)]
#[command(name = "tilemux", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a stream list into the configured output format.
    Compose(ComposeArgs),
    /// Emit a calibration pattern for a downstream compositor.
    Raster(RasterArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Layout configuration JSON.
    #[arg(long)]
    layout: PathBuf,

    /// Stream list JSON (array of stream records).
    #[arg(long)]
    streams: PathBuf,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct RasterArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: i32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: i32,

    /// Include the font-size ladder labels.
    #[arg(long)]
    labels: bool,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => compose(&args),
        Command::Raster(args) => raster(&args),
    }
}

fn compose(args: &ComposeArgs) -> anyhow::Result<()> {
    let layout = LayoutOptions::from_path(&args.layout)?;
    let streams: Vec<StreamInput> = read_json(&args.streams)
        .with_context(|| format!("reading streams {}", args.streams.display()))?;
    let tiler = Tiler::new(layout).context("invalid layout configuration")?;
    let output = tiler.compose(&streams);
    print_json(&output, args.pretty)
}

fn raster(args: &RasterArgs) -> anyhow::Result<()> {
    let output = calibration_raster(args.width, args.height, args.labels);
    print_json(&output, args.pretty)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
