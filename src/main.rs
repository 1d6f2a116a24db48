//! dronelog - post-flight analysis of drone telemetry logs
//!
//! `inspect` summarises an uploaded log; `render` runs one redraw and writes
//! the chart and map payloads as JSON (or a text summary).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use dronelog::analysis::range_filter::TimeRange;
use dronelog::render::{render_frame, JsonRenderer, SummaryRenderer};
use dronelog::settings::UserSettings;
use dronelog::state::{
    is_supported_path, Session, SessionConfig, MAX_PLOT_SLOTS, PREVIEW_ROWS, SUPPORTED_EXTENSIONS,
};

#[derive(Parser, Debug)]
#[command(name = "dronelog")]
#[command(about = "Post-flight analysis of drone telemetry CSV logs", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print columns, time axis and a short preview of a log
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Prepare chart and map data for one view of a log
    Render(RenderArgs),
    /// Write the current settings to the settings file
    InitSettings,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Path to the telemetry CSV file
    file: PathBuf,

    /// Clock column in microsecond ticks
    #[arg(long)]
    time_column: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Start of the time range
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    start: Option<f64>,

    /// End of the time range
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    end: Option<f64>,

    /// Comma-separated parameters for one plot (repeat for more plots)
    #[arg(long = "plot", value_name = "PARAMS")]
    plots: Vec<String>,

    /// Latitude column
    #[arg(long)]
    lat: Option<String>,

    /// Longitude column
    #[arg(long)]
    lon: Option<String>,

    /// Heading column (degrees, compass convention)
    #[arg(long, conflicts_with = "no_yaw")]
    yaw: Option<String>,

    /// Do not show a heading indicator
    #[arg(long)]
    no_yaw: bool,

    /// Map scrub time
    #[arg(long, allow_negative_numbers = true, value_parser = parse_finite)]
    at: Option<f64>,

    /// Write a text summary instead of JSON
    #[arg(long)]
    summary: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => UserSettings::load_from(path),
        None => UserSettings::load(),
    };

    match cli.command {
        Command::Inspect { source } => inspect(&source, &settings),
        Command::Render(args) => render(&args, &settings),
        Command::InitSettings => init_settings(cli.settings.as_deref(), &settings),
    }
}

/// Time values must be finite numbers
fn parse_finite(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", raw))
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_session(source: &SourceArgs, settings: &UserSettings) -> Result<Session> {
    if !source.file.exists() {
        bail!("Path not found: {}", source.file.display());
    }
    if !is_supported_path(&source.file) {
        tracing::warn!(
            "Unexpected file extension for {} (expected one of: {})",
            source.file.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    let time_column = source
        .time_column
        .as_deref()
        .unwrap_or(&settings.time_column);
    Session::open(&source.file, time_column)
        .with_context(|| format!("Could not load {}", source.file.display()))
}

fn init_settings(path: Option<&Path>, settings: &UserSettings) -> Result<()> {
    let written = match path {
        Some(path) => {
            settings.save_to(path).map_err(anyhow::Error::msg)?;
            path.to_path_buf()
        }
        None => {
            settings.save().map_err(anyhow::Error::msg)?;
            UserSettings::get_settings_path().unwrap_or_default()
        }
    };
    println!("Settings written to {}", written.display());
    Ok(())
}

fn inspect(source: &SourceArgs, settings: &UserSettings) -> Result<()> {
    let session = open_session(source, settings)?;
    let resolved = session.resolved();
    let axis = session.axis();

    let mut out = io::stdout().lock();
    writeln!(out, "File: {}", session.name)?;
    writeln!(
        out,
        "Rows: {} ({} dropped without a valid time)",
        resolved.table.row_count(),
        resolved.dropped_rows
    )?;
    writeln!(out, "Columns: {}", session.source().columns().join(", "))?;
    writeln!(out, "Time axis: {} ({})", axis.column, axis.unit())?;

    if let (Some((min, max)), Some(hints)) = (session.extent(), session.hints()) {
        writeln!(
            out,
            "Extent: {} to {} (step {}, scrub step {})",
            hints.format(min),
            hints.format(max),
            hints.step,
            hints.scrub_step
        )?;
    }

    let map = session.default_map_columns(settings);
    writeln!(
        out,
        "Map columns: lat={} lon={} yaw={}",
        map.lat.as_deref().unwrap_or("-"),
        map.lon.as_deref().unwrap_or("-"),
        map.yaw.as_deref().unwrap_or("-")
    )?;

    let preview = resolved.table.head(PREVIEW_ROWS);
    writeln!(out)?;
    writeln!(out, "{}", preview.columns().join(","))?;
    for row in preview.rows() {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", cells.join(","))?;
    }
    Ok(())
}

fn render(args: &RenderArgs, settings: &UserSettings) -> Result<()> {
    let session = open_session(&args.source, settings)?;
    let config = build_config(&session, args, settings);
    let frame = session.redraw(&config);

    for notice in &frame.notices {
        tracing::info!("{:?}: {}", notice.level, notice.message);
    }

    let writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Could not create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if args.summary {
        let mut renderer = SummaryRenderer::new(writer);
        render_frame(&frame, &mut renderer)?;
        renderer.into_inner().flush()?;
    } else {
        let mut renderer = JsonRenderer::new(writer);
        render_frame(&frame, &mut renderer)?;
        renderer.finish(&frame)?;
    }
    Ok(())
}

/// Start from the session defaults and apply command-line overrides
fn build_config(session: &Session, args: &RenderArgs, settings: &UserSettings) -> SessionConfig {
    let mut config = session.default_config(settings);

    if args.start.is_some() || args.end.is_some() {
        let (min, max) = session.extent().unwrap_or((0.0, 0.0));
        config.range = Some(TimeRange::new(
            args.start.unwrap_or(min),
            args.end.unwrap_or(max),
        ));
    }

    if !args.plots.is_empty() {
        if args.plots.len() > MAX_PLOT_SLOTS {
            tracing::warn!("Only the first {} --plot options are used", MAX_PLOT_SLOTS);
        }
        config.plots = Some(
            args.plots
                .iter()
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .collect(),
        );
    }

    if let Some(lat) = &args.lat {
        config.map.lat = Some(lat.clone());
    }
    if let Some(lon) = &args.lon {
        config.map.lon = Some(lon.clone());
    }
    if let Some(yaw) = &args.yaw {
        config.map.yaw = Some(yaw.clone());
    }
    if args.no_yaw {
        config.map.yaw = None;
    }

    config.scrub_time = args.at;
    config
}
