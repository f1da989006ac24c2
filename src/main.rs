//! Export a ground control telemetry log to KML or KMZ.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use flightlog_kml::{ExportOptions, Exporter, ObjectTable};
use indicatif::{ProgressBar, ProgressStyle};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "flightlog-kml", version, about = "Export telemetry logs to velocity colored KML/KMZ tracks")]
struct Args {
    /// Telemetry log
    input: PathBuf,

    /// Output file, extension 'kml' or 'kmz'
    output: PathBuf,

    /// Telemetry object id table, one 'Name = 0xID' per line
    #[arg(short, long)]
    objects: PathBuf,

    /// Warn if the log was recorded with a different build hash
    #[arg(long)]
    expected_build_hash: Option<String>,

    /// Warn if the log was recorded with a different object schema hash
    #[arg(long)]
    expected_schema_hash: Option<String>,

    /// Start time for KML time spans (RFC 3339). Defaults to now
    #[arg(long, value_parser = parse_epoch)]
    epoch: Option<OffsetDateTime>,

    /// Show progress bar
    #[arg(short, long)]
    progress: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_epoch(value: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {err}");
    }

    let objects = match ObjectTable::from_path(&args.objects) {
        Ok(table) => table,
        Err(err) => {
            error!("Failed to load object table '{}': {err}", args.objects.display());
            return ExitCode::FAILURE
        }
    };
    if objects.is_empty() {
        warn!("Object table '{}' is empty, no track will be exported", args.objects.display());
    }

    let options = ExportOptions {
        expected_build_hash: args.expected_build_hash,
        expected_schema_hash: args.expected_schema_hash,
        epoch: args.epoch.unwrap_or_else(OffsetDateTime::now_utc),
        objects,
    };

    let mut exporter = Exporter::new(&args.input, &args.output)
        .with_options(options);

    if args.progress {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} frames") {
            bar.set_style(style);
        }
        exporter = exporter.with_progress(bar);
    }

    match exporter.export() {
        Ok(report) => {
            info!("{} frames indexed, {} decoded ({} bytes)",
                report.frames_indexed,
                report.frames_streamed,
                report.payload_bytes
            );
            if report.dropped_positions > 0 {
                info!("{} positions skipped without home location or GPS fix", report.dropped_positions);
            }
            info!("Wrote {} segments, {} keyframes to '{}'",
                report.segments,
                report.keyframes,
                args.output.display()
            );
            if !report.is_complete() {
                warn!("Log ended early, export is partial ({} warning/s)", report.warnings.len());
            }
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
