//! Log to KML/KMZ export.
//!
//! ```rs
//! use flightlog_kml::{Exporter, ExportOptions, ObjectTable};
//! use std::path::Path;
//!
//! fn main() -> Result<(), flightlog_kml::FlightLogError> {
//!     let options = ExportOptions {
//!         objects: ObjectTable::from_path(Path::new("objects.txt"))?,
//!         ..Default::default()
//!     };
//!     let report = Exporter::new(Path::new("flight.opl"), Path::new("flight.kmz"))
//!         .with_options(options)
//!         .export()?;
//!     println!("{} segments", report.segments);
//!     Ok(())
//! }
//! ```

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use indicatif::ProgressBar;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::{
    FlightLogError,
    kml::{self, OutputMode},
    logfile::{LogHeader, LogScanner, Warning},
    telemetry::{ObjectTable, UavTalkDecoder},
    track::TrackBuilder,
};

/// Export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Build hash the log is expected to be recorded with.
    /// No check if `None`.
    pub expected_build_hash: Option<String>,
    /// Object schema hash the log is expected to be recorded with.
    /// No check if `None`.
    pub expected_schema_hash: Option<String>,
    /// Wall clock time that log time `0` maps to in KML time spans.
    /// Logs carry no absolute time, defaults to now.
    pub epoch: OffsetDateTime,
    /// Telemetry object ids.
    pub objects: ObjectTable,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            expected_build_hash: None,
            expected_schema_hash: None,
            epoch: OffsetDateTime::now_utc(),
            objects: ObjectTable::default(),
        }
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Valid frames found in pass 1.
    pub frames_indexed: usize,
    /// Frames decoded in pass 2.
    pub frames_streamed: usize,
    /// Payload bytes decoded in pass 2.
    pub payload_bytes: u64,
    pub segments: usize,
    pub keyframes: usize,
    /// Position updates dropped for lack of home location or GPS fix.
    pub dropped_positions: usize,
    /// `true` if streaming stopped early. Everything
    /// decoded up to that point was exported.
    pub truncated: bool,
    pub warnings: Vec<Warning>,
    pub output_mode: OutputMode,
}

impl ExportReport {
    /// `true` for a complete export, i.e. not truncated.
    pub fn is_complete(&self) -> bool {
        !self.truncated
    }
}

/// Single export run from a log file to a KML or KMZ file.
#[derive(Debug)]
pub struct Exporter {
    input: PathBuf,
    output: PathBuf,
    options: ExportOptions,
    progress: Option<ProgressBar>,
}

impl Exporter {
    pub fn new(input: &Path, output: &Path) -> Self {
        Self {
            input: input.to_owned(),
            output: output.to_owned(),
            options: ExportOptions::default(),
            progress: None,
        }
    }

    pub fn with_options(self, options: ExportOptions) -> Self {
        Self {
            options,
            ..self
        }
    }

    /// Report pass 2 progress on `progress`.
    /// Its length is set to the number of indexed frames.
    pub fn with_progress(self, progress: ProgressBar) -> Self {
        Self {
            progress: Some(progress),
            ..self
        }
    }

    /// Runs the export. Only fatal conditions return an error:
    /// unsupported output extension, input that can not be opened,
    /// a log without valid frames and output write failures.
    /// No output file is created for the first three.
    pub fn export(self) -> Result<ExportReport, FlightLogError> {
        // fail before reading anything
        OutputMode::from_path(&self.output)?;

        let file = File::open(&self.input)
            .map_err(|err| FlightLogError::OpenFailed{path: self.input.to_owned(), err})?;
        let mut reader = BufReader::new(file);

        let header = LogHeader::read(&mut reader)?;
        let mut warnings: Vec<Warning> = Vec::new();
        warnings.extend(header.check_compatibility(
            self.options.expected_build_hash.as_deref(),
            self.options.expected_schema_hash.as_deref(),
        ));
        warnings.extend(header.separator_warning());

        let mut scanner = LogScanner::new(reader, header.frames_start)?
            .with_source(&self.input);

        let index = scanner.index()?;

        if let Some(bar) = &self.progress {
            bar.set_length(index.len() as u64);
        }

        let mut decoder = UavTalkDecoder::new(self.options.objects.to_owned());
        let mut builder = TrackBuilder::new();

        let summary = scanner.stream(
            &mut decoder,
            |timestamp, telemetry| builder.update(timestamp, telemetry),
            self.progress.as_ref()
        )?;

        if let Some(bar) = &self.progress {
            bar.finish_and_clear();
        }

        debug!("Decoder: {:?}", decoder.stats());

        let dropped_positions = builder.dropped();
        let document = builder.finish(self.options.epoch);
        let output_mode = kml::write_document(&document, &self.output)?;

        warnings.extend(summary.warnings);

        let report = ExportReport {
            frames_indexed: index.len(),
            frames_streamed: summary.frames,
            payload_bytes: summary.payload_bytes,
            segments: document.segments.len(),
            keyframes: document.keyframes.len(),
            dropped_positions,
            truncated: summary.truncated,
            warnings,
            output_mode,
        };

        info!("Exported {} segments and {} keyframes to '{}'{}",
            report.segments,
            report.keyframes,
            self.output.display(),
            if report.truncated {" (partial)"} else {""}
        );

        Ok(report)
    }
}
