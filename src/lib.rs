//! Export recorded ground control telemetry logs to KML/KMZ.
//! The track is colored by groundspeed, with periodic heading markers,
//! a ground track projection and vertical reference lines ("wall axes").
//!
//! The log is read in two passes. The first validates framing
//! without decoding anything, the second streams frame payloads
//! through a UAVTalk decoder into the track builder.
//! Corrupt framing is tolerated where possible, see `Warning`.
//!
//! ```rs
//! use flightlog_kml::Exporter;
//! use std::path::Path;
//!
//! fn main() -> Result<(), flightlog_kml::FlightLogError> {
//!     let report = Exporter::new(Path::new("flight.opl"), Path::new("flight.kml"))
//!         .export()?;
//!     for warning in report.warnings.iter() {
//!         println!("{warning}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod colormap;
pub mod constants;
pub mod export;
pub mod geo;
pub mod kml;
pub mod logfile;
pub mod telemetry;
pub mod track;
pub (crate) mod files;
mod errors;

pub use color::{map_velocity_to_color, Color};
pub use errors::FlightLogError;
pub use export::{ExportOptions, ExportReport, Exporter};
pub use kml::OutputMode;
pub use logfile::{FrameIndex, LogHeader, LogScanner, StreamSummary, Warning};
pub use telemetry::{
    GpsStatus,
    HomeLocation,
    Ned,
    ObjectKind,
    ObjectTable,
    Telemetry,
    TelemetryDecoder,
    UavTalkDecoder,
};
pub use track::{GeoPoint, Keyframe, Segment, TrackBuilder, TrackDocument};
