//! Flight log export errors.

use std::fmt;
use std::path::PathBuf;

/// Fatal export errors. Recoverable framing problems
/// never surface here, see `Warning` in the scanner instead.
#[derive(Debug)]
pub enum FlightLogError {
    /// Input log could not be opened.
    OpenFailed{path: PathBuf, err: std::io::Error},
    /// No valid frames were found in the log.
    EmptyLog(PathBuf),
    /// Output extension is neither `kml` nor `kmz`.
    UnsupportedExtension(PathBuf),
    /// Output could not be written.
    WriteFailed{path: PathBuf, err: std::io::Error},
    /// Malformed telemetry object table.
    InvalidObjectTable{line: usize, content: String},
    /// Converted `std::io::Error`.
    IoError(std::io::Error),
    /// Converted `binrw::Error`.
    BinReadError(binrw::Error),
    /// Converted `zip::result::ZipError`.
    ZipError(zip::result::ZipError),
    /// Converted `time::error::Format`.
    TimeFormatError(time::error::Format),
    /// Converted `std::fmt::Error`.
    FormatError(std::fmt::Error),
}

impl std::error::Error for FlightLogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlightLogError::OpenFailed{err, ..} => Some(err),
            FlightLogError::WriteFailed{err, ..} => Some(err),
            FlightLogError::IoError(err) => Some(err),
            FlightLogError::BinReadError(err) => Some(err),
            FlightLogError::ZipError(err) => Some(err),
            FlightLogError::TimeFormatError(err) => Some(err),
            FlightLogError::FormatError(err) => Some(err),
            _ => None
        }
    }
}

impl fmt::Display for FlightLogError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlightLogError::OpenFailed{path, err} => write!(f, "Unable to open '{}': {err}", path.display()),
            FlightLogError::EmptyLog(path) => write!(f, "No log data found in '{}'", path.display()),
            FlightLogError::UnsupportedExtension(path) => write!(f,
                "Invalid output file name '{}'. Expected extension 'kml' or 'kmz'",
                path.display()
            ),
            FlightLogError::WriteFailed{path, err} => write!(f, "Failed to write '{}': {err}", path.display()),
            FlightLogError::InvalidObjectTable{line, content} => write!(f,
                "Invalid object table entry on line {line}: '{content}'"
            ),
            FlightLogError::IoError(err) => write!(f, "IO error: {}", err),
            FlightLogError::BinReadError(err) => write!(f, "{}", err),
            FlightLogError::ZipError(err) => write!(f, "Failed to package KMZ: {}", err),
            FlightLogError::TimeFormatError(err) => write!(f, "Failed to format time: {}", err),
            FlightLogError::FormatError(err) => write!(f, "Failed to render KML: {}", err),
        }
    }
}

impl From<std::io::Error> for FlightLogError {
    fn from(err: std::io::Error) -> Self {
        FlightLogError::IoError(err)
    }
}

impl From<binrw::Error> for FlightLogError {
    fn from(err: binrw::Error) -> Self {
        FlightLogError::BinReadError(err)
    }
}

impl From<zip::result::ZipError> for FlightLogError {
    fn from(err: zip::result::ZipError) -> Self {
        FlightLogError::ZipError(err)
    }
}

impl From<time::error::Format> for FlightLogError {
    fn from(err: time::error::Format) -> Self {
        FlightLogError::TimeFormatError(err)
    }
}

impl From<std::fmt::Error> for FlightLogError {
    fn from(err: std::fmt::Error) -> Self {
        FlightLogError::FormatError(err)
    }
}
