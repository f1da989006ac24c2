//! Writes rendered KML as plain `.kml` or zipped `.kmz`.

use std::{fs::File, io::Write, path::{Path, PathBuf}};

use tracing::{debug, warn};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::{
    FlightLogError,
    constants::KMZ_DOC_NAME,
    files::fileext_to_lcstring,
};

/// Output packaging, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain KML markup.
    Kml,
    /// Zip archive with the markup as `doc.kml`.
    Kmz,
}

impl OutputMode {
    /// Output mode for `path`, case-insensitive.
    /// Errors on anything but `kml` or `kmz`.
    pub fn from_path(path: &Path) -> Result<Self, FlightLogError> {
        match fileext_to_lcstring(path).as_deref() {
            Some("kml") => Ok(Self::Kml),
            Some("kmz") => Ok(Self::Kmz),
            _ => Err(FlightLogError::UnsupportedExtension(path.to_owned()))
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::Kml => "kml",
            Self::Kmz => "kmz",
        }
    }
}

/// Writes `kml` to `path`. A partially written file
/// is removed on failure.
pub fn write(kml: &str, path: &Path) -> Result<OutputMode, FlightLogError> {
    let mode = OutputMode::from_path(path)?;

    let result = match mode {
        OutputMode::Kml => write_kml(kml, path),
        OutputMode::Kmz => write_kmz(kml, path),
    };

    if let Err(err) = result {
        if path.exists() {
            if let Err(rm_err) = std::fs::remove_file(path) {
                warn!("Failed to remove partial output '{}': {rm_err}", path.display());
            }
        }
        return Err(err)
    }

    debug!("Wrote {} bytes of KML to '{}' ({})", kml.len(), path.display(), mode.to_str());

    Ok(mode)
}

fn write_failed(path: &Path) -> impl Fn(std::io::Error) -> FlightLogError {
    let path: PathBuf = path.to_owned();
    move |err| FlightLogError::WriteFailed{path: path.to_owned(), err}
}

fn write_kml(kml: &str, path: &Path) -> Result<(), FlightLogError> {
    let mut file = File::create(path).map_err(write_failed(path))?;
    file.write_all(kml.as_bytes()).map_err(write_failed(path))?;
    file.flush().map_err(write_failed(path))?;
    Ok(())
}

fn write_kmz(kml: &str, path: &Path) -> Result<(), FlightLogError> {
    let file = File::create(path).map_err(write_failed(path))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated);

    zip.start_file(KMZ_DOC_NAME, options)?;
    zip.write_all(kml.as_bytes()).map_err(write_failed(path))?;
    zip.finish()?;

    Ok(())
}
