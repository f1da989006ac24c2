//! Log text header.
//!
//! ```text
//! <format/branch identifier>\n
//! <build hash>\n
//! <object schema hash>\n
//! ...
//! ##\n
//! <frames>
//! ```
//!
//! The hashes are only used for a soft compatibility check.

use std::io::{BufRead, Seek};

use tracing::{debug, warn};

use crate::{
    FlightLogError,
    constants::{HEADER_SEPARATOR, MAX_HEADER_SEARCH_LINES}
};

use super::Warning;

/// Parsed log header.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogHeader {
    /// Format or branch identifier.
    pub format: String,
    /// Build (revision) hash of the recording ground station.
    pub build_hash: String,
    /// Telemetry object schema hash of the recording ground station.
    pub schema_hash: String,
    /// Whether the `##` separator was found.
    pub separator_found: bool,
    /// Byte offset where frames start.
    /// Falls back to `0` if the separator was not found.
    pub frames_start: u64,
}

impl LogHeader {
    /// Reads the three header lines and searches for the
    /// header separator within the following `MAX_HEADER_SEARCH_LINES` lines.
    pub fn read<R: BufRead + Seek>(reader: &mut R) -> Result<Self, FlightLogError> {
        let mut header = Self::default();
        let mut position = reader.stream_position()?;
        let mut line = Vec::new();

        for i in 0..3 {
            line.clear();
            position += reader.read_until(b'\n', &mut line)? as u64;
            let text = String::from_utf8_lossy(&line).trim().to_owned();
            match i {
                0 => header.format = text,
                1 => header.build_hash = text,
                _ => header.schema_hash = text,
            }
        }

        for _ in 0..MAX_HEADER_SEARCH_LINES {
            line.clear();
            let len = reader.read_until(b'\n', &mut line)?;
            if len == 0 {
                break
            }
            position += len as u64;
            if String::from_utf8_lossy(&line).trim() == HEADER_SEPARATOR {
                header.separator_found = true;
                header.frames_start = position;
                break
            }
        }

        if !header.separator_found {
            warn!("Header separator '{HEADER_SEPARATOR}' not found. Attempting export from start of file.");
            header.frames_start = 0;
        }

        debug!("Log format '{}', build '{}', schema '{}', frames start at {}",
            header.format,
            header.build_hash,
            header.schema_hash,
            header.frames_start
        );

        Ok(header)
    }

    /// Soft compatibility check against the expected hashes.
    /// A schema mismatch takes precedence over a build mismatch.
    /// Returns `None` if compatible or if no expectation was given.
    pub fn check_compatibility(
        &self,
        expected_build: Option<&str>,
        expected_schema: Option<&str>,
    ) -> Option<Warning> {
        if expected_build.is_none() && expected_schema.is_none() {
            debug!("No expected hashes set, skipping compatibility check");
            return None
        }

        if let Some(schema) = expected_schema {
            if self.schema_hash != schema.trim() {
                warn!("Likely log file incompatibility. Log made with branch {}, object schema {}. Attempting export.",
                    self.build_hash, self.schema_hash);
                return Some(Warning::LikelyIncompatible{
                    build_hash: self.build_hash.to_owned(),
                    schema_hash: self.schema_hash.to_owned()
                })
            }
        }

        if let Some(build) = expected_build {
            if self.build_hash != build.trim() {
                warn!("Possible log file incompatibility. Log made with branch {}. Attempting export.",
                    self.build_hash);
                return Some(Warning::PossiblyIncompatible{
                    build_hash: self.build_hash.to_owned()
                })
            }
        }

        None
    }

    /// Warning for a missing separator, if any.
    pub fn separator_warning(&self) -> Option<Warning> {
        match self.separator_found {
            true => None,
            false => Some(Warning::SeparatorNotFound)
        }
    }
}
