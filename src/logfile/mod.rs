//! Ground station log file: text header followed by
//! timestamped, length-prefixed binary frames.

pub mod frame;
pub mod header;
pub mod index;
pub mod scanner;

use std::fmt::Display;

pub use frame::{FrameHeader, FrameRead, FrameReader};
pub use header::LogHeader;
pub use index::{FrameEntry, FrameIndex};
pub use scanner::{LogScanner, StreamSummary};

/// Non-fatal conditions found while reading a log.
/// None of these stop the export.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// Object schema hash differs from the expected one.
    LikelyIncompatible{build_hash: String, schema_hash: String},
    /// Build hash differs from the expected one.
    PossiblyIncompatible{build_hash: String},
    /// `##` separator missing, frames are read from start of file.
    SeparatorNotFound,
    /// The first header attempts of the frame region all failed.
    SyncNotFound{attempts: usize},
    /// Corrupt headers were skipped by resyncing.
    CorruptFraming{resyncs: usize},
    /// Timestamp lower than that of the previous frame.
    OutOfOrderTimestamp{offset: u64, previous: u32, current: u32},
    /// Frame at `offset` extends past end of file.
    TrailingPartialFrame{offset: u64},
    /// Payload length outside `[1, 1 MiB]` while streaming. Export stopped here.
    InvalidPayloadLength{offset: u64, length: i64},
    /// Read error, treated as end of data.
    ReadFailed{offset: u64, message: String},
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::LikelyIncompatible{build_hash, schema_hash} => write!(f,
                "Likely log file incompatibility: made with branch {build_hash}, object schema {schema_hash}"),
            Warning::PossiblyIncompatible{build_hash} => write!(f,
                "Possible log file incompatibility: made with branch {build_hash}"),
            Warning::SeparatorNotFound => write!(f,
                "Header separator not found, reading frames from start of file"),
            Warning::SyncNotFound{attempts} => write!(f,
                "No valid frame in the first {attempts} header attempts"),
            Warning::CorruptFraming{resyncs} => write!(f,
                "Corrupted file: skipped {resyncs} bytes of invalid frame headers"),
            Warning::OutOfOrderTimestamp{offset, previous, current} => write!(f,
                "Timestamps are not sequential at 0x{offset:x}: {current} ms after {previous} ms"),
            Warning::TrailingPartialFrame{offset} => write!(f,
                "Incomplete frame at 0x{offset:x} at end of file"),
            Warning::InvalidPayloadLength{offset, length} => write!(f,
                "Incorrect packet size {length} at 0x{offset:x}. Stopped export, data up to this point is kept"),
            Warning::ReadFailed{offset, message} => write!(f,
                "Read failed at 0x{offset:x}: {message}"),
        }
    }
}
