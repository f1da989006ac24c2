//! Frame header reading and resynchronization.
//!
//! A frame is a little-endian `u32` timestamp in milliseconds,
//! followed by an `i64` payload length and the payload itself.
//! The format carries no sync marker. The only integrity check
//! available is that the length field never uses more than 16 bits,
//! so a header with any higher bit set is considered corrupt.
//!
//! On corruption the reader steps forward a single byte from the
//! start of the failed header and tries again. This is a weak
//! heuristic: six zero bytes at the right position is all it takes
//! to accept a header, so arbitrary corrupt data may produce any number
//! of false restarts before (or instead of) realigning with real frames.

use std::io::{Read, Seek, SeekFrom};

use binrw::{BinRead, BinReaderExt};

use crate::{
    FlightLogError,
    constants::{FRAME_HEADER_SIZE, FRAME_SYNC_MASK, MAX_PAYLOAD_SIZE, MIN_PAYLOAD_SIZE}
};

/// Frame header as logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct FrameHeader {
    /// Log time in milliseconds.
    pub timestamp: u32,
    /// Payload size in bytes. Logged as `i64`
    /// even though only the lower 16 bits are valid.
    pub length: i64,
}

impl FrameHeader {
    /// Returns `true` if no bit above bit 16 is set in the length field.
    pub fn is_synced(&self) -> bool {
        self.length & FRAME_SYNC_MASK == 0
    }

    /// Returns `true` if the payload length is acceptable for decoding,
    /// i.e. within `[1, 1 MiB]`.
    pub fn is_streamable(&self) -> bool {
        (MIN_PAYLOAD_SIZE..=MAX_PAYLOAD_SIZE).contains(&self.length)
    }

    /// Payload size. Negative lengths are reported as zero.
    pub fn payload_size(&self) -> u64 {
        self.length.max(0) as u64
    }
}

/// Result of a single header read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRead {
    /// Valid header at `offset`. Reader is positioned at the start of the payload.
    Frame{offset: u64, header: FrameHeader},
    /// Corrupt header at `offset`. Reader has already stepped
    /// forward a single byte to `offset + 1`.
    Corrupt{offset: u64, header: FrameHeader},
    /// Fewer than `FRAME_HEADER_SIZE` bytes left.
    EndOfStream,
}

impl FrameRead {
    /// Number of bytes the cursor moved forward for this read.
    pub fn advance(&self) -> u64 {
        match self {
            FrameRead::Frame{..} => FRAME_HEADER_SIZE,
            FrameRead::Corrupt{..} => 1,
            FrameRead::EndOfStream => 0,
        }
    }
}

/// Reads frame headers and payloads from a seekable byte source.
#[derive(Debug)]
pub struct FrameReader<R: Read + Seek> {
    reader: R,
    /// Current byte offset.
    position: u64,
    /// Total size of the source in bytes.
    size: u64,
}

impl<R: Read + Seek> FrameReader<R> {
    /// New reader, positioned wherever `reader` is currently positioned.
    pub fn new(mut reader: R) -> Result<Self, FlightLogError> {
        let position = reader.stream_position()?;
        let size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(position))?;
        Ok(Self {
            reader,
            position,
            size
        })
    }

    /// Current byte offset.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Size of the underlying source in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes left from current position.
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.position)
    }

    /// Seek to absolute byte offset.
    pub fn seek(&mut self, position: u64) -> Result<(), FlightLogError> {
        self.position = self.reader.seek(SeekFrom::Start(position))?;
        Ok(())
    }

    /// Read the frame header at the current position.
    pub fn next_header(&mut self) -> Result<FrameRead, FlightLogError> {
        if self.remaining() < FRAME_HEADER_SIZE {
            return Ok(FrameRead::EndOfStream)
        }

        let offset = self.position;
        let header: FrameHeader = self.reader.read_le()?;
        self.position += FRAME_HEADER_SIZE;

        if header.is_synced() {
            Ok(FrameRead::Frame{offset, header})
        } else {
            // resync one byte past the failed header start,
            // not past the attempted header
            self.seek(offset + 1)?;
            Ok(FrameRead::Corrupt{offset, header})
        }
    }

    /// Skip the payload of `header` without reading it.
    /// Returns `false` and leaves the position untouched
    /// if the payload extends past the end of the source.
    pub fn skip_payload(&mut self, header: &FrameHeader) -> Result<bool, FlightLogError> {
        let size = header.payload_size();
        if self.remaining() < size {
            return Ok(false)
        }
        self.seek(self.position + size)?;
        Ok(true)
    }

    /// Read the payload of `header`.
    /// Returns `None` and leaves the position untouched
    /// if the payload extends past the end of the source.
    pub fn read_payload(&mut self, header: &FrameHeader) -> Result<Option<Vec<u8>>, FlightLogError> {
        let size = header.payload_size();
        if self.remaining() < size {
            return Ok(None)
        }
        let mut buf = vec![0_u8; size as usize];
        self.reader.read_exact(&mut buf)?;
        self.position += size;
        Ok(Some(buf))
    }

    /// Returns the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
