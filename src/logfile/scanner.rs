//! Two pass log reader.
//!
//! Pass 1 (`LogScanner::index()`) walks all frame headers without
//! decoding anything, resyncing past corrupt headers and checking
//! that timestamps do not run backwards.
//!
//! Pass 2 (`LogScanner::stream()`) restarts at the frame region
//! and feeds each payload, byte by byte, to a `TelemetryDecoder`.
//! There is no resync in pass 2: the first bad header stops streaming
//! and everything decoded up to that point is kept.

use std::{io::{Read, Seek}, path::{Path, PathBuf}};

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::{
    FlightLogError,
    constants::MAX_LEADING_SYNC_ATTEMPTS,
    telemetry::{Telemetry, TelemetryDecoder},
};

use super::{FrameEntry, FrameIndex, FrameRead, FrameReader, Warning};

/// Outcome of pass 2.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StreamSummary {
    /// Frames whose payload was passed to the decoder.
    pub frames: usize,
    /// Payload bytes passed to the decoder.
    pub payload_bytes: u64,
    /// `true` if streaming stopped before the end of the frame region.
    pub truncated: bool,
    /// Warnings from both passes, in the order they were raised.
    pub warnings: Vec<Warning>,
}

/// Owns the log input for the duration of an export.
#[derive(Debug)]
pub struct LogScanner<R: Read + Seek> {
    reader: FrameReader<R>,
    /// Byte offset of the frame region.
    start: u64,
    /// Source path, for error reporting.
    source: PathBuf,
    warnings: Vec<Warning>,
}

impl<R: Read + Seek> LogScanner<R> {
    /// New scanner over `reader`. Frames are expected at byte offset `start`.
    pub fn new(reader: R, start: u64) -> Result<Self, FlightLogError> {
        let mut reader = FrameReader::new(reader)?;
        reader.seek(start)?;
        Ok(Self {
            reader,
            start,
            source: PathBuf::new(),
            warnings: Vec::new()
        })
    }

    /// Set the path reported in `FlightLogError::EmptyLog`.
    pub fn with_source(self, path: &Path) -> Self {
        Self {
            source: path.to_owned(),
            ..self
        }
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn warn(&mut self, warning: Warning) {
        if !self.warnings.contains(&warning) {
            warn!("{warning}");
            self.warnings.push(warning);
        }
    }

    /// Pass 1. Validates framing over the whole frame region
    /// and returns the offsets and timestamps of all valid frames.
    ///
    /// If the first `MAX_LEADING_SYNC_ATTEMPTS` headers all fail, `Warning::SyncNotFound`
    /// is raised and the scan carries on resyncing, it is not restarted.
    ///
    /// Fails with `FlightLogError::EmptyLog` if no valid frame was found.
    /// On success the reader is positioned at the start of the
    /// frame region again.
    pub fn index(&mut self) -> Result<FrameIndex, FlightLogError> {
        self.reader.seek(self.start)?;

        let mut index = FrameIndex::default();
        let mut previous: Option<u32> = None;
        let mut leading_failures = 0;

        loop {
            let read = match self.reader.next_header() {
                Ok(read) => read,
                Err(err) => {
                    let offset = self.reader.position();
                    self.warn(Warning::ReadFailed{offset, message: err.to_string()});
                    break
                }
            };

            match read {
                FrameRead::EndOfStream => {
                    if self.reader.remaining() > 0 {
                        debug!("{} trailing bytes at 0x{:x} ignored",
                            self.reader.remaining(), self.reader.position());
                    }
                    break
                },
                FrameRead::Corrupt{offset, header} => {
                    debug!("Corrupt frame header at 0x{offset:x} (length {}), resyncing", header.length);
                    index.resyncs += 1;
                    if index.is_empty() {
                        leading_failures += 1;
                        if leading_failures == MAX_LEADING_SYNC_ATTEMPTS {
                            self.warn(Warning::SyncNotFound{attempts: leading_failures});
                        }
                    }
                },
                FrameRead::Frame{offset, header} => {
                    match self.reader.skip_payload(&header) {
                        Ok(true) => (),
                        Ok(false) => {
                            self.warn(Warning::TrailingPartialFrame{offset});
                            break
                        },
                        Err(err) => {
                            self.warn(Warning::ReadFailed{offset, message: err.to_string()});
                            break
                        }
                    }

                    if let Some(prev) = previous {
                        if header.timestamp < prev {
                            index.out_of_order += 1;
                            self.warn(Warning::OutOfOrderTimestamp{
                                offset,
                                previous: prev,
                                current: header.timestamp
                            });
                        }
                    }
                    previous = Some(header.timestamp);

                    index.push(FrameEntry {
                        offset,
                        timestamp: header.timestamp,
                        length: header.payload_size()
                    });
                }
            }
        }

        if index.resyncs > 0 {
            self.warn(Warning::CorruptFraming{resyncs: index.resyncs});
        }

        if index.is_empty() {
            return Err(FlightLogError::EmptyLog(self.source.to_owned()))
        }

        info!("Indexed {} frames ({} payload bytes, {} ms)",
            index.len(),
            index.payload_bytes(),
            index.duration_ms()
        );

        self.reader.seek(self.start)?;

        Ok(index)
    }

    /// Pass 2. Streams payloads from the start of the frame region
    /// through `decoder`. Every update is passed to `on_update` together
    /// with the timestamp of the frame that completed it, before the next
    /// byte is read.
    ///
    /// Consumes the scanner so that the input is released however
    /// streaming ends.
    pub fn stream<D, F>(
        mut self,
        decoder: &mut D,
        mut on_update: F,
        progress: Option<&ProgressBar>,
    ) -> Result<StreamSummary, FlightLogError>
    where
        D: TelemetryDecoder,
        F: FnMut(u32, Telemetry),
    {
        self.reader.seek(self.start)?;

        let mut summary = StreamSummary::default();

        loop {
            let read = match self.reader.next_header() {
                Ok(read) => read,
                Err(err) => {
                    let offset = self.reader.position();
                    self.warn(Warning::ReadFailed{offset, message: err.to_string()});
                    summary.truncated = true;
                    break
                }
            };

            let (offset, header) = match read {
                FrameRead::EndOfStream => break,
                // A header failing the sync check is never streamed,
                // even if its length is within bounds.
                FrameRead::Corrupt{offset, header} => {
                    self.warn(Warning::InvalidPayloadLength{offset, length: header.length});
                    summary.truncated = true;
                    break
                },
                FrameRead::Frame{offset, header} => (offset, header)
            };

            if !header.is_streamable() {
                self.warn(Warning::InvalidPayloadLength{offset, length: header.length});
                summary.truncated = true;
                break
            }

            let payload = match self.reader.read_payload(&header) {
                Ok(Some(payload)) => payload,
                Ok(None) => {
                    self.warn(Warning::TrailingPartialFrame{offset});
                    summary.truncated = true;
                    break
                },
                Err(err) => {
                    self.warn(Warning::ReadFailed{offset, message: err.to_string()});
                    summary.truncated = true;
                    break
                }
            };

            let timestamp = header.timestamp;
            let mut emit = |telemetry: Telemetry| on_update(timestamp, telemetry);
            for byte in payload.iter() {
                decoder.process_byte(*byte, &mut emit);
            }

            summary.frames += 1;
            summary.payload_bytes += payload.len() as u64;

            if let Some(bar) = progress {
                bar.inc(1);
            }
        }

        info!("Streamed {} frames ({} payload bytes){}",
            summary.frames,
            summary.payload_bytes,
            if summary.truncated {", stopped early"} else {""}
        );

        summary.warnings = self.warnings;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn frame(timestamp: u32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = timestamp.to_le_bytes().to_vec();
        bytes.extend((payload.len() as i64).to_le_bytes());
        bytes.extend(payload);
        bytes
    }

    /// Records every byte it sees, emits an attitude update per byte.
    #[derive(Default)]
    struct Recorder(Vec<u8>);

    impl TelemetryDecoder for Recorder {
        fn process_byte(&mut self, byte: u8, emit: &mut dyn FnMut(Telemetry)) {
            self.0.push(byte);
            emit(Telemetry::Attitude{yaw: byte as f32});
        }
    }

    #[test]
    fn both_passes_agree() {
        let mut bytes = frame(10, &[1, 2]);
        bytes.extend(frame(20, &[3]));
        bytes.extend(frame(30, &[4, 5, 6]));

        let mut scanner = LogScanner::new(Cursor::new(bytes), 0).unwrap();
        let index = scanner.index().unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.payload_bytes(), 6);
        assert_eq!(*index.iter().nth(1).unwrap(), FrameEntry{offset: 14, timestamp: 20, length: 1});

        let mut decoder = Recorder::default();
        let mut updates = Vec::new();
        let summary = scanner.stream(&mut decoder, |ts, t| updates.push((ts, t)), None).unwrap();

        assert_eq!(summary.frames, 3);
        assert_eq!(summary.payload_bytes, 6);
        assert!(!summary.truncated);
        assert!(summary.warnings.is_empty());
        assert_eq!(decoder.0, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(updates[2], (20, Telemetry::Attitude{yaw: 3.0}));
    }

    #[test]
    fn frame_region_offset() {
        let mut bytes = b"v1\nabc\ndef\n##\n".to_vec();
        let start = bytes.len() as u64;
        bytes.extend(frame(5, &[7]));

        let mut scanner = LogScanner::new(Cursor::new(bytes), start).unwrap();
        let index = scanner.index().unwrap();
        assert_eq!(index.first().map(|e| e.offset), Some(start));
    }

    #[test]
    fn empty_log() {
        let mut scanner = LogScanner::new(Cursor::new(vec![0_u8; 5]), 0)
            .unwrap()
            .with_source(Path::new("empty.opl"));
        let err = scanner.index().unwrap_err();
        assert!(matches!(err, FlightLogError::EmptyLog(p) if p == Path::new("empty.opl")));
    }

    #[test]
    fn out_of_order_timestamps_warn_only() {
        let mut bytes = frame(500, &[1]);
        bytes.extend(frame(100, &[2]));

        let mut scanner = LogScanner::new(Cursor::new(bytes), 0).unwrap();
        let index = scanner.index().unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.out_of_order, 1);
        assert_eq!(
            scanner.warnings(),
            &[Warning::OutOfOrderTimestamp{offset: 13, previous: 500, current: 100}]
        );
    }

    #[test]
    fn leading_garbage_resyncs() {
        // 0xFF makes every header that overlaps it corrupt,
        // the 256 byte payload length does the same for
        // headers straddling garbage and the real frame
        let mut bytes = vec![0xFF; 12];
        bytes.extend(frame(1, &[9; 256]));

        let mut scanner = LogScanner::new(Cursor::new(bytes), 0).unwrap();
        let index = scanner.index().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.first().map(|e| e.offset), Some(12));
        assert_eq!(index.resyncs, 12);
        assert!(scanner.warnings().contains(&Warning::SyncNotFound{attempts: MAX_LEADING_SYNC_ATTEMPTS}));
        assert!(scanner.warnings().contains(&Warning::CorruptFraming{resyncs: 12}));
    }

    #[test]
    fn trailing_partial_frame() {
        let mut bytes = frame(1, &[1, 2]);
        let mut partial = frame(2, &[3, 4, 5, 6]);
        partial.truncate(14);
        bytes.extend(partial);

        let mut scanner = LogScanner::new(Cursor::new(bytes), 0).unwrap();
        let index = scanner.index().unwrap();
        assert_eq!(index.len(), 1);

        let summary = scanner.stream(&mut Recorder::default(), |_, _| (), None).unwrap();
        assert_eq!(summary.frames, 1);
        assert!(summary.truncated);
        assert_eq!(summary.warnings, vec![Warning::TrailingPartialFrame{offset: 14}]);
    }

    #[test]
    fn zero_length_frame_stops_streaming() {
        let mut bytes = frame(1, &[1]);
        bytes.extend(frame(2, &[]));
        bytes.extend(frame(3, &[3]));

        let mut scanner = LogScanner::new(Cursor::new(bytes), 0).unwrap();
        assert_eq!(scanner.index().unwrap().len(), 3);

        let mut decoder = Recorder::default();
        let summary = scanner.stream(&mut decoder, |_, _| (), None).unwrap();
        assert_eq!(summary.frames, 1);
        assert!(summary.truncated);
        assert_eq!(decoder.0, vec![1]);
        assert!(summary.warnings.contains(&Warning::InvalidPayloadLength{offset: 13, length: 0}));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn passes_agree_on_valid_logs(
                frames in prop::collection::vec(
                    (0u32..5000, prop::collection::vec(any::<u8>(), 1..64)),
                    1..40
                )
            ) {
                let mut bytes = Vec::new();
                let mut timestamp = 0_u32;
                for (delta, payload) in frames.iter() {
                    timestamp += delta;
                    bytes.extend(frame(timestamp, payload));
                }
                let expected_bytes: u64 = frames.iter().map(|(_, p)| p.len() as u64).sum();

                let mut scanner = LogScanner::new(Cursor::new(bytes), 0).unwrap();
                let index = scanner.index().unwrap();
                let summary = scanner.stream(&mut Recorder::default(), |_, _| (), None).unwrap();

                prop_assert_eq!(index.len(), frames.len());
                prop_assert_eq!(summary.frames, frames.len());
                prop_assert_eq!(index.payload_bytes(), expected_bytes);
                prop_assert_eq!(summary.payload_bytes, expected_bytes);
                prop_assert!(!summary.truncated);
                prop_assert!(summary.warnings.is_empty());
            }
        }
    }
}
