//! Frame index built by the validation pass.

/// Byte offset and log time for a single validated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEntry {
    /// Byte offset of the frame header.
    pub offset: u64,
    /// Log time in milliseconds.
    pub timestamp: u32,
    /// Payload size in bytes.
    pub length: u64,
}

/// Validated frames in file order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameIndex {
    entries: Vec<FrameEntry>,
    /// Number of 1-byte resyncs performed while indexing.
    pub resyncs: usize,
    /// Number of out-of-order timestamps.
    pub out_of_order: usize,
}

impl FrameIndex {
    pub(crate) fn push(&mut self, entry: FrameEntry) {
        self.entries.push(entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameEntry> {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&FrameEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&FrameEntry> {
        self.entries.last()
    }

    /// Summed payload size of all indexed frames.
    pub fn payload_bytes(&self) -> u64 {
        self.iter().map(|e| e.length).sum()
    }

    /// Log time span covered, first to last frame, in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => last.timestamp.saturating_sub(first.timestamp),
            _ => 0
        }
    }
}
