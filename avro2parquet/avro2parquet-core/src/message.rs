//! Record and file-location types exchanged with the containing pipeline.

use std::path::PathBuf;

/// A registry-framed payload paired with its logical log offset.
///
/// This is the exchange unit between the pipeline and the codec layer, in
/// both directions: the writer consumes it, the reader produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMessage {
    pub offset: u64,
    pub payload: Vec<u8>,
}

impl OffsetMessage {
    pub fn new(offset: u64, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            offset,
            payload: payload.into(),
        }
    }
}

/// Identifies one columnar file: where it lives and which slice of the log
/// it represents.
///
/// `start_offset` is the logical offset of the first record in the file;
/// a reader opened at this location reassigns offsets contiguously from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub path: PathBuf,
    pub topic: String,
    pub partition: u32,
    pub start_offset: u64,
}

impl FileLocation {
    pub fn new(
        path: impl Into<PathBuf>,
        topic: impl Into<String>,
        partition: u32,
        start_offset: u64,
    ) -> Self {
        Self {
            path: path.into(),
            topic: topic.into(),
            partition,
            start_offset,
        }
    }
}
