//! Parquet-backed reader that re-encodes records to wire form.

use std::fs::File;
use std::sync::Arc;

use apache_avro::to_avro_datum;
use arrow::record_batch::RecordBatch;
use avro2parquet_arrow::row_to_avro;
use avro2parquet_core::wire::encode_framed;
use avro2parquet_core::{FileLocation, OffsetMessage};
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};

use crate::cache::{SchemaCache, TopicSchema};
use crate::error::CodecError;

const READ_BATCH_SIZE: usize = 1024;

/// Lazy, forward-only scan over one Parquet file, yielding each record
/// re-encoded to its registry-framed wire form with a reconstructed offset.
///
/// Offsets are contiguous from the location's `start_offset`, incremented
/// once per yielded record. The sequence is restartable only by reopening
/// at the same location; it is not seekable.
#[derive(Debug)]
pub struct ParquetRecordReader {
    topic: String,
    topic_schema: Arc<TopicSchema>,
    batches: ParquetRecordBatchReader,
    current: Option<RecordBatch>,
    row: usize,
    next_offset: u64,
}

impl ParquetRecordReader {
    /// Open the file at `location` for a sequential scan.
    ///
    /// The topic's schema must already be resolvable through the cache
    /// (fails with [`CodecError::SchemaUnavailable`] otherwise); a missing
    /// file or a corrupt Parquet footer fails with
    /// [`CodecError::FileOpen`].
    pub fn open(cache: Arc<SchemaCache>, location: &FileLocation) -> Result<Self, CodecError> {
        let topic_schema = cache.resolve(&location.topic)?;

        let file_open = |source: Box<dyn std::error::Error + Send + Sync>| CodecError::FileOpen {
            path: location.path.clone(),
            source,
        };
        let file = File::open(&location.path).map_err(|e| file_open(Box::new(e)))?;
        let batches = ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| file_open(Box::new(e)))?
            .with_batch_size(READ_BATCH_SIZE)
            .build()
            .map_err(|e| file_open(Box::new(e)))?;

        tracing::debug!(
            path = %location.path.display(),
            topic = %location.topic,
            start_offset = location.start_offset,
            "opening parquet reader"
        );

        Ok(Self {
            topic: location.topic.clone(),
            topic_schema,
            batches,
            current: None,
            row: 0,
            next_offset: location.start_offset,
        })
    }

    /// Yield the next record as a framed wire payload, or `Ok(None)` at end
    /// of stream.
    pub fn next_message(&mut self) -> Result<Option<OffsetMessage>, CodecError> {
        loop {
            if let Some(batch) = &self.current {
                if self.row < batch.num_rows() {
                    let record = row_to_avro(batch, self.row, &self.topic_schema.schema)
                        .map_err(|source| CodecError::Convert {
                            topic: self.topic.clone(),
                            source,
                        })?;
                    self.row += 1;

                    // Direct binary datum encoder: cost proportional to the
                    // record, not the file.
                    let datum = to_avro_datum(&self.topic_schema.schema, record).map_err(
                        |source| CodecError::Encode {
                            topic: self.topic.clone(),
                            source,
                        },
                    )?;
                    let payload = encode_framed(self.topic_schema.id, &datum);

                    let offset = self.next_offset;
                    self.next_offset += 1;
                    return Ok(Some(OffsetMessage { offset, payload }));
                }
            }
            match self.batches.next() {
                Some(batch) => {
                    self.current = Some(batch?);
                    self.row = 0;
                }
                None => return Ok(None),
            }
        }
    }

    /// Release the file handle. Safe to call after exhaustion.
    pub fn close(self) {}
}

impl Iterator for ParquetRecordReader {
    type Item = Result<OffsetMessage, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_message().transpose()
    }
}
