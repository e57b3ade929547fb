//! Parquet-backed writer for registry-framed wire records.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;

use arrow::datatypes::SchemaRef;
use avro2parquet_arrow::{avro_rows_to_record_batch, record_schema_to_arrow};
use avro2parquet_core::{FileLocation, OffsetMessage};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::cache::SchemaCache;
use crate::error::CodecError;

/// Appends decoded wire records to one Parquet file.
///
/// Single-owner, single-use: one instance per file, `close` exactly once.
/// A writer that failed mid-write leaves the file unusable; discard both
/// and retry the whole file.
#[derive(Debug)]
pub struct ParquetRecordWriter {
    cache: Arc<SchemaCache>,
    topic: String,
    path: PathBuf,
    arrow_schema: SchemaRef,
    writer: ArrowWriter<File>,
    data_size: u64,
}

impl ParquetRecordWriter {
    /// Create the Parquet file for `location`.
    ///
    /// The file's embedded schema comes from the cache, so the topic's
    /// schema must be resolvable at open time: either some message for the
    /// topic was already decoded in this process, or the authority supports
    /// eager by-topic lookup. Fails with
    /// [`CodecError::SchemaUnavailable`] otherwise.
    ///
    /// The compression codec is fixed for the lifetime of the file.
    pub fn open(
        cache: Arc<SchemaCache>,
        location: &FileLocation,
        compression: Compression,
    ) -> Result<Self, CodecError> {
        let topic_schema = cache.resolve(&location.topic)?;
        let arrow_schema = Arc::new(record_schema_to_arrow(&topic_schema.schema).map_err(
            |source| CodecError::Convert {
                topic: location.topic.clone(),
                source,
            },
        )?);

        let file = File::create(&location.path).map_err(|source| CodecError::FileCreate {
            path: location.path.clone(),
            source,
        })?;
        let props = WriterProperties::builder()
            .set_compression(compression)
            .build();
        let writer = ArrowWriter::try_new(file, Arc::clone(&arrow_schema), Some(props))?;

        tracing::debug!(
            path = %location.path.display(),
            topic = %location.topic,
            partition = location.partition,
            "creating parquet writer"
        );

        Ok(Self {
            cache,
            topic: location.topic.clone(),
            path: location.path.clone(),
            arrow_schema,
            writer,
            data_size: 0,
        })
    }

    /// Decode the message's payload and append the record.
    ///
    /// A tombstone (empty payload) appends nothing and is not an error. A
    /// record that does not conform to the file's schema surfaces as
    /// [`CodecError::Convert`].
    pub fn write(&mut self, message: &OffsetMessage) -> Result<(), CodecError> {
        let Some(record) = self.cache.decode(&self.topic, &message.payload)? else {
            return Ok(());
        };
        let batch = avro_rows_to_record_batch(&self.arrow_schema, std::slice::from_ref(&record))
            .map_err(|source| CodecError::Convert {
                topic: self.topic.clone(),
                source,
            })?;
        self.writer.write(&batch)?;

        let current = (self.writer.bytes_written() + self.writer.in_progress_size()) as u64;
        self.data_size = self.data_size.max(current);
        Ok(())
    }

    /// Accumulated data size in bytes: flushed plus in-progress buffered
    /// data. Monotonically non-decreasing over the writer's lifetime.
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Flush buffered rows, write the footer, and return the final on-disk
    /// size. Skipping `close` loses buffered rows.
    pub fn close(self) -> Result<u64, CodecError> {
        self.writer.close()?;
        let meta = fs::metadata(&self.path).map_err(|source| CodecError::FileCreate {
            path: self.path.clone(),
            source,
        })?;
        Ok(meta.len())
    }
}
