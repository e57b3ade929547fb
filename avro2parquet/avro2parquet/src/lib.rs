//! Schema-registry-aware codec between a streaming log's Avro wire records
//! and Parquet files.
//!
//! Three pieces, composed bottom-up:
//! - [`SchemaCache`]: one lazily-resolved schema per topic, shared across
//!   partition workers, populated as a side effect of decoding.
//! - [`ParquetRecordWriter`]: decodes registry-framed payloads and appends
//!   the records to a Parquet file.
//! - [`ParquetRecordReader`]: scans a Parquet file and re-encodes each
//!   record back to its framed wire form, reassigning contiguous offsets
//!   from the file's starting offset.
//!
//! All operations are synchronous and blocking; the containing pipeline
//! owns parallelism (typically one writer/reader per partition, all sharing
//! one cache) and retry policy. Writers and readers are single-use per
//! file: after a failure, discard the instance and the file, and reopen.

mod cache;
mod error;
mod reader;
mod writer;

pub use cache::{SchemaCache, TopicSchema};
pub use error::CodecError;
pub use reader::ParquetRecordReader;
pub use writer::ParquetRecordWriter;

pub use avro2parquet_core::{
    AuthorityError, DecodedRecord, FileLocation, OffsetMessage, SchemaAuthority, WireError, wire,
};
