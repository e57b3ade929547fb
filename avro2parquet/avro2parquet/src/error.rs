//! Error types for the codec layer.

use std::path::PathBuf;

use avro2parquet_arrow::ConvertError;
use avro2parquet_core::AuthorityError;

/// Errors produced by [`SchemaCache`](crate::SchemaCache),
/// [`ParquetRecordWriter`](crate::ParquetRecordWriter), and
/// [`ParquetRecordReader`](crate::ParquetRecordReader).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// No schema is cached for the topic and the authority could not
    /// resolve one eagerly. Decoding at least one message for the topic
    /// populates the cache.
    #[error("no schema available for topic '{topic}'")]
    SchemaUnavailable { topic: String },

    /// A wire payload could not be decoded (bad framing, unknown schema
    /// id, malformed datum). A failed decode never populates the cache.
    #[error("failed to decode wire payload for topic '{topic}': {source}")]
    Decode {
        topic: String,
        #[source]
        source: AuthorityError,
    },

    /// The authority failed while eagerly resolving a topic's schema.
    #[error("failed to resolve schema for topic '{topic}': {source}")]
    Resolve {
        topic: String,
        #[source]
        source: AuthorityError,
    },

    /// A record did not conform to the schema used to map it across the
    /// columnar boundary.
    #[error("record does not conform to schema for topic '{topic}': {source}")]
    Convert {
        topic: String,
        #[source]
        source: ConvertError,
    },

    /// Re-encoding a record to its Avro datum failed.
    #[error("failed to encode record for topic '{topic}': {source}")]
    Encode {
        topic: String,
        #[source]
        source: apache_avro::Error,
    },

    /// The columnar file could not be created.
    #[error("failed to create file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The columnar file is missing or corrupt at the container level.
    #[error("failed to open file {path}: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error from the Parquet engine while appending or finalizing.
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    /// Error from Arrow while scanning record batches.
    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}
