//! Arrow integration layer for `avro2parquet`.
//!
//! This crate covers the two directions of the columnar boundary:
//! 1. Convert an Avro record schema to an Arrow `Schema`
//!    ([`record_schema_to_arrow`]).
//! 2. Convert decoded Avro record values into an Arrow `RecordBatch`
//!    ([`avro_rows_to_record_batch`]) and extract them back out row by row
//!    ([`row_to_avro`]).
//!
//! Supported Avro shapes: null, boolean, int, long, float, double, string,
//! bytes, `timestamp-millis`/`timestamp-micros`, records (nested), arrays,
//! string-keyed maps, and `["null", T]` unions (mapped to nullable Arrow
//! fields). Anything else fails with [`ConvertError::UnsupportedSchema`] at
//! schema-conversion time, before any row is processed.
//!
//! Extraction is schema-driven so that a value round-trips exactly: a field
//! decoded as `Value::Union(1, v)` comes back as `Value::Union(1, v)`, not
//! as a bare `v`.

pub mod arrow_convert;
pub mod error;
pub mod extract;
pub mod schema_convert;

/// Re-export of [`arrow_convert::avro_rows_to_record_batch`].
pub use arrow_convert::avro_rows_to_record_batch;
/// Re-export of [`error::ConvertError`].
pub use error::ConvertError;
/// Re-export of [`extract::row_to_avro`].
pub use extract::row_to_avro;
/// Re-export of [`schema_convert::record_schema_to_arrow`].
pub use schema_convert::record_schema_to_arrow;
