use arrow::error::ArrowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Cannot create RecordBatch from empty rows")]
    EmptyRows,

    /// The Avro schema uses a shape this layer does not map to Arrow
    /// (enums, fixed, decimals, non-nullable unions, ...).
    #[error("unsupported avro schema shape: {detail}")]
    UnsupportedSchema { detail: String },

    /// A value did not conform to the schema-derived column type.
    #[error("value type mismatch: expected {expected}, got {actual}")]
    ValueMismatch { expected: String, actual: String },

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

impl ConvertError {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ValueMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
