//! Schema-authority contract.
//!
//! The authority is the external, typically network-backed service that owns
//! schema definitions. This crate only consumes it: implementations decode a
//! registry-framed payload into an Avro value together with the schema that
//! produced it. Connection lifecycle and internal caching are the
//! implementation's business.

use apache_avro::Schema;
use apache_avro::types::Value;

use crate::error::AuthorityError;

/// A successfully decoded wire payload.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    /// Registry id of the writer schema embedded in the payload.
    pub schema_id: u32,
    /// The writer schema itself.
    pub schema: Schema,
    /// The decoded record value.
    pub value: Value,
}

/// External service that resolves schemas and decodes framed payloads.
///
/// Implementations must be shareable across partition workers.
pub trait SchemaAuthority: Send + Sync {
    /// Decode a registry-framed payload into a value and its writer schema.
    fn decode(&self, payload: &[u8]) -> Result<DecodedRecord, AuthorityError>;

    /// Eagerly resolve the latest schema registered for a topic.
    ///
    /// Optional: authorities that can only look schemas up by the id embedded
    /// in a payload keep the default, and a schema for the topic becomes
    /// available only once a message has been decoded.
    fn resolve_latest(&self, _topic: &str) -> Result<Option<(u32, Schema)>, AuthorityError> {
        Ok(None)
    }
}
