//! Error types for the wire and authority layer.

/// Error returned when a registry-framed payload is malformed.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The payload is shorter than the fixed framing header.
    #[error("payload too short for wire header: {len} bytes")]
    TooShort { len: usize },

    /// The payload does not start with the registry magic byte.
    #[error("invalid wire magic byte: expected 0x00, got {byte:#04x}")]
    BadMagic { byte: u8 },
}

/// Error returned by [`SchemaAuthority`](crate::SchemaAuthority) implementations.
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// The registry framing around the payload is malformed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The schema id embedded in the payload is not known to the authority.
    #[error("schema id {id} is not known to the schema authority")]
    UnknownSchema { id: u32 },

    /// The Avro datum after the framing header could not be decoded.
    #[error("failed to decode avro datum for schema id {id}: {source}")]
    Datum {
        id: u32,
        #[source]
        source: apache_avro::Error,
    },

    /// The authority itself failed (network, protocol, ...).
    #[error("schema authority request failed: {source}")]
    Transport {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
