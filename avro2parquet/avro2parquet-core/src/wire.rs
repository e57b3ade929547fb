//! Registry wire framing: `[magic 0x00][schema id, u32 BE][avro datum]`.
//!
//! The schema id is carried big-endian for compatibility with
//! Confluent-style registries.

use crate::error::WireError;

/// Magic byte marking a registry-framed payload.
pub const WIRE_MAGIC: u8 = 0x00;

/// Length of the fixed framing header (magic + schema id).
pub const WIRE_HEADER_LEN: usize = 5;

/// Frame an already-encoded Avro datum with the registry header.
pub fn encode_framed(schema_id: u32, datum: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(WIRE_HEADER_LEN + datum.len());
    buf.push(WIRE_MAGIC);
    buf.extend_from_slice(&schema_id.to_be_bytes());
    buf.extend_from_slice(datum);
    buf
}

/// Split a framed payload into its schema id and the raw Avro datum.
pub fn decode_framed(payload: &[u8]) -> Result<(u32, &[u8]), WireError> {
    if payload.len() < WIRE_HEADER_LEN {
        return Err(WireError::TooShort { len: payload.len() });
    }
    if payload[0] != WIRE_MAGIC {
        return Err(WireError::BadMagic { byte: payload[0] });
    }
    let schema_id = u32::from_be_bytes([payload[1], payload[2], payload[3], payload[4]]);
    Ok((schema_id, &payload[WIRE_HEADER_LEN..]))
}
