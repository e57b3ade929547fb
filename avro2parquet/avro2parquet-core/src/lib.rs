//! Storage-independent core types and the schema-authority contract for
//! `avro2parquet`.
//!
//! This crate provides the registry wire framing ([`wire`]), the record and
//! file-location types exchanged with the containing pipeline
//! ([`OffsetMessage`] / [`FileLocation`]), and the [`SchemaAuthority`] trait.

mod authority;
mod error;
mod message;
pub mod wire;

pub use authority::{DecodedRecord, SchemaAuthority};
pub use error::{AuthorityError, WireError};
pub use message::{FileLocation, OffsetMessage};
