//! Per-topic schema cache.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use apache_avro::Schema;
use apache_avro::types::Value;
use avro2parquet_core::SchemaAuthority;

use crate::error::CodecError;

/// A resolved schema together with its registry id.
///
/// The id is what the wire framing carries, so re-encoding a record needs
/// both halves.
#[derive(Debug, Clone)]
pub struct TopicSchema {
    pub id: u32,
    pub schema: Schema,
}

/// Process-wide map from topic to its resolved schema.
///
/// Created once by the containing pipeline and shared by reference across
/// all writers and readers. Population is lazy: a topic's schema becomes
/// known when the first message for it is decoded, or through the
/// authority's eager by-topic lookup if it supports one. Entries are
/// first-resolved-wins and live for the process lifetime; topic cardinality
/// is assumed bounded.
pub struct SchemaCache {
    authority: Arc<dyn SchemaAuthority>,
    entries: RwLock<HashMap<String, Arc<TopicSchema>>>,
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl SchemaCache {
    pub fn new(authority: Arc<dyn SchemaAuthority>) -> Self {
        Self {
            authority,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Decode a registry-framed payload for `topic`.
    ///
    /// An empty payload is a tombstone and yields `Ok(None)`. On a
    /// successful decode the record's schema is stored for the topic if no
    /// entry exists yet; an existing entry is never overwritten, even if
    /// the decoded schema differs. A failed decode leaves the cache
    /// untouched.
    pub fn decode(&self, topic: &str, payload: &[u8]) -> Result<Option<Value>, CodecError> {
        if payload.is_empty() {
            return Ok(None);
        }
        let decoded = self
            .authority
            .decode(payload)
            .map_err(|source| CodecError::Decode {
                topic: topic.to_string(),
                source,
            })?;
        self.store_if_absent(topic, decoded.schema_id, decoded.schema);
        Ok(Some(decoded.value))
    }

    /// Return the schema resolved for `topic`.
    ///
    /// Falls back to the authority's eager by-topic lookup for topics that
    /// have never been decoded in this process; fails with
    /// [`CodecError::SchemaUnavailable`] if that yields nothing.
    pub fn resolve(&self, topic: &str) -> Result<Arc<TopicSchema>, CodecError> {
        if let Some(entry) = self.read_entries().get(topic) {
            return Ok(Arc::clone(entry));
        }
        let latest = self
            .authority
            .resolve_latest(topic)
            .map_err(|source| CodecError::Resolve {
                topic: topic.to_string(),
                source,
            })?;
        match latest {
            Some((id, schema)) => Ok(self.store_if_absent(topic, id, schema)),
            None => Err(CodecError::SchemaUnavailable {
                topic: topic.to_string(),
            }),
        }
    }

    /// Put-if-absent; returns the retained entry.
    fn store_if_absent(&self, topic: &str, id: u32, schema: Schema) -> Arc<TopicSchema> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(topic.to_string()).or_insert_with(|| {
            tracing::debug!(topic, schema_id = id, "caching schema for topic");
            Arc::new(TopicSchema { id, schema })
        }))
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<TopicSchema>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}
