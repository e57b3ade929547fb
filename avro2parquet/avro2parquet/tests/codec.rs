use std::collections::HashMap;
use std::sync::Arc;

use apache_avro::types::Value;
use apache_avro::{Schema as AvroSchema, from_avro_datum, to_avro_datum};
use avro2parquet::wire::{decode_framed, encode_framed};
use avro2parquet::{
    AuthorityError, CodecError, DecodedRecord, FileLocation, OffsetMessage, ParquetRecordReader,
    ParquetRecordWriter, SchemaAuthority, SchemaCache,
};
use parquet::basic::{Compression, GzipLevel};
use tempfile::TempDir;

/// In-memory authority over a fixed id -> schema table, with optional
/// by-topic eager lookup.
struct StaticAuthority {
    schemas: HashMap<u32, AvroSchema>,
    latest: HashMap<String, u32>,
}

impl StaticAuthority {
    fn new(schemas: impl IntoIterator<Item = (u32, AvroSchema)>) -> Self {
        Self {
            schemas: schemas.into_iter().collect(),
            latest: HashMap::new(),
        }
    }

    fn with_latest(mut self, topic: &str, id: u32) -> Self {
        self.latest.insert(topic.to_string(), id);
        self
    }
}

impl SchemaAuthority for StaticAuthority {
    fn decode(&self, payload: &[u8]) -> Result<DecodedRecord, AuthorityError> {
        let (id, datum) = decode_framed(payload)?;
        let schema = self
            .schemas
            .get(&id)
            .ok_or(AuthorityError::UnknownSchema { id })?;
        let mut reader = datum;
        let value = from_avro_datum(schema, &mut reader, None)
            .map_err(|source| AuthorityError::Datum { id, source })?;
        Ok(DecodedRecord {
            schema_id: id,
            schema: schema.clone(),
            value,
        })
    }

    fn resolve_latest(&self, topic: &str) -> Result<Option<(u32, AvroSchema)>, AuthorityError> {
        Ok(self
            .latest
            .get(topic)
            .and_then(|id| self.schemas.get(id).map(|s| (*id, s.clone()))))
    }
}

fn click_schema() -> AvroSchema {
    AvroSchema::parse_str(
        r#"{
            "type": "record",
            "name": "Click",
            "fields": [
                {"name": "id", "type": "long"},
                {"name": "url", "type": "string"}
            ]
        }"#,
    )
    .unwrap()
}

fn click_payload(schema_id: u32, schema: &AvroSchema, id: i64, url: &str) -> Vec<u8> {
    let record = Value::Record(vec![
        ("id".into(), Value::Long(id)),
        ("url".into(), Value::String(url.into())),
    ]);
    let datum = to_avro_datum(schema, record).unwrap();
    encode_framed(schema_id, &datum)
}

fn clicks_cache() -> Arc<SchemaCache> {
    Arc::new(SchemaCache::new(Arc::new(StaticAuthority::new([(
        1,
        click_schema(),
    )]))))
}

// --- SchemaCache ---

#[test]
fn resolve_before_any_decode_fails_schema_unavailable() {
    let cache = clicks_cache();
    let err = cache.resolve("unknown-topic").unwrap_err();
    assert!(matches!(err, CodecError::SchemaUnavailable { topic } if topic == "unknown-topic"));
}

#[test]
fn decode_populates_cache_and_first_resolution_wins() {
    let schema_a = click_schema();
    let schema_b = AvroSchema::parse_str(
        r#"{
            "type": "record",
            "name": "Other",
            "fields": [{"name": "n", "type": "int"}]
        }"#,
    )
    .unwrap();
    let authority = StaticAuthority::new([(1, schema_a.clone()), (2, schema_b.clone())]);
    let cache = SchemaCache::new(Arc::new(authority));

    let payload_a = click_payload(1, &schema_a, 7, "https://a.example");
    cache.decode("clicks", &payload_a).unwrap();
    assert_eq!(cache.resolve("clicks").unwrap().id, 1);

    // A later decode carrying a different schema still succeeds but does
    // not replace the cached entry.
    let datum_b = to_avro_datum(&schema_b, Value::Record(vec![("n".into(), Value::Int(3))]))
        .unwrap();
    let payload_b = encode_framed(2, &datum_b);
    cache.decode("clicks", &payload_b).unwrap();

    assert_eq!(cache.resolve("clicks").unwrap().id, 1);
}

#[test]
fn failed_decode_does_not_populate_cache() {
    let cache = clicks_cache();

    let unknown_id = encode_framed(99, b"\x02");
    let err = cache.decode("clicks", &unknown_id).unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));

    assert!(matches!(
        cache.resolve("clicks").unwrap_err(),
        CodecError::SchemaUnavailable { .. }
    ));
}

#[test]
fn tombstone_decodes_to_none_without_touching_cache() {
    let cache = clicks_cache();
    assert!(cache.decode("clicks", &[]).unwrap().is_none());
    assert!(matches!(
        cache.resolve("clicks").unwrap_err(),
        CodecError::SchemaUnavailable { .. }
    ));
}

#[test]
fn concurrent_decodes_for_unseen_topic_retain_one_schema() {
    let schema = click_schema();
    let cache = SchemaCache::new(Arc::new(StaticAuthority::new([(1, schema.clone())])));
    let payload = click_payload(1, &schema, 1, "https://example");

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                cache.decode("clicks", &payload).unwrap();
            });
        }
    });

    let first = cache.resolve("clicks").unwrap();
    assert_eq!(first.id, 1);
    // Repeated resolution returns the same retained entry.
    assert!(Arc::ptr_eq(&first, &cache.resolve("clicks").unwrap()));
}

// --- Writer ---

#[test]
fn writer_open_fails_for_topic_never_decoded() {
    let dir = TempDir::new().unwrap();
    let cache = clicks_cache();
    let location = FileLocation::new(dir.path().join("clicks.parquet"), "clicks", 0, 0);

    let err = ParquetRecordWriter::open(cache, &location, Compression::SNAPPY).unwrap_err();
    assert!(matches!(err, CodecError::SchemaUnavailable { .. }));
}

#[test]
fn writer_open_uses_eager_resolution_when_authority_supports_it() {
    let dir = TempDir::new().unwrap();
    let authority = StaticAuthority::new([(1, click_schema())]).with_latest("clicks", 1);
    let cache = Arc::new(SchemaCache::new(Arc::new(authority)));
    let location = FileLocation::new(dir.path().join("clicks.parquet"), "clicks", 0, 0);

    let writer = ParquetRecordWriter::open(cache, &location, Compression::SNAPPY).unwrap();
    writer.close().unwrap();
}

#[test]
fn write_three_clicks_and_read_back_contiguous_offsets() {
    let dir = TempDir::new().unwrap();
    let schema = click_schema();
    let cache = clicks_cache();
    let location = FileLocation::new(dir.path().join("clicks.parquet"), "clicks", 0, 10);

    let payloads: Vec<Vec<u8>> = [
        (10, "https://a.example"),
        (11, "https://b.example"),
        (12, "https://c.example"),
    ]
    .iter()
    .map(|(id, url)| click_payload(1, &schema, *id, url))
    .collect();

    // The first decode for the topic is what makes the writer openable.
    let authority_view = StaticAuthority::new([(1, schema.clone())]);
    cache.decode("clicks", &payloads[0]).unwrap();

    let mut writer = ParquetRecordWriter::open(
        Arc::clone(&cache),
        &location,
        Compression::GZIP(GzipLevel::default()),
    )
    .unwrap();

    let mut sizes = Vec::new();
    for (i, payload) in payloads.iter().enumerate() {
        writer
            .write(&OffsetMessage::new(10 + i as u64, payload.clone()))
            .unwrap();
        sizes.push(writer.data_size());
    }
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    assert!(sizes[2] > 0);

    let final_size = writer.close().unwrap();
    assert_eq!(final_size, std::fs::metadata(&location.path).unwrap().len());

    // Read side: offsets reconstructed contiguously from start_offset.
    let mut reader = ParquetRecordReader::open(Arc::clone(&cache), &location).unwrap();
    for (i, original) in payloads.iter().enumerate() {
        let message = reader.next_message().unwrap().expect("record expected");
        assert_eq!(message.offset, 10 + i as u64);

        let (schema_id, _) = decode_framed(&message.payload).unwrap();
        assert_eq!(schema_id, 1);
        assert_eq!(
            authority_view.decode(&message.payload).unwrap().value,
            authority_view.decode(original).unwrap().value
        );
    }
    assert!(reader.next_message().unwrap().is_none());
    reader.close();
}

#[test]
fn tombstone_write_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let schema = click_schema();
    let cache = clicks_cache();
    let location = FileLocation::new(dir.path().join("clicks.parquet"), "clicks", 0, 0);

    let payload = click_payload(1, &schema, 1, "https://example");
    cache.decode("clicks", &payload).unwrap();

    let mut writer =
        ParquetRecordWriter::open(Arc::clone(&cache), &location, Compression::SNAPPY).unwrap();
    writer.write(&OffsetMessage::new(0, payload)).unwrap();

    let before = writer.data_size();
    writer.write(&OffsetMessage::new(1, Vec::new())).unwrap();
    assert_eq!(writer.data_size(), before);
    writer.close().unwrap();

    let mut reader = ParquetRecordReader::open(cache, &location).unwrap();
    assert!(reader.next_message().unwrap().is_some());
    assert!(reader.next_message().unwrap().is_none());
}

#[test]
fn malformed_payload_surfaces_decode_error_from_writer() {
    let dir = TempDir::new().unwrap();
    let schema = click_schema();
    let cache = clicks_cache();
    let location = FileLocation::new(dir.path().join("clicks.parquet"), "clicks", 0, 0);

    cache
        .decode("clicks", &click_payload(1, &schema, 1, "https://example"))
        .unwrap();
    let mut writer =
        ParquetRecordWriter::open(Arc::clone(&cache), &location, Compression::SNAPPY).unwrap();

    let err = writer
        .write(&OffsetMessage::new(0, vec![0xFF, 0x00, 0x00, 0x00, 0x01]))
        .unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));
}

// --- Reader ---

#[test]
fn reader_open_fails_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let schema = click_schema();
    let cache = clicks_cache();
    cache
        .decode("clicks", &click_payload(1, &schema, 1, "https://example"))
        .unwrap();

    let location = FileLocation::new(dir.path().join("absent.parquet"), "clicks", 0, 0);
    let err = ParquetRecordReader::open(cache, &location).unwrap_err();
    assert!(matches!(err, CodecError::FileOpen { .. }));
}

#[test]
fn reader_open_fails_for_topic_never_decoded() {
    let dir = TempDir::new().unwrap();
    let cache = clicks_cache();
    let location = FileLocation::new(dir.path().join("absent.parquet"), "clicks", 0, 0);

    let err = ParquetRecordReader::open(cache, &location).unwrap_err();
    assert!(matches!(err, CodecError::SchemaUnavailable { .. }));
}

#[test]
fn reader_iterator_yields_all_records_in_order() {
    let dir = TempDir::new().unwrap();
    let schema = click_schema();
    let cache = clicks_cache();
    let location = FileLocation::new(dir.path().join("clicks.parquet"), "clicks", 0, 100);

    cache
        .decode("clicks", &click_payload(1, &schema, 0, "https://example"))
        .unwrap();
    let mut writer =
        ParquetRecordWriter::open(Arc::clone(&cache), &location, Compression::SNAPPY).unwrap();
    for i in 0..5 {
        let payload = click_payload(1, &schema, i, "https://example");
        writer.write(&OffsetMessage::new(100 + i as u64, payload)).unwrap();
    }
    writer.close().unwrap();

    let reader = ParquetRecordReader::open(cache, &location).unwrap();
    let offsets: Vec<u64> = reader.map(|m| m.unwrap().offset).collect();
    assert_eq!(offsets, vec![100, 101, 102, 103, 104]);
}
