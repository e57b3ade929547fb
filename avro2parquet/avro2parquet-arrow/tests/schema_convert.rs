use apache_avro::Schema as AvroSchema;
use arrow::datatypes::DataType;
use avro2parquet_arrow::{ConvertError, record_schema_to_arrow};

fn parse(json: &str) -> AvroSchema {
    AvroSchema::parse_str(json).unwrap()
}

#[test]
fn click_schema_maps_to_expected_arrow_fields() {
    let schema = parse(
        r#"{
            "type": "record",
            "name": "Click",
            "fields": [
                {"name": "id", "type": "long"},
                {"name": "url", "type": "string"},
                {"name": "referrer", "type": ["null", "string"]}
            ]
        }"#,
    );

    let arrow_schema = record_schema_to_arrow(&schema).unwrap();

    assert_eq!(arrow_schema.fields().len(), 3);
    assert_eq!(arrow_schema.field(0).name(), "id");
    assert_eq!(arrow_schema.field(0).data_type(), &DataType::Int64);
    assert!(!arrow_schema.field(0).is_nullable());
    assert_eq!(arrow_schema.field(1).data_type(), &DataType::Utf8);
    assert_eq!(arrow_schema.field(2).data_type(), &DataType::Utf8);
    assert!(arrow_schema.field(2).is_nullable());
}

#[test]
fn nested_record_maps_to_struct() {
    let schema = parse(
        r#"{
            "type": "record",
            "name": "Outer",
            "fields": [
                {"name": "inner", "type": {
                    "type": "record",
                    "name": "Inner",
                    "fields": [{"name": "n", "type": "int"}]
                }}
            ]
        }"#,
    );

    let arrow_schema = record_schema_to_arrow(&schema).unwrap();

    match arrow_schema.field(0).data_type() {
        DataType::Struct(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].name(), "n");
            assert_eq!(fields[0].data_type(), &DataType::Int32);
        }
        other => panic!("expected Struct, got {other:?}"),
    }
}

#[test]
fn array_and_map_fields_map_to_list_and_map() {
    let schema = parse(
        r#"{
            "type": "record",
            "name": "Containers",
            "fields": [
                {"name": "tags", "type": {"type": "array", "items": "string"}},
                {"name": "counts", "type": {"type": "map", "values": "long"}}
            ]
        }"#,
    );

    let arrow_schema = record_schema_to_arrow(&schema).unwrap();

    assert!(matches!(
        arrow_schema.field(0).data_type(),
        DataType::List(_)
    ));
    assert!(matches!(
        arrow_schema.field(1).data_type(),
        DataType::Map(_, false)
    ));
}

#[test]
fn top_level_non_record_is_rejected() {
    let schema = parse(r#"{"type": "string"}"#);
    let err = record_schema_to_arrow(&schema).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSchema { .. }));
}

#[test]
fn enum_field_is_rejected() {
    let schema = parse(
        r#"{
            "type": "record",
            "name": "WithEnum",
            "fields": [
                {"name": "color", "type": {
                    "type": "enum", "name": "Color", "symbols": ["RED", "BLUE"]
                }}
            ]
        }"#,
    );
    let err = record_schema_to_arrow(&schema).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSchema { .. }));
}

#[test]
fn non_nullable_union_is_rejected() {
    let schema = parse(
        r#"{
            "type": "record",
            "name": "WithUnion",
            "fields": [
                {"name": "either", "type": ["int", "string"]}
            ]
        }"#,
    );
    let err = record_schema_to_arrow(&schema).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedSchema { .. }));
}
