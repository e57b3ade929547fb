//! Conversion from Avro record schemas to Arrow schemas.
//!
//! Nullability is carried by `["null", T]` unions on the Avro side and by
//! field nullability on the Arrow side; the union wrapper itself has no
//! Arrow representation.

use std::sync::Arc;

use apache_avro::Schema as AvroSchema;
use apache_avro::schema::{RecordField, SchemaKind, UnionSchema};
use arrow::datatypes::{DataType, Field, Schema, TimeUnit};

use crate::error::ConvertError;

/// Converts a top-level Avro record schema into an Arrow `Schema`.
///
/// Returns `Err` for non-record top-level schemas and for any field shape
/// this layer does not support, so that unsupported files fail at open time
/// rather than mid-scan.
pub fn record_schema_to_arrow(schema: &AvroSchema) -> Result<Schema, ConvertError> {
    let AvroSchema::Record(record) = schema else {
        return Err(ConvertError::UnsupportedSchema {
            detail: format!(
                "top-level schema must be a record, got {:?}",
                SchemaKind::from(schema)
            ),
        });
    };
    let fields = record
        .fields
        .iter()
        .map(record_field_to_arrow_field)
        .collect::<Result<Vec<Field>, ConvertError>>()?;
    Ok(Schema::new(fields))
}

fn record_field_to_arrow_field(field: &RecordField) -> Result<Field, ConvertError> {
    let (data_type, nullable) = avro_type_to_datatype(&field.schema)?;
    Ok(Field::new(&field.name, data_type, nullable))
}

/// Returns `(data_type, nullable)` for one Avro type.
pub(crate) fn avro_type_to_datatype(
    schema: &AvroSchema,
) -> Result<(DataType, bool), ConvertError> {
    let data_type = match schema {
        AvroSchema::Null => DataType::Null,
        AvroSchema::Boolean => DataType::Boolean,
        AvroSchema::Int => DataType::Int32,
        AvroSchema::Long => DataType::Int64,
        AvroSchema::Float => DataType::Float32,
        AvroSchema::Double => DataType::Float64,
        AvroSchema::String => DataType::Utf8,
        AvroSchema::Bytes => DataType::Binary,
        AvroSchema::TimestampMillis => DataType::Timestamp(TimeUnit::Millisecond, None),
        AvroSchema::TimestampMicros => DataType::Timestamp(TimeUnit::Microsecond, None),
        AvroSchema::Record(record) => {
            let fields = record
                .fields
                .iter()
                .map(record_field_to_arrow_field)
                .collect::<Result<Vec<Field>, ConvertError>>()?;
            DataType::Struct(fields.into())
        }
        AvroSchema::Array(array) => {
            let (item_dt, item_nullable) = avro_type_to_datatype(&array.items)?;
            DataType::List(Arc::new(Field::new("item", item_dt, item_nullable)))
        }
        AvroSchema::Map(map) => {
            let (value_dt, value_nullable) = avro_type_to_datatype(&map.types)?;
            let key_field = Field::new("key", DataType::Utf8, false);
            let value_field = Field::new("value", value_dt, value_nullable);
            let entry_struct = DataType::Struct(vec![key_field, value_field].into());
            DataType::Map(Arc::new(Field::new("entries", entry_struct, false)), false)
        }
        AvroSchema::Union(union) => {
            let inner = nullable_union_inner(union)?;
            let (inner_dt, _) = avro_type_to_datatype(inner)?;
            return Ok((inner_dt, true));
        }
        other => {
            return Err(ConvertError::UnsupportedSchema {
                detail: format!("{:?}", SchemaKind::from(other)),
            });
        }
    };
    Ok((data_type, false))
}

/// Returns the non-null branch of a `["null", T]` union.
pub(crate) fn nullable_union_inner(union: &UnionSchema) -> Result<&AvroSchema, ConvertError> {
    match union.variants() {
        [AvroSchema::Null, inner] => Ok(inner),
        variants => Err(ConvertError::UnsupportedSchema {
            detail: format!(
                "only [\"null\", T] unions are supported, got {} variants starting with {:?}",
                variants.len(),
                variants.first().map(SchemaKind::from)
            ),
        }),
    }
}
