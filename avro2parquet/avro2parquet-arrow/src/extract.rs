//! Row extraction: `RecordBatch` rows back into Avro record values.
//!
//! Extraction is driven by the Avro schema, not the Arrow schema, so union
//! wrappers and variant choices are reconstructed exactly as the original
//! decode produced them.

use std::collections::HashMap;

use apache_avro::Schema as AvroSchema;
use apache_avro::schema::SchemaKind;
use apache_avro::types::Value as AvroValue;
use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    Float32Type, Float64Type, Int32Type, Int64Type, TimestampMicrosecondType,
    TimestampMillisecondType,
};
use arrow::record_batch::RecordBatch;

use crate::error::ConvertError;
use crate::schema_convert::nullable_union_inner;

/// Extract one batch row as a `Value::Record` conforming to `schema`.
///
/// `schema` must be the record schema the batch's Arrow schema was derived
/// from; columns are matched to record fields by position.
pub fn row_to_avro(
    batch: &RecordBatch,
    row: usize,
    schema: &AvroSchema,
) -> Result<AvroValue, ConvertError> {
    let AvroSchema::Record(record) = schema else {
        return Err(ConvertError::UnsupportedSchema {
            detail: format!(
                "top-level schema must be a record, got {:?}",
                SchemaKind::from(schema)
            ),
        });
    };

    let mut fields = Vec::with_capacity(record.fields.len());
    for (i, field) in record.fields.iter().enumerate() {
        let value = array_value(&field.schema, batch.column(i).as_ref(), row)?;
        fields.push((field.name.clone(), value));
    }
    Ok(AvroValue::Record(fields))
}

fn array_value(
    schema: &AvroSchema,
    array: &dyn Array,
    row: usize,
) -> Result<AvroValue, ConvertError> {
    if let AvroSchema::Union(union) = schema {
        let inner = nullable_union_inner(union)?;
        return if array.is_null(row) {
            Ok(AvroValue::Union(0, Box::new(AvroValue::Null)))
        } else {
            Ok(AvroValue::Union(1, Box::new(array_value(inner, array, row)?)))
        };
    }

    let value = match schema {
        AvroSchema::Null => AvroValue::Null,
        AvroSchema::Boolean => AvroValue::Boolean(array.as_boolean().value(row)),
        AvroSchema::Int => AvroValue::Int(array.as_primitive::<Int32Type>().value(row)),
        AvroSchema::Long => AvroValue::Long(array.as_primitive::<Int64Type>().value(row)),
        AvroSchema::Float => AvroValue::Float(array.as_primitive::<Float32Type>().value(row)),
        AvroSchema::Double => AvroValue::Double(array.as_primitive::<Float64Type>().value(row)),
        AvroSchema::String => AvroValue::String(array.as_string::<i32>().value(row).to_string()),
        AvroSchema::Bytes => AvroValue::Bytes(array.as_binary::<i32>().value(row).to_vec()),
        AvroSchema::TimestampMillis => AvroValue::TimestampMillis(
            array.as_primitive::<TimestampMillisecondType>().value(row),
        ),
        AvroSchema::TimestampMicros => AvroValue::TimestampMicros(
            array.as_primitive::<TimestampMicrosecondType>().value(row),
        ),
        AvroSchema::Record(record) => {
            let struct_array = array.as_struct();
            let mut fields = Vec::with_capacity(record.fields.len());
            for (i, field) in record.fields.iter().enumerate() {
                let value = array_value(&field.schema, struct_array.column(i).as_ref(), row)?;
                fields.push((field.name.clone(), value));
            }
            AvroValue::Record(fields)
        }
        AvroSchema::Array(inner) => {
            let items = array.as_list::<i32>().value(row);
            let values = (0..items.len())
                .map(|i| array_value(&inner.items, items.as_ref(), i))
                .collect::<Result<Vec<AvroValue>, ConvertError>>()?;
            AvroValue::Array(values)
        }
        AvroSchema::Map(inner) => {
            let entries = array.as_map().value(row);
            let keys = entries.column(0).as_string::<i32>();
            let values = entries.column(1);
            let mut map = HashMap::with_capacity(entries.len());
            for i in 0..entries.len() {
                let value = array_value(&inner.types, values.as_ref(), i)?;
                map.insert(keys.value(i).to_string(), value);
            }
            AvroValue::Map(map)
        }
        other => {
            return Err(ConvertError::UnsupportedSchema {
                detail: format!("{:?}", SchemaKind::from(other)),
            });
        }
    };
    Ok(value)
}
