//! Conversion from decoded Avro record values to Arrow `RecordBatch`.

mod append;
mod builder;

use apache_avro::types::Value as AvroValue;
use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::error::ConvertError;

/// Convert decoded record rows to a `RecordBatch` with the given schema.
///
/// Every row must be a `Value::Record` conforming to the schema the Arrow
/// schema was derived from; fields are matched by position. `rows` must not
/// be empty.
pub fn avro_rows_to_record_batch(
    schema: &SchemaRef,
    rows: &[AvroValue],
) -> Result<RecordBatch, ConvertError> {
    if rows.is_empty() {
        return Err(ConvertError::EmptyRows);
    }

    let fields = schema.fields();
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        let values = rows
            .iter()
            .map(|row| record_field_value(row, i))
            .collect::<Result<Vec<&AvroValue>, ConvertError>>()?;
        arrays.push(build_array_from_values(field.data_type(), &values)?);
    }

    Ok(RecordBatch::try_new(schema.clone(), arrays)?)
}

fn record_field_value(root: &AvroValue, field_index: usize) -> Result<&AvroValue, ConvertError> {
    match root {
        AvroValue::Record(fields) => Ok(fields
            .get(field_index)
            .map(|(_, value)| value)
            .unwrap_or(&AvroValue::Null)),
        other => Err(ConvertError::mismatch("Record", variant_name(other))),
    }
}

fn build_array_from_values(
    dt: &DataType,
    values: &[&AvroValue],
) -> Result<ArrayRef, ConvertError> {
    let capacity = match dt {
        DataType::List(_) | DataType::Map(_, _) => values.len().saturating_mul(4),
        _ => values.len(),
    };
    let mut builder = builder::make_builder(dt, capacity)?;
    for value in values {
        append::append_value_to_builder(&mut builder, dt, value)?;
    }
    Ok(builder.finish())
}

pub(crate) fn variant_name(value: &AvroValue) -> &'static str {
    match value {
        AvroValue::Null => "Null",
        AvroValue::Boolean(_) => "Boolean",
        AvroValue::Int(_) => "Int",
        AvroValue::Long(_) => "Long",
        AvroValue::Float(_) => "Float",
        AvroValue::Double(_) => "Double",
        AvroValue::Bytes(_) => "Bytes",
        AvroValue::String(_) => "String",
        AvroValue::Union(_, _) => "Union",
        AvroValue::Array(_) => "Array",
        AvroValue::Map(_) => "Map",
        AvroValue::Record(_) => "Record",
        AvroValue::TimestampMillis(_) => "TimestampMillis",
        AvroValue::TimestampMicros(_) => "TimestampMicros",
        _ => "other",
    }
}
