use apache_avro::types::Value as AvroValue;
use arrow::array::{
    ArrayBuilder, BinaryBuilder, BooleanBuilder, Float32Builder, Float64Builder, Int32Builder,
    Int64Builder, ListBuilder, MapBuilder, NullBuilder, StringBuilder, StructBuilder,
    TimestampMicrosecondBuilder, TimestampMillisecondBuilder,
};
use arrow::datatypes::{DataType, TimeUnit};

use super::variant_name;
use crate::error::ConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .expect(concat!("expected builder type: ", stringify!($T)))
    };
}

macro_rules! append_scalar {
    ($builder:expr, $B:ty, $value:expr, $variant:ident, $expected:literal) => {
        match $value {
            AvroValue::$variant(v) => cast_builder!($builder, $B).append_value(v.clone()),
            AvroValue::Null => cast_builder!($builder, $B).append_null(),
            other => return Err(ConvertError::mismatch($expected, variant_name(other))),
        }
    };
}

pub(super) fn append_value_to_builder(
    builder: &mut Box<dyn ArrayBuilder>,
    dt: &DataType,
    value: &AvroValue,
) -> Result<(), ConvertError> {
    // The nullable-union wrapper has no Arrow representation; nullability is
    // carried by the slot itself.
    if let AvroValue::Union(_, inner) = value {
        return append_value_to_builder(builder, dt, inner);
    }

    match dt {
        DataType::Null => cast_builder!(builder, NullBuilder).append_null(),
        DataType::Boolean => append_scalar!(builder, BooleanBuilder, value, Boolean, "Boolean"),
        DataType::Int32 => append_scalar!(builder, Int32Builder, value, Int, "Int"),
        DataType::Int64 => append_scalar!(builder, Int64Builder, value, Long, "Long"),
        DataType::Float32 => append_scalar!(builder, Float32Builder, value, Float, "Float"),
        DataType::Float64 => append_scalar!(builder, Float64Builder, value, Double, "Double"),
        DataType::Utf8 => match value {
            AvroValue::String(v) => cast_builder!(builder, StringBuilder).append_value(v),
            AvroValue::Null => cast_builder!(builder, StringBuilder).append_null(),
            other => return Err(ConvertError::mismatch("String", variant_name(other))),
        },
        DataType::Binary => match value {
            AvroValue::Bytes(v) => cast_builder!(builder, BinaryBuilder).append_value(v),
            AvroValue::Null => cast_builder!(builder, BinaryBuilder).append_null(),
            other => return Err(ConvertError::mismatch("Bytes", variant_name(other))),
        },
        DataType::Timestamp(TimeUnit::Millisecond, None) => append_scalar!(
            builder,
            TimestampMillisecondBuilder,
            value,
            TimestampMillis,
            "TimestampMillis"
        ),
        DataType::Timestamp(TimeUnit::Microsecond, None) => append_scalar!(
            builder,
            TimestampMicrosecondBuilder,
            value,
            TimestampMicros,
            "TimestampMicros"
        ),
        DataType::List(field) => {
            let b = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            match value {
                AvroValue::Array(items) => {
                    for item in items {
                        append_value_to_builder(b.values(), field.data_type(), item)?;
                    }
                    b.append(true);
                }
                AvroValue::Null => b.append(false),
                other => return Err(ConvertError::mismatch("Array", variant_name(other))),
            }
        }
        DataType::Struct(fields) => {
            let b = cast_builder!(builder, StructBuilder);
            match value {
                AvroValue::Record(children) => {
                    for (i, field) in fields.iter().enumerate() {
                        let child = children
                            .get(i)
                            .map(|(_, value)| value)
                            .unwrap_or(&AvroValue::Null);
                        append_value_to_struct_field(b, i, field.data_type(), child)?;
                    }
                    b.append(true);
                }
                AvroValue::Null => {
                    for (i, field) in fields.iter().enumerate() {
                        append_value_to_struct_field(b, i, field.data_type(), &AvroValue::Null)?;
                    }
                    b.append(false);
                }
                other => return Err(ConvertError::mismatch("Record", variant_name(other))),
            }
        }
        DataType::Map(entry_field, _) => {
            let b = cast_builder!(
                builder,
                MapBuilder<Box<dyn ArrayBuilder>, Box<dyn ArrayBuilder>>
            );
            let fields = match entry_field.data_type() {
                DataType::Struct(fields) if fields.len() == 2 => fields,
                other => {
                    return Err(ConvertError::UnsupportedSchema {
                        detail: format!("map entry field must be a 2-field struct, got {other:?}"),
                    });
                }
            };
            match value {
                AvroValue::Map(entries) => {
                    for (key, map_value) in entries {
                        cast_builder!(b.keys(), StringBuilder).append_value(key);
                        append_value_to_builder(b.values(), fields[1].data_type(), map_value)?;
                    }
                    b.append(true)?;
                }
                AvroValue::Null => b.append(false)?,
                other => return Err(ConvertError::mismatch("Map", variant_name(other))),
            }
        }
        other => {
            return Err(ConvertError::UnsupportedSchema {
                detail: format!("no append path for arrow type {other:?}"),
            });
        }
    }
    Ok(())
}

fn append_value_to_struct_field(
    sb: &mut StructBuilder,
    index: usize,
    dt: &DataType,
    value: &AvroValue,
) -> Result<(), ConvertError> {
    append_value_to_builder(&mut sb.field_builders_mut()[index], dt, value)
}
