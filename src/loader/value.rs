//! Coerced values and the field types they can be assigned to

use std::any::type_name;

use crate::error::{Result, TypeError};

/// What a field descriptor declares its field to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    String,
    IntegerSlice,
    FloatSlice,
    StringSlice,
    /// A nested record filled from the section of the same name
    Section,
    /// Declared but not assignable by the loader
    ReadOnly,
    /// A type the loader has no conversion for
    Unsupported,
}

/// A config value after coercion, before narrowing to the field's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    StringArray(Vec<String>),
}

/// Types a field descriptor can assign a [`Value`] to.
pub trait FieldType: Sized {
    const KIND: FieldKind;

    fn from_value(value: Value, field: &str) -> Result<Self>;
}

fn mismatch<T>(field: &str) -> crate::error::ConfError {
    TypeError::Unsupported {
        field: field.to_string(),
        type_name: type_name::<T>(),
    }
    .into()
}

fn narrow_int<T: TryFrom<i64>>(value: i64, field: &str) -> Result<T> {
    T::try_from(value).map_err(|_| {
        TypeError::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            type_name: type_name::<T>(),
        }
        .into()
    })
}

trait FromFloat: Sized {
    fn from_f64(value: f64, field: &str) -> Result<Self>;
}

impl FromFloat for f64 {
    fn from_f64(value: f64, _field: &str) -> Result<Self> {
        Ok(value)
    }
}

impl FromFloat for f32 {
    fn from_f64(value: f64, field: &str) -> Result<Self> {
        let narrowed = value as f32;
        if value.is_finite() && narrowed.is_infinite() {
            return Err(TypeError::OutOfRange {
                field: field.to_string(),
                value: value.to_string(),
                type_name: "f32",
            }
            .into());
        }
        Ok(narrowed)
    }
}

macro_rules! integer_field {
    ($($t:ty),*) => {$(
        impl FieldType for $t {
            const KIND: FieldKind = FieldKind::Integer;

            fn from_value(value: Value, field: &str) -> Result<Self> {
                match value {
                    Value::Int(v) => narrow_int(v, field),
                    _ => Err(mismatch::<Self>(field)),
                }
            }
        }

        impl FieldType for Vec<$t> {
            const KIND: FieldKind = FieldKind::IntegerSlice;

            fn from_value(value: Value, field: &str) -> Result<Self> {
                match value {
                    Value::IntArray(values) => {
                        values.into_iter().map(|v| narrow_int(v, field)).collect()
                    }
                    _ => Err(mismatch::<Self>(field)),
                }
            }
        }
    )*};
}

macro_rules! float_field {
    ($($t:ty),*) => {$(
        impl FieldType for $t {
            const KIND: FieldKind = FieldKind::Float;

            fn from_value(value: Value, field: &str) -> Result<Self> {
                match value {
                    Value::Float(v) => <$t>::from_f64(v, field),
                    _ => Err(mismatch::<Self>(field)),
                }
            }
        }

        impl FieldType for Vec<$t> {
            const KIND: FieldKind = FieldKind::FloatSlice;

            fn from_value(value: Value, field: &str) -> Result<Self> {
                match value {
                    Value::FloatArray(values) => {
                        values.into_iter().map(|v| <$t>::from_f64(v, field)).collect()
                    }
                    _ => Err(mismatch::<Self>(field)),
                }
            }
        }
    )*};
}

integer_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
float_field!(f32, f64);

impl FieldType for String {
    const KIND: FieldKind = FieldKind::String;

    fn from_value(value: Value, field: &str) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(mismatch::<Self>(field)),
        }
    }
}

impl FieldType for Vec<String> {
    const KIND: FieldKind = FieldKind::StringSlice;

    fn from_value(value: Value, field: &str) -> Result<Self> {
        match value {
            Value::StringArray(values) => Ok(values),
            _ => Err(mismatch::<Self>(field)),
        }
    }
}
