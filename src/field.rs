//! A single typed value appended into a [`Struct`](crate::container::Struct).
//!
//! Modeled as a tagged variant (Design Notes' recommended shape) rather than
//! a base type with nine subclasses: the discriminant is the
//! [`FieldType`](crate::field_type::FieldType), and the payload is either
//! fixed scalar bits, an owned byte run, or an owned nested `Struct`.

use crate::{
    container::Struct,
    error::{CodecError, Result, MAX_FIELD_LEN},
    field_type::FieldType,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Bool(bool),
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Opaque bytes. Unlike every other variant, [`Field::put_bytes`] writes
    /// this payload without cross-checking the declared type; the
    /// documented "bytes escape hatch".
    Raw(Vec<u8>),
    Struct(Box<Struct>),
}

macro_rules! accessor {
    ($as_name:ident, $variant:ident, $t:ty) => {
        pub fn $as_name(&self) -> Result<$t> {
            match self {
                Field::$variant(v) => Ok(*v),
                other => Err(CodecError::TypeMismatch {
                    expected: FieldType::$variant,
                    got: other.field_type(),
                }),
            }
        }
    };
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Bool(_) => FieldType::Bool,
            Field::Byte(_) => FieldType::Byte,
            Field::Short(_) => FieldType::Short,
            Field::Int(_) => FieldType::Int,
            Field::Long(_) => FieldType::Long,
            Field::Float(_) => FieldType::Float,
            Field::Double(_) => FieldType::Double,
            Field::String(_) => FieldType::String,
            Field::Raw(_) => FieldType::Raw,
            Field::Struct(_) => FieldType::Struct,
        }
    }

    accessor!(as_bool, Bool, bool);
    accessor!(as_byte, Byte, u8);
    accessor!(as_short, Short, i16);
    accessor!(as_int, Int, i32);
    accessor!(as_long, Long, i64);
    accessor!(as_float, Float, f32);
    accessor!(as_double, Double, f64);

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Field::String(s) => Ok(s.as_str()),
            other => Err(CodecError::TypeMismatch {
                expected: FieldType::String,
                got: other.field_type(),
            }),
        }
    }

    /// Returns this field's payload bytes. Never fails: scalars are read out
    /// of their wire encoding, and `Raw`/`String` return their stored bytes
    /// directly. `Struct` fields have no byte representation in memory (the
    /// codec materializes one on demand during encoding) and return `None`.
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Field::Bool(b) => Some(vec![*b as u8]),
            Field::Byte(b) => Some(vec![*b]),
            Field::Short(n) => Some(n.to_be_bytes().to_vec()),
            Field::Int(n) => Some(n.to_be_bytes().to_vec()),
            Field::Long(n) => Some(n.to_be_bytes().to_vec()),
            Field::Float(n) => Some(n.to_be_bytes().to_vec()),
            Field::Double(n) => Some(n.to_be_bytes().to_vec()),
            Field::String(s) => Some(s.as_bytes().to_vec()),
            Field::Raw(b) => Some(b.clone()),
            Field::Struct(_) => None,
        }
    }

    pub fn as_struct(&self) -> Result<&Struct> {
        match self {
            Field::Struct(s) => Ok(s),
            other => Err(CodecError::TypeMismatch {
                expected: FieldType::Struct,
                got: other.field_type(),
            }),
        }
    }

    /// Stores `bytes` as this field's payload, reinterpreting it as a `Raw`
    /// field regardless of any type previously held here. No type check is
    /// performed; this is the documented escape hatch for callers that know
    /// what they're doing.
    pub fn put_bytes(&mut self, bytes: Vec<u8>) -> Result<()> {
        ensure_len(bytes.len())?;
        *self = Field::Raw(bytes);
        Ok(())
    }

    /// Reconstructs a field of `field_type` from its raw wire payload bytes
    /// (already stripped of the key and any length prefix). `field_type`
    /// must not be `FieldType::Struct`; nested structs are decoded by the
    /// caller and wrapped with `Field::Struct` directly.
    pub(crate) fn from_wire(field_type: FieldType, bytes: &[u8]) -> Result<Field> {
        fn read<const N: usize>(bytes: &[u8]) -> [u8; N] {
            bytes.try_into().expect("wire width matches FieldType::fixed_width")
        }
        Ok(match field_type {
            FieldType::Bool => Field::Bool(bytes[0] != 0),
            FieldType::Byte => Field::Byte(bytes[0]),
            FieldType::Short => Field::Short(i16::from_be_bytes(read(bytes))),
            FieldType::Int => Field::Int(i32::from_be_bytes(read(bytes))),
            FieldType::Long => Field::Long(i64::from_be_bytes(read(bytes))),
            FieldType::Float => Field::Float(f32::from_be_bytes(read(bytes))),
            FieldType::Double => Field::Double(f64::from_be_bytes(read(bytes))),
            FieldType::String => {
                Field::String(String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)?)
            }
            FieldType::Raw => Field::Raw(bytes.to_vec()),
            FieldType::Struct => unreachable!("struct fields are decoded by the caller"),
        })
    }
}

pub(crate) fn ensure_len(len: usize) -> Result<()> {
    if len > MAX_FIELD_LEN {
        Err(CodecError::FieldTooLong { len })
    } else {
        Ok(())
    }
}

impl From<bool> for Field {
    fn from(v: bool) -> Self {
        Field::Bool(v)
    }
}
impl From<u8> for Field {
    fn from(v: u8) -> Self {
        Field::Byte(v)
    }
}
impl From<i16> for Field {
    fn from(v: i16) -> Self {
        Field::Short(v)
    }
}
impl From<i32> for Field {
    fn from(v: i32) -> Self {
        Field::Int(v)
    }
}
impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Long(v)
    }
}
impl From<f32> for Field {
    fn from(v: f32) -> Self {
        Field::Float(v)
    }
}
impl From<f64> for Field {
    fn from(v: f64) -> Self {
        Field::Double(v)
    }
}
impl From<String> for Field {
    fn from(v: String) -> Self {
        Field::String(v)
    }
}
impl From<Struct> for Field {
    fn from(v: Struct) -> Self {
        Field::Struct(Box::new(v))
    }
}
