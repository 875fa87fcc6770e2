//! The closed set of field kinds a [`Schema`](crate::schema::Schema) can
//! declare, and their wire widths.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A field's declared type. Scalars carry a fixed wire width; the last three
/// variants are length-prefixed (two big-endian bytes, counting payload
/// bytes only) and bounded at 65,535 bytes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldType {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// UTF-8 text, length-prefixed.
    String,
    /// Opaque bytes, length-prefixed.
    Raw,
    /// A nested struct, recursively encoded and length-prefixed.
    Struct,
}

impl FieldType {
    /// The number of payload bytes a value of this type occupies on the
    /// wire, for fixed-width scalars. `None` for the three variable-length
    /// kinds, which are instead length-prefixed.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            FieldType::Bool => Some(1),
            FieldType::Byte => Some(1),
            FieldType::Short => Some(2),
            FieldType::Int => Some(4),
            FieldType::Long => Some(8),
            FieldType::Float => Some(4),
            FieldType::Double => Some(8),
            FieldType::String | FieldType::Raw | FieldType::Struct => None,
        }
    }

    /// Whether this type is carried on the wire with a two-byte length
    /// prefix ahead of its payload.
    pub fn is_variable_length(self) -> bool {
        self.fixed_width().is_none()
    }

    pub(crate) fn display_str(self) -> &'static str {
        match self {
            FieldType::Bool => "BOOL",
            FieldType::Byte => "BYTE",
            FieldType::Short => "SHORT",
            FieldType::Int => "INT",
            FieldType::Long => "LONG",
            FieldType::Float => "FLOAT",
            FieldType::Double => "DOUBLE",
            FieldType::String => "STRING",
            FieldType::Raw => "RAW",
            FieldType::Struct => "STRUCT",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_str())
    }
}
