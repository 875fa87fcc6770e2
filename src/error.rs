//! The closed set of failure modes surfaced by this crate. The codec never
//! logs; it only signals, via these variants.

use thiserror::Error;

/// Maximum payload size for a variable-length field (`STRING`, `RAW`,
/// `STRUCT`): the length prefix is two bytes.
pub const MAX_FIELD_LEN: usize = u16::MAX as usize;

/// Maximum number of distinct tags a single [`Schema`](crate::schema::Schema)
/// may declare.
pub const MAX_SCHEMA_KEYS: usize = 256;

#[derive(Debug, Error, Eq, PartialEq, Clone)]
pub enum CodecError {
    /// `Struct::append_by_tag` (or a scalar/string/struct convenience
    /// setter) referenced a tag not declared in the schema.
    #[error("unknown tag {tag:?}")]
    UnknownTag { tag: String },

    /// A schema-key was used that lies outside the schema's declared range.
    #[error("invalid schema key {key}")]
    InvalidKey { key: usize },

    /// `Schema::add_field`/`add_struct` re-declared a tag already present.
    #[error("duplicate tag {tag:?}")]
    DuplicateTag { tag: String },

    /// `Schema::add_field` was called with `FieldType::Struct`; nested
    /// schemas must go through `add_struct`.
    #[error("field type Struct must be declared with Schema::add_struct")]
    WrongBuilder,

    /// A field's declared type didn't match the type expected at the call
    /// site (the schema's type at a key, or an accessor's expected type).
    #[error("type mismatch: expected {expected:?}, got {got:?}")]
    TypeMismatch {
        expected: crate::field_type::FieldType,
        got: crate::field_type::FieldType,
    },

    /// A variable-length field's payload exceeded 65,535 bytes.
    #[error("field of {len} bytes exceeds the {max} byte limit", max = MAX_FIELD_LEN)]
    FieldTooLong { len: usize },

    /// The decoder needed more bytes than remained in the active layer.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    TruncatedInput { needed: usize, available: usize },

    /// A `STRING` field's payload bytes were not valid UTF-8.
    #[error("malformed data: string field is not valid UTF-8")]
    InvalidUtf8,
}

pub type Result<T> = std::result::Result<T, CodecError>;

macro_rules! ensure {
    ($c:expr, $err:expr) => {
        if !$c {
            return Err($err);
        }
    };
}

pub(crate) use ensure;
