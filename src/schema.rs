//! Ordered registry of (tag, type, optional nested schema) entries that a
//! [`Struct`](crate::container::Struct) is bound to and a
//! [`Codec`](crate::codec::Codec) encodes/decodes against.

use crate::{
    error::{ensure, CodecError, Result, MAX_SCHEMA_KEYS},
    field_type::FieldType,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One declared entry of a [`Schema`]: a tag, its field type, and, for
/// `FieldType::Struct` entries only, the nested schema it's bound to.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SchemaField {
    pub tag: String,
    pub field_type: FieldType,
    pub nested: Option<Schema>,
}

/// An ordered mapping from schema-key (`0..256`) to declared field. Built up
/// once via [`add_field`](Schema::add_field) / [`add_struct`](Schema::add_struct)
/// and then treated as stable for the life of any `Struct` or `Codec` bound
/// to it; the codec assumes this stability during any encode/decode.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    pub fn new() -> Self {
        Schema { fields: Vec::new() }
    }

    /// Declares a non-struct field, returning its assigned schema-key.
    ///
    /// Fails with [`CodecError::DuplicateTag`] if `tag` is already declared
    /// in this schema, or [`CodecError::WrongBuilder`] if `field_type` is
    /// `FieldType::Struct` (structs must go through [`add_struct`](Self::add_struct)).
    pub fn add_field(&mut self, tag: impl Into<String>, field_type: FieldType) -> Result<usize> {
        ensure!(
            field_type != FieldType::Struct,
            CodecError::WrongBuilder
        );
        self.add_raw(tag.into(), field_type, None)
    }

    /// Declares a `STRUCT` field bound to `nested`, returning its assigned
    /// schema-key. Fails with [`CodecError::DuplicateTag`] on collision.
    pub fn add_struct(&mut self, tag: impl Into<String>, nested: Schema) -> Result<usize> {
        self.add_raw(tag.into(), FieldType::Struct, Some(nested))
    }

    fn add_raw(
        &mut self,
        tag: String,
        field_type: FieldType,
        nested: Option<Schema>,
    ) -> Result<usize> {
        ensure!(
            self.lookup(&tag).is_none(),
            CodecError::DuplicateTag { tag: tag.clone() }
        );
        ensure!(
            self.fields.len() < MAX_SCHEMA_KEYS,
            CodecError::InvalidKey { key: self.fields.len() }
        );
        let key = self.fields.len();
        self.fields.push(SchemaField { tag, field_type, nested });
        Ok(key)
    }

    /// Linear scan over declared tags; schemas are capped at 256 entries, so
    /// this is cheap and a hash table's overhead would dominate. Hot paths
    /// use the schema-key returned by `add_field`/`add_struct` directly
    /// rather than re-resolving the tag.
    pub fn lookup(&self, tag: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field_at(&self, key: usize) -> Result<&SchemaField> {
        self.fields.get(key).ok_or(CodecError::InvalidKey { key })
    }

    pub fn type_at(&self, key: usize) -> Result<FieldType> {
        self.field_at(key).map(|f| f.field_type)
    }

    pub fn tag_at(&self, key: usize) -> Result<&str> {
        self.field_at(key).map(|f| f.tag.as_str())
    }

    pub fn nested_schema_at(&self, key: usize) -> Result<Option<&Schema>> {
        self.field_at(key).map(|f| f.nested.as_ref())
    }
}
