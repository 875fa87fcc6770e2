//! The in-memory struct container: an ordered, append-only list of
//! `(schema_key, Field)` pairs bound to one [`Schema`].

use crate::{
    error::{ensure, CodecError, Result},
    field::Field,
    schema::Schema,
};

/// An ordered sequence of `(schema_key, Field)` pairs bound to one `Schema`.
///
/// Duplicate schema-keys are permitted and preserve insertion order, which
/// is what lets one tag carry "repeated" fields. `append` grows the backing
/// vector (which doubles on saturation, same as `Vec`'s own growth); `reset`
/// truncates to zero length without releasing that capacity, so a `Struct`
/// can be reused across many encode/decode cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    schema: Schema,
    entries: Vec<(usize, Field)>,
}

impl Struct {
    pub fn new(schema: Schema) -> Self {
        Struct { schema, entries: Vec::new() }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All appended `(schema_key, Field)` pairs, in insertion order.
    pub fn entries(&self) -> &[(usize, Field)] {
        &self.entries
    }

    /// Truncates to zero length without releasing backing capacity. Calling
    /// this repeatedly is equivalent to calling it once.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    fn key_for_tag(&self, tag: &str) -> Result<usize> {
        self.schema
            .lookup(tag)
            .ok_or_else(|| CodecError::UnknownTag { tag: tag.to_string() })
    }

    fn check_type(&self, key: usize, field: &Field) -> Result<()> {
        let expected = self.schema.type_at(key)?;
        let got = field.field_type();
        ensure!(expected == got, CodecError::TypeMismatch { expected, got });
        Ok(())
    }

    /// Resolves `tag` to a schema-key, type-checks `field` against it, and
    /// appends. Fails with `UnknownTag` or `TypeMismatch`.
    pub fn append_by_tag(&mut self, tag: &str, field: Field) -> Result<()> {
        let key = self.key_for_tag(tag)?;
        self.append_by_key(key, field)
    }

    /// Type-checks `field` against the schema at `key` and appends. Fails
    /// with `InvalidKey` or `TypeMismatch`.
    pub fn append_by_key(&mut self, key: usize, field: Field) -> Result<()> {
        self.check_type(key, &field)?;
        self.entries.push((key, field));
        Ok(())
    }

    /// Stores `bytes` at `key` without type-checking; the documented
    /// "bytes escape hatch", intended for `RAW` fields but usable to bypass
    /// the assertion on any key.
    pub fn append_bytes_by_key(&mut self, key: usize, bytes: Vec<u8>) -> Result<()> {
        ensure!(key < self.schema.len(), CodecError::InvalidKey { key });
        crate::field::ensure_len(bytes.len())?;
        self.entries.push((key, Field::Raw(bytes)));
        Ok(())
    }

    pub fn append_bytes(&mut self, tag: &str, bytes: Vec<u8>) -> Result<()> {
        let key = self.key_for_tag(tag)?;
        self.append_bytes_by_key(key, bytes)
    }

    pub fn append_string(&mut self, tag: &str, s: impl Into<String>) -> Result<()> {
        self.append_by_tag(tag, Field::String(s.into()))
    }

    pub fn append_string_by_key(&mut self, key: usize, s: impl Into<String>) -> Result<()> {
        self.append_by_key(key, Field::String(s.into()))
    }

    pub fn append_struct(&mut self, tag: &str, nested: Struct) -> Result<()> {
        self.append_by_tag(tag, Field::Struct(Box::new(nested)))
    }

    pub fn append_struct_by_key(&mut self, key: usize, nested: Struct) -> Result<()> {
        self.append_by_key(key, Field::Struct(Box::new(nested)))
    }

    /// The first appended field under `tag`, in insertion order.
    pub fn first(&self, tag: &str) -> Result<Option<&Field>> {
        let key = self.key_for_tag(tag)?;
        Ok(self.first_by_key(key))
    }

    pub fn first_by_key(&self, key: usize) -> Option<&Field> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, f)| f)
    }

    /// All fields appended under `tag`, in insertion order.
    pub fn all_for(&self, tag: &str) -> Result<Vec<&Field>> {
        let key = self.key_for_tag(tag)?;
        Ok(self.all_for_key(key))
    }

    pub fn all_for_key(&self, key: usize) -> Vec<&Field> {
        self.entries.iter().filter(|(k, _)| *k == key).map(|(_, f)| f).collect()
    }

    pub fn has(&self, tag: &str) -> Result<bool> {
        Ok(self.first(tag)?.is_some())
    }

    pub fn has_key(&self, key: usize) -> bool {
        self.first_by_key(key).is_some()
    }
}

macro_rules! scalar_setter {
    ($by_tag:ident, $by_key:ident, $t:ty) => {
        impl Struct {
            pub fn $by_tag(&mut self, tag: &str, value: $t) -> Result<()> {
                self.append_by_tag(tag, Field::from(value))
            }

            pub fn $by_key(&mut self, key: usize, value: $t) -> Result<()> {
                self.append_by_key(key, Field::from(value))
            }
        }
    };
}

scalar_setter!(append_bool, append_bool_by_key, bool);
scalar_setter!(append_byte, append_byte_by_key, u8);
scalar_setter!(append_short, append_short_by_key, i16);
scalar_setter!(append_int, append_int_by_key, i32);
scalar_setter!(append_long, append_long_by_key, i64);
scalar_setter!(append_float, append_float_by_key, f32);
scalar_setter!(append_double, append_double_by_key, f64);
