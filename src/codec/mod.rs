//! The processor: converts a [`Struct`] to bytes and back, against the
//! schema it's bound to. Holds the scratch buffers that back that
//! conversion, so a `Codec` is reusable across many encode/decode calls but
//! is *not* safe to call concurrently from two threads on the same
//! instance. Callers needing parallelism should use one `Codec` per
//! worker.

mod read_buffer;
mod write_buffer;

use crate::{
    container::Struct,
    error::Result,
    field::{ensure_len, Field},
    field_type::FieldType,
};
use read_buffer::ReadBuffer;
use write_buffer::WriteBuffer;

#[derive(Debug, Default)]
pub struct Codec {
    write: WriteBuffer,
    read: ReadBuffer,
}

impl Codec {
    pub fn new() -> Self {
        Codec { write: WriteBuffer::new(), read: ReadBuffer::new() }
    }

    /// Encodes `value` to a fresh byte sequence, per the wire format in the
    /// crate docs: each field is `key:1 [length:2]? payload:*`, concatenated
    /// in insertion order with no envelope, count, or terminator.
    pub fn encode(&mut self, value: &Struct) -> Result<Vec<u8>> {
        self.write.push_mark();
        let result = self.encode_fields(value);
        let out = self.write.copy_from_last_mark();
        self.write.goto_last_mark();
        self.write.pop_mark();
        result?;
        Ok(out)
    }

    fn encode_fields(&mut self, value: &Struct) -> Result<()> {
        for &(key, ref field) in value.entries() {
            self.write.write_byte(key as u8);
            let field_type = value.schema().type_at(key)?;

            if field_type == FieldType::Struct {
                let nested = field.as_struct()?;
                let bytes = self.encode(nested)?;
                ensure_len(bytes.len())?;
                self.write.write_bytes(&(bytes.len() as u16).to_be_bytes());
                self.write.write_bytes(&bytes);
                continue;
            }

            let payload = field
                .as_bytes()
                .expect("non-struct fields always have a byte payload");

            match field_type.fixed_width() {
                Some(width) => self.write.write_bytes(&fit_to_width(&payload, width)),
                None => {
                    ensure_len(payload.len())?;
                    self.write.write_bytes(&(payload.len() as u16).to_be_bytes());
                    self.write.write_bytes(&payload);
                }
            }
        }
        Ok(())
    }

    /// Decodes `bytes` into `target`, which must be an empty `Struct` bound
    /// to the schema the bytes were encoded against. On failure, `target` is
    /// left in an unspecified, partially-populated state; callers should
    /// discard it or call `reset`.
    pub fn decode(&mut self, bytes: &[u8], target: &mut Struct) -> Result<()> {
        target.reset();
        self.read.push_bytes(bytes);
        let result = self.decode_fields(target);
        self.read.pop_bytes();
        result
    }

    fn decode_fields(&mut self, target: &mut Struct) -> Result<()> {
        while self.read.remaining() > 0 {
            let key = self.read.read_byte()? as usize;
            let field_type = target.schema().type_at(key)?;

            let len = match field_type.fixed_width() {
                Some(width) => width,
                None => self.read.read_u16_be()? as usize,
            };
            let raw = self.read.read_exact(len)?;

            let field = if field_type == FieldType::Struct {
                let nested_schema = target
                    .schema()
                    .nested_schema_at(key)?
                    .expect("STRUCT field always has a nested schema")
                    .clone();
                let mut nested = Struct::new(nested_schema);
                self.decode(&raw, &mut nested)?;
                Field::Struct(Box::new(nested))
            } else {
                Field::from_wire(field_type, &raw)?
            };

            target.append_by_key(key, field)?;
        }
        Ok(())
    }
}

/// Returns exactly `width` bytes of `payload`, truncating or zero-padding on
/// the left. Mismatches only arise from the documented `put_bytes`/
/// `append_bytes` escape hatch writing a differently-sized payload into a
/// fixed-width key; this keeps the wire output well-formed rather than
/// panicking on that caller error.
fn fit_to_width(payload: &[u8], width: usize) -> Vec<u8> {
    if payload.len() == width {
        payload.to_vec()
    } else if payload.len() > width {
        payload[payload.len() - width..].to_vec()
    } else {
        let mut out = vec![0u8; width - payload.len()];
        out.extend_from_slice(payload);
        out
    }
}
