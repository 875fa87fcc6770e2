//! A schema-driven binary codec for flat, tagged-field structs.
//!
//! Both endpoints share a [`Schema`] out of band; the wire carries only a
//! one-byte field key and, for variable-length values, a two-byte length;
//! no type tags, no field names, no envelope. See [`Codec`] for the wire
//! format and [`Schema`]/[`Struct`]/[`Field`] for the data model.
//!
//! ```
//! use structwire::{Codec, FieldType, Schema, Struct};
//!
//! let mut schema = Schema::new();
//! schema.add_field("id", FieldType::Int).unwrap();
//!
//! let mut value = Struct::new(schema.clone());
//! value.append_int("id", 0x01020304).unwrap();
//!
//! let mut codec = Codec::new();
//! let bytes = codec.encode(&value).unwrap();
//! assert_eq!(bytes, [0x00, 0x01, 0x02, 0x03, 0x04]);
//!
//! let mut decoded = Struct::new(schema);
//! codec.decode(&bytes, &mut decoded).unwrap();
//! assert_eq!(decoded.first_by_key(0).unwrap().as_int().unwrap(), 0x01020304);
//! ```

pub mod codec;
pub mod container;
pub mod error;
pub mod field;
pub mod field_type;
pub mod schema;

pub use codec::Codec;
pub use container::Struct;
pub use error::CodecError;
pub use field::Field;
pub use field_type::FieldType;
pub use schema::Schema;
