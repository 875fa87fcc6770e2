use structwire::{Codec, CodecError, FieldType, Schema, Struct};

fn int_schema() -> Schema {
    let mut schema = Schema::new();
    schema.add_field("v", FieldType::Int).unwrap();
    schema
}

/// S1: one INT field at key 0, value 0x01020304.
#[test]
fn scenario_s1_int_scalar() {
    let schema = int_schema();
    let mut value = Struct::new(schema.clone());
    value.append_int("v", 0x01020304).unwrap();

    let mut codec = Codec::new();
    let bytes = codec.encode(&value).unwrap();
    assert_eq!(bytes, [0x00, 0x01, 0x02, 0x03, 0x04]);

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, value);
}

/// S2: one STRING field at key 0, value "hi".
#[test]
fn scenario_s2_string() {
    let mut schema = Schema::new();
    schema.add_field("v", FieldType::String).unwrap();

    let mut value = Struct::new(schema.clone());
    value.append_string("v", "hi").unwrap();

    let mut codec = Codec::new();
    let bytes = codec.encode(&value).unwrap();
    assert_eq!(bytes, [0x00, 0x00, 0x02, b'h', b'i']);

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, value);
}

/// S3: one BOOL (key 0) and one RAW (key 1).
#[test]
fn scenario_s3_bool_and_raw() {
    let mut schema = Schema::new();
    schema.add_field("flag", FieldType::Bool).unwrap();
    schema.add_field("data", FieldType::Raw).unwrap();

    let mut value = Struct::new(schema.clone());
    value.append_bool("flag", true).unwrap();
    value.append_bytes("data", vec![0xAA, 0xBB, 0xCC]).unwrap();

    let mut codec = Codec::new();
    let bytes = codec.encode(&value).unwrap();
    assert_eq!(bytes, [0x00, 0x01, 0x01, 0x00, 0x03, 0xAA, 0xBB, 0xCC]);

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, value);
}

/// S4: outer STRUCT at key 0 pointing to an inner schema with BYTE at key 0.
#[test]
fn scenario_s4_nested_struct() {
    let mut inner_schema = Schema::new();
    inner_schema.add_field("b", FieldType::Byte).unwrap();

    let mut outer_schema = Schema::new();
    outer_schema.add_struct("inner", inner_schema.clone()).unwrap();

    let mut inner = Struct::new(inner_schema);
    inner.append_byte("b", 0x7F).unwrap();

    let mut outer = Struct::new(outer_schema.clone());
    outer.append_struct("inner", inner).unwrap();

    let mut codec = Codec::new();
    let bytes = codec.encode(&outer).unwrap();
    assert_eq!(bytes, [0x00, 0x00, 0x02, 0x00, 0x7F]);

    let mut decoded = Struct::new(outer_schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, outer);
}

/// S5: duplicate tag "v", two INT fields appended under the same key.
#[test]
fn scenario_s5_duplicate_tag_repetition() {
    let schema = int_schema();
    let mut value = Struct::new(schema.clone());
    value.append_int("v", 1).unwrap();
    value.append_int("v", 2).unwrap();

    let mut codec = Codec::new();
    let bytes = codec.encode(&value).unwrap();
    assert_eq!(
        bytes,
        [0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02]
    );

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    let all: Vec<i32> = decoded.all_for("v").unwrap().iter().map(|f| f.as_int().unwrap()).collect();
    assert_eq!(all, vec![1, 2]);
}

/// S6: the README subnet example.
#[test]
fn scenario_s6_subnet_round_trip() {
    let mut schema = Schema::new();
    schema.add_field("IPV6", FieldType::Bool).unwrap();
    schema.add_field("IPAddress", FieldType::Raw).unwrap();
    schema.add_field("CIDR", FieldType::Byte).unwrap();
    schema.add_field("Name", FieldType::String).unwrap();

    let mut value = Struct::new(schema.clone());
    value.append_bool("IPV6", false).unwrap();
    value.append_bytes("IPAddress", vec![192, 168, 0, 1]).unwrap();
    value.append_byte("CIDR", 24).unwrap();
    value.append_string("Name", "Home network").unwrap();

    let mut codec = Codec::new();
    let bytes = codec.encode(&value).unwrap();

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();

    assert!(!decoded.first("IPV6").unwrap().unwrap().as_bool().unwrap());
    assert_eq!(
        decoded.first("IPAddress").unwrap().unwrap().as_bytes().unwrap(),
        vec![192, 168, 0, 1]
    );
    assert_eq!(decoded.first("CIDR").unwrap().unwrap().as_byte().unwrap(), 24);
    assert_eq!(decoded.first("Name").unwrap().unwrap().as_str().unwrap(), "Home network");
}

/// Property 7: a schema with a duplicate tag declaration fails.
#[test]
fn duplicate_tag_declaration_fails() {
    let mut schema = Schema::new();
    schema.add_field("v", FieldType::Int).unwrap();
    let err = schema.add_field("v", FieldType::Bool).unwrap_err();
    assert_eq!(err, CodecError::DuplicateTag { tag: "v".into() });
}

/// `add_field` with `FieldType::Struct` must go through `add_struct`.
#[test]
fn struct_type_requires_add_struct() {
    let mut schema = Schema::new();
    let err = schema.add_field("v", FieldType::Struct).unwrap_err();
    assert_eq!(err, CodecError::WrongBuilder);
}

/// Property 8: appending an INT against a BYTE-typed key fails.
#[test]
fn type_enforcement() {
    let mut schema = Schema::new();
    schema.add_field("v", FieldType::Byte).unwrap();
    let mut value = Struct::new(schema);
    let err = value.append_int("v", 5).unwrap_err();
    assert_eq!(
        err,
        CodecError::TypeMismatch { expected: FieldType::Byte, got: FieldType::Int }
    );
}

/// Property 9: a truncated variable-length field fails with `TruncatedInput`.
#[test]
fn truncation() {
    let mut schema = Schema::new();
    schema.add_field("v", FieldType::String).unwrap();

    // claims a 10-byte string but only supplies 2
    let bytes = [0x00, 0x00, 0x0A, b'h', b'i'];
    let mut target = Struct::new(schema);
    let mut codec = Codec::new();
    let err = codec.decode(&bytes, &mut target).unwrap_err();
    assert_eq!(err, CodecError::TruncatedInput { needed: 10, available: 2 });
}

/// Property 10: resetting twice is equivalent to resetting once.
#[test]
fn reset_idempotence() {
    let schema = int_schema();
    let mut value = Struct::new(schema);
    value.append_int("v", 1).unwrap();
    value.reset();
    value.reset();
    assert!(value.is_empty());
}

/// Property 5: a 65,535-byte RAW field round-trips; 65,536 bytes fails.
#[test]
fn boundary_raw_field_length() {
    let mut schema = Schema::new();
    schema.add_field("v", FieldType::Raw).unwrap();

    let mut at_limit = Struct::new(schema.clone());
    at_limit.append_bytes("v", vec![7u8; 65_535]).unwrap();
    let mut codec = Codec::new();
    let bytes = codec.encode(&at_limit).unwrap();
    let mut decoded = Struct::new(schema.clone());
    codec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, at_limit);

    let mut over_limit = Struct::new(schema);
    let err = over_limit.append_bytes("v", vec![7u8; 65_536]).unwrap_err();
    assert_eq!(err, CodecError::FieldTooLong { len: 65_536 });
}

/// Property 6: an empty struct encodes to zero bytes and decodes back to
/// an empty struct.
#[test]
fn boundary_empty_struct() {
    let schema = int_schema();
    let empty = Struct::new(schema.clone());
    let mut codec = Codec::new();
    let bytes = codec.encode(&empty).unwrap();
    assert!(bytes.is_empty());

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    assert!(decoded.is_empty());
}

/// A `Codec` is reusable after an encode/decode error; the scratch
/// buffers' mark/layer stacks must be left balanced even on failure.
#[test]
fn codec_reusable_after_error() {
    let schema = int_schema();
    let mut codec = Codec::new();

    let mut target = Struct::new(schema.clone());
    let _ = codec.decode(&[0x00, 0x01], &mut target); // truncated, expect err

    let mut value = Struct::new(schema.clone());
    value.append_int("v", 42).unwrap();
    let bytes = codec.encode(&value).unwrap();

    let mut decoded = Struct::new(schema);
    codec.decode(&bytes, &mut decoded).unwrap();
    assert_eq!(decoded, value);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// A depth-`N` binary tree schema: `{ value: INT, left: STRUCT?, right: STRUCT? }`,
    /// with the leaves (depth 0) holding just `value`.
    fn binary_tree_schema(depth: usize) -> Schema {
        let mut schema = Schema::new();
        schema.add_field("value", FieldType::Int).unwrap();
        if depth > 0 {
            schema.add_struct("left", binary_tree_schema(depth - 1)).unwrap();
            schema.add_struct("right", binary_tree_schema(depth - 1)).unwrap();
        }
        schema
    }

    fn arbitrary_tree(schema: Schema, depth: usize) -> BoxedStrategy<Struct> {
        if depth == 0 {
            any::<i32>()
                .prop_map(move |v| {
                    let mut s = Struct::new(schema.clone());
                    s.append_int("value", v).unwrap();
                    s
                })
                .boxed()
        } else {
            let left_schema = schema.nested_schema_at(1).unwrap().unwrap().clone();
            let right_schema = schema.nested_schema_at(2).unwrap().unwrap().clone();
            (
                any::<i32>(),
                arbitrary_tree(left_schema, depth - 1),
                arbitrary_tree(right_schema, depth - 1),
            )
                .prop_map(move |(v, left, right)| {
                    let mut s = Struct::new(schema.clone());
                    s.append_int("value", v).unwrap();
                    s.append_struct("left", left).unwrap();
                    s.append_struct("right", right).unwrap();
                    s
                })
                .boxed()
        }
    }

    proptest! {
        /// Properties 1 and 3: round-trip holds recursively for nested
        /// structs of arbitrary depth within the schema's declared shape.
        #[test]
        fn round_trip_nested_tree(tree in arbitrary_tree(binary_tree_schema(3), 3)) {
            let mut codec = Codec::new();
            let bytes = codec.encode(&tree).unwrap();
            let mut decoded = Struct::new(binary_tree_schema(3));
            codec.decode(&bytes, &mut decoded).unwrap();
            prop_assert_eq!(decoded, tree);
        }

        /// Property 4: the emitted length prefix always equals the number
        /// of payload bytes that follow a variable-length field on the wire.
        #[test]
        fn raw_length_prefix_matches_payload(payload in proptest::collection::vec(any::<u8>(), 0..4096)) {
            let mut schema = Schema::new();
            schema.add_field("v", FieldType::Raw).unwrap();
            let mut value = Struct::new(schema);
            value.append_bytes("v", payload.clone()).unwrap();

            let mut codec = Codec::new();
            let bytes = codec.encode(&value).unwrap();
            let declared_len = u16::from_be_bytes([bytes[1], bytes[2]]) as usize;
            prop_assert_eq!(declared_len, payload.len());
            prop_assert_eq!(&bytes[3..], payload.as_slice());
        }
    }
}
