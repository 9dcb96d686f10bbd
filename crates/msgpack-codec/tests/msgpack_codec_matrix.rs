//! Encode/decode matrix against byte strings produced by the Python
//! `msgpack` package, plus error and resource-limit cases.

use msgpack_codec::{
    decode, decode_one, deep_equal, encode, encode_into, DecodeError, Decoder, EncodeError,
    Extension, Integer, Utf8String, Value, DEFAULT_MAX_DEPTH,
};

fn assert_both_ways(value: Value, bytes: &[u8]) {
    assert_eq!(encode(&value).unwrap(), bytes, "pack {value}");
    let decoded = decode_one(bytes).unwrap();
    assert!(deep_equal(&decoded, &value), "unpack {value}: got {decoded}");
}

// ---------------------------------------------------------------------------
// Integers
// ---------------------------------------------------------------------------

#[test]
fn small_integers() {
    assert_both_ways(Value::from(-1), &[0xff]);
    assert_both_ways(Value::from(-100), &[0xd0, 0x9c]);
    assert_both_ways(Value::from(100), &[0x64]);
}

#[test]
fn two_byte_integers() {
    assert_both_ways(Value::from(-16384), &[0xd1, 0xc0, 0x00]);
    assert_both_ways(Value::from(16384), &[0xcd, 0x40, 0x00]);
    assert_both_ways(Value::from(56213), &[0xcd, 0xdb, 0x95]);
}

#[test]
fn negative_beyond_int16_uses_int32() {
    assert_both_ways(Value::from(-56213), &[0xd2, 0xff, 0xff, 0x24, 0x6b]);
}

#[test]
fn eight_byte_integers() {
    assert_both_ways(
        Value::from(100102831903u64),
        &[0xcf, 0x00, 0x00, 0x00, 0x17, 0x4e, 0x97, 0xff, 0x1f],
    );
    assert_both_ways(
        Value::from(-100102831903i64),
        &[0xd3, 0xff, 0xff, 0xff, 0xe8, 0xb1, 0x68, 0x00, 0xe1],
    );
}

#[test]
fn full_integer_range() {
    let cases: [i128; 6] = [
        i64::MIN as i128,
        -1,
        0,
        i64::MAX as i128,
        1 << 63,
        u64::MAX as i128,
    ];
    for n in cases {
        let value = Value::Integer(Integer::try_from(n).unwrap());
        let decoded = decode_one(&encode(&value).unwrap()).unwrap();
        match decoded {
            Value::Integer(i) => assert_eq!(i128::from(i), n),
            other => panic!("expected integer, got {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Floats
// ---------------------------------------------------------------------------

#[test]
fn floats_keep_bit_patterns() {
    assert_both_ways(
        Value::from(1.3313),
        &[0xcb, 0x3f, 0xf5, 0x4d, 0x01, 0x3a, 0x92, 0xa3, 0x05],
    );
    assert_both_ways(
        Value::from(-7.8125653266e-200),
        &[0xcb, 0x96, 0x97, 0xeb, 0xa7, 0xc4, 0x8a, 0x1a, 0x05],
    );
    assert_both_ways(
        Value::from(-7.8125653266e-231),
        &[0xcb, 0x90, 0x28, 0x42, 0x1f, 0xd1, 0xe7, 0x2b, 0xc8],
    );
}

#[test]
fn extreme_floats_do_not_collapse() {
    for f in [f64::MIN_POSITIVE, 5e-324, f64::MAX, -f64::MAX, f64::NEG_INFINITY] {
        let decoded = decode_one(&encode(&Value::Float(f)).unwrap()).unwrap();
        assert_eq!(decoded.as_f64().map(f64::to_bits), Some(f.to_bits()));
    }
}

// ---------------------------------------------------------------------------
// Containers and extensions
// ---------------------------------------------------------------------------

#[test]
fn empty_array_is_not_nil() {
    assert_both_ways(Value::Array(vec![]), &[0x90]);
    assert!(!deep_equal(&decode_one(&[0x90]).unwrap(), &Value::Nil));
}

#[test]
fn little_nested_list() {
    assert_both_ways(
        Value::Array(vec![
            Value::from(10),
            Value::from(true),
            Value::Array(vec![Value::from("hi")]),
        ]),
        &[0x93, 0x0a, 0xc3, 0x91, 0xa2, 0x68, 0x69],
    );
}

#[test]
fn extension_42() {
    assert_both_ways(Value::Extension(Extension::new(42, "a")), &[0xd4, 0x2a, 0x61]);
}

#[test]
fn ext32_round_trip() {
    let ext = Extension::new(-7, vec![0x5au8; 65_536]);
    let bytes = encode(&Value::Extension(ext.clone())).unwrap();
    assert_eq!(&bytes[..6], &[0xc9, 0x00, 0x01, 0x00, 0x00, 0xf9]);
    assert_eq!(bytes.len(), 6 + 65_536);
    assert_eq!(decode_one(&bytes).unwrap(), Value::Extension(ext));
}

#[test]
fn large_containers_use_32_bit_counts() {
    let items = vec![Value::Nil; 70_000];
    let bytes = encode(&Value::Array(items.clone())).unwrap();
    assert_eq!(&bytes[..5], &[0xdd, 0x00, 0x01, 0x11, 0x70]);
    assert_eq!(decode_one(&bytes).unwrap(), Value::Array(items));

    let pairs: Vec<(Value, Value)> = (0..70_000u32).map(|i| (Value::from(i), Value::Nil)).collect();
    let bytes = encode(&Value::Map(pairs.clone())).unwrap();
    assert_eq!(bytes[0], 0xdf);
    assert_eq!(decode_one(&bytes).unwrap(), Value::Map(pairs));
}

#[test]
fn map_equality_ignores_order() {
    let bytes = [0x82, 0xa1, b'a', 0x01, 0xa1, b'b', 0x02];
    let reordered = Value::Map(vec![
        (Value::from("b"), Value::from(2)),
        (Value::from("a"), Value::from(1)),
    ]);
    assert_eq!(decode_one(&bytes).unwrap(), reordered);
}

#[test]
fn encode_into_appends() {
    let mut out = vec![0xc0];
    encode_into(&Value::from(1), &mut out).unwrap();
    assert_eq!(out, vec![0xc0, 0x01]);
    let bad = Value::Extension(Extension::new(999, "x"));
    assert!(encode_into(&bad, &mut out).is_err());
    assert_eq!(out, vec![0xc0, 0x01]);
}

#[test]
fn decode_walks_a_concatenated_buffer() {
    let mut buf = Vec::new();
    for v in [Value::from(1), Value::from("x"), Value::Nil] {
        encode_into(&v, &mut buf).unwrap();
    }
    let mut rest = buf.as_slice();
    let mut seen = Vec::new();
    while !rest.is_empty() {
        let (v, n) = decode(rest).unwrap();
        seen.push(v);
        rest = &rest[n..];
    }
    assert_eq!(seen, vec![Value::from(1), Value::from("x"), Value::Nil]);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn truncated_buffers() {
    let cases: &[&[u8]] = &[
        &[],
        &[0xcf, 0x00, 0x00],
        &[0xcb, 0x3f],
        &[0xd9, 0x05, b'h', b'i'],
        &[0xc4, 0x03, 0xde],
        &[0x92, 0x01],
        &[0x81, 0x01],
        &[0xc7, 0x02, 0x01, 0x00],
        &[0xd8, 0x01],
    ];
    for bytes in cases {
        assert_eq!(decode_one(bytes), Err(DecodeError::UnexpectedEof), "{bytes:02x?}");
    }
}

#[test]
fn one_trailing_byte() {
    assert_eq!(
        decode_one(&[0x93, 0x0a, 0xc3, 0x91, 0xa2, 0x68, 0x69, 0x00]),
        Err(DecodeError::TrailingBytes {
            consumed: 7,
            total: 8
        })
    );
}

#[test]
fn never_used_tag() {
    assert_eq!(
        decode_one(&[0xc1]),
        Err(DecodeError::UnknownTypeTag { tag: 0xc1, offset: 0 })
    );
}

#[test]
fn invalid_utf8_in_str() {
    assert_eq!(decode_one(&[0xa1, 0xff]), Err(DecodeError::InvalidUtf8));
    // the same bytes as bin are fine
    assert_eq!(decode_one(&[0xc4, 0x01, 0xff]).unwrap(), Value::Bin(vec![0xff]));
}

#[test]
fn nesting_limit() {
    let nested = |levels: usize| {
        let mut bytes = vec![0x91; levels - 1];
        bytes.push(0x90);
        bytes
    };
    assert!(decode_one(&nested(DEFAULT_MAX_DEPTH)).is_ok());
    assert_eq!(
        decode_one(&nested(600)),
        Err(DecodeError::NestingTooDeep {
            limit: DEFAULT_MAX_DEPTH
        })
    );
    assert!(Decoder::with_max_depth(1000).decode_one(&nested(600)).is_ok());
}

#[test]
fn encode_errors() {
    assert_eq!(
        encode(&Value::Extension(Extension::new(-200, "a"))),
        Err(EncodeError::ExtensionTagOutOfRange(-200))
    );
    let raw = Value::Map(vec![(
        Value::Str(Utf8String::from_raw_bytes(vec![0xe2, 0x82])),
        Value::Nil,
    )]);
    assert_eq!(encode(&raw), Err(EncodeError::InvalidUtf8));
}
