//! Convenience wrappers around [`Encoder`] and [`Decoder`].

use msgpack_buffers::Writer;

use crate::{DecodeError, Decoder, EncodeError, Encoder, Value};

/// Encode a [`Value`] into MessagePack bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = Encoder::with_writer(Writer::with_capacity(256));
    encoder.encode(value)
}

/// Append the encoding of `value` to `out`. `out` is untouched on error.
pub fn encode_into(value: &Value, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    out.extend_from_slice(&encode(value)?);
    Ok(())
}

/// Decode the first value in `bytes`, returning it with the bytes consumed.
pub fn decode(bytes: &[u8]) -> Result<(Value, usize), DecodeError> {
    Decoder::new().decode(bytes)
}

/// Decode a buffer holding exactly one value.
pub fn decode_one(bytes: &[u8]) -> Result<Value, DecodeError> {
    Decoder::new().decode_one(bytes)
}
