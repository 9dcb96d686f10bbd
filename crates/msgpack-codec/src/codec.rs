//! MessagePack codec: an encoder and a decoder behind one handle.

use crate::{CodecError, Decoder, Encoder, Value};

pub struct MsgPackCodec {
    pub encoder: Encoder,
    pub decoder: Decoder,
}

impl Default for MsgPackCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackCodec {
    pub fn new() -> Self {
        Self {
            encoder: Encoder::new(),
            decoder: Decoder::new(),
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            encoder: Encoder::new(),
            decoder: Decoder::with_max_depth(max_depth),
        }
    }

    pub fn id(&self) -> &'static str {
        "msgpack"
    }

    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(self.encoder.encode(value)?)
    }

    /// Decodes a buffer holding exactly one value.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        Ok(self.decoder.decode_one(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeError, EncodeError, Extension};

    #[test]
    fn roundtrip() {
        let mut codec = MsgPackCodec::new();
        let value = Value::Map(vec![
            (Value::from("a"), Value::Array(vec![Value::from(1), Value::from(-2)])),
            (Value::from("b"), Value::Extension(Extension::new(3, "x"))),
        ]);
        let bytes = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn errors_are_wrapped() {
        let mut codec = MsgPackCodec::with_max_depth(1);
        assert_eq!(
            codec.encode(&Extension::new(300, "x").into()),
            Err(CodecError::Encode(EncodeError::ExtensionTagOutOfRange(300)))
        );
        assert_eq!(
            codec.decode(&[0x91, 0x90]),
            Err(CodecError::Decode(DecodeError::NestingTooDeep { limit: 1 }))
        );
    }
}
