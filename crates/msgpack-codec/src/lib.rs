//! MessagePack value model, encoder and decoder.
//!
//! - [`Value`] - closed tagged union of MessagePack values
//! - [`Encoder`] / [`encode`] - smallest exact encoding of a value
//! - [`Decoder`] / [`decode`] / [`decode_one`] - depth-limited decoding
//! - [`format`] - the tag byte registry both halves are built on
//! - [`deep_equal`] - structural equality used to compare decoded values
//!
//! # Example
//!
//! ```
//! use msgpack_codec::{decode_one, encode, Extension, Value};
//!
//! let value = Value::Array(vec![
//!     Value::from(10),
//!     Value::from(true),
//!     Value::Array(vec![Value::from("hi")]),
//!     Value::Extension(Extension::new(42, "a")),
//! ]);
//! let bytes = encode(&value).unwrap();
//! assert_eq!(bytes, [0x94, 0x0a, 0xc3, 0x91, 0xa2, b'h', b'i', 0xd4, 0x2a, b'a']);
//! assert_eq!(decode_one(&bytes).unwrap(), value);
//! ```

mod codec;
mod decoder;
mod encoder;
mod equal;
mod error;
mod json;
mod shared;
mod timestamp;
mod value;

pub mod format;

pub use codec::MsgPackCodec;
pub use decoder::{Decoder, DEFAULT_MAX_DEPTH};
pub use encoder::Encoder;
pub use equal::deep_equal;
pub use error::{CodecError, DecodeError, EncodeError, IntegerRangeError, TimestampError};
pub use shared::{decode, decode_one, encode, encode_into};
pub use timestamp::{Timestamp, TIMESTAMP_EXT_TYPE};
pub use value::{format_float, Extension, Integer, Utf8String, Value};
