//! Error types for the MessagePack codec.

use msgpack_buffers::BufferError;
use thiserror::Error;

/// Failure to encode a [`Value`](crate::Value).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("string is not valid UTF-8")]
    InvalidUtf8,
    #[error("extension type {0} is outside -128..=127")]
    ExtensionTagOutOfRange(i64),
    #[error("length {0} does not fit in a 32-bit length field")]
    LengthOverflow(usize),
}

/// Failure to decode MessagePack bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unknown MessagePack tag byte 0x{tag:02x} at offset {offset}")]
    UnknownTypeTag { tag: u8, offset: usize },
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("trailing bytes after value ({consumed} of {total} bytes consumed)")]
    TrailingBytes { consumed: usize, total: usize },
    #[error("containers nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => DecodeError::UnexpectedEof,
            BufferError::InvalidUtf8 => DecodeError::InvalidUtf8,
        }
    }
}

/// An integer outside the range MessagePack can carry.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("integer {0} is outside -2^63..=2^64-1")]
pub struct IntegerRangeError(pub i128);

/// Failure to interpret an extension as a timestamp.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("extension type {0} is not the timestamp type (-1)")]
    WrongType(i64),
    #[error("timestamp payload must be 4, 8 or 12 bytes, got {0}")]
    BadLength(usize),
    #[error("nanoseconds {0} out of range")]
    NanosOutOfRange(u32),
}

/// Error from the combined [`MsgPackCodec`](crate::MsgPackCodec).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("MessagePack encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("MessagePack decode error: {0}")]
    Decode(#[from] DecodeError),
}
