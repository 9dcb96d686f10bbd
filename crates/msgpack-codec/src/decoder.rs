//! `Decoder`: MessagePack decoder with a nesting-depth limit.

use msgpack_buffers::Reader;

use crate::error::DecodeError;
use crate::format::{lookup, Format, Kind};
use crate::{Extension, Integer, Value};

/// Container nesting allowed by [`Decoder::new`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// MessagePack decoder.
///
/// Decoding recurses once per container level and fails with
/// [`DecodeError::NestingTooDeep`] past `max_depth` levels, so hostile input
/// cannot exhaust the stack.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decodes the first value in `bytes` and returns it with the number of
    /// bytes it occupied. Anything after it is left alone.
    pub fn decode(&self, bytes: &[u8]) -> Result<(Value, usize), DecodeError> {
        let mut reader = Reader::new(bytes);
        let value = self.read_any(&mut reader, 0)?;
        Ok((value, reader.x))
    }

    /// Decodes a buffer that must hold exactly one value.
    pub fn decode_one(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        let (value, consumed) = self.decode(bytes)?;
        if consumed != bytes.len() {
            return Err(DecodeError::TrailingBytes {
                consumed,
                total: bytes.len(),
            });
        }
        Ok(value)
    }

    /// Reads one value at the reader's cursor. `depth` is the number of
    /// containers enclosing it.
    pub fn read_any(&self, r: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
        let offset = r.x;
        let tag = r.u8()?;
        let format = lookup(tag).ok_or(DecodeError::UnknownTypeTag { tag, offset })?;
        let value = match format.kind {
            Kind::Nil => Value::Nil,
            Kind::Bool => Value::Bool(tag & format.mask == 1),
            Kind::UInt => Value::Integer(read_uint(r, tag, format)?),
            Kind::Int => Value::Integer(read_int(r, tag, format)?),
            Kind::Float => match format.value_width {
                4 => Value::Float(r.f32()? as f64),
                _ => Value::Float(r.f64()?),
            },
            Kind::Str => {
                let len = read_len(r, tag, format)?;
                Value::Str(r.utf8(len)?.into())
            }
            Kind::Bin => {
                let len = read_len(r, tag, format)?;
                Value::Bin(r.buf(len)?.to_vec())
            }
            Kind::Array => {
                let len = read_len(r, tag, format)?;
                self.enter(depth)?;
                // Every element takes at least one byte.
                let mut items = Vec::with_capacity(len.min(r.size()));
                for _ in 0..len {
                    items.push(self.read_any(r, depth + 1)?);
                }
                Value::Array(items)
            }
            Kind::Map => {
                let len = read_len(r, tag, format)?;
                self.enter(depth)?;
                let mut pairs = Vec::with_capacity(len.min(r.size() / 2));
                for _ in 0..len {
                    let key = self.read_any(r, depth + 1)?;
                    let val = self.read_any(r, depth + 1)?;
                    pairs.push((key, val));
                }
                Value::Map(pairs)
            }
            Kind::Ext => {
                let len = match format.len_width {
                    0 => format.value_width as usize,
                    width => r.uint(width)? as usize,
                };
                let ext_type = r.i8()?;
                let data = r.buf(len)?.to_vec();
                Value::Extension(Extension::new(ext_type as i64, data))
            }
        };
        Ok(value)
    }

    fn enter(&self, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(())
    }
}

fn read_uint(r: &mut Reader<'_>, tag: u8, format: Format) -> Result<Integer, DecodeError> {
    if format.embedded {
        return Ok((tag & format.mask).into());
    }
    Ok(r.uint(format.value_width)?.into())
}

fn read_int(r: &mut Reader<'_>, tag: u8, format: Format) -> Result<Integer, DecodeError> {
    if format.embedded {
        return Ok(((tag & format.mask) as i8).into());
    }
    let int = match format.value_width {
        1 => r.i8()? as i64,
        2 => r.i16()? as i64,
        4 => r.i32()? as i64,
        _ => r.i64()?,
    };
    Ok(int.into())
}

fn read_len(r: &mut Reader<'_>, tag: u8, format: Format) -> Result<usize, DecodeError> {
    if format.embedded {
        return Ok((tag & format.mask) as usize);
    }
    Ok(r.uint(format.len_width)? as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(bytes: &[u8]) -> Result<Value, DecodeError> {
        Decoder::new().decode_one(bytes)
    }

    #[test]
    fn primitives() {
        assert_eq!(dec(&[0xc0]).unwrap(), Value::Nil);
        assert_eq!(dec(&[0xc3]).unwrap(), Value::Bool(true));
        assert_eq!(dec(&[0xc2]).unwrap(), Value::Bool(false));
        assert_eq!(dec(&[0x7f]).unwrap(), Value::from(127));
        assert_eq!(dec(&[0xe0]).unwrap(), Value::from(-32));
        assert_eq!(dec(&[0xff]).unwrap(), Value::from(-1));
    }

    #[test]
    fn integer_families() {
        assert_eq!(dec(&[0xcc, 0xff]).unwrap(), Value::from(255));
        assert_eq!(dec(&[0xcd, 0xdb, 0x95]).unwrap(), Value::from(56213));
        assert_eq!(dec(&[0xd0, 0x9c]).unwrap(), Value::from(-100));
        assert_eq!(dec(&[0xd2, 0xff, 0xff, 0x24, 0x6b]).unwrap(), Value::from(-56213));
        // int8 carrying a positive value is still that value
        assert_eq!(dec(&[0xd0, 0x05]).unwrap(), Value::from(5u64));
    }

    #[test]
    fn uint64_high_bit_stays_unsigned() {
        let v = dec(&[0xcf, 0x80, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(v.as_u64(), Some(1u64 << 63));
        assert_eq!(v.as_i64(), None);
    }

    #[test]
    fn float32_widens() {
        let v = dec(&[0xca, 0x3f, 0xc0, 0x00, 0x00]).unwrap();
        assert_eq!(v, Value::Float(1.5));
        let third = 1.0f32 / 3.0;
        let mut bytes = vec![0xca];
        bytes.extend_from_slice(&third.to_be_bytes());
        assert_eq!(dec(&bytes).unwrap().as_f64(), Some(third as f64));
    }

    #[test]
    fn strings_and_binary() {
        assert_eq!(dec(&[0xa2, b'h', b'i']).unwrap(), Value::from("hi"));
        assert_eq!(dec(&[0xd9, 0x01, b'x']).unwrap(), Value::from("x"));
        assert_eq!(dec(&[0xda, 0x00, 0x00]).unwrap(), Value::from(""));
        assert_eq!(dec(&[0xc5, 0x00, 0x02, 1, 2]).unwrap(), Value::Bin(vec![1, 2]));
    }

    #[test]
    fn extensions() {
        assert_eq!(dec(&[0xd4, 0x2a, 0x61]).unwrap(), Value::Extension(Extension::new(42, "a")));
        assert_eq!(
            dec(&[0xc7, 0x00, 0xfb]).unwrap(),
            Value::Extension(Extension::new(-5, Vec::<u8>::new()))
        );
        assert_eq!(
            dec(&[0xc8, 0x00, 0x03, 0x07, 1, 2, 3]).unwrap(),
            Value::Extension(Extension::new(7, vec![1u8, 2, 3]))
        );
    }

    #[test]
    fn map_keeps_duplicates_in_order() {
        let v = dec(&[0x82, 0xa1, b'k', 0x01, 0xa1, b'k', 0x02]).unwrap();
        let pairs = v.as_map().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].1, Value::from(1));
        assert_eq!(pairs[1].1, Value::from(2));
    }

    #[test]
    fn decode_reports_consumed() {
        let (v, n) = Decoder::new().decode(&[0x01, 0x02]).unwrap();
        assert_eq!(v, Value::from(1));
        assert_eq!(n, 1);
    }

    #[test]
    fn errors() {
        assert_eq!(dec(&[]), Err(DecodeError::UnexpectedEof));
        assert_eq!(dec(&[0xd9, 0x05, b'h', b'i']), Err(DecodeError::UnexpectedEof));
        assert_eq!(dec(&[0xcd, 0x01]), Err(DecodeError::UnexpectedEof));
        assert_eq!(dec(&[0x93]), Err(DecodeError::UnexpectedEof));
        assert_eq!(dec(&[0xd4, 0x2a]), Err(DecodeError::UnexpectedEof));
        assert_eq!(
            dec(&[0x91, 0xc1]),
            Err(DecodeError::UnknownTypeTag { tag: 0xc1, offset: 1 })
        );
        assert_eq!(dec(&[0xa2, 0xc3, 0x28]), Err(DecodeError::InvalidUtf8));
        assert_eq!(
            dec(&[0xc0, 0xc0]),
            Err(DecodeError::TrailingBytes { consumed: 1, total: 2 })
        );
    }

    #[test]
    fn forged_length_fails_without_huge_allocation() {
        assert_eq!(dec(&[0xdd, 0xff, 0xff, 0xff, 0xff]), Err(DecodeError::UnexpectedEof));
        assert_eq!(dec(&[0xdf, 0xff, 0xff, 0xff, 0xff, 0xc0]), Err(DecodeError::UnexpectedEof));
        assert_eq!(dec(&[0xc6, 0xff, 0xff, 0xff, 0xff]), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn depth_limit() {
        let decoder = Decoder::with_max_depth(3);
        assert!(decoder.decode_one(&[0x91, 0x91, 0x90]).is_ok());
        assert_eq!(
            decoder.decode_one(&[0x91, 0x91, 0x91, 0x90]),
            Err(DecodeError::NestingTooDeep { limit: 3 })
        );
        assert_eq!(
            decoder.decode_one(&[0x81, 0x01, 0x81, 0x01, 0x81, 0x01, 0x80]),
            Err(DecodeError::NestingTooDeep { limit: 3 })
        );
        // scalars do not count as a level
        assert!(Decoder::with_max_depth(0).decode_one(&[0x01]).is_ok());
    }
}
