//! `Encoder`: MessagePack encoder producing the smallest exact encoding.

use msgpack_buffers::Writer;

use crate::error::EncodeError;
use crate::format::*;
use crate::value::{Integer, N};
use crate::Value;

/// MessagePack encoder.
///
/// Integers use the narrowest form of the unsigned family when non-negative
/// and of the signed family when negative. Floats are always written as
/// `float64`. Strings, blobs, containers and extensions pick the narrowest
/// length tier from the registry in [`crate::format`].
pub struct Encoder {
    pub writer: Writer,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_writer(writer: Writer) -> Self {
        Self { writer }
    }

    /// Encode a value and return the MessagePack bytes.
    pub fn encode(&mut self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        self.writer.reset();
        let res = self.write_any(value);
        let bytes = self.writer.flush();
        res.map(|_| bytes)
    }

    pub fn write_any(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Nil => self.write_nil(),
            Value::Bool(b) => self.write_bool(*b),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.write_f64(*f),
            Value::Str(s) => self.write_str(s.as_str().ok_or(EncodeError::InvalidUtf8)?)?,
            Value::Bin(b) => self.write_bin(b)?,
            Value::Array(items) => {
                self.write_arr_hdr(items.len())?;
                for item in items {
                    self.write_any(item)?;
                }
            }
            Value::Map(pairs) => {
                self.write_map_hdr(pairs.len())?;
                for (key, val) in pairs {
                    self.write_any(key)?;
                    self.write_any(val)?;
                }
            }
            Value::Extension(ext) => self.write_ext(ext.tag, &ext.data)?,
        }
        Ok(())
    }

    pub fn write_nil(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_bool(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: Integer) {
        match int.n {
            N::PosInt(u) => self.write_u64(u),
            N::NegInt(i) => self.write_i64(i),
        }
    }

    pub fn write_u64(&mut self, uint: u64) {
        let w = &mut self.writer;
        if uint <= POS_FIXINT_MAX {
            w.u8(POS_FIXINT | uint as u8);
        } else if uint <= 0xff {
            w.u8u8(UINT8, uint as u8);
        } else if uint <= 0xffff {
            w.u8u16(UINT16, uint as u16);
        } else if uint <= 0xffff_ffff {
            w.u8u32(UINT32, uint as u32);
        } else {
            w.u8u64(UINT64, uint);
        }
    }

    pub fn write_i64(&mut self, int: i64) {
        if int >= 0 {
            return self.write_u64(int as u64);
        }
        let w = &mut self.writer;
        if int >= NEG_FIXINT_MIN {
            w.i8(int as i8);
        } else if int >= i8::MIN as i64 {
            w.u8u8(INT8, int as i8 as u8);
        } else if int >= i16::MIN as i64 {
            w.u8u16(INT16, int as i16 as u16);
        } else if int >= i32::MIN as i64 {
            w.u8u32(INT32, int as i32 as u32);
        } else {
            w.u8u64(INT64, int as u64);
        }
    }

    /// Always the 8-byte form, even when the value fits a `float32`.
    pub fn write_f64(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    fn write_hdr(&mut self, forms: &LengthForms, len: usize) -> Result<(), EncodeError> {
        let w = &mut self.writer;
        match forms.select(len).ok_or(EncodeError::LengthOverflow(len))? {
            Header::Embedded(tag) => w.u8(tag),
            Header::Prefixed { tag, width: 1 } => w.u8u8(tag, len as u8),
            Header::Prefixed { tag, width: 2 } => w.u8u16(tag, len as u16),
            Header::Prefixed { tag, .. } => w.u8u32(tag, len as u32),
        }
        Ok(())
    }

    pub fn write_str(&mut self, text: &str) -> Result<(), EncodeError> {
        self.write_hdr(&STR_FORMS, text.len())?;
        self.writer.utf8(text);
        Ok(())
    }

    pub fn write_bin(&mut self, buf: &[u8]) -> Result<(), EncodeError> {
        self.write_hdr(&BIN_FORMS, buf.len())?;
        self.writer.buf(buf);
        Ok(())
    }

    /// Writes an array header; the caller writes `length` values after it.
    pub fn write_arr_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        self.write_hdr(&ARRAY_FORMS, length)
    }

    /// Writes a map header; the caller writes `length` key/value pairs after it.
    pub fn write_map_hdr(&mut self, length: usize) -> Result<(), EncodeError> {
        self.write_hdr(&MAP_FORMS, length)
    }

    pub fn write_ext(&mut self, tag: i64, data: &[u8]) -> Result<(), EncodeError> {
        let tag = i8::try_from(tag).map_err(|_| EncodeError::ExtensionTagOutOfRange(tag))?;
        match fixext_tag(data.len()) {
            Some(fixext) => self.writer.u8u8(fixext, tag as u8),
            None => {
                self.write_hdr(&EXT_FORMS, data.len())?;
                self.writer.i8(tag);
            }
        }
        self.writer.buf(data);
        Ok(())
    }
}
