//! [`Value`]: the closed set of MessagePack values.

use std::fmt;

use msgpack_buffers::print_octets;

use crate::error::IntegerRangeError;

/// A MessagePack integer in `-2^63..=2^64-1`.
///
/// Non-negative values are always stored unsigned and negative values signed,
/// so every mathematical integer has exactly one representation and the
/// derived equality is numeric equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Integer {
    pub(crate) n: N,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum N {
    PosInt(u64),
    /// Always `< 0`.
    NegInt(i64),
}

impl Integer {
    pub fn is_negative(&self) -> bool {
        matches!(self.n, N::NegInt(_))
    }

    /// Returns the value as `i64` if it fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(u) => i64::try_from(u).ok(),
            N::NegInt(i) => Some(i),
        }
    }

    /// Returns the value as `u64` if it is non-negative.
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(u) => Some(u),
            N::NegInt(_) => None,
        }
    }
}

macro_rules! integer_from_unsigned {
    ($($t:ty)*) => {$(
        impl From<$t> for Integer {
            fn from(u: $t) -> Self {
                Integer { n: N::PosInt(u as u64) }
            }
        }
    )*};
}

macro_rules! integer_from_signed {
    ($($t:ty)*) => {$(
        impl From<$t> for Integer {
            fn from(i: $t) -> Self {
                let i = i as i64;
                if i < 0 {
                    Integer { n: N::NegInt(i) }
                } else {
                    Integer { n: N::PosInt(i as u64) }
                }
            }
        }
    )*};
}

integer_from_unsigned!(u8 u16 u32 u64 usize);
integer_from_signed!(i8 i16 i32 i64 isize);

impl TryFrom<i128> for Integer {
    type Error = IntegerRangeError;

    fn try_from(i: i128) -> Result<Self, Self::Error> {
        if let Ok(u) = u64::try_from(i) {
            Ok(u.into())
        } else if let Ok(n) = i64::try_from(i) {
            Ok(n.into())
        } else {
            Err(IntegerRangeError(i))
        }
    }
}

impl From<Integer> for i128 {
    fn from(i: Integer) -> Self {
        match i.n {
            N::PosInt(u) => u as i128,
            N::NegInt(n) => n as i128,
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(u) => write!(f, "{u}"),
            N::NegInt(i) => write!(f, "{i}"),
        }
    }
}

/// Text carried by [`Value::Str`].
///
/// Built from `&str`/`String` it is always valid UTF-8. Bytes handed over by
/// foreign producers can be wrapped unchecked with
/// [`Utf8String::from_raw_bytes`]; the encoder rejects them if they turn out
/// not to be UTF-8.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Utf8String {
    bytes: Vec<u8>,
}

impl Utf8String {
    /// Wraps bytes without validating them.
    pub fn from_raw_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_valid(&self) -> bool {
        self.as_str().is_some()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<String> for Utf8String {
    fn from(s: String) -> Self {
        Self {
            bytes: s.into_bytes(),
        }
    }
}

impl From<&str> for Utf8String {
    fn from(s: &str) -> Self {
        Self {
            bytes: s.as_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => write!(f, "Utf8String::from_raw_bytes({:?})", self.bytes),
        }
    }
}

/// An application-defined extension value: a type tag plus opaque payload.
///
/// The tag is held wide so out-of-range tags can be represented; the encoder
/// only accepts `-128..=127`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    pub tag: i64,
    pub data: Vec<u8>,
}

impl Extension {
    pub fn new(tag: i64, data: impl Into<Vec<u8>>) -> Self {
        Self {
            tag,
            data: data.into(),
        }
    }
}

/// A MessagePack value.
///
/// Equality is deep structural equality, see [`crate::deep_equal`].
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(Integer),
    Float(f64),
    Str(Utf8String),
    Bin(Vec<u8>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Extension(Extension),
}

impl Value {
    /// Short name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bin(_) => "bin",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
            Value::Extension(_) => "extension",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => i.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Integer(i) => i.as_u64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => s.as_str(),
            _ => None,
        }
    }

    pub fn as_bin(&self) -> Option<&[u8]> {
        match self {
            Value::Bin(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn as_extension(&self) -> Option<&Extension> {
        match self {
            Value::Extension(ext) => Some(ext),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::equal::deep_equal(self, other)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! value_from_integer {
    ($($t:ty)*) => {$(
        impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Integer(i.into())
            }
        }
    )*};
}

value_from_integer!(u8 u16 u32 u64 usize i8 i16 i32 i64 isize);

impl From<Integer> for Value {
    fn from(i: Integer) -> Self {
        Value::Integer(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Utf8String> for Value {
    fn from(s: Utf8String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Extension> for Value {
    fn from(ext: Extension) -> Self {
        Value::Extension(ext)
    }
}

/// Formats a float the way Python's `repr` does: shortest round-trip digits,
/// exponent notation below `1e-4` and from `1e16` up, always with a `.` or an
/// exponent so it reads back as a float.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let s = format!("{f:e}");
        let (mantissa, exp) = s.split_once('e').unwrap_or((&s, "0"));
        let (sign, digits) = match exp.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exp),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }
    let s = format!("{f}");
    if s.contains('.') {
        s
    } else {
        s + ".0"
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bin(bytes) => {
                f.write_str("bin[")?;
                f.write_str(&print_octets(bytes, usize::MAX))?;
                f.write_str("]")
            }
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Extension(ext) => {
                write!(f, "ext({}, [", ext.tag)?;
                f.write_str(&print_octets(&ext.data, usize::MAX))?;
                f.write_str("])")
            }
        }
    }
}
