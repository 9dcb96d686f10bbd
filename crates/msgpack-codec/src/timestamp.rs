//! The predefined timestamp extension (type `-1`).
//!
//! Three payload layouts exist:
//! - 4 bytes: unsigned seconds, no nanoseconds;
//! - 8 bytes: 30-bit nanoseconds then 34-bit unsigned seconds;
//! - 12 bytes: 32-bit nanoseconds then signed 64-bit seconds.
//!
//! [`Timestamp::to_extension`] picks the smallest layout that fits.

use crate::error::TimestampError;
use crate::{Extension, Value};

/// Extension type reserved for timestamps.
pub const TIMESTAMP_EXT_TYPE: i64 = -1;

const NANOS_PER_SEC: u32 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: u32) -> Result<Self, TimestampError> {
        if nanos >= NANOS_PER_SEC {
            return Err(TimestampError::NanosOutOfRange(nanos));
        }
        Ok(Self { seconds, nanos })
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    pub fn to_extension(&self) -> Extension {
        if self.seconds >> 34 == 0 {
            let data64 = ((self.nanos as u64) << 34) | self.seconds as u64;
            if data64 >> 32 == 0 {
                return Extension::new(TIMESTAMP_EXT_TYPE, (data64 as u32).to_be_bytes());
            }
            return Extension::new(TIMESTAMP_EXT_TYPE, data64.to_be_bytes());
        }
        let mut data = Vec::with_capacity(12);
        data.extend_from_slice(&self.nanos.to_be_bytes());
        data.extend_from_slice(&self.seconds.to_be_bytes());
        Extension::new(TIMESTAMP_EXT_TYPE, data)
    }

    pub fn from_extension(ext: &Extension) -> Result<Self, TimestampError> {
        if ext.tag != TIMESTAMP_EXT_TYPE {
            return Err(TimestampError::WrongType(ext.tag));
        }
        let d = ext.data.as_slice();
        match *d {
            [a, b, c, e] => Self::new(u32::from_be_bytes([a, b, c, e]) as i64, 0),
            [a, b, c, e, f, g, h, i] => {
                let data64 = u64::from_be_bytes([a, b, c, e, f, g, h, i]);
                Self::new((data64 & 0x3_ffff_ffff) as i64, (data64 >> 34) as u32)
            }
            [a, b, c, e, f, g, h, i, j, k, l, m] => Self::new(
                i64::from_be_bytes([f, g, h, i, j, k, l, m]),
                u32::from_be_bytes([a, b, c, e]),
            ),
            _ => Err(TimestampError::BadLength(d.len())),
        }
    }
}

impl From<Timestamp> for Extension {
    fn from(ts: Timestamp) -> Self {
        ts.to_extension()
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Extension(ts.to_extension())
    }
}

impl TryFrom<&Extension> for Timestamp {
    type Error = TimestampError;

    fn try_from(ext: &Extension) -> Result<Self, Self::Error> {
        Timestamp::from_extension(ext)
    }
}
