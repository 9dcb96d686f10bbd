//! Wire-format registry.
//!
//! Every MessagePack tag byte, what kind of value it introduces and how wide
//! the fields after it are. The encoder picks tags from the length tiers
//! below and the decoder dispatches through [`FORMATS`]; the tests at the end
//! of this file check the two views agree.

pub const POS_FIXINT: u8 = 0x00;
pub const FIXMAP: u8 = 0x80;
pub const FIXARRAY: u8 = 0x90;
pub const FIXSTR: u8 = 0xa0;
pub const NIL: u8 = 0xc0;
pub const NEVER_USED: u8 = 0xc1;
pub const FALSE: u8 = 0xc2;
pub const TRUE: u8 = 0xc3;
pub const BIN8: u8 = 0xc4;
pub const BIN16: u8 = 0xc5;
pub const BIN32: u8 = 0xc6;
pub const EXT8: u8 = 0xc7;
pub const EXT16: u8 = 0xc8;
pub const EXT32: u8 = 0xc9;
pub const FLOAT32: u8 = 0xca;
pub const FLOAT64: u8 = 0xcb;
pub const UINT8: u8 = 0xcc;
pub const UINT16: u8 = 0xcd;
pub const UINT32: u8 = 0xce;
pub const UINT64: u8 = 0xcf;
pub const INT8: u8 = 0xd0;
pub const INT16: u8 = 0xd1;
pub const INT32: u8 = 0xd2;
pub const INT64: u8 = 0xd3;
pub const FIXEXT1: u8 = 0xd4;
pub const FIXEXT2: u8 = 0xd5;
pub const FIXEXT4: u8 = 0xd6;
pub const FIXEXT8: u8 = 0xd7;
pub const FIXEXT16: u8 = 0xd8;
pub const STR8: u8 = 0xd9;
pub const STR16: u8 = 0xda;
pub const STR32: u8 = 0xdb;
pub const ARRAY16: u8 = 0xdc;
pub const ARRAY32: u8 = 0xdd;
pub const MAP16: u8 = 0xde;
pub const MAP32: u8 = 0xdf;
pub const NEG_FIXINT: u8 = 0xe0;

pub const POS_FIXINT_MAX: u64 = 0x7f;
pub const NEG_FIXINT_MIN: i64 = -32;

/// Value family introduced by a tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    UInt,
    Int,
    Float,
    Str,
    Bin,
    Array,
    Map,
    Ext,
}

/// Layout of one tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub kind: Kind,
    /// The value (fixints, nil, bool) or the length (fixstr, fixarray,
    /// fixmap) is `tag & mask`.
    pub embedded: bool,
    pub mask: u8,
    /// Width of the length field after the tag; 0 when there is none.
    pub len_width: u8,
    /// Width of a fixed scalar, or the payload size of a fixext.
    pub value_width: u8,
}

impl Format {
    const fn embedded(kind: Kind, mask: u8) -> Self {
        Self {
            kind,
            embedded: true,
            mask,
            len_width: 0,
            value_width: 0,
        }
    }

    const fn fixed(kind: Kind, value_width: u8) -> Self {
        Self {
            kind,
            embedded: false,
            mask: 0,
            len_width: 0,
            value_width,
        }
    }

    const fn sized(kind: Kind, len_width: u8) -> Self {
        Self {
            kind,
            embedded: false,
            mask: 0,
            len_width,
            value_width: 0,
        }
    }

    /// Bytes taken by the tag and its length field.
    pub const fn header_width(&self) -> usize {
        1 + self.len_width as usize
    }
}

const fn classify(tag: u8) -> Option<Format> {
    let format = match tag {
        0x00..=0x7f => Format::embedded(Kind::UInt, 0x7f),
        0x80..=0x8f => Format::embedded(Kind::Map, 0x0f),
        0x90..=0x9f => Format::embedded(Kind::Array, 0x0f),
        0xa0..=0xbf => Format::embedded(Kind::Str, 0x1f),
        NIL => Format::embedded(Kind::Nil, 0),
        NEVER_USED => return None,
        FALSE | TRUE => Format::embedded(Kind::Bool, 0x01),
        BIN8 => Format::sized(Kind::Bin, 1),
        BIN16 => Format::sized(Kind::Bin, 2),
        BIN32 => Format::sized(Kind::Bin, 4),
        EXT8 => Format::sized(Kind::Ext, 1),
        EXT16 => Format::sized(Kind::Ext, 2),
        EXT32 => Format::sized(Kind::Ext, 4),
        FLOAT32 => Format::fixed(Kind::Float, 4),
        FLOAT64 => Format::fixed(Kind::Float, 8),
        UINT8 => Format::fixed(Kind::UInt, 1),
        UINT16 => Format::fixed(Kind::UInt, 2),
        UINT32 => Format::fixed(Kind::UInt, 4),
        UINT64 => Format::fixed(Kind::UInt, 8),
        INT8 => Format::fixed(Kind::Int, 1),
        INT16 => Format::fixed(Kind::Int, 2),
        INT32 => Format::fixed(Kind::Int, 4),
        INT64 => Format::fixed(Kind::Int, 8),
        FIXEXT1 => Format::fixed(Kind::Ext, 1),
        FIXEXT2 => Format::fixed(Kind::Ext, 2),
        FIXEXT4 => Format::fixed(Kind::Ext, 4),
        FIXEXT8 => Format::fixed(Kind::Ext, 8),
        FIXEXT16 => Format::fixed(Kind::Ext, 16),
        STR8 => Format::sized(Kind::Str, 1),
        STR16 => Format::sized(Kind::Str, 2),
        STR32 => Format::sized(Kind::Str, 4),
        ARRAY16 => Format::sized(Kind::Array, 2),
        ARRAY32 => Format::sized(Kind::Array, 4),
        MAP16 => Format::sized(Kind::Map, 2),
        MAP32 => Format::sized(Kind::Map, 4),
        0xe0..=0xff => Format::embedded(Kind::Int, 0xff),
    };
    Some(format)
}

const fn build_formats() -> [Option<Format>; 256] {
    let mut table = [None; 256];
    let mut tag = 0;
    while tag < 256 {
        table[tag] = classify(tag as u8);
        tag += 1;
    }
    table
}

/// Tag byte → layout. `None` only for [`NEVER_USED`].
pub static FORMATS: [Option<Format>; 256] = build_formats();

/// Looks up the layout of a tag byte.
#[inline]
pub fn lookup(tag: u8) -> Option<Format> {
    FORMATS[tag as usize]
}

/// Header chosen for a length-prefixed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Single tag byte with the length in its low bits.
    Embedded(u8),
    /// Tag byte followed by a big-endian length of `width` bytes.
    Prefixed { tag: u8, width: u8 },
}

/// Size tiers of one length-prefixed family, smallest first.
#[derive(Debug, Clone, Copy)]
pub struct LengthForms {
    /// Base tag and largest length that fits in it.
    pub fix: Option<(u8, usize)>,
    /// `(tag, length width)` pairs.
    pub tiers: &'static [(u8, u8)],
}

impl LengthForms {
    /// Picks the narrowest header able to carry `len`, or `None` when `len`
    /// exceeds even the 32-bit form.
    pub fn select(&self, len: usize) -> Option<Header> {
        if let Some((base, max)) = self.fix {
            if len <= max {
                return Some(Header::Embedded(base | len as u8));
            }
        }
        self.tiers
            .iter()
            .find(|&&(_, width)| len as u64 <= max_len(width))
            .map(|&(tag, width)| Header::Prefixed { tag, width })
    }
}

const fn max_len(width: u8) -> u64 {
    match width {
        1 => 0xff,
        2 => 0xffff,
        _ => 0xffff_ffff,
    }
}

pub const STR_FORMS: LengthForms = LengthForms {
    fix: Some((FIXSTR, 31)),
    tiers: &[(STR8, 1), (STR16, 2), (STR32, 4)],
};

pub const BIN_FORMS: LengthForms = LengthForms {
    fix: None,
    tiers: &[(BIN8, 1), (BIN16, 2), (BIN32, 4)],
};

pub const ARRAY_FORMS: LengthForms = LengthForms {
    fix: Some((FIXARRAY, 15)),
    tiers: &[(ARRAY16, 2), (ARRAY32, 4)],
};

pub const MAP_FORMS: LengthForms = LengthForms {
    fix: Some((FIXMAP, 15)),
    tiers: &[(MAP16, 2), (MAP32, 4)],
};

pub const EXT_FORMS: LengthForms = LengthForms {
    fix: None,
    tiers: &[(EXT8, 1), (EXT16, 2), (EXT32, 4)],
};

/// Payload sizes with a dedicated fixext tag.
pub const FIXEXT_FORMS: [(usize, u8); 5] = [
    (1, FIXEXT1),
    (2, FIXEXT2),
    (4, FIXEXT4),
    (8, FIXEXT8),
    (16, FIXEXT16),
];

pub fn fixext_tag(len: usize) -> Option<u8> {
    FIXEXT_FORMS
        .iter()
        .find(|&&(size, _)| size == len)
        .map(|&(_, tag)| tag)
}
