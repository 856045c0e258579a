//! GPMF payload decoding.
//!
//! Each KLV payload is decoded according to the single-character
//! type code in its header. Type codes map to big-endian base types,
//! see <https://github.com/gopro/gpmf-parser#type>.
//!
//! Unrecognized type codes are carried through as opaque bytes
//! rather than raised as errors, since GoPro adds undocumented
//! tags between firmware revisions.

use std::io::Cursor;

use binrw::BinReaderExt;
use time::{Date, Month, PrimitiveDateTime};

use crate::{
    support::{string_from_latin1, string_from_latin1_padded},
    FourCC,
};

use super::{header::KlvHeader, item::KlvItem, iter::KlvIter};

/// GPMF base type, from the single-character type code
/// in a KLV header. All multi-byte types are big-endian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BaseType {
    /// `\0`: payload is itself a KLV sequence
    Nested,
    /// `c`: ISO8859-1 text
    Ascii,
    /// `b`
    Int8,
    /// `B`
    Uint8,
    /// `s`
    Int16,
    /// `S`
    Uint16,
    /// `l`
    Int32,
    /// `L`
    Uint32,
    /// `j`
    Int64,
    /// `J`
    Uint64,
    /// `f`
    Float32,
    /// `d`
    Float64,
    /// `U`: ASCII datetime `yymmddhhmmss.fff`
    DateTime,
    /// Unknown type code, payload passed through as raw bytes.
    Other(u8),
}

impl BaseType {
    pub fn from_u8(code: u8) -> Self {
        match code {
            0x00 => Self::Nested,
            b'c' => Self::Ascii,
            b'b' => Self::Int8,
            b'B' => Self::Uint8,
            b's' => Self::Int16,
            b'S' => Self::Uint16,
            b'l' => Self::Int32,
            b'L' => Self::Uint32,
            b'j' => Self::Int64,
            b'J' => Self::Uint64,
            b'f' => Self::Float32,
            b'd' => Self::Float64,
            b'U' => Self::DateTime,
            _ => Self::Other(code),
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            Self::Nested => 0x00,
            Self::Ascii => b'c',
            Self::Int8 => b'b',
            Self::Uint8 => b'B',
            Self::Int16 => b's',
            Self::Uint16 => b'S',
            Self::Int32 => b'l',
            Self::Uint32 => b'L',
            Self::Int64 => b'j',
            Self::Uint64 => b'J',
            Self::Float32 => b'f',
            Self::Float64 => b'd',
            Self::DateTime => b'U',
            Self::Other(code) => *code,
        }
    }

    /// Width of a single element in bytes.
    /// `None` for containers and unknown codes.
    pub fn width(&self) -> Option<usize> {
        match self {
            Self::Ascii | Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 => Some(8),
            Self::DateTime => Some(16),
            Self::Nested | Self::Other(_) => None,
        }
    }

    /// Reads a single big-endian number of this base type
    /// at current cursor position.
    /// Returns `None` for non-numeric base types and short reads.
    pub(crate) fn read_num(&self, crs: &mut Cursor<&[u8]>) -> Option<Num> {
        match self {
            Self::Int8 => crs.read_be::<i8>().ok().map(|v| Num::Int(v as i64)),
            Self::Uint8 => crs.read_be::<u8>().ok().map(|v| Num::Uint(v as u64)),
            Self::Int16 => crs.read_be::<i16>().ok().map(|v| Num::Int(v as i64)),
            Self::Uint16 => crs.read_be::<u16>().ok().map(|v| Num::Uint(v as u64)),
            Self::Int32 => crs.read_be::<i32>().ok().map(|v| Num::Int(v as i64)),
            Self::Uint32 => crs.read_be::<u32>().ok().map(|v| Num::Uint(v as u64)),
            Self::Int64 => crs.read_be::<i64>().ok().map(Num::Int),
            Self::Uint64 => crs.read_be::<u64>().ok().map(Num::Uint),
            Self::Float32 => crs.read_be::<f32>().ok().map(|v| Num::Float(v as f64)),
            Self::Float64 => crs.read_be::<f64>().ok().map(Num::Float),
            _ => None,
        }
    }
}

impl Default for BaseType {
    fn default() -> Self {
        Self::Other(0)
    }
}

/// Numeric scalar, preserving the source integer class.
/// 64-bit integers do not fit `f64` without loss,
/// so the distinction is kept until a caller asks for `to_f64()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Num {
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Num {
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int(v) => *v as f64,
            Self::Uint(v) => *v as f64,
            Self::Float(v) => *v,
        }
    }

    /// Returns the value as `i64` if it is an in-range integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Uint(v) => i64::try_from(*v).ok(),
            Self::Float(_) => None,
        }
    }

    /// Returns the value as `u64` if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::Uint(v) => Some(*v),
            Self::Float(_) => None,
        }
    }
}

/// Decoded KLV payload.
///
/// Numeric payloads take one of three shapes,
/// depending on the header's element size and repeat count
/// (`width` below is the base type width):
/// - a single value decodes to `Scalar`
/// - `size/width > 1` with `repeat > 1` decodes to a
///   `repeat x (size/width)` row-major `Matrix`
/// - anything else decodes to a flat `Vector`
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Nested KLV sequence (type code `\0`)
    Nested(Vec<KlvItem>),
    /// ISO8859-1 text
    Ascii(String),
    /// Fixed-width list of ISO8859-1 labels (`UNIT`/`SIUN`)
    AsciiList(Vec<String>),
    /// UTC datetime (type code `U`)
    Timestamp(PrimitiveDateTime),
    /// Single number
    Scalar(Num),
    /// Flat numeric sequence
    Vector(Vec<Num>),
    /// Row-major numeric matrix, `repeat` rows
    Matrix(Vec<Vec<Num>>),
    /// Raw payload for unknown type codes,
    /// or payloads that failed to decode as their declared type.
    Bytes(Vec<u8>),
}

impl Value {
    /// Decodes a padded payload according to its header.
    ///
    /// `padded` is the full byte span following the 8-byte header,
    /// i.e. `ceil4(size * repeat)` bytes; padding is trimmed off
    /// before decoding for every type except nested sequences.
    ///
    /// Decoding never fails: payloads that do not parse as their
    /// declared type fall back to `Value::Bytes`.
    pub(crate) fn decode(padded: &[u8], header: &KlvHeader) -> Self {
        if header.base_type == BaseType::Nested {
            return Self::Nested(KlvIter::new(padded).collect());
        }

        let len = header.payload_size().min(padded.len());
        let raw = &padded[..len];

        match header.base_type {
            BaseType::Ascii => match header.fourcc {
                // Unit tags pack `repeat` fixed-width labels
                // of `size` bytes each.
                FourCC::Unit | FourCC::Siun => Self::AsciiList(
                    raw.chunks(header.size.max(1) as usize)
                        .map(string_from_latin1_padded)
                        .collect(),
                ),
                _ => Self::Ascii(string_from_latin1(raw)),
            },
            BaseType::DateTime => match parse_datetime(raw) {
                Some(dt) => Self::Timestamp(dt),
                None => Self::Bytes(raw.to_vec()),
            },
            base => match base.width() {
                Some(width) => Self::decode_numeric(raw, header, width)
                    .unwrap_or_else(|| Self::Bytes(raw.to_vec())),
                None => Self::Bytes(raw.to_vec()),
            },
        }
    }

    fn decode_numeric(raw: &[u8], header: &KlvHeader, width: usize) -> Option<Self> {
        let count = raw.len() / width;
        let mut crs = Cursor::new(raw);
        let nums = (0..count)
            .map(|_| header.base_type.read_num(&mut crs))
            .collect::<Option<Vec<Num>>>()?;

        if count == 1 {
            return Some(Self::Scalar(nums[0]));
        }

        let dim = header.size as usize / width;
        if dim > 1 && header.repeat > 1 {
            return Some(Self::Matrix(
                nums.chunks(dim).map(|row| row.to_vec()).collect(),
            ));
        }

        Some(Self::Vector(nums))
    }
}

/// Parses a GPMF ASCII datetime, `yymmddhhmmss` optionally
/// followed by `.` and a fractional second.
/// The two-digit year is anchored to the 2000s.
fn parse_datetime(raw: &[u8]) -> Option<PrimitiveDateTime> {
    let s = std::str::from_utf8(raw).ok()?;
    if s.len() < 12 {
        return None;
    }

    let year: i32 = 2000 + s.get(0..2)?.parse::<i32>().ok()?;
    let month: u8 = s.get(2..4)?.parse().ok()?;
    let day: u8 = s.get(4..6)?.parse().ok()?;
    let hour: u8 = s.get(6..8)?.parse().ok()?;
    let minute: u8 = s.get(8..10)?.parse().ok()?;

    let rest = s.get(10..)?;
    let (second, fraction) = match rest.split_once('.') {
        Some((sec, frac)) => (sec, Some(frac)),
        None => (rest, None),
    };
    let second: u8 = second.parse().ok()?;
    let microsecond: u32 = match fraction {
        Some(frac) => {
            // normalise to 6 fractional digits
            let mut digits = frac.to_owned();
            digits.truncate(6);
            while digits.len() < 6 {
                digits.push('0');
            }
            digits.parse().ok()?
        }
        None => 0,
    };

    let date = Date::from_calendar_date(year, Month::try_from(month).ok()?, day).ok()?;
    date.with_hms_micro(hour, minute, second, microsecond).ok()
}
