//! GPMF KLV header.

use binrw::BinRead;

use crate::{BaseType, FourCC};

/// Finds the closest greater or equal multiple of 4.
///
/// KLV payloads are always padded to 32-bit alignment;
/// the padding bytes are not part of the decoded value.
pub fn ceil4(x: usize) -> usize {
    match x {
        0 => 0,
        _ => (((x - 1) >> 2) + 1) << 2,
    }
}

/// KLV header. Always 8 bytes in GPMF.
///
/// ```ignore
/// | [X X X X] [T] [S] [R R] |
///    |         |   |   |
///    |         |   |   16-bit big-endian repeat (element count)
///    |         |   8-bit element size in bytes
///    |         8-bit type code
///    FourCC
/// ```
#[derive(Debug, Clone, Default, PartialEq, BinRead)]
#[br(big)]
pub struct KlvHeader {
    /// FourCC
    #[br(map(|data: [u8; 4]| FourCC::from_slice(&data)))]
    pub(crate) fourcc: FourCC,
    /// Payload type code
    #[br(map(BaseType::from_u8))]
    pub(crate) base_type: BaseType,
    /// Size of a single element in bytes
    pub(crate) size: u8,
    /// Number of elements
    pub(crate) repeat: u16,
}

impl KlvHeader {
    pub fn fourcc(&self) -> &FourCC {
        &self.fourcc
    }

    pub fn base_type(&self) -> &BaseType {
        &self.base_type
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn repeat(&self) -> u16 {
        self.repeat
    }

    /// Size of the decoded payload in bytes,
    /// excluding alignment padding.
    pub fn payload_size(&self) -> usize {
        self.size as usize * self.repeat as usize
    }

    /// Size of the payload as stored,
    /// i.e. padded to 32-bit alignment.
    pub fn padded_size(&self) -> usize {
        ceil4(self.payload_size())
    }
}
