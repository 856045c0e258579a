//! Various GPMF-related errors.

use std::fmt;

/// Various GPMF related read/parse errors.
#[derive(Debug)]
pub enum GpmfError {
    /// Converted `binrw` error.
    BinReadError(binrw::Error),
    /// IO error
    IOError(std::io::Error),
    /// Converted `time` formatting error.
    TimestampFormat(time::error::Format),
    /// GPS fix type code outside the documented set {0, 2, 3}.
    /// The mapping has no fallback, so this is a hard error
    /// for the affected GPS block.
    InvalidGpsFix(i64),
    /// A tag required to assemble a GPS sample is absent
    /// from the stream block, or carries a payload of the
    /// wrong shape.
    MissingGpsField(&'static str),
}

impl std::error::Error for GpmfError {}

impl fmt::Display for GpmfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpmfError::BinReadError(err) => write!(f, "{err}"),
            GpmfError::IOError(err) => write!(f, "IO error: {}", err),
            GpmfError::TimestampFormat(err) => write!(f, "Failed to format timestamp: {}", err),
            GpmfError::InvalidGpsFix(code) => write!(f, "Invalid GPS fix type {code}, expected 0, 2, or 3."),
            GpmfError::MissingGpsField(fourcc) => write!(f, "Missing or malformed '{fourcc}' in GPS stream block."),
        }
    }
}

/// Converts std::io::Error to GpmfError
impl From<std::io::Error> for GpmfError {
    fn from(err: std::io::Error) -> Self {
        GpmfError::IOError(err)
    }
}

/// Converts GpmfError to std::io::Error
impl From<GpmfError> for std::io::Error {
    fn from(err: GpmfError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

/// Converts binrw::Error to GpmfError
impl From<binrw::Error> for GpmfError {
    fn from(err: binrw::Error) -> GpmfError {
        GpmfError::BinReadError(err)
    }
}

/// Converts time::error::Format to GpmfError
impl From<time::error::Format> for GpmfError {
    fn from(err: time::error::Format) -> GpmfError {
        GpmfError::TimestampFormat(err)
    }
}
