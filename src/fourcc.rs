//! GPMF FourCC.
//! See <https://github.com/gopro/gpmf-parser> for the full tag registry.
//! Only tags relevant to device/stream structure and GPS telemetry
//! are listed; everything else maps to `Custom`.

use std::fmt;

use crate::support::string_from_latin1;

/// GPMF Four CC.
/// See <https://github.com/gopro/gpmf-parser>.
#[derive(Debug, Clone, PartialEq)]
pub enum FourCC {
    /// Device container, top-level in a GPMF stream
    Devc,
    /// Device ID
    Dvid,
    /// Device name
    Dvnm,
    /// Stream container, groups one telemetry stream's items
    Strm,
    /// Stream name/description
    Stnm,
    /// Raw GPS 5-column matrix (lat, long, alt, 2D speed, 3D speed)
    Gps5,
    /// Scale divisors for the sibling sensor data
    Scal,
    /// GPS UTC timestamp
    Gpsu,
    /// GPS precision (dilution of precision x 100)
    Gpsp,
    /// GPS fix type (0: none, 2: 2D, 3: 3D)
    Gpsf,
    /// Display unit labels, fixed-width list
    Unit,
    /// SI unit labels, fixed-width list
    Siun,
    /// Total samples delivered since start of recording
    Tsmp,
    /// Microsecond timestamp for the stream payload
    Stmp,
    /// Device temperature
    Tmpc,

    Custom(String)
}

impl FourCC {
    pub fn from_slice(fourcc: &[u8]) -> Self {
        match fourcc {
            b"DEVC" => Self::Devc,
            b"DVID" => Self::Dvid,
            b"DVNM" => Self::Dvnm,
            b"STRM" => Self::Strm,
            b"STNM" => Self::Stnm,
            b"GPS5" => Self::Gps5,
            b"SCAL" => Self::Scal,
            b"GPSU" => Self::Gpsu,
            b"GPSP" => Self::Gpsp,
            b"GPSF" => Self::Gpsf,
            b"UNIT" => Self::Unit,
            b"SIUN" => Self::Siun,
            b"TSMP" => Self::Tsmp,
            b"STMP" => Self::Stmp,
            b"TMPC" => Self::Tmpc,

            _ => Self::Custom(string_from_latin1(fourcc)),
        }
    }

    pub fn from_str(fourcc: &str) -> Self {
        match fourcc {
            "DEVC" => Self::Devc,
            "DVID" => Self::Dvid,
            "DVNM" => Self::Dvnm,
            "STRM" => Self::Strm,
            "STNM" => Self::Stnm,
            "GPS5" => Self::Gps5,
            "SCAL" => Self::Scal,
            "GPSU" => Self::Gpsu,
            "GPSP" => Self::Gpsp,
            "GPSF" => Self::Gpsf,
            "UNIT" => Self::Unit,
            "SIUN" => Self::Siun,
            "TSMP" => Self::Tsmp,
            "STMP" => Self::Stmp,
            "TMPC" => Self::Tmpc,
            _ => Self::Custom(fourcc.to_owned()),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::Devc => "DEVC",
            Self::Dvid => "DVID",
            Self::Dvnm => "DVNM",
            Self::Strm => "STRM",
            Self::Stnm => "STNM",
            Self::Gps5 => "GPS5",
            Self::Scal => "SCAL",
            Self::Gpsu => "GPSU",
            Self::Gpsp => "GPSP",
            Self::Gpsf => "GPSF",
            Self::Unit => "UNIT",
            Self::Siun => "SIUN",
            Self::Tsmp => "TSMP",
            Self::Stmp => "STMP",
            Self::Tmpc => "TMPC",
            Self::Custom(s) => s.as_str()
        }
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Custom("None".to_owned())
    }
}
