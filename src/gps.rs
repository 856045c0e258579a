//! GPS sample assembly.
//!
//! GPS data arrives in `STRM` containers holding a `GPS5` raw
//! matrix next to its scale (`SCAL`), timestamp (`GPSU`),
//! precision (`GPSP`), fix (`GPSF`), and unit labels (`UNIT`).
//! `extract_gps_blocks` finds those containers, `parse_gps_block`
//! turns one into a `GpsSample`.

use rayon::prelude::*;
use time::{macros::format_description, PrimitiveDateTime};

use crate::{FilterIter, FourCC, GpmfError, KlvItem, Num, Value};

/// GPS lock type, from the `GPSF` tag.
///
/// The mapping has no default: codes outside {0, 2, 3}
/// are an error, not a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsFix {
    /// No lock (coordinates are not usable)
    None,
    /// 2D lock
    TwoD,
    /// 3D lock
    ThreeD,
}

impl GpsFix {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::TwoD => "2d",
            Self::ThreeD => "3d",
        }
    }
}

impl TryFrom<i64> for GpsFix {
    type Error = GpmfError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::None),
            2 => Ok(Self::TwoD),
            3 => Ok(Self::ThreeD),
            _ => Err(GpmfError::InvalidGpsFix(code)),
        }
    }
}

/// One decoded GPS stream block.
///
/// The five coordinate/speed sequences are parallel and
/// always of equal length `npoints` (at least 1): a block may
/// carry a single position or a burst of sub-samples logged
/// against one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct GpsSample {
    /// Stream description (`STNM`)
    pub description: String,
    /// UTC datetime of the block (`GPSU`)
    pub datetime: PrimitiveDateTime,
    /// Microseconds since start of recording (`STMP`), when present
    pub microseconds: Option<u64>,
    /// Samples delivered since start of recording (`TSMP`), when present
    pub samples_delivered: Option<u64>,
    /// GPS dilution of precision (`GPSP` / 100, under 5.0 is good)
    pub precision: f64,
    /// GPS lock type (`GPSF`)
    pub fix: GpsFix,
    /// Latitude [deg]
    pub latitude: Vec<f64>,
    /// Longitude [deg]
    pub longitude: Vec<f64>,
    /// Altitude [m]
    pub altitude: Vec<f64>,
    /// 2D (x, y) speed [m/s]
    pub speed_2d: Vec<f64>,
    /// 3D (x, y, z) speed [m/s]
    pub speed_3d: Vec<f64>,
    /// Unit labels (`UNIT`)
    pub units: Vec<String>,
    /// Number of points in this block
    pub npoints: usize,
}

impl GpsSample {
    /// Block datetime as `YYYY-MM-DD HH:MM:SS.ffffff`.
    pub fn timestamp(&self) -> Result<String, GpmfError> {
        let format = format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]"
        );
        Ok(self.datetime.format(&format)?)
    }
}

/// Yields the child items of every `STRM` container holding a
/// `GPS5` item, at any nesting depth, in document order.
///
/// Blocks with no movement or zero speed are included;
/// filtering on content is up to the caller.
pub fn extract_gps_blocks(stream: &[u8]) -> impl Iterator<Item = Vec<KlvItem>> + '_ {
    FilterIter::new(stream, &[FourCC::Strm]).filter_map(|item| match item.value {
        Value::Nested(children) => children
            .iter()
            .any(|child| child.header.fourcc() == &FourCC::Gps5)
            .then_some(children),
        _ => None,
    })
}

/// Assembles one GPS stream block into a `GpsSample`.
///
/// Returns `Ok(None)` when the block lacks a usable `GPS5`/`SCAL`
/// pair (a "no fix" block, common at the start of a recording).
/// Returns an error when `GPSF` carries an undocumented fix code,
/// or when one of the other required tags is absent; either aborts
/// this block only, not the surrounding sequence.
pub fn parse_gps_block(block: &[KlvItem]) -> Result<Option<GpsSample>, GpmfError> {
    let get = |fourcc: FourCC| block.iter().find(|item| item.header.fourcc() == &fourcc);

    let rows = match get(FourCC::Gps5).and_then(|item| rows_from_value(&item.value)) {
        Some(rows) => rows,
        None => return Ok(None),
    };
    let scale = match get(FourCC::Scal).and_then(|item| row_from_value(&item.value)) {
        Some(scale) => scale,
        None => return Ok(None),
    };
    // a malformed width counts as a missing pair
    if scale.len() != 5 || rows.iter().any(|row| row.len() != 5) {
        return Ok(None);
    }

    let npoints = rows.len();
    let mut latitude = Vec::with_capacity(npoints);
    let mut longitude = Vec::with_capacity(npoints);
    let mut altitude = Vec::with_capacity(npoints);
    let mut speed_2d = Vec::with_capacity(npoints);
    let mut speed_3d = Vec::with_capacity(npoints);
    for row in &rows {
        latitude.push(row[0] / scale[0]);
        longitude.push(row[1] / scale[1]);
        altitude.push(row[2] / scale[2]);
        speed_2d.push(row[3] / scale[3]);
        speed_3d.push(row[4] / scale[4]);
    }

    let description = match get(FourCC::Stnm).map(|item| &item.value) {
        Some(Value::Ascii(s)) => s.to_owned(),
        _ => return Err(GpmfError::MissingGpsField("STNM")),
    };
    let datetime = match get(FourCC::Gpsu).map(|item| &item.value) {
        Some(Value::Timestamp(dt)) => *dt,
        _ => return Err(GpmfError::MissingGpsField("GPSU")),
    };
    let precision = match get(FourCC::Gpsp).map(|item| &item.value) {
        Some(Value::Scalar(num)) => num.to_f64() / 100.0,
        _ => return Err(GpmfError::MissingGpsField("GPSP")),
    };
    let fix = match get(FourCC::Gpsf).map(|item| &item.value) {
        Some(Value::Scalar(num)) => {
            let code = num.as_i64().ok_or(GpmfError::MissingGpsField("GPSF"))?;
            GpsFix::try_from(code)?
        }
        _ => return Err(GpmfError::MissingGpsField("GPSF")),
    };
    let units = match get(FourCC::Unit).map(|item| &item.value) {
        Some(Value::AsciiList(units)) => units.to_owned(),
        _ => return Err(GpmfError::MissingGpsField("UNIT")),
    };

    let microseconds = get(FourCC::Stmp).and_then(|item| match &item.value {
        Value::Scalar(num) => num.as_u64(),
        _ => None,
    });
    let samples_delivered = get(FourCC::Tsmp).and_then(|item| match &item.value {
        Value::Scalar(num) => num.as_u64(),
        _ => None,
    });

    Ok(Some(GpsSample {
        description,
        datetime,
        microseconds,
        samples_delivered,
        precision,
        fix,
        latitude,
        longitude,
        altitude,
        speed_2d,
        speed_3d,
        units,
        npoints,
    }))
}

/// Decodes every GPS block in a raw GPMF buffer.
///
/// Blocks are independent, so they are parsed in parallel;
/// output order still follows document order. The first invalid
/// fix code aborts the whole call, use `extract_gps_blocks` +
/// `parse_gps_block` to handle blocks individually.
pub fn gps_samples(stream: &[u8]) -> Result<Vec<Option<GpsSample>>, GpmfError> {
    let blocks: Vec<Vec<KlvItem>> = extract_gps_blocks(stream).collect();
    blocks
        .par_iter()
        .map(|block| parse_gps_block(block))
        .collect()
}

/// `GPS5` as N >= 1 rows of raw values, regardless of whether the
/// payload decoded as a matrix, a single row, or a single value.
fn rows_from_value(value: &Value) -> Option<Vec<Vec<f64>>> {
    match value {
        Value::Matrix(rows) if !rows.is_empty() => Some(
            rows.iter()
                .map(|row| row.iter().map(Num::to_f64).collect())
                .collect(),
        ),
        Value::Vector(row) if !row.is_empty() => {
            Some(vec![row.iter().map(Num::to_f64).collect()])
        }
        Value::Scalar(num) => Some(vec![vec![num.to_f64()]]),
        _ => None,
    }
}

/// A flat numeric payload (`SCAL`) as one row of `f64`.
fn row_from_value(value: &Value) -> Option<Vec<f64>> {
    match value {
        Value::Vector(row) if !row.is_empty() => Some(row.iter().map(Num::to_f64).collect()),
        Value::Scalar(num) => Some(vec![num.to_f64()]),
        _ => None,
    }
}
