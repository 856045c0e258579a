//! Decode GoPro GPMF telemetry and assemble GPS samples from it.
//! Expects the raw `gpmd` track data as a byte buffer; demuxing it
//! out of the MP4 container is a separate concern and is not and
//! will not be supported here.
//!
//! GPMF is a nested KLV encoding: 4-byte FourCC, 1-byte type code,
//! 1-byte element size, 2-byte big-endian repeat count, then
//! `ceil4(size * repeat)` payload bytes, recursively for containers.
//! See <https://github.com/gopro/gpmf-parser>.
//!
//! ```rs
//! use gpmfiter::gps::{extract_gps_blocks, parse_gps_block};
//!
//! fn main() -> std::io::Result<()> {
//!     let buf: Vec<u8> = std::fs::read("TELEMETRY.BIN")?;
//!
//!     for block in extract_gps_blocks(&buf) {
//!         match parse_gps_block(&block)? {
//!             Some(sample) => println!("{} points @ {:?}", sample.npoints, sample.datetime),
//!             None => println!("no fix"),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod fourcc;
pub mod gps;
pub mod klv;

pub(crate) mod support;

pub use errors::GpmfError;
pub use fourcc::FourCC;
pub use gps::{extract_gps_blocks, gps_samples, parse_gps_block, GpsFix, GpsSample};
pub use klv::{ceil4, expand, BaseType, FilterIter, KlvHeader, KlvItem, KlvIter, Num, Value};
