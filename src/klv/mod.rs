//! GPMF KLV layer: headers, payload decoding, iteration.

pub mod header;
pub mod item;
pub mod iter;
pub mod value;

pub use header::{ceil4, KlvHeader};
pub use item::KlvItem;
pub use iter::{expand, FilterIter, KlvIter};
pub use value::{BaseType, Num, Value};
