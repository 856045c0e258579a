//! Iteration over KLV sequences.
//!
//! `KlvIter` walks one level of a raw GPMF buffer lazily,
//! decoding each item (and, for containers, its subtree) as it goes.
//! `FilterIter` walks the whole tree depth-first with an explicit
//! stack of child cursors, yielding only items with requested FourCC.

use std::io::Cursor;

use binrw::BinReaderExt;

use crate::FourCC;

use super::{header::KlvHeader, item::KlvItem, value::Value};

/// Lazy iterator over the KLV items of one sequence level.
///
/// A pure function of the input buffer: constructing a new
/// `KlvIter` over the same bytes replays the same sequence.
///
/// Iteration ends silently when fewer than 8 bytes remain for a
/// header, or when a declared payload would run past the end of
/// the buffer. Trailing fragments are dropped, not errors; GoPro
/// writers occasionally leave zero padding after the last item.
#[derive(Debug, Clone)]
pub struct KlvIter<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> KlvIter<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Byte offset of the next unread header.
    pub fn pos(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for KlvIter<'a> {
    type Item = KlvItem;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.len().saturating_sub(self.pos) < 8 {
            return None;
        }

        let mut crs = Cursor::new(&self.buf[self.pos..self.pos + 8]);
        let header: KlvHeader = crs.read_be().ok()?;

        let start = self.pos + 8;
        let end = start + header.padded_size();
        if end > self.buf.len() {
            // payload overruns the buffer: drop it and stop
            self.pos = self.buf.len();
            return None;
        }

        let value = Value::decode(&self.buf[start..end], &header);
        self.pos = end;

        Some(KlvItem { header, value })
    }
}

/// Eagerly decodes a full buffer into a tree of `KlvItem`s.
pub fn expand(buf: &[u8]) -> Vec<KlvItem> {
    KlvIter::new(buf).collect()
}

/// Depth-first iterator over a KLV tree that yields only items
/// whose FourCC is in the keep-set, in document order.
///
/// Traversal uses an explicit stack of child cursors rather than
/// call-stack recursion, so arbitrarily nested input cannot
/// exhaust the stack, and the walk can be dropped at any point.
/// Every container is descended into, matching or not:
/// a cursor over its children is pushed when the container is
/// visited and popped once they are drained, so children are
/// fully consumed before the container's later siblings resume.
pub struct FilterIter<'a> {
    /// Lazy cursor over the top-level sequence.
    top: KlvIter<'a>,
    /// Cursors over the children of containers
    /// currently being descended into.
    stack: Vec<std::vec::IntoIter<KlvItem>>,
    keep: Vec<FourCC>,
}

impl<'a> FilterIter<'a> {
    pub fn new(buf: &'a [u8], keep: &[FourCC]) -> Self {
        Self {
            top: KlvIter::new(buf),
            stack: Vec::new(),
            keep: keep.to_vec(),
        }
    }
}

impl<'a> Iterator for FilterIter<'a> {
    type Item = KlvItem;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Innermost unexhausted cursor, falling back to
            // the lazy top level once the stack is empty.
            let item = loop {
                match self.stack.last_mut() {
                    Some(cursor) => match cursor.next() {
                        Some(item) => break item,
                        None => {
                            self.stack.pop();
                        }
                    },
                    None => break self.top.next()?,
                }
            };

            // Matched containers are yielded with their children
            // intact, while the originals still feed the descent.
            let matched = self
                .keep
                .contains(&item.header.fourcc)
                .then(|| item.clone());

            if let Value::Nested(children) = item.value {
                self.stack.push(children.into_iter());
            }

            if let Some(item) = matched {
                return Some(item);
            }
        }
    }
}
