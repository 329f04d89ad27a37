//! Decoded lists.

use std::iter::FusedIterator;
use std::ops::Deref;

use bytes::BufMut;

use crate::decoder::{Bound, RLP_STRICT, RlpDecoder};
use crate::errors::{DecodeError, Malformed, RlpResult};
use crate::item::RlpItem;

/// A decoded item known to be a list.
///
/// Children are not cached, every traversal re-decodes the interior.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RlpList(RlpItem);

impl RlpList {
    pub(crate) fn new_unchecked(item: RlpItem) -> Self {
        debug_assert!(item.is_list(), "list: wrapped a string");
        Self(item)
    }

    /// Borrows the underlying item.
    pub fn item(&self) -> &RlpItem {
        &self.0
    }

    /// Converts to the underlying item.
    pub fn into_item(self) -> RlpItem {
        self.0
    }

    /// Returns an iterator over the children, decoded strictly.
    pub fn iter(&self) -> RlpListIter<'_> {
        self.iter_with(RLP_STRICT)
    }

    /// Returns an iterator over the children, decoded with a particular
    /// decoder.
    pub fn iter_with(&self, decoder: RlpDecoder) -> RlpListIter<'_> {
        RlpListIter {
            list: self,
            decoder,
            cursor: Some(self.0.data_index()),
        }
    }

    /// Decodes every child.
    pub fn elements(&self) -> RlpResult<Vec<RlpItem>> {
        self.iter().collect()
    }

    /// Counts the children.
    pub fn count(&self) -> RlpResult<usize> {
        self.iter().try_fold(0, |n, child| child.map(|_| n + 1))
    }

    /// Returns if the list has no children.
    pub fn is_empty(&self) -> bool {
        self.0.data_len() == 0
    }

    /// Copies the raw bytes in `[from, to)` out, as indexes into the backing
    /// buffer.  The range must lie within this list's encoding.
    pub fn export_range(&self, from: usize, to: usize, out: &mut dyn BufMut) -> RlpResult<()> {
        if from > to {
            return Err(DecodeError::malformed(
                from,
                Malformed::InvalidRange {
                    start: from,
                    end: to,
                },
            ));
        }

        if from < self.0.index() {
            return Err(DecodeError::malformed(
                from,
                Malformed::InvalidRange {
                    start: from,
                    end: to,
                },
            ));
        }

        if to > self.0.end_index() {
            return Err(DecodeError::malformed(
                self.0.index(),
                Malformed::ExceedsContainer {
                    end: to as u64,
                    container_end: self.0.end_index(),
                },
            ));
        }

        out.put_slice(&self.0.buffer()[from..to]);
        Ok(())
    }
}

impl Deref for RlpList {
    type Target = RlpItem;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<RlpList> for RlpItem {
    fn from(list: RlpList) -> Self {
        list.0
    }
}

impl<'l> IntoIterator for &'l RlpList {
    type Item = RlpResult<RlpItem>;
    type IntoIter = RlpListIter<'l>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the children of a list.
///
/// A child overrunning the list is yielded as an error, after which the
/// iterator is exhausted.
#[derive(Debug)]
pub struct RlpListIter<'l> {
    list: &'l RlpList,
    decoder: RlpDecoder,
    cursor: Option<usize>,
}

impl Iterator for RlpListIter<'_> {
    type Item = RlpResult<RlpItem>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let end = self.list.end_index();
        if index == end {
            self.cursor = None;
            return None;
        }

        let res = self
            .decoder
            .wrap_at(self.list.buffer(), index, Bound::Fixed(end));
        self.cursor = res.as_ref().ok().map(RlpItem::end_index);
        Some(res)
    }
}

impl FusedIterator for RlpListIter<'_> {}
