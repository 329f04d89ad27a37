//! Canonical-form decoder.

use bytes::Bytes;

use crate::data_type::{DataType, MIN_LONG_DATA_LEN};
use crate::errors::{DecodeError, Incomplete, Malformed, RlpResult};
use crate::item::RlpItem;
use crate::list::RlpList;
use crate::stream::{ByteSource, RlpStream};
use crate::util::read_be_u64;

/// Strict decoder, rejecting every non-canonical encoding.  Use this for
/// anything security relevant.
pub const RLP_STRICT: RlpDecoder = RlpDecoder::new(false);

/// Lenient decoder, accepting long-form lengths below 56 and prefixed single
/// bytes.  Useful for diagnostics and recovery.
pub const RLP_LENIENT: RlpDecoder = RlpDecoder::new(true);

/// Where the enclosing container of an item ends.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Bound {
    /// Top level.  The end of the buffer is not final, so running past it
    /// means more bytes are needed.
    Open,

    /// Nested in a container ending at this index.  Running past it is
    /// malformed.
    Fixed(usize),
}

/// Decoder config.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RlpDecoder {
    lenient: bool,
}

impl RlpDecoder {
    /// Constructs a new instance.
    pub const fn new(lenient: bool) -> Self {
        Self { lenient }
    }

    /// Returns if this decoder skips the canonical length checks.
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Decodes the item at the start of a buffer.  Bytes after it are
    /// ignored.
    pub fn wrap(&self, buf: impl Into<Bytes>) -> RlpResult<RlpItem> {
        self.wrap_at(&buf.into(), 0, Bound::Open)
    }

    /// Decodes the list at the start of a buffer.
    pub fn wrap_list(&self, buf: impl Into<Bytes>) -> RlpResult<RlpList> {
        self.wrap(buf)?.into_list()
    }

    /// Decodes the string at the start of a buffer.
    pub fn wrap_string(&self, buf: impl Into<Bytes>) -> RlpResult<RlpItem> {
        let item = self.wrap(buf)?;
        if !item.is_string() {
            return Err(DecodeError::malformed(item.index(), Malformed::NotAString));
        }

        Ok(item)
    }

    /// Decodes a buffer holding exactly one item, throwing an error if there
    /// are leftover bytes.
    pub fn decode_exact(&self, buf: impl Into<Bytes>) -> RlpResult<RlpItem> {
        let buf = buf.into();
        let item = self.wrap_at(&buf, 0, Bound::Open)?;
        if item.end_index() != buf.len() {
            return Err(DecodeError::malformed(
                item.end_index(),
                Malformed::TrailingBytes(buf.len() - item.end_index()),
            ));
        }

        Ok(item)
    }

    /// Returns an iterator over the items laid back to back in a buffer.
    pub fn sequence(&self, buf: impl Into<Bytes>) -> SequenceIter {
        SequenceIter {
            decoder: *self,
            buffer: buf.into(),
            index: 0,
            done: false,
        }
    }

    /// Returns an iterator decoding items as they arrive from a source.
    pub fn stream<S: ByteSource>(&self, source: S) -> RlpStream<S> {
        RlpStream::new(source, *self)
    }

    /// Decodes the item whose lead byte is at `index`.
    ///
    /// The returned item's [`RlpItem::end_index`] is where a following
    /// sibling would start.
    pub fn wrap_at(&self, buffer: &Bytes, index: usize, bound: Bound) -> RlpResult<RlpItem> {
        let container_end = match bound {
            Bound::Open => buffer.len(),
            Bound::Fixed(end) => end.min(buffer.len()),
        };

        if index >= container_end {
            return Err(match bound {
                Bound::Open => DecodeError::Recoverable(Incomplete::NoLeadByte { index }),
                Bound::Fixed(_) => DecodeError::malformed(
                    index,
                    Malformed::ExceedsContainer {
                        end: index as u64 + 1,
                        container_end,
                    },
                ),
            });
        }

        let lead = buffer[index];
        let data_type = DataType::from_lead(lead);
        match data_type {
            DataType::SingleByte => Ok(RlpItem::new(
                buffer.clone(),
                index,
                index,
                index + 1,
                data_type,
            )),

            DataType::ShortString | DataType::ShortList => {
                let data_index = index + 1;
                let data_len = (lead - data_type.offset()) as usize;
                let end = check_end(index, (data_index + data_len) as u64, container_end, bound)?;

                if !self.lenient
                    && data_type == DataType::ShortString
                    && data_len == 1
                    && buffer[data_index] < 0x80
                {
                    return Err(DecodeError::malformed(
                        index,
                        Malformed::NonCanonicalSingleByte,
                    ));
                }

                Ok(RlpItem::new(
                    buffer.clone(),
                    index,
                    data_index,
                    end,
                    data_type,
                ))
            }

            DataType::LongString | DataType::LongList => {
                // At least 1 since the long ranges start one past the offset.
                let len_len = (lead - data_type.offset()) as usize;
                let len_index = index + 1;
                let data_index = check_end(index, (len_index + len_len) as u64, container_end, bound)?;

                let len_bytes = &buffer[len_index..data_index];
                if len_bytes[0] == 0 {
                    return Err(DecodeError::malformed(index, Malformed::LeadingZeroLength));
                }

                let data_len = read_be_u64(len_bytes)
                    .ok_or(DecodeError::malformed(index, Malformed::LengthOverflow))?;
                if !self.lenient && data_len < MIN_LONG_DATA_LEN as u64 {
                    return Err(DecodeError::malformed(
                        index,
                        Malformed::NonCanonicalLongLength(data_len),
                    ));
                }

                let end = (data_index as u64)
                    .checked_add(data_len)
                    .ok_or(DecodeError::malformed(index, Malformed::LengthOverflow))?;
                let end = check_end(index, end, container_end, bound)?;

                Ok(RlpItem::new(
                    buffer.clone(),
                    index,
                    data_index,
                    end,
                    data_type,
                ))
            }
        }
    }
}

/// Checks that an element starting at `index` and ending at `end` fits its
/// container, returning the end as an index.
fn check_end(index: usize, end: u64, container_end: usize, bound: Bound) -> RlpResult<usize> {
    if end <= container_end as u64 {
        return Ok(end as usize);
    }

    Err(match bound {
        Bound::Open => DecodeError::Recoverable(Incomplete::Truncated {
            index,
            end,
            available: container_end,
        }),
        Bound::Fixed(_) => DecodeError::malformed(
            index,
            Malformed::ExceedsContainer { end, container_end },
        ),
    })
}

/// Iterator over top-level items laid back to back in one buffer.
///
/// A truncated final item is yielded as an error, after which the iterator
/// is exhausted.
#[derive(Debug)]
pub struct SequenceIter {
    decoder: RlpDecoder,
    buffer: Bytes,
    index: usize,
    done: bool,
}

impl Iterator for SequenceIter {
    type Item = RlpResult<RlpItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.index == self.buffer.len() {
            return None;
        }

        match self.decoder.wrap_at(&self.buffer, self.index, Bound::Open) {
            Ok(item) => {
                self.index = item.end_index();
                Some(Ok(item))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for SequenceIter {}
