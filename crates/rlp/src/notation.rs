//! Bracket notation for raw RLP.
//!
//! Renders a buffer of back to back items as a human readable tree, e.g.
//!
//! ```txt
//! (
//!   '0f',
//!   [ '', '' ],
//!   [
//!     '6162...',
//!     [ 'ff' ]
//!   ]
//! )
//! ```
//!
//! Short lists go inline, long lists put one element per line.  Strings are
//! single quoted hex.  Every element but the last in a list ends in `", "`,
//! the space is kept even when a line break follows.
//!
//! The renderer walks the raw bytes itself rather than going through
//! [`crate::RlpDecoder`], re-deriving and re-checking every bound as it
//! descends.  It tracks depth and container ends independently, so it also
//! serves as a cross-check on the decoder.

use std::fmt;

use crate::data_type::{DataType, MIN_LONG_DATA_LEN};
use crate::errors::{DecodeError, Malformed, RlpResult};
use crate::types::Encodable;
use crate::util::read_be_u64;
use crate::value::Value;

/// Deepest list nesting we recurse into.
pub const MAX_DEPTH: usize = 1024;

const BEGIN_NOTATION: &str = "(";
const END_NOTATION: &str = "\n)";
const BEGIN_LIST: char = '[';
const BEGIN_LIST_SHORT: &str = "[ ";
const QUOTE: char = '\'';
const DELIMITER: &str = ", ";
const LIST_LONG_END_PLUS_DELIMITER: &str = "], ";
const LIST_SHORT_END_PLUS_DELIMITER: &str = " ], ";
const INDENT: &str = "  ";

/// Rendered notation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Notation(String);

impl Notation {
    /// Renders every item in the buffer.
    pub fn for_encoding(buf: &[u8]) -> RlpResult<Self> {
        Self::for_encoding_range(buf, 0, buf.len())
    }

    /// Renders the items in `[start, end)`.  `end` is clamped to the buffer.
    pub fn for_encoding_range(buf: &[u8], start: usize, end: usize) -> RlpResult<Self> {
        Renderer::new(buf, true).render(start, end).map(Self)
    }

    /// Renders every item in the buffer, rejecting the non-canonical forms
    /// the strict decoder rejects.
    pub fn for_encoding_strict(buf: &[u8]) -> RlpResult<Self> {
        Renderer::new(buf, false).render(0, buf.len()).map(Self)
    }

    /// Encodes values back to back and renders them.
    pub fn for_values(values: &[Value]) -> RlpResult<Self> {
        let mut buf = Vec::with_capacity(values.iter().map(Encodable::encoded_len).sum());
        for v in values {
            v.encode(&mut buf);
        }
        Self::for_encoding(&buf)
    }

    /// Borrows the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to the text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Renderer<'b> {
    data: &'b [u8],
    lenient: bool,
    out: String,
}

impl<'b> Renderer<'b> {
    fn new(data: &'b [u8], lenient: bool) -> Self {
        Self {
            data,
            lenient,
            out: String::new(),
        }
    }

    fn render(mut self, start: usize, end: usize) -> RlpResult<String> {
        let end = end.min(self.data.len());
        if start > end {
            return Err(DecodeError::malformed(
                start,
                Malformed::InvalidRange { start, end },
            ));
        }

        self.out.push_str(BEGIN_NOTATION);
        self.build_list(start, end, 0, true)?;
        self.out.push_str(END_NOTATION);
        Ok(self.out)
    }

    /// Renders the elements in `[data_index, end)`.  The top level is treated
    /// as a long list at depth 0 with no brackets of its own.
    fn build_list(
        &mut self,
        data_index: usize,
        end: usize,
        depth: usize,
        long_list: bool,
    ) -> RlpResult<usize> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::malformed(
                data_index,
                Malformed::DepthLimit(MAX_DEPTH),
            ));
        }

        if !long_list {
            self.out.push_str(BEGIN_LIST_SHORT);
        } else if depth != 0 {
            self.out.push(BEGIN_LIST);
        }

        let mut i = data_index;
        while i < end {
            if long_list {
                // the previous element's delimiter stays whole, space included
                self.out.push('\n');
                self.indent(depth + 1);
            }

            let lead = self.data[i];
            let ty = DataType::from_lead(lead);
            i = match ty {
                DataType::SingleByte => self.build_string(i, i + 1),

                DataType::ShortString => {
                    let elem_data = i + 1;
                    let elem_end = short_element_end(elem_data, (lead - ty.offset()) as usize, end)?;
                    if !self.lenient && elem_end - elem_data == 1 && self.data[elem_data] < 0x80 {
                        return Err(DecodeError::malformed(
                            i,
                            Malformed::NonCanonicalSingleByte,
                        ));
                    }
                    self.build_string(elem_data, elem_end)
                }

                DataType::ShortList => {
                    let elem_data = i + 1;
                    let elem_end = short_element_end(elem_data, (lead - ty.offset()) as usize, end)?;
                    self.build_list(elem_data, elem_end, depth + 1, false)?
                }

                DataType::LongString | DataType::LongList => {
                    if !long_list {
                        return Err(DecodeError::malformed(
                            i,
                            Malformed::LongElementInShortList,
                        ));
                    }

                    let elem_data = i + 1 + (lead - ty.offset()) as usize;
                    let elem_end = self.long_element_end(i, elem_data, end)?;
                    if ty.is_string() {
                        self.build_string(elem_data, elem_end)
                    } else {
                        self.build_list(elem_data, elem_end, depth + 1, true)?
                    }
                }
            };
        }

        if data_index != end {
            self.strip_final_delimiter();
        }

        if !long_list {
            self.out.push_str(LIST_SHORT_END_PLUS_DELIMITER);
        } else if depth != 0 {
            self.out.push('\n');
            self.indent(depth);
            self.out.push_str(LIST_LONG_END_PLUS_DELIMITER);
        }

        Ok(end)
    }

    fn build_string(&mut self, from: usize, to: usize) -> usize {
        self.out.push(QUOTE);
        self.out.push_str(&hex::encode(&self.data[from..to]));
        self.out.push(QUOTE);
        self.out.push_str(DELIMITER);
        to
    }

    fn long_element_end(
        &self,
        lead_index: usize,
        data_index: usize,
        container_end: usize,
    ) -> RlpResult<usize> {
        if data_index > container_end {
            return Err(exceeds_container(lead_index, data_index as u64, container_end));
        }

        let len_bytes = &self.data[lead_index + 1..data_index];
        if !self.lenient && len_bytes[0] == 0 {
            return Err(DecodeError::malformed(
                lead_index,
                Malformed::LeadingZeroLength,
            ));
        }

        let data_len = read_be_u64(len_bytes)
            .ok_or(DecodeError::malformed(lead_index, Malformed::LengthOverflow))?;
        let end = (data_index as u64)
            .checked_add(data_len)
            .ok_or(DecodeError::malformed(lead_index, Malformed::LengthOverflow))?;
        if end > container_end as u64 {
            return Err(exceeds_container(lead_index, end, container_end));
        }

        if !self.lenient && data_len < MIN_LONG_DATA_LEN as u64 {
            return Err(DecodeError::malformed(
                lead_index,
                Malformed::NonCanonicalLongLength(data_len),
            ));
        }

        Ok(end as usize)
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn strip_final_delimiter(&mut self) {
        self.out.truncate(self.out.len() - DELIMITER.len());
    }
}

fn short_element_end(data_index: usize, data_len: usize, container_end: usize) -> RlpResult<usize> {
    let end = data_index + data_len;
    if end > container_end {
        return Err(exceeds_container(data_index - 1, end as u64, container_end));
    }

    Ok(end)
}

fn exceeds_container(index: usize, end: u64, container_end: usize) -> DecodeError {
    DecodeError::malformed(index, Malformed::ExceedsContainer { end, container_end })
}
