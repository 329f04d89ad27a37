use std::io;

use thiserror::Error;

/// Wrapper result type for decoding operations.
pub type RlpResult<T> = Result<T, DecodeError>;

/// Errors from decoding RLP.
///
/// Callers branch on the variant: a [`DecodeError::Recoverable`] error means
/// the input ended early and more bytes may resolve it, while a
/// [`DecodeError::Unrecoverable`] error means the bytes are malformed however
/// many more arrive.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DecodeError {
    /// The buffer ends before a complete item boundary can be determined.
    #[error("incomplete input: {0}")]
    Recoverable(Incomplete),

    /// The bytes violate the format.
    #[error("malformed element @ index {index}: {kind}")]
    Unrecoverable {
        /// Index of the lead byte of the offending element.
        index: usize,

        /// What exactly is wrong with it.
        kind: Malformed,
    },
}

impl DecodeError {
    pub(crate) fn malformed(index: usize, kind: Malformed) -> Self {
        Self::Unrecoverable { index, kind }
    }

    /// Returns if more input could resolve this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable(_))
    }

    /// Returns the index of the element the error was raised for.
    pub fn index(&self) -> usize {
        match self {
            Self::Recoverable(Incomplete::NoLeadByte { index })
            | Self::Recoverable(Incomplete::Truncated { index, .. })
            | Self::Unrecoverable { index, .. } => *index,
        }
    }

    /// Returns how many bytes an element claimed past the end of its
    /// container, if that is what went wrong.
    pub fn overrun(&self) -> Option<u64> {
        match self {
            Self::Unrecoverable {
                kind: Malformed::ExceedsContainer { end, container_end },
                ..
            } => end.checked_sub(*container_end as u64),
            _ => None,
        }
    }

    /// Returns the malformation, if this error is unrecoverable.
    pub fn kind(&self) -> Option<&Malformed> {
        match self {
            Self::Unrecoverable { kind, .. } => Some(kind),
            Self::Recoverable(_) => None,
        }
    }
}

/// Ways an input can end before an item is complete.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Incomplete {
    /// There is no lead byte at the cursor.
    #[error("no lead byte @ index {index}")]
    NoLeadByte {
        /// Position of the missing lead byte.
        index: usize,
    },

    /// The element's prefix or payload runs past the buffered bytes.
    #[error("element @ index {index} ends at {end} but only {available} bytes are buffered")]
    Truncated {
        /// Index of the element's lead byte.
        index: usize,

        /// Where the element claims to end.
        end: u64,

        /// How many bytes the buffer holds.
        available: usize,
    },
}

/// Ways an input can be malformed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Malformed {
    /// Element claims more bytes than its enclosing container has.
    #[error("element exceeds its container: {end} > {container_end}")]
    ExceedsContainer {
        /// Where the element claims to end.
        end: u64,

        /// Where the container actually ends.
        container_end: usize,
    },

    /// Long form length field starts with a zero byte.
    #[error("length field has a leading zero byte")]
    LeadingZeroLength,

    /// Long form used for a payload the short form can represent.
    #[error("long element data length must be 56 or greater; found {0}")]
    NonCanonicalLongLength(u64),

    /// One-byte string below 0x80 not encoded as a bare single byte.
    #[error("invalid rlp for single byte")]
    NonCanonicalSingleByte,

    /// Declared length overflows the address space.
    #[error("length arithmetic overflow")]
    LengthOverflow,

    /// Expected a list, found a string.
    #[error("not a list")]
    NotAList,

    /// Expected a string, found a list.
    #[error("not a string")]
    NotAString,

    /// Integer payload too wide for the target type.
    #[error("integer of {len} bytes exceeds {max} byte target")]
    IntegerOverflow {
        /// Payload length.
        len: usize,

        /// Width of the target type.
        max: usize,
    },

    /// Integer payload has a leading zero byte.
    #[error("integer has a leading zero byte")]
    IntegerLeadingZero,

    /// String payload is not UTF-8.
    #[error("invalid utf-8")]
    InvalidUtf8,

    /// Boolean payload is neither empty nor `0x01`.
    #[error("invalid boolean encoding")]
    InvalidBool,

    /// Payload length does not match a fixed-size target.
    #[error("expected {expected} data bytes, found {found}")]
    UnexpectedLength {
        /// Required length.
        expected: usize,

        /// Actual length.
        found: usize,
    },

    /// Long-form element nested inside a short list.
    #[error("long element found in short list")]
    LongElementInShortList,

    /// Requested range starts past its end.
    #[error("index > end: {start} > {end}")]
    InvalidRange {
        /// Range start.
        start: usize,

        /// Range end.
        end: usize,
    },

    /// Bytes left over after a single top-level item.
    #[error("{0} trailing bytes after item")]
    TrailingBytes(usize),

    /// Lists nested deeper than we are willing to recurse.
    #[error("nesting exceeds depth {0}")]
    DepthLimit(usize),
}

/// Errors from pulling items out of a [`crate::RlpStream`].
#[derive(Debug, Error)]
pub enum StreamError {
    /// The buffered bytes are malformed.
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    /// The byte source failed.
    #[error("source: {0}")]
    Io(#[from] io::Error),
}
