//! Lead byte classification.
//!
//! Every RLP item starts with a lead byte whose numeric range determines how
//! the rest of the item is laid out.
//!
//! ```txt
//! 0x00..=0x7f  single byte, the lead byte is the whole item
//! 0x80..=0xb7  short string, payload length = lead - 0x80
//! 0xb8..=0xbf  long string, length-of-length = lead - 0xb7
//! 0xc0..=0xf7  short list, payload length = lead - 0xc0
//! 0xf8..=0xff  long list, length-of-length = lead - 0xf7
//! ```

/// Payloads at least this long must use the long form.
pub const MIN_LONG_DATA_LEN: usize = 56;

/// Base of the short string lead byte range.
pub const STRING_SHORT_OFFSET: u8 = 0x80;

/// Base of the long string lead byte range.
pub const STRING_LONG_OFFSET: u8 = 0xb7;

/// Base of the short list lead byte range.
pub const LIST_SHORT_OFFSET: u8 = 0xc0;

/// Base of the long list lead byte range.
pub const LIST_LONG_OFFSET: u8 = 0xf7;

/// Encoding of the empty string.
pub const EMPTY_STRING_CODE: u8 = STRING_SHORT_OFFSET;

/// Encoding of the empty list.
pub const EMPTY_LIST_CODE: u8 = LIST_SHORT_OFFSET;

/// Encoding class of an RLP item, derived from its lead byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DataType {
    /// A byte below `0x80` standing for itself.
    SingleByte,

    /// A string of 0 to 55 bytes.
    ShortString,

    /// A string of 56 or more bytes.
    LongString,

    /// A list with a payload of 0 to 55 bytes.
    ShortList,

    /// A list with a payload of 56 or more bytes.
    LongList,
}

impl DataType {
    /// Classifies a lead byte.
    pub const fn from_lead(lead: u8) -> Self {
        match lead {
            0x00..=0x7f => Self::SingleByte,
            0x80..=0xb7 => Self::ShortString,
            0xb8..=0xbf => Self::LongString,
            0xc0..=0xf7 => Self::ShortList,
            0xf8..=0xff => Self::LongList,
        }
    }

    /// Returns if this is a string class (single bytes are strings).
    pub const fn is_string(self) -> bool {
        matches!(self, Self::SingleByte | Self::ShortString | Self::LongString)
    }

    /// Returns if the payload length is stored out of band, in the bytes
    /// after the lead byte.
    pub const fn is_long(self) -> bool {
        matches!(self, Self::LongString | Self::LongList)
    }

    /// Returns the value subtracted from the lead byte to recover the inline
    /// length or, for long classes, the length-of-length.
    pub const fn offset(self) -> u8 {
        match self {
            Self::SingleByte => 0,
            Self::ShortString => STRING_SHORT_OFFSET,
            Self::LongString => STRING_LONG_OFFSET,
            Self::ShortList => LIST_SHORT_OFFSET,
            Self::LongList => LIST_LONG_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_boundaries() {
        assert_eq!(DataType::from_lead(0x00), DataType::SingleByte);
        assert_eq!(DataType::from_lead(0x7f), DataType::SingleByte);
        assert_eq!(DataType::from_lead(0x80), DataType::ShortString);
        assert_eq!(DataType::from_lead(0xb7), DataType::ShortString);
        assert_eq!(DataType::from_lead(0xb8), DataType::LongString);
        assert_eq!(DataType::from_lead(0xbf), DataType::LongString);
        assert_eq!(DataType::from_lead(0xc0), DataType::ShortList);
        assert_eq!(DataType::from_lead(0xf7), DataType::ShortList);
        assert_eq!(DataType::from_lead(0xf8), DataType::LongList);
        assert_eq!(DataType::from_lead(0xff), DataType::LongList);
    }

    #[test]
    fn test_flags() {
        for lead in 0..=u8::MAX {
            let ty = DataType::from_lead(lead);
            assert_eq!(ty.is_string(), lead < 0xc0, "lead {lead:#x}");
            assert_eq!(
                ty.is_long(),
                (0xb8..0xc0).contains(&lead) || lead >= 0xf8,
                "lead {lead:#x}"
            );
        }
    }

    #[test]
    fn test_offsets_recover_lengths() {
        assert_eq!(0xb7 - DataType::ShortString.offset(), 55);
        assert_eq!(0xb8 - DataType::LongString.offset(), 1);
        assert_eq!(0xbf - DataType::LongString.offset(), 8);
        assert_eq!(0xf7 - DataType::ShortList.offset(), 55);
        assert_eq!(0xff - DataType::LongList.offset(), 8);
    }
}
