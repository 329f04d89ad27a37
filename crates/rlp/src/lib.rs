//! Recursive Length Prefix (RLP) encoding.
//!
//! RLP is the self-delimiting, length-prefixed encoding for byte strings and
//! arbitrarily nested lists used throughout Ethereum-family protocols.  This
//! crate decodes it without copying ([`RlpItem`] and [`RlpList`] are views
//! over a shared [`bytes::Bytes`] buffer), encodes it with exact up-front
//! sizing, decodes it incrementally from a [`ByteSource`] and renders it as
//! bracket [`Notation`].
//!
//! Decoding failures are split into recoverable ones (the input ended early)
//! and unrecoverable ones (the input is malformed), see [`DecodeError`].

mod data_type;
pub use data_type::{
    DataType, EMPTY_LIST_CODE, EMPTY_STRING_CODE, LIST_LONG_OFFSET, LIST_SHORT_OFFSET,
    MIN_LONG_DATA_LEN, STRING_LONG_OFFSET, STRING_SHORT_OFFSET,
};

mod decoder;
pub use decoder::{Bound, RLP_LENIENT, RLP_STRICT, RlpDecoder, SequenceIter};

mod encoder;
pub use encoder::{
    data_len, encode, encode_list, encode_list_into, encode_sequentially, insert_list_prefix,
    insert_string_prefix, list_len, prefix_len,
};

mod errors;
pub use errors::{DecodeError, Incomplete, Malformed, RlpResult, StreamError};

mod item;
pub use item::RlpItem;

mod list;
pub use list::{RlpList, RlpListIter};

mod notation;
pub use notation::{MAX_DEPTH, Notation};

mod stream;
pub use stream::{ByteSource, RlpStream};

mod types;
pub use types::{Decodable, Encodable};

mod util;

mod value;
pub use value::Value;

pub use bytes;
