//! Zero-copy views over decoded items.

use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;

use crate::data_type::DataType;
use crate::errors::{DecodeError, Malformed, RlpResult};
use crate::list::RlpList;
use crate::notation::{MAX_DEPTH, Notation};
use crate::types::Decodable;
use crate::value::Value;

/// A decoded string or list.
///
/// This is a view over a shared backing buffer plus the offsets of the item
/// within it.  Cloning an item never copies the backing bytes, extracting
/// them is done explicitly with [`RlpItem::to_vec`] and friends.
#[derive(Clone, Debug)]
pub struct RlpItem {
    buffer: Bytes,
    index: usize,
    data_index: usize,
    end_index: usize,
    data_type: DataType,
}

impl RlpItem {
    /// Constructs a new instance.  The decoder has already checked the
    /// offsets against the buffer and the enclosing container.
    pub(crate) fn new(
        buffer: Bytes,
        index: usize,
        data_index: usize,
        end_index: usize,
        data_type: DataType,
    ) -> Self {
        debug_assert!(
            index <= data_index && data_index <= end_index && end_index <= buffer.len(),
            "item: offsets out of order"
        );

        Self {
            buffer,
            index,
            data_index,
            end_index,
            data_type,
        }
    }

    /// Gets the encoding class.
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns if this is a string.
    pub fn is_string(&self) -> bool {
        self.data_type.is_string()
    }

    /// Returns if this is a list.
    pub fn is_list(&self) -> bool {
        !self.is_string()
    }

    /// Position of the lead byte in the backing buffer.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of the first payload byte in the backing buffer.
    pub fn data_index(&self) -> usize {
        self.data_index
    }

    /// Position one past the last payload byte in the backing buffer.  This is
    /// where the next sibling starts.
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Length of the whole encoding, prefix included.
    pub fn encoding_len(&self) -> usize {
        self.end_index - self.index
    }

    /// Length of the payload.
    pub fn data_len(&self) -> usize {
        self.end_index - self.data_index
    }

    /// Gets the backing buffer the offsets refer to.
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Borrows the whole encoding.
    pub fn encoding(&self) -> &[u8] {
        &self.buffer[self.index..self.end_index]
    }

    /// Borrows the payload.
    pub fn data(&self) -> &[u8] {
        &self.buffer[self.data_index..self.end_index]
    }

    /// Returns the payload as a [`Bytes`] sharing the backing buffer.
    pub fn data_bytes(&self) -> Bytes {
        self.buffer.slice(self.data_index..self.end_index)
    }

    /// Copies the payload out into a new vec.
    pub fn to_vec(&self) -> Vec<u8> {
        self.data().to_vec()
    }

    /// Copies the whole encoding out into a new vec.
    pub fn encoding_to_vec(&self) -> Vec<u8> {
        self.encoding().to_vec()
    }

    /// Borrows the payload of a string item.
    pub fn string_data(&self) -> RlpResult<&[u8]> {
        if !self.is_string() {
            return Err(DecodeError::malformed(self.index, Malformed::NotAString));
        }

        Ok(self.data())
    }

    /// Decodes this item as some type.
    pub fn decode_as<T: Decodable>(&self) -> RlpResult<T> {
        T::decode(self)
    }

    /// Decodes a UTF-8 string.
    pub fn as_string(&self) -> RlpResult<String> {
        self.decode_as()
    }

    /// Decodes a canonical unsigned integer.
    pub fn as_u64(&self) -> RlpResult<u64> {
        self.decode_as()
    }

    /// Decodes a canonical unsigned integer.
    pub fn as_u32(&self) -> RlpResult<u32> {
        self.decode_as()
    }

    /// Decodes a canonical unsigned integer.
    pub fn as_u16(&self) -> RlpResult<u16> {
        self.decode_as()
    }

    /// Decodes a canonical unsigned integer.
    pub fn as_u8(&self) -> RlpResult<u8> {
        self.decode_as()
    }

    /// Decodes a boolean.
    pub fn as_bool(&self) -> RlpResult<bool> {
        self.decode_as()
    }

    /// Reinterprets this item as a list.
    pub fn as_list(&self) -> RlpResult<RlpList> {
        self.clone().into_list()
    }

    /// Converts this item into a list.
    pub fn into_list(self) -> RlpResult<RlpList> {
        if !self.is_list() {
            return Err(DecodeError::malformed(self.index, Malformed::NotAList));
        }

        Ok(RlpList::new_unchecked(self))
    }

    /// Copies the item out into an owned tree.
    pub fn to_value(&self) -> RlpResult<Value> {
        self.to_value_at(0)
    }

    fn to_value_at(&self, depth: usize) -> RlpResult<Value> {
        if depth > MAX_DEPTH {
            return Err(DecodeError::malformed(
                self.index,
                Malformed::DepthLimit(MAX_DEPTH),
            ));
        }

        if self.is_string() {
            return Ok(Value::String(self.to_vec()));
        }

        let list = RlpList::new_unchecked(self.clone());
        let mut children = Vec::new();
        for child in list.iter() {
            children.push(child?.to_value_at(depth + 1)?);
        }

        Ok(Value::List(children))
    }
}

/// Items compare by encoding, regardless of where they sit in their buffers.
impl PartialEq for RlpItem {
    fn eq(&self, other: &Self) -> bool {
        self.encoding() == other.encoding()
    }
}

impl Eq for RlpItem {}

impl Hash for RlpItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.encoding().hash(state);
    }
}

impl AsRef<[u8]> for RlpItem {
    fn as_ref(&self) -> &[u8] {
        self.encoding()
    }
}

/// Renders the item in bracket notation.
impl fmt::Display for RlpItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Notation::for_encoding_range(&self.buffer, self.index, self.end_index) {
            Ok(notation) => f.write_str(notation.as_str()),
            Err(_) => write!(f, "0x{}", hex::encode(self.encoding())),
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use crate::{Malformed, RLP_STRICT, Value};

    #[test]
    fn test_offsets() {
        let item = RLP_STRICT.wrap(hex!("83646f67").to_vec()).expect("test: wrap");
        assert_eq!(item.index(), 0);
        assert_eq!(item.data_index(), 1);
        assert_eq!(item.end_index(), 4);
        assert_eq!(item.encoding_len(), 4);
        assert_eq!(item.data_len(), 3);
        assert_eq!(item.data(), b"dog");
        assert_eq!(item.as_string().expect("test: utf8"), "dog");
    }

    #[test]
    fn test_data_bytes_shares_buffer() {
        let item = RLP_STRICT.wrap(hex!("83646f67").to_vec()).expect("test: wrap");
        let data = item.data_bytes();
        assert_eq!(&data[..], b"dog");
        assert_eq!(data.as_ptr(), item.buffer()[1..].as_ptr());
    }

    #[test]
    fn test_integers() {
        let zero = RLP_STRICT.wrap(hex!("80").to_vec()).expect("test: wrap");
        assert_eq!(zero.as_u64().expect("test: int"), 0);

        let big = RLP_STRICT.wrap(hex!("820400").to_vec()).expect("test: wrap");
        assert_eq!(big.as_u64().expect("test: int"), 1024);
        assert_eq!(big.as_u16().expect("test: int"), 1024);
        assert_eq!(
            big.as_u8().unwrap_err().kind(),
            Some(&Malformed::IntegerOverflow { len: 2, max: 1 })
        );

        let padded = RLP_STRICT.wrap(hex!("820004").to_vec()).expect("test: wrap");
        assert_eq!(
            padded.as_u64().unwrap_err().kind(),
            Some(&Malformed::IntegerLeadingZero)
        );
    }

    #[test]
    fn test_type_mismatch() {
        let list = RLP_STRICT.wrap(hex!("c0").to_vec()).expect("test: wrap");
        assert_eq!(
            list.as_u64().unwrap_err().kind(),
            Some(&Malformed::NotAString)
        );

        let string = RLP_STRICT.wrap(hex!("80").to_vec()).expect("test: wrap");
        assert_eq!(
            string.as_list().unwrap_err().kind(),
            Some(&Malformed::NotAList)
        );
    }

    #[test]
    fn test_to_value() {
        // [ [], [[]], [ [], [[]] ] ]
        let item = RLP_STRICT
            .wrap(hex!("c7c0c1c0c3c0c1c0").to_vec())
            .expect("test: wrap");
        let empty = Value::List(vec![]);
        let nested = Value::List(vec![empty.clone()]);
        assert_eq!(
            item.to_value().expect("test: to_value"),
            Value::List(vec![
                empty.clone(),
                nested.clone(),
                Value::List(vec![empty, nested]),
            ])
        );
    }

    #[test]
    fn test_eq_ignores_position() {
        let a = RLP_STRICT.wrap(hex!("8180").to_vec()).expect("test: wrap");
        let list = RLP_STRICT
            .wrap_list(hex!("c3808180").to_vec())
            .expect("test: wrap");
        let b = list
            .iter()
            .nth(1)
            .expect("test: second child")
            .expect("test: decode");
        assert_eq!(a, b);
        assert_ne!(a.index(), b.index());
    }

    #[test]
    fn test_display() {
        let item = RLP_STRICT.wrap(hex!("c28080").to_vec()).expect("test: wrap");
        assert_eq!(item.to_string(), "(\n  [ '', '' ]\n)");
    }
}
