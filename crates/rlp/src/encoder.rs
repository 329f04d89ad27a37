//! Prefix arithmetic and encoding helpers.
//!
//! Nothing here allocates speculatively: callers that care can size a buffer
//! exactly with [`data_len`] or [`list_len`] first and then write into it.

use bytes::BufMut;

use crate::data_type::{
    LIST_LONG_OFFSET, LIST_SHORT_OFFSET, MIN_LONG_DATA_LEN, STRING_LONG_OFFSET,
    STRING_SHORT_OFFSET,
};
use crate::types::Encodable;
use crate::util::be_len;

/// Returns the length of the shortest prefix for a payload of some length.
pub fn prefix_len(payload_len: usize) -> usize {
    if payload_len < MIN_LONG_DATA_LEN {
        1
    } else {
        1 + be_len(payload_len as u64)
    }
}

/// Writes the prefix of a string with a payload of some length.
pub fn insert_string_prefix(payload_len: usize, out: &mut dyn BufMut) {
    insert_prefix(payload_len, STRING_SHORT_OFFSET, STRING_LONG_OFFSET, out)
}

/// Writes the prefix of a list with a payload of some length.
pub fn insert_list_prefix(payload_len: usize, out: &mut dyn BufMut) {
    insert_prefix(payload_len, LIST_SHORT_OFFSET, LIST_LONG_OFFSET, out)
}

fn insert_prefix(payload_len: usize, short_offset: u8, long_offset: u8, out: &mut dyn BufMut) {
    if payload_len < MIN_LONG_DATA_LEN {
        out.put_u8(short_offset + payload_len as u8);
        return;
    }

    let len = payload_len as u64;
    let len_len = be_len(len);
    out.put_u8(long_offset + len_len as u8);
    out.put_slice(&len.to_be_bytes()[8 - len_len..]);
}

/// Returns the summed encoded length of a sequence of values, which is the
/// payload length of a list holding them.
pub fn data_len<T: Encodable>(items: &[T]) -> usize {
    items.iter().map(Encodable::encoded_len).sum()
}

/// Returns the encoded length of a list holding the values.
pub fn list_len<T: Encodable>(items: &[T]) -> usize {
    let payload_len = data_len(items);
    prefix_len(payload_len) + payload_len
}

/// Encodes a value into a newly allocated vec.
pub fn encode<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    value.encode(&mut buf);
    buf
}

/// Writes a list holding the values.
pub fn encode_list_into<T: Encodable>(items: &[T], out: &mut dyn BufMut) {
    insert_list_prefix(data_len(items), out);
    for item in items {
        item.encode(out);
    }
}

/// Encodes a list holding the values into a newly allocated vec.
pub fn encode_list<T: Encodable>(items: &[T]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(list_len(items));
    encode_list_into(items, &mut buf);
    buf
}

/// Encodes the values back to back, without an enclosing list.
pub fn encode_sequentially<T: Encodable>(items: &[T]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(data_len(items));
    for item in items {
        item.encode(&mut buf);
    }
    buf
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::{RLP_STRICT, Value};

    #[test]
    fn test_prefix_len_boundaries() {
        assert_eq!(prefix_len(0), 1);
        assert_eq!(prefix_len(55), 1);
        assert_eq!(prefix_len(56), 2);
        assert_eq!(prefix_len(0xff), 2);
        assert_eq!(prefix_len(0x100), 3);
        assert_eq!(prefix_len(0xffff), 3);
        assert_eq!(prefix_len(0x10000), 4);
    }

    #[test]
    fn test_prefixes() {
        let mut buf = Vec::new();
        insert_string_prefix(0, &mut buf);
        insert_string_prefix(55, &mut buf);
        insert_string_prefix(56, &mut buf);
        insert_list_prefix(0, &mut buf);
        insert_list_prefix(1024, &mut buf);
        assert_eq!(buf, hex!("80b7b838c0f90400"));
    }

    #[test]
    fn test_prefix_into_slice() {
        let mut buf = [0u8; 3];
        let mut cursor = &mut buf[..];
        insert_list_prefix(300, &mut cursor);
        assert!(cursor.is_empty());
        assert_eq!(buf, hex!("f9012c"));
    }

    #[test]
    fn test_list_of_two_empty_strings() {
        let items = ["", ""];
        assert_eq!(data_len(&items), 2);
        assert_eq!(list_len(&items), 3);
        let enc = encode_list(&items);
        assert_eq!(enc, hex!("c28080"));

        let list = RLP_STRICT.wrap_list(enc).expect("test: wrap");
        let children = list.elements().expect("test: elements");
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.data_len() == 0));
    }

    #[test]
    fn test_cat_dog() {
        assert_eq!(encode_list(&["cat", "dog"]), hex!("c88363617483646f67"));
        assert_eq!(encode_sequentially(&["cat", "dog"]), hex!("8363617483646f67"));
    }

    #[test]
    fn test_data_len_matches_encoding() {
        // the set theoretical representation of three
        let three = Value::List(vec![
            Value::List(vec![]),
            Value::List(vec![Value::List(vec![])]),
            Value::List(vec![
                Value::List(vec![]),
                Value::List(vec![Value::List(vec![])]),
            ]),
        ]);
        let enc = encode(&three);
        assert_eq!(enc, hex!("c7c0c1c0c3c0c1c0"));
        assert_eq!(three.encoded_len(), enc.len());

        let long = vec![Value::String(vec![0xab; 60]); 3];
        assert_eq!(data_len(&long), 3 * 62);
        assert_eq!(list_len(&long), 2 + 3 * 62);
        assert_eq!(encode_list(&long).len(), list_len(&long));
    }
}
