use bytes::{BufMut, Bytes};

use crate::encoder::{insert_list_prefix, insert_string_prefix, prefix_len};
use crate::errors::{DecodeError, Malformed, RlpResult};
use crate::item::RlpItem;
use crate::util::trim_leading_zeros;
use crate::value::Value;

/// Types that have an RLP encoding.
pub trait Encodable {
    /// Returns the length of the full encoding, prefix included.
    fn encoded_len(&self) -> usize;

    /// Writes the full encoding.
    fn encode(&self, out: &mut dyn BufMut);
}

/// Types that can be read back out of a decoded item.
pub trait Decodable: Sized {
    /// Decodes self from an item.
    fn decode(item: &RlpItem) -> RlpResult<Self>;
}

/// Returns the encoded length of a byte string.
pub(crate) fn string_encoded_len(data: &[u8]) -> usize {
    match data {
        [b] if *b < 0x80 => 1,
        _ => prefix_len(data.len()) + data.len(),
    }
}

/// Writes a byte string, using the bare single byte form where canonical.
pub(crate) fn encode_string(data: &[u8], out: &mut dyn BufMut) {
    match data {
        [b] if *b < 0x80 => out.put_u8(*b),
        _ => {
            insert_string_prefix(data.len(), out);
            out.put_slice(data);
        }
    }
}

impl Encodable for [u8] {
    fn encoded_len(&self) -> usize {
        string_encoded_len(self)
    }

    fn encode(&self, out: &mut dyn BufMut) {
        encode_string(self, out)
    }
}

impl<const N: usize> Encodable for [u8; N] {
    fn encoded_len(&self) -> usize {
        string_encoded_len(self)
    }

    fn encode(&self, out: &mut dyn BufMut) {
        encode_string(self, out)
    }
}

impl Encodable for Vec<u8> {
    fn encoded_len(&self) -> usize {
        string_encoded_len(self)
    }

    fn encode(&self, out: &mut dyn BufMut) {
        encode_string(self, out)
    }
}

impl Encodable for Bytes {
    fn encoded_len(&self) -> usize {
        string_encoded_len(self)
    }

    fn encode(&self, out: &mut dyn BufMut) {
        encode_string(self, out)
    }
}

impl Encodable for str {
    fn encoded_len(&self) -> usize {
        string_encoded_len(self.as_bytes())
    }

    fn encode(&self, out: &mut dyn BufMut) {
        encode_string(self.as_bytes(), out)
    }
}

impl Encodable for String {
    fn encoded_len(&self) -> usize {
        self.as_str().encoded_len()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        self.as_str().encode(out)
    }
}

/// Booleans encode as the integers 0 and 1.
impl Encodable for bool {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, out: &mut dyn BufMut) {
        out.put_u8(if *self { 0x01 } else { 0x80 });
    }
}

impl Encodable for Value {
    fn encoded_len(&self) -> usize {
        match self {
            Self::String(data) => string_encoded_len(data),
            Self::List(items) => {
                let payload_len = items.iter().map(Encodable::encoded_len).sum::<usize>();
                prefix_len(payload_len) + payload_len
            }
        }
    }

    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Self::String(data) => encode_string(data, out),
            Self::List(items) => {
                let payload_len = items.iter().map(Encodable::encoded_len).sum::<usize>();
                insert_list_prefix(payload_len, out);
                for item in items {
                    item.encode(out);
                }
            }
        }
    }
}

/// Re-emits the item's encoding verbatim.
impl Encodable for RlpItem {
    fn encoded_len(&self) -> usize {
        self.encoding_len()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        out.put_slice(self.encoding())
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        (**self).encode(out)
    }
}

impl<T: Encodable + ?Sized> Encodable for Box<T> {
    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    fn encode(&self, out: &mut dyn BufMut) {
        (**self).encode(out)
    }
}

/// Unsigned ints encode as their minimal big-endian magnitude, so zero is the
/// empty string.
macro_rules! impl_uint_rlp {
    ( $( $ity:ident )* ) => {
        $(
            impl Encodable for $ity {
                fn encoded_len(&self) -> usize {
                    string_encoded_len(trim_leading_zeros(&self.to_be_bytes()))
                }

                fn encode(&self, out: &mut dyn BufMut) {
                    encode_string(trim_leading_zeros(&self.to_be_bytes()), out)
                }
            }

            impl Decodable for $ity {
                fn decode(item: &RlpItem) -> RlpResult<Self> {
                    const WIDTH: usize = std::mem::size_of::<$ity>();

                    let data = item.string_data()?;
                    if data.len() > WIDTH {
                        return Err(DecodeError::malformed(
                            item.index(),
                            Malformed::IntegerOverflow { len: data.len(), max: WIDTH },
                        ));
                    }

                    if data.first() == Some(&0) {
                        return Err(DecodeError::malformed(
                            item.index(),
                            Malformed::IntegerLeadingZero,
                        ));
                    }

                    let mut buf = [0; WIDTH];
                    buf[WIDTH - data.len()..].copy_from_slice(data);
                    Ok(<$ity>::from_be_bytes(buf))
                }
            }
        )*
    };
}

impl_uint_rlp!(u8 u16 u32 u64 u128 usize);

impl Decodable for bool {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        match item.string_data()? {
            [] => Ok(false),
            [0x01] => Ok(true),
            _ => Err(DecodeError::malformed(item.index(), Malformed::InvalidBool)),
        }
    }
}

impl Decodable for Vec<u8> {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        item.string_data().map(<[u8]>::to_vec)
    }
}

/// Shares the item's backing buffer instead of copying.
impl Decodable for Bytes {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        item.string_data()?;
        Ok(item.data_bytes())
    }
}

impl<const N: usize> Decodable for [u8; N] {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        let data = item.string_data()?;
        <[u8; N]>::try_from(data).map_err(|_| {
            DecodeError::malformed(
                item.index(),
                Malformed::UnexpectedLength {
                    expected: N,
                    found: data.len(),
                },
            )
        })
    }
}

impl Decodable for String {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        let data = item.string_data()?;
        String::from_utf8(data.to_vec())
            .map_err(|_| DecodeError::malformed(item.index(), Malformed::InvalidUtf8))
    }
}

impl Decodable for Value {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        item.to_value()
    }
}

impl Decodable for RlpItem {
    fn decode(item: &RlpItem) -> RlpResult<Self> {
        Ok(item.clone())
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::{RLP_STRICT, encode};

    #[test]
    fn test_uint_encodings() {
        assert_eq!(encode(&0u64), hex!("80"));
        assert_eq!(encode(&0x7fu8), hex!("7f"));
        assert_eq!(encode(&0x80u8), hex!("8180"));
        assert_eq!(encode(&0xffu64), hex!("81ff"));
        assert_eq!(encode(&1024u32), hex!("820400"));
        assert_eq!(encode(&u64::MAX), hex!("88ffffffffffffffff"));
        assert_eq!(0x80u16.encoded_len(), 2);
        assert_eq!(0u128.encoded_len(), 1);
    }

    #[test]
    fn test_string_encodings() {
        assert_eq!(encode(""), hex!("80"));
        assert_eq!(encode("dog"), hex!("83646f67"));
        assert_eq!(encode(&[0x00u8][..]), hex!("00"));
        assert_eq!(encode(&[0x80u8][..]), hex!("8180"));

        let lorem = "Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        let enc = encode(lorem);
        assert_eq!(&enc[..2], &hex!("b838"));
        assert_eq!(&enc[2..], lorem.as_bytes());
    }

    #[test]
    fn test_bool() {
        assert_eq!(encode(&true), hex!("01"));
        assert_eq!(encode(&false), hex!("80"));

        let t = RLP_STRICT.wrap(hex!("01").to_vec()).expect("test: wrap");
        assert!(t.as_bool().expect("test: bool"));
        let bad = RLP_STRICT.wrap(hex!("02").to_vec()).expect("test: wrap");
        assert_eq!(bad.as_bool().unwrap_err().kind(), Some(&Malformed::InvalidBool));
    }

    #[test]
    fn test_fixed_array_length() {
        let item = RLP_STRICT.wrap(hex!("820102").to_vec()).expect("test: wrap");
        assert_eq!(item.decode_as::<[u8; 2]>().expect("test: array"), [1, 2]);
        assert_eq!(
            item.decode_as::<[u8; 3]>().unwrap_err().kind(),
            Some(&Malformed::UnexpectedLength {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_item_reencodes_verbatim() {
        let item = RLP_STRICT
            .wrap(hex!("c88363617483646f67").to_vec())
            .expect("test: wrap");
        assert_eq!(encode(&item), hex!("c88363617483646f67"));
    }
}
