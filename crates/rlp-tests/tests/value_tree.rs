//! Property tests over arbitrary nested value trees.

#![expect(missing_docs, reason = "test repo")]
#![expect(unused_crate_dependencies, reason = "macro hacks")]

use strata_rlp_tests::{
    arb_value,
    proptest::prelude::*,
    strata_rlp::{
        Encodable, Notation, RLP_LENIENT, RLP_STRICT, encode, encode_list, list_len,
    },
};

proptest! {
    #[test]
    fn test_value_roundtrip(value in arb_value()) {
        let encoded = encode(&value);
        prop_assert_eq!(value.encoded_len(), encoded.len());

        let item = RLP_STRICT.decode_exact(encoded.clone()).expect("test: strict decode");
        prop_assert_eq!(item.to_value().expect("test: to_value"), value);
        prop_assert_eq!(encode(&item), encoded);
    }

    #[test]
    fn test_decoders_agree_on_canonical_input(value in arb_value()) {
        let encoded = encode(&value);
        let strict = RLP_STRICT.wrap(encoded.clone()).expect("test: strict decode");
        let lenient = RLP_LENIENT.wrap(encoded).expect("test: lenient decode");
        prop_assert_eq!(strict.end_index(), lenient.end_index());
        prop_assert_eq!(strict.data_index(), lenient.data_index());
    }

    #[test]
    fn test_notation_accepts_decoded_input(value in arb_value()) {
        let encoded = encode(&value);
        let strict = Notation::for_encoding_strict(&encoded).expect("test: strict notation");
        let lenient = Notation::for_encoding(&encoded).expect("test: lenient notation");
        prop_assert_eq!(strict, lenient);
    }

    #[test]
    fn test_list_sizing(values in prop::collection::vec(arb_value(), 0..16)) {
        let encoded = encode_list(&values);
        prop_assert_eq!(encoded.len(), list_len(&values));

        let list = RLP_STRICT.wrap_list(encoded).expect("test: wrap list");
        let children = list.elements().expect("test: elements");
        prop_assert_eq!(children.len(), values.len());
        for (child, value) in children.iter().zip(&values) {
            prop_assert_eq!(&child.to_value().expect("test: to_value"), value);
        }
    }
}
