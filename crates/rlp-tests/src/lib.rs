//! Property testing macros and utilities for strata-rlp.
//!
//! The main export is the `generate_rlp_tests!` macro, which generates
//! proptest properties for any type that can go through RLP and back.

// Re-export dependencies for macro usage
pub use paste;
pub use proptest;
pub use strata_rlp;

#[cfg(test)]
use hex_literal as _;
use proptest::prelude::*;
use strata_rlp::Value;

/// Generates property tests for a type that implements both `Encodable` and
/// `Decodable`.
///
/// The generated tests check that:
/// 1. Decoding the encoding with the strict decoder gives back the value
/// 2. `encoded_len` is exactly the length of the encoding
/// 3. The encoding is canonical: the lenient decoder agrees with the strict
///    one and re-encoding the decoded item reproduces the bytes
///
/// # Requirements
///
/// The type must implement:
/// - `strata_rlp::Encodable` and `strata_rlp::Decodable`
/// - `proptest::arbitrary::Arbitrary` - for generating test values
/// - `Debug + PartialEq` - for test assertions
///
/// # Example
/// ```rust,no_run
/// use strata_rlp_tests::generate_rlp_tests;
///
/// generate_rlp_tests!(u64, "u64");
/// ```
#[macro_export]
macro_rules! generate_rlp_tests {
    ($type:ty, $name:expr) => {
        $crate::paste::paste! {
            mod [<proptest_ $name _rlp>] {
                use super::*;
                use $crate::proptest::prelude::*;
                use $crate::strata_rlp::{encode, Encodable, RLP_LENIENT, RLP_STRICT};

                $crate::proptest::proptest! {
                    #[test]
                    fn [<test_rlp_roundtrip>](value in any::<$type>()) {
                        let encoded = encode(&value);
                        let item = RLP_STRICT.decode_exact(encoded).expect("test: decoding should succeed");
                        let decoded = item.decode_as::<$type>().expect("test: conversion should succeed");
                        prop_assert_eq!(value, decoded);
                    }

                    #[test]
                    fn [<test_rlp_encoded_len>](value in any::<$type>()) {
                        let encoded = encode(&value);
                        prop_assert_eq!(value.encoded_len(), encoded.len());
                    }

                    #[test]
                    fn [<test_rlp_canonical>](value in any::<$type>()) {
                        let encoded = encode(&value);
                        let strict = RLP_STRICT.wrap(encoded.clone()).expect("test: strict decode");
                        let lenient = RLP_LENIENT.wrap(encoded.clone()).expect("test: lenient decode");
                        prop_assert_eq!(&strict, &lenient);
                        prop_assert_eq!(encode(&strict), encoded);
                    }
                }
            }
        }
    };
}

/// Strategy for arbitrary value trees, with strings long enough to hit the
/// long forms and lists nested a few levels deep.
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop::collection::vec(any::<u8>(), 0..80).prop_map(Value::String);
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop::collection::vec(inner, 0..8).prop_map(Value::List)
    })
}
