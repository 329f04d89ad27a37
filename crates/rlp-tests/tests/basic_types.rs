//! Integration tests for the built-in RLP types using proptest.

#![expect(missing_docs, reason = "test repo")]
#![expect(unused_crate_dependencies, reason = "macro hacks")]

use strata_rlp_tests::generate_rlp_tests;

generate_rlp_tests!(bool, "bool");
generate_rlp_tests!(u8, "u8");
generate_rlp_tests!(u16, "u16");
generate_rlp_tests!(u32, "u32");
generate_rlp_tests!(u64, "u64");
generate_rlp_tests!(u128, "u128");
generate_rlp_tests!(usize, "usize");

// Byte strings, long enough to cross into the long form.
generate_rlp_tests!(Vec<u8>, "bytes");
generate_rlp_tests!(String, "string");
generate_rlp_tests!([u8; 1], "u8_array_1");
generate_rlp_tests!([u8; 32], "u8_array_32");
