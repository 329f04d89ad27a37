//! Ethereum Node Records (EIP-778).
//!
//! A [`Record`] is a signed RLP list `[signature, seq, k1, v1, k2, v2, ...]`
//! of at most [`MAX_RECORD_LEN`] bytes.  Signing and verification are left to
//! the caller through the [`Signer`] and [`Verifier`] traits, this crate only
//! deals with the layout.

mod errors;
pub use errors::{EnrError, EnrResult};

mod pair;
pub use pair::{ID, IP, IP6, KeyValuePair, SECP256K1, TCP, TCP6, UDP, UDP6};

mod record;
pub use record::{ENR_PREFIX, MAX_RECORD_LEN, Record};

mod signer;
pub use signer::{Signer, Verifier};
