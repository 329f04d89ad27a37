//! Errors from building, parsing and verifying records.

use std::error::Error as StdError;

use strata_rlp::DecodeError;
use thiserror::Error;

/// Errors that can occur when working with records.
#[derive(Debug, Error)]
pub enum EnrError {
    /// The record would be, or is, longer than the ceiling.
    #[error("record length {len} exceeds maximum {max}")]
    SizeExceeded {
        /// Length of the encoded record.
        len: usize,
        /// The ceiling.
        max: usize,
    },

    /// The verifier rejected the signature.
    #[error("signature invalid: {0}")]
    SignatureInvalid(#[source] Box<dyn StdError + Send + Sync + 'static>),

    /// The signer produced a signature of a different length than it
    /// declared up front.
    #[error("signer declared {expected} byte signatures but produced {found}")]
    SignatureLength {
        /// Declared by [`crate::Signer::signature_len`].
        expected: usize,
        /// Actually returned by [`crate::Signer::sign`].
        found: usize,
    },

    /// Textual form without the `enr:` prefix.
    #[error("prefix \"enr:\" not found")]
    MissingPrefix,

    /// Textual form with a bad base64 body.
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The record bytes are not valid RLP, or not the expected shapes.
    #[error("decode: {0}")]
    Decode(#[from] DecodeError),

    /// The record list is empty.
    #[error("record has no signature")]
    MissingSignature,

    /// The record list ends after the signature.
    #[error("record has no sequence number")]
    MissingSeq,

    /// A key without a value.
    #[error("odd number of key/value items ({0})")]
    OddPairs(usize),
}

/// Result alias for record operations.
pub type EnrResult<T> = Result<T, EnrError>;
