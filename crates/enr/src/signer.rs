//! Cryptographic capabilities a record is built and checked with.

use std::error::Error as StdError;

/// Produces signatures over record content.
pub trait Signer {
    /// Exact length of every signature [`Signer::sign`] returns.  Needed
    /// before signing to size the record.
    fn signature_len(&self) -> usize;

    /// Signs the RLP encoding of the content list `[seq, k1, v1, ...]`.
    fn sign(&self, content: &[u8]) -> Vec<u8>;
}

/// Checks signatures over record content.
pub trait Verifier {
    /// Why a signature was rejected.
    type Error: StdError + Send + Sync + 'static;

    /// Verifies `signature` over the RLP encoding of the content list.
    fn verify(&self, signature: &[u8], content: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Signer + ?Sized> Signer for &T {
    fn signature_len(&self) -> usize {
        (**self).signature_len()
    }

    fn sign(&self, content: &[u8]) -> Vec<u8> {
        (**self).sign(content)
    }
}

impl<T: Verifier + ?Sized> Verifier for &T {
    type Error = T::Error;

    fn verify(&self, signature: &[u8], content: &[u8]) -> Result<(), Self::Error> {
        (**self).verify(signature, content)
    }
}
