//! Signed, size bounded records.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use strata_rlp::bytes::{BufMut, Bytes};
use strata_rlp::{
    Encodable, RLP_STRICT, RlpItem, RlpList, insert_list_prefix, insert_string_prefix, prefix_len,
};
use tracing::*;

use crate::errors::{EnrError, EnrResult};
use crate::pair::{KeyValuePair, encode_pairs, pairs_len};
use crate::signer::{Signer, Verifier};

/// Maximum length of an encoded record.
pub const MAX_RECORD_LEN: usize = 300;

/// Prefix of the textual form.
pub const ENR_PREFIX: &str = "enr:";

/// A node record, the RLP list `[signature, seq, k1, v1, k2, v2, ...]`.
///
/// The signature covers the content list `[seq, k1, v1, ...]`, which never
/// appears on the wire as such.  See [`Record::content`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Record {
    rlp: RlpList,
}

impl Record {
    /// Builds and signs a record.
    ///
    /// Pairs are written in the order given, they should already be sorted by
    /// key.  Fails with [`EnrError::SizeExceeded`] without calling the signer
    /// if the result would be longer than [`MAX_RECORD_LEN`].
    pub fn new(seq: u64, pairs: &[KeyValuePair], signer: impl Signer) -> EnrResult<Self> {
        // Declared by the signer, so any of these sums may overflow.
        let overflow = || EnrError::SizeExceeded {
            len: usize::MAX,
            max: MAX_RECORD_LEN,
        };
        let signature_len = signer.signature_len();
        let signature_item_len = prefix_len(signature_len)
            .checked_add(signature_len)
            .ok_or_else(overflow)?;
        let payload_len = seq
            .encoded_len()
            .checked_add(pairs_len(pairs))
            .ok_or_else(overflow)?;
        let record_payload_len = signature_item_len
            .checked_add(payload_len)
            .ok_or_else(overflow)?;
        let record_prefix_len = prefix_len(record_payload_len);
        let record_len = record_prefix_len
            .checked_add(record_payload_len)
            .ok_or_else(overflow)?;
        if record_len > MAX_RECORD_LEN {
            return Err(EnrError::SizeExceeded {
                len: record_len,
                max: MAX_RECORD_LEN,
            });
        }

        // The content list ends where the record does, so its prefix sits in
        // the signature slot.  Never underflows since a prefix is at most 3
        // bytes under the ceiling.
        let mut buf = vec![0; record_len];
        let content_offset = record_prefix_len + signature_item_len - prefix_len(payload_len);
        {
            let mut out = &mut buf[content_offset..];
            insert_list_prefix(payload_len, &mut out);
            seq.encode(&mut out);
            encode_pairs(pairs, &mut out);
            debug_assert!(out.is_empty(), "enr: content sizing");
        }

        let signature = signer.sign(&buf[content_offset..]);
        if signature.len() != signature_len {
            return Err(EnrError::SignatureLength {
                expected: signature_len,
                found: signature.len(),
            });
        }

        // Overwrites the content prefix, which was only needed for signing.
        let mut out = &mut buf[..record_prefix_len + signature_item_len];
        insert_list_prefix(record_payload_len, &mut out);
        insert_string_prefix(signature_len, &mut out);
        out.put_slice(&signature);

        let rlp = RLP_STRICT.wrap_list(buf)?;
        debug!(%seq, len = %record_len, pairs = %pairs.len(), "assembled node record");
        Ok(Self { rlp })
    }

    /// Decodes a record from its RLP encoding.
    pub fn decode(buf: impl Into<Bytes>) -> EnrResult<Self> {
        let buf = buf.into();
        if buf.len() > MAX_RECORD_LEN {
            return Err(EnrError::SizeExceeded {
                len: buf.len(),
                max: MAX_RECORD_LEN,
            });
        }

        let rlp = RLP_STRICT.decode_exact(buf)?.into_list()?;
        let record = Self { rlp };
        record.seq()?;
        Ok(record)
    }

    /// Parses the textual form, `enr:` followed by unpadded URL safe base64
    /// of the encoding.
    pub fn parse(s: &str) -> EnrResult<Self> {
        let body = s.strip_prefix(ENR_PREFIX).ok_or(EnrError::MissingPrefix)?;
        let buf = URL_SAFE_NO_PAD.decode(body)?;
        Self::decode(buf)
    }

    /// Returns the backing list.
    pub fn rlp(&self) -> &RlpList {
        &self.rlp
    }

    /// Returns the encoded record.
    pub fn encoding(&self) -> &[u8] {
        self.rlp.encoding()
    }

    /// Returns the signature item.
    pub fn signature(&self) -> EnrResult<RlpItem> {
        Ok(self.rlp.iter().next().ok_or(EnrError::MissingSignature)??)
    }

    /// Returns the sequence number.
    pub fn seq(&self) -> EnrResult<u64> {
        let mut items = self.rlp.iter();
        items.next().ok_or(EnrError::MissingSignature)??;
        let seq = items.next().ok_or(EnrError::MissingSeq)??;
        Ok(seq.as_u64()?)
    }

    /// Returns the key/value pairs, in record order.
    pub fn pairs(&self) -> EnrResult<Vec<KeyValuePair>> {
        self.seq()?;
        let items = self.rlp.elements()?;
        let flat = items.get(2..).unwrap_or_default();
        if flat.len() % 2 != 0 {
            return Err(EnrError::OddPairs(flat.len()));
        }

        flat.chunks_exact(2)
            .map(|kv| -> EnrResult<KeyValuePair> {
                Ok(KeyValuePair::new(kv[0].string_data()?, kv[1].string_data()?))
            })
            .collect()
    }

    /// Returns the signed content list `[seq, k1, v1, ...]` as a standalone
    /// list.
    pub fn content(&self) -> EnrResult<RlpList> {
        let signature = self.signature()?;
        Ok(RLP_STRICT.wrap_list(self.content_bytes(&signature)?)?)
    }

    /// Checks the signature, returning the content list if it holds.
    pub fn verify(&self, verifier: impl Verifier) -> EnrResult<RlpList> {
        let signature = self.signature()?;
        let content = self.content_bytes(&signature)?;
        if let Err(e) = verifier.verify(signature.string_data()?, &content) {
            warn!(%e, seq = ?self.seq().ok(), "node record signature rejected");
            return Err(EnrError::SignatureInvalid(Box::new(e)));
        }

        Ok(RLP_STRICT.wrap_list(content)?)
    }

    fn content_bytes(&self, signature: &RlpItem) -> EnrResult<Vec<u8>> {
        let from = signature.end_index();
        let to = self.rlp.end_index();
        let len = to - from;

        let mut buf = Vec::with_capacity(prefix_len(len) + len);
        insert_list_prefix(len, &mut buf);
        self.rlp.export_range(from, to, &mut buf)?;
        Ok(buf)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ENR_PREFIX)?;
        f.write_str(&URL_SAFE_NO_PAD.encode(self.encoding()))
    }
}

impl FromStr for Record {
    type Err = EnrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
