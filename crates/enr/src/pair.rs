//! Record entries.

use strata_rlp::Encodable;
use strata_rlp::bytes::BufMut;

/// Name of the identity scheme, e.g. `v4`.
pub const ID: &[u8] = b"id";
/// Compressed secp256k1 public key.
pub const SECP256K1: &[u8] = b"secp256k1";
/// IPv4 address.
pub const IP: &[u8] = b"ip";
/// TCP port.
pub const TCP: &[u8] = b"tcp";
/// UDP port.
pub const UDP: &[u8] = b"udp";
/// IPv6 address.
pub const IP6: &[u8] = b"ip6";
/// IPv6 specific TCP port.
pub const TCP6: &[u8] = b"tcp6";
/// IPv6 specific UDP port.
pub const UDP6: &[u8] = b"udp6";

/// A key and its value, both raw byte strings.
///
/// Records list pairs sorted by key and with unique keys.  Sorting is up to
/// the caller, `Ord` compares keys first to make that easy.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct KeyValuePair {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl KeyValuePair {
    /// Constructs a new instance.
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the key.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Converts into the key and value.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.key, self.value)
    }
}

/// Length of the pairs flattened as consecutive strings.
pub(crate) fn pairs_len(pairs: &[KeyValuePair]) -> usize {
    pairs
        .iter()
        .map(|p| p.key.encoded_len() + p.value.encoded_len())
        .sum()
}

/// Writes the pairs flattened as consecutive strings.
pub(crate) fn encode_pairs(pairs: &[KeyValuePair], out: &mut dyn BufMut) {
    for p in pairs {
        p.key.encode(out);
        p.value.encode(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_by_key() {
        let mut pairs = vec![
            KeyValuePair::new(UDP, vec![0x76, 0x5f]),
            KeyValuePair::new(ID, "v4"),
            KeyValuePair::new(IP, vec![127, 0, 0, 1]),
            KeyValuePair::new(SECP256K1, vec![0x02; 33]),
        ];
        pairs.sort();

        let keys: Vec<&[u8]> = pairs.iter().map(KeyValuePair::key).collect();
        assert_eq!(keys, [ID, IP, SECP256K1, UDP]);
    }

    #[test]
    fn test_flattened_len() {
        let pairs = [
            KeyValuePair::new(ID, "v4"),
            KeyValuePair::new(SECP256K1, vec![0x02; 33]),
        ];

        let mut buf = Vec::new();
        encode_pairs(&pairs, &mut buf);
        assert_eq!(buf.len(), pairs_len(&pairs));
        assert_eq!(pairs_len(&pairs), 3 + 3 + 10 + 34);
    }
}
