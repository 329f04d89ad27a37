//! Big-endian integer helpers shared by the encoder, decoder and renderer.

/// Returns the number of bytes in the minimal big-endian form of `v`.  Zero
/// has no bytes.
pub(crate) const fn be_len(v: u64) -> usize {
    (u64::BITS - v.leading_zeros()).div_ceil(8) as usize
}

/// Strips leading zero bytes.
pub(crate) fn trim_leading_zeros(buf: &[u8]) -> &[u8] {
    let start = buf.iter().position(|b| *b != 0).unwrap_or(buf.len());
    &buf[start..]
}

/// Reads up to 8 big-endian bytes as an integer, leading zeros permitted.
///
/// Returns `None` if the slice is too wide.
pub(crate) fn read_be_u64(buf: &[u8]) -> Option<u64> {
    if buf.len() > 8 {
        return None;
    }

    Some(buf.iter().fold(0, |acc, b| (acc << 8) | *b as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_be_len() {
        assert_eq!(be_len(0), 0);
        assert_eq!(be_len(1), 1);
        assert_eq!(be_len(0xff), 1);
        assert_eq!(be_len(0x100), 2);
        assert_eq!(be_len(0xffff_ffff), 4);
        assert_eq!(be_len(u64::MAX), 8);
    }

    #[test]
    fn test_trim_leading_zeros() {
        assert_eq!(trim_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert!(trim_leading_zeros(&[0, 0]).is_empty());
        assert!(trim_leading_zeros(&[]).is_empty());
    }

    #[test]
    fn test_read_be_u64() {
        assert_eq!(read_be_u64(&[]), Some(0));
        assert_eq!(read_be_u64(&[0x01, 0x00]), Some(256));
        assert_eq!(read_be_u64(&[0x00, 0x38]), Some(56));
        assert_eq!(read_be_u64(&[0xff; 8]), Some(u64::MAX));
        assert_eq!(read_be_u64(&[0x01; 9]), None);
    }
}
