use std::fmt;

use md5::{Digest, Md5};

/// MD5 digest of a file's primary content.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentChecksum([u8; 16]);

impl ContentChecksum {
    /// Compute the MD5 digest of the given data.
    pub fn compute(data: &[u8]) -> Self {
        let digest = Md5::digest(data);
        Self(digest.into())
    }

    /// Return the checksum as a 32-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bytes as they are kept in a record's `md5Content`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Compare against checksum bytes as they are kept on a record.
    pub fn matches(&self, stored: &[u8]) -> bool {
        self.0.as_slice() == stored
    }
}

impl fmt::Debug for ContentChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentChecksum({})", self.to_hex())
    }
}

impl fmt::Display for ContentChecksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_matches_known_digest() {
        // RFC 1321 test suite
        assert_eq!(
            ContentChecksum::compute(b"").to_hex(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
        assert_eq!(
            ContentChecksum::compute(b"abc").to_hex(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn compute_differs_for_different_data() {
        let h1 = ContentChecksum::compute(b"hello");
        let h2 = ContentChecksum::compute(b"world");
        assert_ne!(h1, h2);
    }

    #[test]
    fn matches_stored_bytes() {
        let checksum = ContentChecksum::compute(b"stored content");
        let stored = checksum.to_vec();
        assert_eq!(stored.len(), 16);
        assert!(checksum.matches(&stored));
        assert!(!checksum.matches(&stored[..8]));
        assert!(!ContentChecksum::compute(b"other").matches(&stored));
    }

    #[test]
    fn display_matches_to_hex() {
        let checksum = ContentChecksum::compute(b"display test");
        assert_eq!(format!("{checksum}"), checksum.to_hex());
        assert_eq!(
            format!("{checksum:?}"),
            format!("ContentChecksum({})", checksum.to_hex())
        );
    }
}
