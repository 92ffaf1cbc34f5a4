//! Zeroizing container for secret byte strings

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Variable-length secret byte buffer, zeroized on drop.
///
/// Used for every secret that leaves the big-integer layer as bytes: SEC1
/// private-scalar encodings, ECDH shared secrets and derived AEAD keys.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
    data: Vec<u8>,
}

impl SecretBytes {
    /// Wrap an existing byte vector. The vector is owned from here on and
    /// cleared when the wrapper is dropped.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the secret content.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

// Debug must never print key material.
impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes({} bytes, [REDACTED])", self.data.len())
    }
}

impl PartialEq for SecretBytes {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for SecretBytes {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_content() {
        let secret = SecretBytes::new(vec![0xAA; 4]);
        let rendered = format!("{:?}", secret);
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("AA"));
    }

    #[test]
    fn exposes_content_by_reference() {
        let secret = SecretBytes::new(vec![1, 2, 3]);
        assert_eq!(secret.as_slice(), &[1, 2, 3]);
        assert_eq!(secret.len(), 3);
        assert!(!secret.is_empty());
    }
}
