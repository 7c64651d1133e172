use sha2::{Digest, Sha256};

/// Hash a credential for storage
///
/// Computes `SHA256(credential)` as a hex string. Only the digest is ever
/// written to the store; the plaintext never leaves the caller.
///
/// # Security Note
/// The digest is unsalted, so identical passwords hash identically across
/// accounts. A salted or memory-hard scheme would be the next hardening
/// step if the account collection grows beyond a small campaign group.
pub fn hash_credential(credential: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(credential.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a candidate credential against a stored hash
///
/// Plain string equality of hex digests. Comparison timing is dominated by
/// the store round-trip that precedes it, so a constant-time compare is a
/// hardening opportunity rather than a requirement here.
pub fn credential_matches(credential: &str, stored_hash: &str) -> bool {
    hash_credential(credential) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_credential_format() {
        let digest = hash_credential("sol123");

        // Valid SHA-256 hex string
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_credential_deterministic() {
        assert_eq!(hash_credential("abcd"), hash_credential("abcd"));
    }

    #[test]
    fn test_hash_credential_different_inputs() {
        assert_ne!(hash_credential("abcd"), hash_credential("abce"));
    }

    #[test]
    fn test_hash_credential_known_value() {
        // SHA256("") is a well-known constant
        assert_eq!(
            hash_credential(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_credential_matches() {
        let stored = hash_credential("sol123");

        assert!(credential_matches("sol123", &stored));
        assert!(!credential_matches("sol124", &stored));
        assert!(!credential_matches("", &stored));
    }
}
