//! Credential digest and verification.
//!
//! Secrets are stored as SHA-256 hex digests; verification recomputes the
//! digest and compares equality. The digest scheme is part of the stored
//! data contract.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a secret, as stored in `password_hash`.
#[must_use]
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a plain secret against a stored digest.
#[must_use]
pub fn verify_secret(secret: &str, stored_digest: &str) -> bool {
    hash_secret(secret) == stored_digest
}

#[cfg(test)]
mod tests {
    use super::{hash_secret, verify_secret};

    #[test]
    fn digest_is_sha256_hex() {
        // Known SHA-256 of "pass123".
        assert_eq!(
            hash_secret("pass123"),
            "9b8769a4a742959a2d0298c36fb70623f2dfacda8436237df08d8dfd5b37374c"
        );
    }

    #[test]
    fn verification_matches_only_the_original_secret() {
        let digest = hash_secret("student1");
        assert!(verify_secret("student1", &digest));
        assert!(!verify_secret("student2", &digest));
        assert!(!verify_secret("", &digest));
    }
}
