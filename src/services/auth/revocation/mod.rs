pub mod cached;
pub mod store;

pub use cached::CacheRevocationStore;
pub use store::{RevocationError, RevocationStore};

/// Stable, non-reversible key for a bearer token: base64url(SHA-256(token)).
pub fn token_fingerprint(token: &str) -> String {
    use base64::Engine as _;
    use sha2::{Digest, Sha256};

    let digest = Sha256::digest(token.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_deterministic_and_opaque() {
        let a = token_fingerprint("header.payload.signature");
        assert_eq!(a, token_fingerprint("header.payload.signature"));
        assert_ne!(a, token_fingerprint("header.payload.signaturf"));
        assert!(!a.contains("payload"));
        // 32 bytes, unpadded base64url
        assert_eq!(a.len(), 43);
    }
}
