//! HMAC implementations for various hash algorithms.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::{AlgorithmRegistry, CryptoError, Result};

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

fn mac_hex<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> String {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Generate HMAC-SHA256 signature as a lower-case hex string.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> String {
    mac_hex::<HmacSha256>(key, message)
}

/// Generate HMAC-SHA1 signature as a lower-case hex string.
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> String {
    mac_hex::<HmacSha1>(key, message)
}

/// Generate HMAC-SHA512 signature as a lower-case hex string.
pub fn hmac_sha512(key: &[u8], message: &[u8]) -> String {
    mac_hex::<HmacSha512>(key, message)
}

/// Compute the hex digest of `message` with the algorithm registered as
/// `algorithm_id`.
///
/// # Errors
///
/// [`CryptoError::UnsupportedAlgorithm`] when the identifier is not
/// registered, [`CryptoError::InvalidKey`] when `secret` is empty.
pub fn compute_digest(
    registry: &AlgorithmRegistry,
    algorithm_id: &str,
    secret: &[u8],
    message: &[u8],
) -> Result<String> {
    let algorithm = registry.require(algorithm_id)?;
    if secret.is_empty() {
        return Err(CryptoError::InvalidKey("secret must not be empty".into()));
    }
    Ok(algorithm.digest_hex(secret, message))
}

/// Verify a received hex digest against the expected one.
///
/// # Returns
/// Ok(()) if digests match exactly (case-sensitive), Err otherwise
pub fn verify_signature(expected: &str, received: &str) -> Result<()> {
    if crate::digests_match(expected, received) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DigestAlgorithm;
    use proptest::prelude::*;

    const JEFE: &[u8] = b"Jefe";
    const JEFE_DATA: &[u8] = b"what do ya want for nothing?";

    #[test]
    fn test_hmac_sha1_known_vector() {
        assert_eq!(
            hmac_sha1(JEFE, JEFE_DATA),
            "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79"
        );
    }

    #[test]
    fn test_hmac_sha256_known_vector() {
        assert_eq!(
            hmac_sha256(JEFE, JEFE_DATA),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_hmac_sha512_known_vector() {
        assert_eq!(
            hmac_sha512(JEFE, JEFE_DATA),
            "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
             9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737"
        );
    }

    #[test]
    fn test_compute_digest_webhook_scenario() {
        let registry = AlgorithmRegistry::standard();
        let digest = compute_digest(&registry, "HMAC_SHA256_HEX", b"k1", br#"{"a":1}"#).unwrap();
        assert_eq!(
            digest,
            "47218758515756d868e172a5e0379a167fb10e308111f0ef13b49d5d67d6719b"
        );
    }

    #[test]
    fn test_compute_digest_unknown_algorithm() {
        let registry = AlgorithmRegistry::standard();
        let err = compute_digest(&registry, "HMAC_MD5_HEX", b"k1", b"").unwrap_err();
        assert_eq!(err, CryptoError::UnsupportedAlgorithm("HMAC_MD5_HEX".into()));
    }

    #[test]
    fn test_compute_digest_empty_secret() {
        let registry = AlgorithmRegistry::standard();
        let err = compute_digest(&registry, "HMAC_SHA1_HEX", b"", b"body").unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
    }

    #[test]
    fn test_compute_digest_empty_message() {
        let registry = AlgorithmRegistry::standard();
        let digest = compute_digest(&registry, "HMAC_SHA256_HEX", b"k1", b"").unwrap();
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_verify_signature_match() {
        let sig = hmac_sha256(b"k1", b"body");
        assert!(verify_signature(&sig, &sig).is_ok());
    }

    #[test]
    fn test_verify_signature_mismatch() {
        assert_eq!(
            verify_signature("abc123", "abc124"),
            Err(CryptoError::SignatureMismatch)
        );
    }

    proptest! {
        #[test]
        fn digest_is_deterministic_and_fixed_length(
            secret in proptest::collection::vec(any::<u8>(), 1..64),
            message in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let registry = AlgorithmRegistry::standard();
            for alg in DigestAlgorithm::ALL {
                let first = compute_digest(&registry, alg.id(), &secret, &message).unwrap();
                let second = compute_digest(&registry, alg.id(), &secret, &message).unwrap();
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(first.len(), alg.hex_len());
                prop_assert!(first.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
            }
        }
    }
}
