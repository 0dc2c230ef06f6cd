//! PKCS#1 v1.5 encryption.

use rsa::Pkcs1v15Encrypt;
use tracing::trace;

use super::{EncryptedPayload, PublicKey};
use crate::error::{CipherError, Result};

/// Encrypt `plaintext` under `key` with RSA and PKCS#1 v1.5 padding.
///
/// The padding is randomized, so encrypting the same plaintext twice gives
/// different ciphertexts. Every ciphertext is exactly `key.modulus_len()`
/// bytes long.
///
/// # Errors
///
/// Returns `CipherError::PayloadTooLarge` if the plaintext exceeds
/// `key.max_plaintext_len()`, or `CipherError::EncryptionFailed` if the RSA
/// operation itself fails.
pub fn encrypt_key(key: &PublicKey, plaintext: &[u8]) -> Result<EncryptedPayload> {
    let max = key.max_plaintext_len();
    trace!(
        plaintext_len = plaintext.len(),
        max_len = max,
        "encrypting"
    );

    if plaintext.len() > max {
        return Err(CipherError::PayloadTooLarge {
            len: plaintext.len(),
            max,
        }
        .into());
    }

    let mut rng = rand::thread_rng();
    let ciphertext = key
        .rsa()
        .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext)
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    trace!(ciphertext_len = ciphertext.len(), "encrypted");

    Ok(EncryptedPayload::new(ciphertext))
}
