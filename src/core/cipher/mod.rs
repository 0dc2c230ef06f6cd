//! RSA encryption of secrets for Travis CI.
//!
//! Travis CI decrypts `secure:` values with the repository's private key
//! and only accepts RSA with PKCS#1 v1.5 padding.
//!
//! ## Pipeline
//!
//! 1. [`PublicKey::from_pem`] parses the PEM text returned by the key lookup
//! 2. [`encrypt_key`] encrypts the plaintext under that key
//! 3. [`EncryptedPayload::to_base64`] produces the text stored in `.travis.yml`

mod key;
mod payload;
mod pkcs1;

pub use key::PublicKey;
pub use payload::EncryptedPayload;
pub use pkcs1::encrypt_key;
