//! RSA public key parsing.

use std::borrow::Cow;

use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use tracing::{debug, trace};

use crate::core::constants::PKCS1_V15_OVERHEAD;
use crate::error::{KeyError, Result};

const BEGIN: &str = "-----BEGIN ";
const END: &str = "-----END ";
const BOUNDARY_TAIL: &str = "-----";
const SPKI_LABEL: &str = "PUBLIC KEY";

/// A deserialized RSA public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    inner: RsaPublicKey,
}

impl PublicKey {
    /// Parse a PEM encoded RSA public key.
    ///
    /// Travis returns SubjectPublicKeyInfo bodies framed as
    /// `-----BEGIN RSA PUBLIC KEY-----`, which strict parsers reject. The
    /// qualifier is stripped from both boundaries before parsing. Keys whose
    /// body really is PKCS#1 are parsed from the untouched text instead.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidPem` if the text is empty or is not an RSA
    /// public key in either encoding.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let pem = pem.trim();
        if pem.is_empty() {
            return Err(KeyError::InvalidPem("empty key".to_string()).into());
        }

        let normalized = normalize_pem(pem);
        let spki_err = match RsaPublicKey::from_public_key_pem(&normalized) {
            Ok(inner) => {
                debug!(bits = inner.size() * 8, "parsed public key");
                return Ok(Self { inner });
            }
            Err(e) => e,
        };

        trace!(error = %spki_err, "not a SubjectPublicKeyInfo key, trying PKCS#1");
        let inner = RsaPublicKey::from_pkcs1_pem(pem)
            .map_err(|_| KeyError::InvalidPem(spki_err.to_string()))?;
        debug!(bits = inner.size() * 8, "parsed PKCS#1 public key");

        Ok(Self { inner })
    }

    /// Modulus size in bytes; every ciphertext has exactly this length.
    pub fn modulus_len(&self) -> usize {
        self.inner.size()
    }

    /// Largest plaintext PKCS#1 v1.5 can encrypt under this key.
    pub fn max_plaintext_len(&self) -> usize {
        self.modulus_len().saturating_sub(PKCS1_V15_OVERHEAD)
    }

    pub(crate) fn rsa(&self) -> &RsaPublicKey {
        &self.inner
    }
}

impl From<RsaPublicKey> for PublicKey {
    fn from(inner: RsaPublicKey) -> Self {
        Self { inner }
    }
}

/// Rewrite `BEGIN/END <qualifier> PUBLIC KEY` boundaries to plain `PUBLIC KEY`.
fn normalize_pem(pem: &str) -> String {
    let mut out = String::with_capacity(pem.len() + 1);
    for line in pem.lines() {
        out.push_str(&normalize_boundary(line.trim()));
        out.push('\n');
    }
    out
}

fn normalize_boundary(line: &str) -> Cow<'_, str> {
    for marker in [BEGIN, END] {
        let label = line
            .strip_prefix(marker)
            .and_then(|rest| rest.strip_suffix(BOUNDARY_TAIL));

        if let Some(label) = label {
            if label != SPKI_LABEL && label.ends_with(SPKI_LABEL) {
                return Cow::Owned(format!("{}{}{}", marker, SPKI_LABEL, BOUNDARY_TAIL));
            }
        }
    }
    Cow::Borrowed(line)
}
