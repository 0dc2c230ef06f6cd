//! Public key lookup.
//!
//! Travis CI publishes each repository's RSA public key at
//! `GET <api>/repos/<owner>/<repo>/key` as `{"key": "<PEM>"}`. A body
//! without `key` means the repository is unknown to Travis.

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::core::cipher::PublicKey;
use crate::core::constants::{REQUEST_TIMEOUT, USER_AGENT};
use crate::core::types::Slug;
use crate::error::{KeyError, Result};

/// Source of PEM encoded repository keys.
///
/// Implemented by [`TravisApi`] and by stubs in tests.
pub trait KeySource {
    /// Fetch the PEM text of the public key for `slug`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidCredentials` if the provider has no key for
    /// the slug, or a transport error if the lookup could not complete.
    fn fetch_pem(&self, slug: &Slug) -> Result<String>;
}

/// Blocking client for the Travis CI key endpoint.
#[derive(Debug)]
pub struct TravisApi {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct KeyResponse {
    #[serde(default)]
    key: Option<String>,
}

impl TravisApi {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Request` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(KeyError::Request)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Key lookup URL for `slug`.
    pub fn key_url(&self, slug: &Slug) -> String {
        format!(
            "{}/repos/{}/{}/key",
            self.base_url.trim_end_matches('/'),
            slug.owner(),
            slug.repository()
        )
    }
}

impl KeySource for TravisApi {
    fn fetch_pem(&self, slug: &Slug) -> Result<String> {
        let url = self.key_url(slug);
        debug!(url = %url, "fetching public key");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(KeyError::Request)?;

        let status = response.status();
        let body = response.text().map_err(KeyError::Request)?;
        debug!(status = status.as_u16(), body_len = body.len(), "key lookup returned");

        interpret_response(slug, &url, status.as_u16(), status.is_success(), &body)
    }
}

/// Map a key endpoint response to a PEM string or a typed error.
///
/// Any JSON object without `key` is an unknown repository, whatever the
/// status code. Bodies that are not JSON are transport failures.
fn interpret_response(
    slug: &Slug,
    url: &str,
    status: u16,
    success: bool,
    body: &str,
) -> Result<String> {
    match serde_json::from_str::<KeyResponse>(body) {
        Ok(KeyResponse { key: Some(key) }) => Ok(key),
        Ok(KeyResponse { key: None }) => Err(KeyError::InvalidCredentials {
            owner: slug.owner().to_string(),
            repository: slug.repository().to_string(),
        }
        .into()),
        Err(e) if success => Err(KeyError::MalformedResponse(e.to_string()).into()),
        Err(_) => Err(KeyError::Http {
            status,
            url: url.to_string(),
        }
        .into()),
    }
}

/// Fetch and parse the public key for `slug`.
///
/// # Errors
///
/// Propagates lookup errors from `source` and `KeyError::InvalidPem` if the
/// returned text is not an RSA public key.
pub fn retrieve_public_key(source: &dyn KeySource, slug: &Slug) -> Result<PublicKey> {
    let pem = source.fetch_pem(slug)?;
    PublicKey::from_pem(&pem)
}
