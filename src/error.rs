//! Error types.
//!
//! Each concern has its own error enum; all of them fold into [`Error`]
//! so library functions can return a single [`Result`].

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while looking up a repository's public key.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error(
        "no public key found for user '{owner}' and repository '{repository}' \
         (names are case-sensitive)"
    )]
    InvalidCredentials { owner: String, repository: String },

    #[error("key lookup failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("key lookup failed: {url} returned HTTP {status}")]
    Http { status: u16, url: String },

    #[error("key lookup returned a malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid public key: {0}")]
    InvalidPem(String),
}

/// Errors raised by the RSA encryption step.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("payload too large: {len} bytes, the key accepts at most {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("invalid base64 ciphertext: {0}")]
    InvalidEncoding(String),
}

/// Errors raised while reading, mutating or writing the CI configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write configuration: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(String),

    #[error("cannot insert at '{path}': expected a mapping, found {found}")]
    Shape { path: String, found: &'static str },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid repository slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    #[error("variable name cannot be empty")]
    EmptyKey,

    #[error("invalid variable name '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("value for '{0}' cannot be empty")]
    EmptyValue(String),
}

pub type Result<T> = std::result::Result<T, Error>;
