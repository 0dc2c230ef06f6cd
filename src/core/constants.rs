//! Constants used throughout travis-encrypt.
//!
//! Centralizes magic strings and configuration values.

use std::time::Duration;

/// CI configuration file name (.travis.yml).
pub const CONFIG_FILE: &str = ".travis.yml";

/// Default Travis CI API base URL.
pub const DEFAULT_API_URL: &str = "https://api.travis-ci.org";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "TRAVIS_ENCRYPT_API_URL";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "TRAVIS_ENCRYPT_LOG";

/// Upper bound on a single key lookup.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with key lookups.
pub const USER_AGENT: &str = concat!("travis-encrypt/", env!("CARGO_PKG_VERSION"));

/// Key under which every encrypted value is stored.
pub const SECURE_KEY: &str = "secure";

/// PKCS#1 v1.5 encryption padding overhead in bytes.
pub const PKCS1_V15_OVERHEAD: usize = 11;
