//! travis-encrypt - Encrypt passwords and environment variables for Travis CI.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # Single value and .env bulk flows
//! │   ├── clipboard     # Clipboard hand-off
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── cipher/       # RSA public keys and PKCS#1 v1.5 encryption
//!     ├── remote        # Public key lookup against the Travis API
//!     ├── document/     # Order-preserving .travis.yml editing
//!     ├── env           # .env file parsing
//!     └── validation    # Slug and variable name checks
//! ```
//!
//! # Flow
//!
//! 1. Fetch the repository's public key from `<api>/repos/<owner>/<repo>/key`
//! 2. Encrypt the secret with RSA and PKCS#1 v1.5 padding, base64 encode it
//! 3. Print it, copy it, or write it into `.travis.yml` under a `secure` key

pub mod cli;
pub mod core;
pub mod error;
