//! Core library components.
//!
//! Key lookup, RSA encryption, `.env` parsing, and `.travis.yml` editing.
//! Nothing in here prints; the CLI layer owns all terminal output.

pub mod cipher;
pub mod constants;
pub mod document;
pub mod env;
pub mod remote;
pub mod types;
pub mod validation;
