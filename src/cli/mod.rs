//! Command-line interface.

pub mod clipboard;
pub mod encrypt;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use crate::core::constants::{API_URL_ENV, DEFAULT_API_URL};
use crate::core::document::InsertionTarget;
use crate::core::remote::TravisApi;

/// travis-encrypt - Encrypt passwords and environment variables for Travis CI.
///
/// Fetches the repository's public key from Travis CI and encrypts the
/// secret with it. The result is printed, copied to the clipboard, or
/// written into the given .travis.yml.
#[derive(Parser, Debug)]
#[command(
    name = "travis-encrypt",
    about = "Encrypt passwords and environment variables for use with Travis CI",
    version
)]
pub struct Cli {
    /// GitHub user or organization that owns the repository
    pub username: String,

    /// Repository name (case-sensitive)
    pub repository: String,

    /// .travis.yml to write the encrypted value into
    pub path: Option<PathBuf>,

    /// The password to encrypt (prompted for when omitted)
    #[arg(long, conflicts_with = "env_file")]
    pub password: Option<String>,

    /// Write to deploy.password.secure
    #[arg(long, conflicts_with = "env")]
    pub deploy: bool,

    /// Write to env.global.secure
    #[arg(long)]
    pub env: bool,

    /// Copy the encrypted password to the clipboard
    #[arg(long)]
    pub clipboard: bool,

    /// .env file whose variables are each encrypted
    #[arg(long, value_name = "FILE", conflicts_with_all = ["deploy", "clipboard"])]
    pub env_file: Option<PathBuf>,

    /// Travis CI API base URL
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Where a single encrypted password goes when a path is given.
    pub fn target(&self) -> InsertionTarget {
        if self.deploy {
            InsertionTarget::Deploy
        } else if self.env {
            InsertionTarget::Env
        } else {
            InsertionTarget::Password
        }
    }
}

/// Execute the CLI against the Travis API.
///
/// # Errors
///
/// Returns the first error hit while reading input, looking up the key,
/// encrypting, or updating the configuration file.
pub fn execute(cli: &Cli) -> crate::error::Result<()> {
    let api = TravisApi::new(&cli.api_url)?;
    encrypt::run(cli, &api)
}
