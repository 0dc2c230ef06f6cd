//! travis-encrypt - Encrypt passwords and environment variables for Travis CI.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use travis_encrypt::cli::{execute, output, Cli};
use travis_encrypt::core::constants::LOG_ENV;
use travis_encrypt::error::{CipherError, ConfigError, Error, KeyError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("travis_encrypt=debug")
        } else {
            EnvFilter::new("travis_encrypt=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(&cli) {
        let suggestion = match &e {
            Error::Key(KeyError::InvalidCredentials { .. }) => {
                Some("check the spelling and letter case of the username and repository")
            }
            Error::Key(KeyError::Request(_)) | Error::Key(KeyError::Http { .. }) => {
                Some("check your network connection or the --api-url setting")
            }
            Error::Config(ConfigError::Shape { .. }) => {
                Some("edit the file so that path holds a mapping, then run again")
            }
            Error::Config(ConfigError::Parse(_)) => Some("fix the YAML syntax and run again"),
            Error::Cipher(CipherError::PayloadTooLarge { .. }) => {
                Some("Travis keys only fit short secrets; encrypt large files with `travis encrypt-file`")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
