//! Encrypt command.
//!
//! Reads the secret, fetches the repository key, encrypts, and delivers
//! the ciphertext to stdout, the clipboard, or `.travis.yml`.

use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::Password;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{clipboard, output, Cli};
use crate::core::cipher::{encrypt_key, PublicKey};
use crate::core::document::{ConfigDocument, InsertionTarget, Placement};
use crate::core::env::EnvFile;
use crate::core::remote::{retrieve_public_key, KeySource};
use crate::core::types::Slug;
use crate::core::validation;
use crate::error::Result;

/// Run the encrypt flow described by `cli`, fetching keys from `source`.
pub fn run(cli: &Cli, source: &dyn KeySource) -> Result<()> {
    let slug = Slug::new(cli.username.as_str(), cli.repository.as_str())?;

    match &cli.env_file {
        Some(env_file) => {
            let env = EnvFile::load(env_file)?;
            let key = retrieve_public_key(source, &slug)?;
            info!(slug = %slug, variables = env.len(), "encrypting env file");
            encrypt_env_file(cli, &key, &env)
        }
        None => {
            let password = read_password(cli)?;
            let key = retrieve_public_key(source, &slug)?;
            info!(slug = %slug, slot = %cli.target(), "encrypting password");
            encrypt_password(cli, &key, &password)
        }
    }
}

/// Password from `--password`, piped stdin, or a hidden prompt.
fn read_password(cli: &Cli) -> Result<Zeroizing<String>> {
    let password = match &cli.password {
        Some(password) => Zeroizing::new(password.clone()),
        None if !io::stdin().is_terminal() => {
            let mut input = Zeroizing::new(String::new());
            io::stdin().read_line(&mut input)?;
            let len = input.trim_end_matches(|c: char| c == '\r' || c == '\n').len();
            input.truncate(len);
            input
        }
        None => Zeroizing::new(Password::new().with_prompt("Password").interact()?),
    };

    validation::validate_value("password", &password)?;
    Ok(password)
}

fn encrypt_password(cli: &Cli, key: &PublicKey, password: &str) -> Result<()> {
    let encrypted = encrypt_key(key, password.as_bytes())?.to_base64();

    if let Some(path) = &cli.path {
        let placement = write_values(path, [(cli.target(), encrypted.as_str())])?;
        if placement == Placement::Appended {
            output::warn("env.global has no entry with a secure key, appended a new one");
        }
        output::success(&format!(
            "Encrypted password added to {}",
            output::path(&path.display().to_string())
        ));
    } else if cli.clipboard {
        clipboard::copy(&encrypted)?;
        output::success("The encrypted password has been copied to your clipboard.");
    } else {
        output::paste_header();
        println!("secure: {}", encrypted);
    }

    Ok(())
}

fn encrypt_env_file(cli: &Cli, key: &PublicKey, env: &EnvFile) -> Result<()> {
    if env.is_empty() {
        output::warn(&format!(
            "no variables found in {}",
            output::path(&env.path().display().to_string())
        ));
        return Ok(());
    }

    // Encrypt everything before touching the file so a failure midway
    // leaves it as it was.
    let encrypted = env
        .entries()
        .iter()
        .map(|(name, value)| Ok((name.as_str(), encrypt_key(key, value.as_bytes())?.to_base64())))
        .collect::<Result<Vec<_>>>()?;

    match &cli.path {
        Some(path) => {
            write_values(
                path,
                encrypted.iter().map(|(name, value)| {
                    (InsertionTarget::EnvVar(name.to_string()), value.as_str())
                }),
            )?;
            output::success(&format!(
                "Encrypted variables from {} added to {}",
                output::path(&env.path().display().to_string()),
                output::path(&path.display().to_string())
            ));
        }
        None => {
            output::paste_header();
            for (name, value) in &encrypted {
                println!("{}:\n  secure: {}", output::key(name), value);
            }
        }
    }

    Ok(())
}

/// Load `path`, apply every insertion, then save once.
///
/// Returns the placement of the last insertion.
fn write_values<'a>(
    path: &Path,
    values: impl IntoIterator<Item = (InsertionTarget, &'a str)>,
) -> Result<Placement> {
    let mut doc = ConfigDocument::load(path)?;

    let mut placement = Placement::Inserted;
    for (target, ciphertext) in values {
        placement = doc.insert_secure_value(&target, ciphertext)?;
    }

    doc.save(path)?;
    Ok(placement)
}
