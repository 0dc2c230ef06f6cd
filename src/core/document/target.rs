//! Where encrypted values go in `.travis.yml`.

use std::fmt;

/// Selector for the path that receives an encrypted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertionTarget {
    /// `password.secure`
    Password,
    /// `deploy.password.secure`
    Deploy,
    /// `env.global.secure`, or the first `secure` entry of an `env.global` list
    Env,
    /// `env.global.<NAME>.secure`, used when encrypting a whole `.env` file
    EnvVar(String),
}

/// What an insertion did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A new `secure` key was created.
    Inserted,
    /// An existing `secure` value was replaced in place.
    Overwritten,
    /// `env.global` is a list with no matching entry; a new entry was appended.
    Appended,
}

impl fmt::Display for InsertionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertionTarget::Password => f.write_str("password.secure"),
            InsertionTarget::Deploy => f.write_str("deploy.password.secure"),
            InsertionTarget::Env => f.write_str("env.global.secure"),
            InsertionTarget::EnvVar(name) => write!(f, "env.global.{}.secure", name),
        }
    }
}
