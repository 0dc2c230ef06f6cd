//! Domain types shared by the key lookup and the CLI.

use std::fmt;

use crate::core::validation;
use crate::error::Result;

/// A repository identifier in `owner/repository` form.
///
/// Both halves are case-sensitive and validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug {
    owner: String,
    repository: String,
}

impl Slug {
    /// Build a slug from its two halves.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSlug` if either half is empty or
    /// contains `/` or whitespace.
    pub fn new(owner: impl Into<String>, repository: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let repository = repository.into();
        validation::validate_slug(&owner, &repository)?;
        Ok(Self { owner, repository })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository)
    }
}
