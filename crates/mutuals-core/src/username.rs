//! Account identifiers.

use std::borrow::Borrow;
use std::fmt;

use mutuals_util::errors::MutualsError;
use serde::{Deserialize, Serialize};

/// An account name as reported by the provider.
///
/// Usernames are opaque keys: comparison is exact and case-sensitive, and
/// no normalization happens beyond trimming when parsed from user input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Parse a username typed on the command line.
    ///
    /// Surrounding whitespace and a leading `@` are stripped; an empty
    /// result is rejected.
    pub fn parse(input: &str) -> Result<Self, MutualsError> {
        let trimmed = input.trim();
        let name = trimmed.strip_prefix('@').unwrap_or(trimmed);
        if name.is_empty() {
            return Err(MutualsError::Generic {
                message: format!("Invalid username '{input}'"),
            });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Username {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Username {
    fn from(name: String) -> Self {
        Self(name)
    }
}
