//! Namespaced asset codes (`domain:path`)

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::ShapeError;

/// Domain used when a code is written without one and no other domain applies.
pub const DEFAULT_DOMAIN: &str = "game";

/// A namespaced identifier such as `drafts:pipe-straight`.
///
/// A code parsed from text without a `domain:` prefix is *unqualified*: its
/// domain is empty until [`AssetCode::qualify`] assigns the domain of the
/// document it was read from. Ordering compares the domain first, then the
/// path, both ordinally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetCode {
    domain: String,
    path: String,
}

impl AssetCode {
    /// Create a fully qualified code. Domain and path are lower-cased, as when parsed.
    pub fn new(domain: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            domain: domain.into().to_lowercase(),
            path: path.into().to_lowercase(),
        }
    }

    /// Parse `domain:path` or a bare `path`, falling back to `default_domain`.
    pub fn parse_in(text: &str, default_domain: &str) -> Result<Self, ShapeError> {
        let mut code: AssetCode = text.parse()?;
        code.qualify(default_domain);
        Ok(code)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `true` when the code was written without a domain and has not been qualified yet.
    pub fn is_unqualified(&self) -> bool {
        self.domain.is_empty()
    }

    /// Assign `domain` if this code has none. Qualified codes are left untouched.
    pub fn qualify(&mut self, domain: &str) {
        if self.domain.is_empty() {
            self.domain = domain.to_lowercase();
        }
    }

    /// Builder form of [`qualify`](Self::qualify).
    pub fn qualified(mut self, domain: &str) -> Self {
        self.qualify(domain);
        self
    }

    /// `true` if the path contains a `*` glob.
    pub fn is_wildcard(&self) -> bool {
        self.path.contains('*')
    }

    /// Test `other` against this code, treating a single `*` in the path as a glob.
    ///
    /// Domains must match exactly.
    pub fn matches_wildcard(&self, other: &AssetCode) -> bool {
        if self.domain != other.domain {
            return false;
        }
        match self.path.split_once('*') {
            None => self.path == other.path,
            Some((prefix, suffix)) => {
                other.path.len() >= prefix.len() + suffix.len()
                    && other.path.starts_with(prefix)
                    && other.path.ends_with(suffix)
            }
        }
    }

    /// First character of the path, used to name pattern parts.
    pub fn initial(&self) -> char {
        self.path.chars().next().unwrap_or('_')
    }
}

impl Ord for AssetCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.domain
            .cmp(&other.domain)
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for AssetCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for AssetCode {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (domain, path) = match s.split_once(':') {
            Some((domain, path)) => (domain, path),
            None => ("", s),
        };
        if path.is_empty() || path.contains(':') {
            return Err(ShapeError::InvalidCode(s.to_string()));
        }
        Ok(Self::new(domain, path))
    }
}

impl TryFrom<String> for AssetCode {
    type Error = ShapeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AssetCode> for String {
    fn from(code: AssetCode) -> Self {
        code.to_string()
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.domain.is_empty() {
            f.write_str(&self.path)
        } else {
            write!(f, "{}:{}", self.domain, self.path)
        }
    }
}
