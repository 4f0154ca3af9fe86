use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::Error as CrateError;

// Lazy prefix, three dot separated numbers (possibly empty), trailing non-digits.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^0-9]*?)([0-9]*?)\.([0-9]*?)\.([0-9]*)([^0-9]*)").expect("tag pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{0}' does not look like a version tag")]
    NoMatch(String),
    #[error("invalid {field} '{value}' in tag '{tag}': {source}")]
    InvalidNumber {
        tag: String,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BumpLevel {
    Major,
    Minor,
    Patch,
}

/// A `major.minor.patch` triple with the free-form text found around it in a tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub prefix: String,
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub suffix: String,
}

impl Version {
    pub fn new(prefix: impl Into<String>, major: u64, minor: u64, patch: u64, suffix: impl Into<String>) -> Self {
        Version { prefix: prefix.into(), major, minor, patch, suffix: suffix.into() }
    }

    /// The version assumed when a repository has no version tags yet
    pub fn initial() -> Self {
        Version::new("v", 0, 0, 0, "")
    }

    pub fn parse(tag: &str) -> Result<Self, ParseError> {
        let captures = TAG_REGEX.captures(tag).ok_or_else(|| ParseError::NoMatch(tag.to_string()))?;
        let text = |index: usize| captures.get(index).map_or("", |m| m.as_str());
        let number = |index: usize, field: &'static str| {
            let value = text(index);
            value.parse::<u64>().map_err(|source| ParseError::InvalidNumber {
                tag: tag.to_string(),
                field,
                value: value.to_string(),
                source,
            })
        };

        Ok(Version {
            prefix: text(1).to_string(),
            major: number(2, "major")?,
            minor: number(3, "minor")?,
            patch: number(4, "patch")?,
            suffix: text(5).to_string(),
        })
    }

    /// Compares the numeric triple only, prefix and suffix are ignored.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }

    /// Increments the requested field and resets every lower one to zero.
    ///
    /// Leaves the version untouched when the field is already at its maximum.
    pub fn bump(&mut self, level: BumpLevel) -> Result<(), CrateError> {
        let overflow = |field: &'static str| CrateError::Overflow { tag: self.to_string(), field };
        let (major, minor, patch) = match level {
            BumpLevel::Major => (self.major.checked_add(1).ok_or_else(|| overflow("major"))?, 0, 0),
            BumpLevel::Minor => (self.major, self.minor.checked_add(1).ok_or_else(|| overflow("minor"))?, 0),
            BumpLevel::Patch => (self.major, self.minor, self.patch.checked_add(1).ok_or_else(|| overflow("patch"))?),
        };
        self.major = major;
        self.minor = minor;
        self.patch = patch;
        Ok(())
    }
}

/// Sorts highest precedence first, keeping the input order of equal triples.
pub fn sort_descending(versions: &mut [Version]) {
    versions.sort_by(|a, b| b.cmp_precedence(a));
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}.{}.{}{}", self.prefix, self.major, self.minor, self.patch, self.suffix)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}
