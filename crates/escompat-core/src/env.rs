//! Environment identifiers such as `chrome60` or `safari10.1`.
//!
//! Identifiers are parsed once at the boundary into a browser family and a
//! numeric version; the string form is only kept for display, database keys
//! and usage queries.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

static ENVIRONMENT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z]+)([0-9]+)(?:\.([0-9]+))?$").expect("Invalid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvironmentIdError {
    #[error("'{0}' is not an environment identifier (expected a browser name followed by a version, e.g. chrome60)")]
    Malformed(String),
    #[error("version in '{0}' is out of range")]
    VersionOutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minor == 0 {
            write!(f, "{}", self.major)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for Version {
    type Err = EnvironmentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (s, None),
        };
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(EnvironmentIdError::Malformed(s.to_string()));
            }
            part.parse::<u32>()
                .map_err(|_| EnvironmentIdError::VersionOutOfRange(s.to_string()))
        };

        Ok(Version {
            major: parse(major)?,
            minor: minor.map(parse).transpose()?.unwrap_or(0),
        })
    }
}

/// A browser or runtime at a specific version.
///
/// Ordered by family name, then by version, so sorted collections group
/// versions of the same browser together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvironmentId {
    family: String,
    version: Version,
}

impl EnvironmentId {
    pub fn new(family: impl Into<String>, version: Version) -> Self {
        Self {
            family: family.into().to_ascii_lowercase(),
            version,
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn version(&self) -> Version {
        self.version
    }
}

impl FromStr for EnvironmentId {
    type Err = EnvironmentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = ENVIRONMENT_ID
            .captures(s.trim())
            .ok_or_else(|| EnvironmentIdError::Malformed(s.to_string()))?;

        let number = |index: usize| -> Result<u32, EnvironmentIdError> {
            match captures.get(index) {
                Some(m) => m
                    .as_str()
                    .parse()
                    .map_err(|_| EnvironmentIdError::VersionOutOfRange(s.to_string())),
                None => Ok(0),
            }
        };

        Ok(EnvironmentId::new(
            &captures[1],
            Version::new(number(2)?, number(3)?),
        ))
    }
}

impl fmt::Display for EnvironmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.family, self.version)
    }
}

impl PartialOrd for EnvironmentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvironmentId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.family
            .cmp(&other.family)
            .then(self.version.cmp(&other.version))
    }
}

impl Serialize for EnvironmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EnvironmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Requested environments after validation against a support database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    /// Known environments, deduplicated, in request order.
    pub targets: Vec<EnvironmentId>,
    /// Requested identifiers that were malformed or unknown to the database.
    pub undefined: Vec<String>,
}

impl TargetSelection {
    /// Validates `requested` identifiers with `is_known`.
    ///
    /// Malformed or unknown identifiers are collected in `undefined` and never
    /// take part in compatibility computations.
    pub fn resolve<S, F>(requested: &[S], is_known: F) -> Self
    where
        S: AsRef<str>,
        F: Fn(&EnvironmentId) -> bool,
    {
        let mut selection = TargetSelection::default();

        for raw in requested {
            let raw = raw.as_ref();
            match raw.parse::<EnvironmentId>() {
                Ok(env) if is_known(&env) => {
                    if !selection.targets.contains(&env) {
                        selection.targets.push(env);
                    }
                }
                Ok(_) => {
                    tracing::warn!(environment = raw, "environment is not defined in the database");
                    selection.undefined.push(raw.to_string());
                }
                Err(e) => {
                    tracing::warn!(environment = raw, error = %e, "ignoring malformed environment");
                    selection.undefined.push(raw.to_string());
                }
            }
        }

        selection
    }
}
