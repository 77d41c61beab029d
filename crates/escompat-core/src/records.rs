//! Match and error records produced by detection and resolution.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::env::EnvironmentId;
use crate::features::FeatureId;

/// Bytes shown for a match that only knows where it starts.
pub const SNIPPET_FALLBACK_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

/// Byte offsets of a match. `end` is absent when only the start is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl SourceRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    pub fn starting_at(start: usize) -> Self {
        Self { start, end: None }
    }
}

impl Serialize for SourceRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.end {
            Some(end) => [self.start, end].serialize(serializer),
            None => [self.start].serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub range: SourceRange,
    pub location: SourceLocation,
    #[serde(rename = "type")]
    pub feature: FeatureId,
}

impl MatchRecord {
    /// The source text covered by this match.
    pub fn snippet<'s>(&self, source: &'s str) -> &'s str {
        snippet(source, &self.range)
    }
}

/// Slices `source` at `range`, falling back to [`SNIPPET_FALLBACK_LEN`] bytes
/// when the range has no end. The slice never extends past the last byte of
/// the source and is narrowed to character boundaries.
pub fn snippet<'s>(source: &'s str, range: &SourceRange) -> &'s str {
    if source.is_empty() {
        return "";
    }

    let (start, end) = match range.end {
        Some(end) => (range.start, end.min(source.len())),
        None => {
            let max_offset = source.len() - 1;
            (
                range.start,
                (range.start + SNIPPET_FALLBACK_LEN).min(max_offset),
            )
        }
    };

    let start = floor_char_boundary(source, start.min(source.len()));
    let end = floor_char_boundary(source, end);
    if start >= end {
        return "";
    }
    &source[start..end]
}

fn floor_char_boundary(source: &str, mut index: usize) -> usize {
    while index > 0 && !source.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Matches found in one file, grouped by feature in detection order.
pub type FeatureReport = BTreeMap<FeatureId, Vec<MatchRecord>>;

/// Key of an entry in a file's error map.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
    Parse,
    Feature(FeatureId),
}

impl ErrorKey {
    pub const PARSE_SENTINEL: &'static str = "<parse>";
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKey::Parse => f.write_str(Self::PARSE_SENTINEL),
            ErrorKey::Feature(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for ErrorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "camelCase")]
pub enum ErrorRecord {
    FeatureUndefined {
        feature: FeatureId,
    },
    Parse {
        #[serde(rename = "msg")]
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Incompatibility {
        feature: FeatureId,
        #[serde(rename = "features")]
        matches: Vec<MatchRecord>,
        incompat_envs: Vec<EnvironmentId>,
        partial_envs: Vec<EnvironmentId>,
    },
}

impl ErrorRecord {
    pub fn key(&self) -> ErrorKey {
        match self {
            ErrorRecord::Parse { .. } => ErrorKey::Parse,
            ErrorRecord::FeatureUndefined { feature }
            | ErrorRecord::Incompatibility { feature, .. } => ErrorKey::Feature(feature.clone()),
        }
    }

    /// Environments this record marks as fully incompatible.
    pub fn incompat_envs(&self) -> &[EnvironmentId] {
        match self {
            ErrorRecord::Incompatibility { incompat_envs, .. } => incompat_envs,
            _ => &[],
        }
    }
}

/// Error records of one file, keyed by feature (or the parse sentinel).
pub type FileErrors = BTreeMap<ErrorKey, ErrorRecord>;
