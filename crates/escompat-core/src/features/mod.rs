//! Feature detectors
//!
//! Each detector recognizes one syntax construct on a lowered [`SyntaxNode`]
//! given its parent. Detectors are grouped by the edition that introduced the
//! construct and by feature family; the grouping is only used for listings
//! and configuration.

pub mod es2016;
pub mod es2017;
pub mod es2018;
pub mod es2019;
pub mod es2020;
pub mod es2021;
pub mod es2022;
pub mod es6;

use std::borrow::{Borrow, Cow};
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::FeaturesConfig;
use crate::records::MatchRecord;
use crate::syntax::SyntaxNode;

/// Stable name of a detectable feature, e.g. `computedShorthandMethods`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(Cow<'static, str>);

impl FeatureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FeatureId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for FeatureId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Edition {
    Es6,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
}

impl Edition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Edition::Es6 => "es6",
            Edition::Es2016 => "es2016",
            Edition::Es2017 => "es2017",
            Edition::Es2018 => "es2018",
            Edition::Es2019 => "es2019",
            Edition::Es2020 => "es2020",
            Edition::Es2021 => "es2021",
            Edition::Es2022 => "es2022",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureMetadata {
    pub id: &'static str,
    pub edition: Edition,
    pub family: &'static str,
    pub description: &'static str,
    pub example: Option<&'static str>,
}

impl FeatureMetadata {
    pub fn feature_id(&self) -> FeatureId {
        FeatureId::from_static(self.id)
    }
}

/// Recognizes one syntax construct.
///
/// `matches` must only look at `node` and `parent`, and no two registered
/// detectors may match the same node.
pub trait Detector: Send + Sync {
    fn metadata(&self) -> &FeatureMetadata;

    fn matches(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> bool;

    fn detect(&self, node: &SyntaxNode, parent: Option<&SyntaxNode>) -> Option<MatchRecord> {
        if !self.matches(node, parent) {
            return None;
        }

        Some(MatchRecord {
            range: node.range,
            location: node.location,
            feature: self.metadata().feature_id(),
        })
    }
}

/// Features of one family, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyGroup<'a> {
    pub name: &'static str,
    pub features: Vec<&'a FeatureMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditionGroup<'a> {
    pub edition: Edition,
    pub families: Vec<FamilyGroup<'a>>,
}

pub struct FeatureRegistry {
    detectors: Vec<Box<dyn Detector>>,
    disabled: HashSet<String>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            disabled: HashSet::new(),
        }
    }

    /// A registry holding every built-in detector.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        es6::register(&mut registry);
        es2016::register(&mut registry);
        es2017::register(&mut registry);
        es2018::register(&mut registry);
        es2019::register(&mut registry);
        es2020::register(&mut registry);
        es2021::register(&mut registry);
        es2022::register(&mut registry);
        registry
    }

    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Disables detectors named in `config` by feature id, family or edition.
    pub fn configure(&mut self, config: &FeaturesConfig) {
        self.disabled.clear();

        for name in &config.disabled {
            if !self.names_anything(name) {
                tracing::warn!(feature = %name, "disabled entry matches no feature or family");
            }
            self.disabled.insert(name.clone());
        }
    }

    fn names_anything(&self, name: &str) -> bool {
        self.detectors.iter().any(|d| {
            let metadata = d.metadata();
            metadata.id == name || metadata.family == name || metadata.edition.as_str() == name
        })
    }

    pub fn detectors(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors.iter().map(|d| d.as_ref())
    }

    pub fn enabled(&self) -> impl Iterator<Item = &dyn Detector> {
        self.detectors()
            .filter(|d| !self.is_disabled(d.metadata()))
    }

    fn is_disabled(&self, metadata: &FeatureMetadata) -> bool {
        self.disabled.contains(metadata.id)
            || self.disabled.contains(metadata.family)
            || self.disabled.contains(metadata.edition.as_str())
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.get(id)
            .is_some_and(|detector| !self.is_disabled(detector.metadata()))
    }

    pub fn get(&self, id: &str) -> Option<&dyn Detector> {
        self.detectors()
            .find(|d| d.metadata().id == id)
    }

    /// Groups metadata by edition, then family, keeping registration order.
    pub fn tree(&self, enabled_only: bool) -> Vec<EditionGroup<'_>> {
        let mut editions: Vec<EditionGroup<'_>> = Vec::new();

        for detector in self.detectors() {
            let metadata = detector.metadata();
            if enabled_only && self.is_disabled(metadata) {
                continue;
            }

            let edition = match editions.iter().position(|e| e.edition == metadata.edition) {
                Some(index) => &mut editions[index],
                None => {
                    editions.push(EditionGroup {
                        edition: metadata.edition,
                        families: Vec::new(),
                    });
                    let last = editions.len() - 1;
                    &mut editions[last]
                }
            };

            match edition.families.iter_mut().find(|f| f.name == metadata.family) {
                Some(family) => family.features.push(metadata),
                None => edition.families.push(FamilyGroup {
                    name: metadata.family,
                    features: vec![metadata],
                }),
            }
        }

        editions
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[macro_export]
macro_rules! declare_feature {
    (
        $name:ident,
        id = $id:literal,
        edition = $edition:ident,
        family = $family:literal,
        description = $desc:literal
        $(, example = $example:literal)?
    ) => {
        pub struct $name {
            metadata: $crate::features::FeatureMetadata,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    metadata: $crate::features::FeatureMetadata {
                        id: $id,
                        edition: $crate::features::Edition::$edition,
                        family: $family,
                        description: $desc,
                        example: $crate::declare_feature!(@example $($example)?),
                    },
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
    (@example $example:literal) => { Some($example) };
    (@example) => { None };
}
