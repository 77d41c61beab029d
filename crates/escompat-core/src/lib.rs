//! escompat core
//!
//! Detects which modern JavaScript syntax features a file uses and checks
//! them against a table of browser support.

pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod coverage;
pub mod database;
pub mod env;
pub mod features;
pub mod parser;
pub mod records;
pub mod resolver;
pub mod syntax;
pub mod usage;
pub mod visitor;

pub use aggregate::{Aggregator, GlobalErrorMap};
pub use analysis::AnalysisEngine;
pub use coverage::CoverageResult;
pub use database::{CompatTable, FeatureSupport, SupportDatabase};
pub use env::{EnvironmentId, Version};
pub use features::{FeatureId, FeatureRegistry};
pub use records::{ErrorKey, ErrorRecord, MatchRecord};
pub use usage::{UsageShareDatabase, UsageTable};
