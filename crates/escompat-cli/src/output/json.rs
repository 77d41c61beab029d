//! JSON output formatter
//!
//! Serializes the error map with the record shapes of the core crate, plus a
//! summary and the coverage result.

use escompat_core::coverage::CoverageResult;
use escompat_core::{EnvironmentId, GlobalErrorMap};
use serde::Serialize;

use super::Report;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonOutput<'a> {
    pub version: &'static str,
    pub targets: &'a [EnvironmentId],
    pub undefined_environments: &'a [String],
    pub summary: JsonSummary,
    pub errors: &'a GlobalErrorMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<&'a CoverageResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    pub files_checked: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
}

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format(&self, report: &Report) -> String {
        let output = self.build_output(report);
        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }

    fn build_output<'a>(&self, report: &Report<'a>) -> JsonOutput<'a> {
        JsonOutput {
            version: env!("CARGO_PKG_VERSION"),
            targets: report.targets,
            undefined_environments: report.undefined_envs,
            summary: JsonSummary {
                files_checked: report.files_checked,
                files_with_errors: report.files_with_errors(),
                total_errors: report.error_count(),
            },
            errors: report.errors,
            coverage: report.coverage,
        }
    }
}
