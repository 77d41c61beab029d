//! Pretty formatter for human-readable terminal output
//!
//! Groups problems by file, shows the offending source for every occurrence
//! and closes with a summary and the coverage the code reaches.

use std::collections::HashMap;
use std::fs;

use colored::{ColoredString, Colorize};
use escompat_core::EnvironmentId;
use escompat_core::coverage::CoverageResult;
use escompat_core::records::{ErrorRecord, FileErrors, MatchRecord};

use super::{Report, plural};

pub struct PrettyFormatter {
    sources: HashMap<String, String>,
}

impl PrettyFormatter {
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    pub fn with_sources(sources: HashMap<String, String>) -> Self {
        Self { sources }
    }

    pub fn format(&self, report: &Report) -> String {
        let mut output = String::new();

        for (path, errors) in report.errors {
            output.push_str(&self.format_file(path, errors));
            output.push('\n');
        }

        output.push_str(&self.format_summary(report));

        if let Some(coverage) = report.coverage {
            output.push('\n');
            output.push_str(&self.format_coverage(coverage));
        }

        output
    }

    fn format_file(&self, path: &str, errors: &FileErrors) -> String {
        let mut lines = vec![format!(
            "{} ({} {})",
            path.bold().underline(),
            errors.len(),
            plural(errors.len(), "error", "errors")
        )];

        let source = self.get_source(path);
        for record in errors.values() {
            lines.extend(self.format_record(record, source.as_deref()));
        }

        lines.join("\n") + "\n"
    }

    fn format_record(&self, record: &ErrorRecord, source: Option<&str>) -> Vec<String> {
        match record {
            ErrorRecord::Parse { message } => {
                vec![format!("  {}[{}]: {}", self.label(true), "parse".dimmed(), message)]
            }
            ErrorRecord::FeatureUndefined { feature } => vec![format!(
                "  {}[{}]: not found in the compatibility database",
                self.label(false),
                feature.as_str().dimmed()
            )],
            ErrorRecord::Incompatibility {
                feature,
                matches,
                incompat_envs,
                partial_envs,
            } => {
                let mut lines = Vec::new();
                if incompat_envs.is_empty() {
                    lines.push(format!(
                        "  {}[{}]: partial support in {}",
                        self.label(false),
                        feature.as_str().dimmed(),
                        join_envs(partial_envs)
                    ));
                } else {
                    lines.push(format!(
                        "  {}[{}]: unsupported in {}",
                        self.label(true),
                        feature.as_str().dimmed(),
                        join_envs(incompat_envs)
                    ));
                    if !partial_envs.is_empty() {
                        lines.push(format!(
                            "    {} partial support in {}",
                            "=".blue(),
                            join_envs(partial_envs)
                        ));
                    }
                }
                lines.extend(self.format_occurrences(matches, source));
                lines
            }
        }
    }

    fn format_occurrences(&self, matches: &[MatchRecord], source: Option<&str>) -> Vec<String> {
        let width = matches
            .iter()
            .map(|m| m.location.start.line.to_string().len())
            .max()
            .unwrap_or(1);

        matches
            .iter()
            .flat_map(|m| {
                let line = format!("{:>width$}", m.location.start.line, width = width);
                match source {
                    Some(source) => snippet_lines(&line, m.snippet(source)),
                    None => vec![format!("    {} {}", "line".blue(), line.blue())],
                }
            })
            .collect()
    }

    fn label(&self, is_error: bool) -> ColoredString {
        if is_error {
            "error".red().bold()
        } else {
            "warning".yellow().bold()
        }
    }

    fn get_source(&self, path: &str) -> Option<String> {
        if let Some(source) = self.sources.get(path) {
            return Some(source.clone());
        }
        fs::read_to_string(path).ok()
    }

    fn format_summary(&self, report: &Report) -> String {
        let total = report.error_count();
        let checked = format!(
            "{} {} checked",
            report.files_checked,
            plural(report.files_checked, "file", "files")
        );

        if total == 0 {
            return format!(
                "{} No compatibility problems found ({})\n",
                "✓".green().bold(),
                checked
            );
        }

        let files = report.files_with_errors();
        format!(
            "Found {} {} in {} {} ({})\n",
            total.to_string().bold(),
            plural(total, "problem", "problems"),
            files,
            plural(files, "file", "files"),
            checked
        )
    }

    fn format_coverage(&self, coverage: &CoverageResult) -> String {
        let mut lines = vec![format!("{}", "Minimum requirements:".bold())];

        if coverage.minimum_requirements.is_empty() {
            lines.push("  none of the requested environments is compatible".to_string());
        }
        for (family, version) in &coverage.minimum_requirements {
            lines.push(format!("  {} >= {}", family.cyan(), version));
        }

        lines.push(format!(
            "{} {:.2}% ({})",
            "Coverage:".bold(),
            coverage.coverage_percentage,
            coverage.query.dimmed()
        ));

        lines.join("\n") + "\n"
    }
}

impl Default for PrettyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn join_envs(envs: &[EnvironmentId]) -> String {
    envs.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The whole snippet under a line-number gutter, one output line per source line.
fn snippet_lines(line: &str, snippet: &str) -> Vec<String> {
    let blank = " ".repeat(line.len());
    let mut lines: Vec<&str> = snippet.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let gutter = if i == 0 { line } else { blank.as_str() };
            format!("    {} {} {}", gutter.blue(), "|".blue(), text.trim_end_matches('\r'))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use escompat_core::GlobalErrorMap;
    use escompat_core::features::FeatureId;
    use escompat_core::records::{ErrorKey, Position, SourceLocation, SourceRange};
    use escompat_core::Version;
    use serial_test::serial;
    use std::collections::BTreeMap;

    const APP_SOURCE: &str =
        "var key = 'render';\nvar o = {\n  [key]() {\n    return 1;\n  },\n};\nvar n = 10n;\n";
    const APP_METHOD: &str = "[key]() {\n    return 1;\n  }";

    fn env(s: &str) -> EnvironmentId {
        s.parse().unwrap()
    }

    fn match_at(source: &str, needle: &str, line: usize) -> MatchRecord {
        let start = source.find(needle).unwrap();
        let end = start + needle.len();
        MatchRecord {
            range: SourceRange::new(start, end),
            location: SourceLocation {
                start: Position { line, column: 0 },
                end: Position { line, column: 0 },
            },
            feature: FeatureId::new("computedShorthandMethods"),
        }
    }

    fn app_errors() -> FileErrors {
        let mut errors = FileErrors::new();
        errors.insert(
            ErrorKey::Feature(FeatureId::new("computedShorthandMethods")),
            ErrorRecord::Incompatibility {
                feature: FeatureId::new("computedShorthandMethods"),
                matches: vec![match_at(APP_SOURCE, APP_METHOD, 3)],
                incompat_envs: vec![env("chrome40"), env("ie11")],
                partial_envs: vec![],
            },
        );
        errors.insert(
            ErrorKey::Feature(FeatureId::new("bigint")),
            ErrorRecord::FeatureUndefined {
                feature: FeatureId::new("bigint"),
            },
        );
        errors
    }

    fn broken_errors() -> FileErrors {
        let mut errors = FileErrors::new();
        errors.insert(
            ErrorKey::Parse,
            ErrorRecord::Parse {
                message: "Expected ';', got 'x' (1:5)".to_string(),
            },
        );
        errors
    }

    fn sources() -> HashMap<String, String> {
        HashMap::from([("src/app.js".to_string(), APP_SOURCE.to_string())])
    }

    fn report<'a>(errors: &'a GlobalErrorMap, coverage: Option<&'a CoverageResult>) -> Report<'a> {
        Report {
            files_checked: 5,
            errors,
            targets: &[],
            undefined_envs: &[],
            coverage,
        }
    }

    #[test]
    #[serial]
    fn pretty_report_snapshot() {
        colored::control::set_override(false);

        let mut errors = GlobalErrorMap::new();
        errors.insert("src/app.js".to_string(), app_errors());
        errors.insert("src/broken.js".to_string(), broken_errors());
        let coverage = CoverageResult {
            minimum_requirements: BTreeMap::from([
                ("chrome".to_string(), Version::new(60, 0)),
                ("safari".to_string(), Version::new(10, 1)),
            ]),
            coverage_percentage: 87.23456,
            query: "defaults, not chrome <= 40, not ie <= 11".to_string(),
        };

        let output = PrettyFormatter::with_sources(sources()).format(&report(&errors, Some(&coverage)));

        colored::control::unset_override();
        insta::assert_snapshot!(output);
    }

    #[test]
    #[serial]
    fn clean_report_has_success_summary() {
        colored::control::set_override(false);

        let errors = GlobalErrorMap::new();
        let output = PrettyFormatter::new().format(&report(&errors, None));

        colored::control::unset_override();
        assert_eq!(output, "✓ No compatibility problems found (5 files checked)\n");
    }

    #[test]
    #[serial]
    fn labels_are_colored_by_kind() {
        colored::control::set_override(true);
        let formatter = PrettyFormatter::new();

        let error = formatter.label(true).to_string();
        let warning = formatter.label(false).to_string();

        assert_eq!(error, "error".red().bold().to_string());
        assert_eq!(warning, "warning".yellow().bold().to_string());
        colored::control::unset_override();
    }

    #[test]
    #[serial]
    fn partial_only_record_is_a_warning() {
        colored::control::set_override(false);
        let record = ErrorRecord::Incompatibility {
            feature: FeatureId::new("let"),
            matches: vec![],
            incompat_envs: vec![],
            partial_envs: vec![env("ie11")],
        };

        let lines = PrettyFormatter::new().format_record(&record, None);

        colored::control::unset_override();
        assert_eq!(lines, vec!["  warning[let]: partial support in ie11"]);
    }

    #[test]
    #[serial]
    fn occurrences_without_source_show_line_numbers() {
        colored::control::set_override(false);
        let matches = vec![match_at(APP_SOURCE, APP_METHOD, 3)];

        let lines = PrettyFormatter::new().format_occurrences(&matches, None);

        colored::control::unset_override();
        assert_eq!(lines, vec!["    line 3"]);
    }

    #[test]
    #[serial]
    fn multi_line_snippets_are_printed_in_full() {
        colored::control::set_override(false);
        let matches = vec![match_at(APP_SOURCE, APP_METHOD, 3)];

        let lines = PrettyFormatter::new().format_occurrences(&matches, Some(APP_SOURCE));

        colored::control::unset_override();
        assert_eq!(
            lines,
            vec!["    3 | [key]() {", "      |     return 1;", "      |   }"]
        );
    }

    #[test]
    #[serial]
    fn start_only_match_stops_before_last_byte() {
        colored::control::set_override(false);
        let source = "var limit = 10n;";
        let start = source.find("10n").unwrap();
        let open_ended = MatchRecord {
            range: SourceRange::starting_at(start),
            location: SourceLocation {
                start: Position { line: 1, column: start },
                end: Position { line: 1, column: start },
            },
            feature: FeatureId::new("bigint"),
        };
        let mut errors = FileErrors::new();
        errors.insert(
            ErrorKey::Feature(FeatureId::new("bigint")),
            ErrorRecord::Incompatibility {
                feature: FeatureId::new("bigint"),
                matches: vec![open_ended],
                incompat_envs: vec![env("ie11")],
                partial_envs: vec![],
            },
        );
        let formatter = PrettyFormatter::with_sources(HashMap::from([(
            "tail.js".to_string(),
            source.to_string(),
        )]));

        let output = formatter.format_file("tail.js", &errors);

        colored::control::unset_override();
        assert_eq!(
            output,
            "tail.js (1 error)\n  error[bigint]: unsupported in ie11\n    1 | 10n\n"
        );
    }

    #[test]
    #[serial]
    fn parse_failed_file_shows_only_the_parse_record() {
        colored::control::set_override(false);

        let output = PrettyFormatter::new().format_file("src/broken.js", &broken_errors());

        colored::control::unset_override();
        assert_eq!(
            output,
            "src/broken.js (1 error)\n  error[parse]: Expected ';', got 'x' (1:5)\n"
        );
    }

    #[test]
    fn trailing_newline_of_a_snippet_adds_no_line() {
        assert_eq!(snippet_lines("7", "a;\n"), vec!["    7 | a;"]);
    }
}
