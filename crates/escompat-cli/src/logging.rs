use std::path::Path;

use clap::ValueEnum;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::Cli;

const DEFAULT_LOG_FILENAME: &str = "escompat.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Installs the global subscriber. The returned guard flushes the log file
/// on drop and must be held until exit.
pub fn init_logging(cli: &Cli) -> Option<WorkerGuard> {
    let level = cli.log_level.as_tracing_level();
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if let Some(ref log_file) = cli.log_file {
        init_file_logging(log_file, filter, cli.log_json)
    } else {
        init_stderr_logging(filter, cli.log_json);
        None
    }
}

fn init_stderr_logging(filter: EnvFilter, json: bool) {
    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .init();
    }
}

fn init_file_logging(path: &Path, filter: EnvFilter, json: bool) -> Option<WorkerGuard> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let filename = log_filename(path);

    let file_appender = tracing_appender::rolling::never(parent, filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(fmt::layer().json().with_writer(non_blocking))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
            .init();
    }

    Some(guard)
}

fn log_filename(path: &Path) -> &str {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_LOG_FILENAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn log_level_warn_filters_info_messages() {
        let warn_level = LogLevel::Warn.as_tracing_level();
        let info_level = LogLevel::Info.as_tracing_level();
        assert_eq!(warn_level, Level::WARN);
        assert!(warn_level < info_level);
    }

    #[test]
    fn log_level_error_filters_warn_messages() {
        let error_level = LogLevel::Error.as_tracing_level();
        let warn_level = LogLevel::Warn.as_tracing_level();
        assert_eq!(error_level, Level::ERROR);
        assert!(error_level < warn_level);
    }

    #[test]
    fn log_level_converts_to_tracing_level() {
        assert_eq!(LogLevel::Trace.as_tracing_level(), Level::TRACE);
        assert_eq!(LogLevel::Debug.as_tracing_level(), Level::DEBUG);
        assert_eq!(LogLevel::Info.as_tracing_level(), Level::INFO);
    }

    #[test]
    fn log_filename_uses_given_name() {
        assert_eq!(log_filename(Path::new("/var/log/check.log")), "check.log");
    }

    #[test]
    fn log_filename_falls_back_to_default() {
        assert_eq!(log_filename(Path::new("/")), DEFAULT_LOG_FILENAME);
    }
}
