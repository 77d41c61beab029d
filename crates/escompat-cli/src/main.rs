//! escompat CLI - checks JavaScript/TypeScript sources against target browsers
//!
//! Detects modern syntax features and reports which requested environments
//! cannot run them.

mod commands;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use commands::Commands;
use logging::LogLevel;

/// Exit status for configuration, database and argument errors.
const FATAL_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "escompat",
    author,
    version,
    about = "Checks modern JavaScript syntax against target browser support",
    long_about = "escompat detects which ECMAScript syntax features a project uses and reports\n\
                  the target environments that do not support them, together with the minimum\n\
                  browser versions and usage coverage the code can reach."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, value_enum, default_value = "warn", global = true, help = "Set the log level")]
    pub log_level: LogLevel,

    #[arg(long, global = true, help = "Write logs to the specified file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Output logs in JSON format")]
    pub log_json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli);

    let result = match cli.command {
        Commands::Check(args) => args.run(),
        Commands::Features(args) => args.run().map(|()| ExitCode::SUCCESS),
        Commands::Envs(args) => args.run().map(|()| ExitCode::SUCCESS),
        Commands::Init(args) => args.run().map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}
