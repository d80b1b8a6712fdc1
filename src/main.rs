//! orgcheck CLI
//!
//! Validates an org config and its CODEOWNERS approvers once, printing every
//! violation. Exits non-zero when anything is wrong.

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use orgcheck::prelude::*;
use orgcheck::settings::{DEFAULT_CONFIG_PATH, DEFAULT_OWNERS_DIR};
use orgcheck::validation::DEFAULT_MIN_APPROVERS;
use std::process::ExitCode;

/// Consistency checks for org membership configs
#[derive(Parser, Debug)]
#[command(name = "orgcheck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the org config
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Directory containing CODEOWNERS
    #[arg(long = "owners-dir", default_value = DEFAULT_OWNERS_DIR)]
    owners_dir: String,

    /// Fewest distinct approvers accepted
    #[arg(long, default_value_t = DEFAULT_MIN_APPROVERS)]
    min_approvers: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn check(settings: &Settings) -> anyhow::Result<ValidationReport> {
    orgcheck::run(settings)
        .with_context(|| format!("checking {}", settings.config_path.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings =
        Settings::new(&cli.config, &cli.owners_dir).with_min_approvers(cli.min_approvers);
    if let Err(err) = settings.validate() {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }

    let report = match check(&settings) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return ExitCode::FAILURE;
        }
    };

    for warning in report.detailed_warnings() {
        eprintln!("warning: {}", warning);
    }
    for violation in report.detailed_violations() {
        eprintln!("{}", violation);
    }
    eprintln!("{}", report.summary());

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
