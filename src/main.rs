//! Laserkit entry point
//!
//! Every migration step is exposed as its own subcommand so that an
//! intermediate step can still be run against a corpus frozen at an
//! intermediate schema revision; `migrate` runs the whole chain in order.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Arg, Command};
use tracing::{debug, error, info};

use laserkit::{
    discover_level_files, full_chain, migrate_directory, step_by_name, BatchSummary, Level,
    DEFAULT_LEVELS_DIR, VERSION,
};

fn main() -> ExitCode {
    if let Err(err) = laserkit::init_logging() {
        eprintln!("Failed to initialize logging: {}", err);
        return ExitCode::FAILURE;
    }

    let mut cli = Command::new("laserkit")
        .version(VERSION)
        .about("Level asset migration toolkit for Laserfingers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("levels-dir")
                .long("levels-dir")
                .value_name("DIR")
                .global(true)
                .default_value(DEFAULT_LEVELS_DIR)
                .help("Root directory of the level corpus"),
        )
        .subcommand(Command::new("migrate").about("Run the full migration chain in order"))
        .subcommand(
            Command::new("validate")
                .about("Check every level against the canonical model invariants"),
        );
    for step in full_chain() {
        cli = cli.subcommand(Command::new(step.name()).about(step.description()));
    }

    let matches = cli.get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        return ExitCode::FAILURE;
    };
    let levels_dir = PathBuf::from(
        sub.get_one::<String>("levels-dir")
            .map(String::as_str)
            .unwrap_or(DEFAULT_LEVELS_DIR),
    );

    if name == "validate" {
        return run_validate(&levels_dir);
    }

    let steps = match name {
        "migrate" => full_chain(),
        step_name => match step_by_name(step_name) {
            Some(step) => vec![step],
            None => {
                error!("Unknown migration step: {}", step_name);
                return ExitCode::FAILURE;
            }
        },
    };

    match migrate_directory(&levels_dir, &steps) {
        Ok(summary) => {
            report(&summary);
            if summary.all_succeeded() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn report(summary: &BatchSummary) {
    info!(
        "Migration complete: {} migrated, {} skipped, {} failed",
        summary.migrated(),
        summary.skipped(),
        summary.failed()
    );
}

/// Load every level through the canonical model and check the invariants.
fn run_validate(levels_dir: &Path) -> ExitCode {
    let files = match discover_level_files(levels_dir) {
        Ok(files) if files.is_empty() => {
            error!("No level files found under {}", levels_dir.display());
            return ExitCode::FAILURE;
        }
        Ok(files) => files,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0usize;
    for path in &files {
        match Level::load_from_file(path).and_then(|level| level.validate()) {
            Ok(()) => debug!("{}: ok", path.display()),
            Err(err) => {
                error!("{}: {}", path.display(), err);
                failures += 1;
            }
        }
    }

    info!(
        "Validated {} levels, {} invalid",
        files.len(),
        failures
    );
    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
