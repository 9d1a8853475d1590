//! # Laserkit
//!
//! A Rust-based level asset migration toolkit for the Laserfingers puzzle
//! game. It evolves per-level obstacle descriptions through the successive
//! on-disk schema revisions, from the old sweeper/rotor/segment obstacle
//! kinds to the canonical endpoint-path model, one idempotent migration
//! step at a time.
//!
//! ## Architecture
//!
//! Laserkit is organized as a workspace:
//!
//! 1. **laserkit-core** - Canonical level model and legacy laser decoders
//! 2. **laserkit-migrate** - The migration steps and the batch runner
//! 3. **laserkit** - CLI binary that exposes each step as a subcommand
//!
//! ## Features
//!
//! - **Mixed-state corpora**: every step detects its own precondition and
//!   no-ops on files that are already past it
//! - **Diff-friendly writes**: 2-space indentation, trailing newline, and
//!   no rewrite at all for unchanged documents
//! - **Fail-soft batches**: one bad level is reported and left untouched
//!   while the rest of the corpus migrates

pub use laserkit_core::{
    Button, EndpointPath, Laser, LaserKind, LegacyKind, Level, LevelError, Point,
};
pub use laserkit_migrate::{
    discover_level_files, full_chain, migrate_directory, migrate_file, migrate_files,
    step_by_name, BatchSummary, FileOutcome, FileReport, MigrateError, MigrationStep,
    StepOutcome,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Default location of the level corpus, relative to the game checkout.
pub const DEFAULT_LEVELS_DIR: &str = "assets/levels";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with compact formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
