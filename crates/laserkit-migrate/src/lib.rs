//! # Laserkit Migrate
//!
//! The level schema migrations for Laserfingers and the batch runner that
//! applies them to a corpus of level files.
//!
//! Each migration is a file-local, idempotent transform that detects its
//! own precondition and leaves documents it does not understand untouched,
//! so the chain can be run, in whole or step by step, against a corpus
//! frozen at any intermediate schema revision without double-applying.

pub mod error;
pub mod runner;
pub mod steps;

pub use error::{MigrateError, Result};
pub use runner::{
    discover_level_files, migrate_directory, migrate_file, migrate_files, BatchSummary,
    FileOutcome, FileReport,
};
pub use steps::{
    full_chain, step_by_name, EndpointArrays, FixCycleTimes, MigrationStep, RemoveAngles,
    RenamePhase, StepOutcome, UnifyKinds,
};
