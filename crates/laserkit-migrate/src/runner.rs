//! Batch migration over a level corpus.
//!
//! One file is one atomic unit of work: read, decode, apply the requested
//! steps in order, and only if some step actually changed the document,
//! re-encode and write it back. A file that fails is reported and left
//! exactly as it was; the rest of the batch still runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info};

use crate::error::{MigrateError, Result};
use crate::steps::MigrationStep;

/// What happened to one file.
#[derive(Debug)]
pub enum FileOutcome {
    /// At least one step rewrote the document; names the steps that fired.
    Migrated { steps: Vec<&'static str> },
    /// Every step reported no change; nothing was written.
    Skipped,
    /// Decoding or transformation failed; the file was left unmodified.
    Failed { error: MigrateError },
}

/// Per-file record in a batch summary.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Aggregated result of a corpus run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
}

impl BatchSummary {
    pub fn migrated(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Migrated { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// True when no file failed; drives the process exit status.
    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Recursively collect every `*.json` file under `root`, sorted for a
/// deterministic traversal order.
pub fn discover_level_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(MigrateError::LevelsDirNotFound(root.to_path_buf()));
    }
    let mut files = Vec::new();
    collect_json_files(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_json_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

/// Apply `steps` in order to the document at `path`.
///
/// Returns the names of the steps that changed it. The file is rewritten
/// (2-space indentation, trailing newline) only when that list is
/// non-empty, so already-migrated files keep their exact bytes. The full
/// decode happens before any write: a failure can never truncate or
/// corrupt the original.
pub fn migrate_file(path: &Path, steps: &[Box<dyn MigrationStep>]) -> Result<Vec<&'static str>> {
    let content = fs::read_to_string(path)?;
    let mut doc: Value = serde_json::from_str(&content)?;

    let mut fired = Vec::new();
    for step in steps {
        if step.apply(&mut doc)?.changed() {
            fired.push(step.name());
        }
    }

    if !fired.is_empty() {
        let mut json = serde_json::to_string_pretty(&doc)?;
        json.push('\n');
        fs::write(path, json)?;
    }
    Ok(fired)
}

/// Migrate a list of files, continuing past per-file failures.
pub fn migrate_files(files: &[PathBuf], steps: &[Box<dyn MigrationStep>]) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for path in files {
        let outcome = match migrate_file(path, steps) {
            Ok(fired) if fired.is_empty() => {
                info!("{}: already migrated, skipped", path.display());
                FileOutcome::Skipped
            }
            Ok(fired) => {
                info!("{}: migrated ({})", path.display(), fired.join(", "));
                FileOutcome::Migrated { steps: fired }
            }
            Err(err) => {
                error!("{}: {}", path.display(), err);
                FileOutcome::Failed { error: err }
            }
        };
        summary.reports.push(FileReport {
            path: path.clone(),
            outcome,
        });
    }
    summary
}

/// Discover and migrate a whole corpus.
///
/// A missing directory or an empty corpus is fatal; a single bad file is
/// not: it is counted in the summary and the rest of the batch proceeds.
pub fn migrate_directory(root: &Path, steps: &[Box<dyn MigrationStep>]) -> Result<BatchSummary> {
    let files = discover_level_files(root)?;
    if files.is_empty() {
        return Err(MigrateError::NoLevelFiles(root.to_path_buf()));
    }
    info!("Found {} level files under {}", files.len(), root.display());
    Ok(migrate_files(&files, steps))
}
