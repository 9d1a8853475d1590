//! Migration steps over raw level documents.
//!
//! Steps operate on `serde_json::Value` rather than the typed model because
//! the corpus they run against sits in mixed schema states: a step must be
//! able to walk a document whose lasers still use field layouts the
//! canonical model no longer has names for. Each step detects its own
//! precondition from the field names it keys off and reports
//! [`StepOutcome::Unchanged`] when nothing applies, so running a step twice,
//! or against the wrong era of the schema, is always safe.

use serde_json::{Map, Value};

use crate::error::Result;

mod cycle_times;
mod endpoint_arrays;
mod remove_angles;
mod rename_phase;
mod unify_kinds;

pub use cycle_times::FixCycleTimes;
pub use endpoint_arrays::EndpointArrays;
pub use remove_angles::RemoveAngles;
pub use rename_phase::RenamePhase;
pub use unify_kinds::UnifyKinds;

/// Documents stamped at or above this version store round-trip
/// `cycleSeconds` values. Converters that emit correct round trips stamp
/// it; the cycle-time correction applies only below it.
pub(crate) const ROUND_TRIP_CYCLES_VERSION: u64 = 2;

/// Outcome of applying one step to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step rewrote the document.
    Changed,
    /// The step's precondition did not hold; the document is untouched.
    Unchanged,
}

impl StepOutcome {
    pub fn changed(self) -> bool {
        self == StepOutcome::Changed
    }
}

/// A single idempotent, precondition-gated schema transformation.
///
/// Applied in a pipeline in their historical order; see [`full_chain`].
pub trait MigrationStep: Send + Sync {
    /// Identifier, also the CLI subcommand name.
    fn name(&self) -> &'static str;

    /// One-line summary of what the step rewrites.
    fn description(&self) -> &'static str;

    /// Inspect the document and rewrite it if its precondition holds.
    ///
    /// An error condemns the whole file's migration; the runner will not
    /// write anything back for it.
    fn apply(&self, doc: &mut Value) -> Result<StepOutcome>;
}

/// The five migrations in their historical order.
pub fn full_chain() -> Vec<Box<dyn MigrationStep>> {
    vec![
        Box::new(UnifyKinds),
        Box::new(FixCycleTimes),
        Box::new(EndpointArrays),
        Box::new(RemoveAngles),
        Box::new(RenamePhase),
    ]
}

/// Look a step up by its CLI name.
pub fn step_by_name(name: &str) -> Option<Box<dyn MigrationStep>> {
    full_chain().into_iter().find(|step| step.name() == name)
}

/// Document schema stamp, zero when absent.
pub(crate) fn schema_version(doc: &Value) -> u64 {
    doc.get("schemaVersion").and_then(Value::as_u64).unwrap_or(0)
}

/// Raise the document schema stamp; never lowers an existing one.
pub(crate) fn stamp_schema_version(doc: &mut Value, version: u64) {
    if schema_version(doc) >= version {
        return;
    }
    if let Some(obj) = doc.as_object_mut() {
        obj.insert("schemaVersion".to_string(), Value::from(version));
    }
}

/// Visit every laser object in the document.
pub(crate) fn lasers_mut(doc: &mut Value) -> impl Iterator<Item = &mut Map<String, Value>> {
    entries_mut(doc, "lasers")
}

/// Visit every button object in the document.
pub(crate) fn buttons_mut(doc: &mut Value) -> impl Iterator<Item = &mut Map<String, Value>> {
    entries_mut(doc, "buttons")
}

fn entries_mut<'a>(
    doc: &'a mut Value,
    key: &str,
) -> impl Iterator<Item = &'a mut Map<String, Value>> {
    doc.get_mut(key)
        .and_then(Value::as_array_mut)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object_mut)
}

/// Visit every endpoint-path value a laser or button can carry, across all
/// historical field layouts: the singular `endpoint`, the segment pair
/// `startEndpoint`/`endEndpoint`, and the generalized `endpoints` array.
pub(crate) fn for_each_endpoint_path(
    obj: &mut Map<String, Value>,
    f: &mut impl FnMut(&mut Map<String, Value>),
) {
    for key in ["endpoint", "startEndpoint", "endEndpoint"] {
        if let Some(path) = obj.get_mut(key).and_then(Value::as_object_mut) {
            f(path);
        }
    }
    if let Some(paths) = obj.get_mut("endpoints").and_then(Value::as_array_mut) {
        for path in paths.iter_mut().filter_map(Value::as_object_mut) {
            f(path);
        }
    }
}
