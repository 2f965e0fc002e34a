//! The cognitive load engine.
//!
//! Every derived value is a pure recomputation from the current inputs:
//!
//! ```text
//! records ─► counts ─► load ─► status / characters ─┐
//!                   └─► drift (with activity tracker) ┴─► toto alert
//! open projects ─► orbits
//! ```
//!
//! Dialogue and the intervention gate consume the discrete states on demand.

pub mod dialogue;
pub mod drift;
pub mod intervention;
pub mod load;
pub mod orbit;
pub mod status;

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::models::*;

pub use dialogue::get_message;
pub use drift::{compute_drift, ActivityTracker};
pub use intervention::{assess, classify_impulse, intervention_key, resolve, GateError};
pub use load::compute_load_scores;
pub use orbit::partition_orbits;
pub use status::{classify_character, classify_characters, classify_status, toto_alert};

/// Inputs for one evaluation, as supplied by the data layer.
///
/// Missing collections are treated as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluationInput<'a> {
    pub projects: Option<&'a [ProjectRecord]>,
    pub tasks: Option<&'a [TaskRecord]>,
    pub dumps: Option<&'a [BrainDumpRecord]>,
}

/// Evaluate counts that are already aggregated.
///
/// `open_projects` feeds the orbit partition; pass an empty slice when only
/// counts are known.
pub fn evaluate_counts(
    counts: WorkItemCounts,
    open_projects: &[OrbitProject],
    idle_minutes: f64,
    config: &EngineConfig,
) -> CognitiveSnapshot {
    let scores = compute_load_scores(&counts, &config.ram_weights);
    let status = classify_status(scores.ram_usage);
    let characters = classify_characters(&scores, &config.characters);
    let drift = compute_drift(idle_minutes, counts.open_tasks, counts.unprocessed_dumps);
    let alert = toto_alert(&scores, &drift);
    let orbits = partition_orbits(open_projects);

    tracing::debug!(
        ram_usage = scores.ram_usage,
        status = status.as_str(),
        drift = drift.drift_level,
        toto_alert = alert,
        "Evaluated cognitive load"
    );

    CognitiveSnapshot {
        counts,
        scores,
        status,
        characters,
        drift,
        toto_alert: alert,
        orbits,
    }
}

/// Evaluate raw records for a session.
///
/// Idle time is sampled from `tracker` at `now`, and the resulting reading is
/// fed back so a first drift into the void is recorded on the session.
pub fn evaluate(
    input: EvaluationInput<'_>,
    tracker: &ActivityTracker,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> CognitiveSnapshot {
    let counts = WorkItemCounts::from_records(input.projects, input.tasks, input.dumps, now);
    let open_projects: Vec<OrbitProject> = input
        .projects
        .unwrap_or_default()
        .iter()
        .filter(|p| !p.is_completed)
        .map(OrbitProject::from)
        .collect();

    let snapshot = evaluate_counts(counts, &open_projects, tracker.idle_minutes(now), config);
    tracker.observe(&snapshot.drift, now);
    snapshot
}
