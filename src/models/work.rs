use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A project as supplied by the data layer.
///
/// Only open (not completed) projects contribute to load and take part in
/// the orbit hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    /// Shown in text reports; the ID is printed when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: bool,
}

/// A task as supplied by the data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub is_completed: bool,
    /// Tasks past this instant count as overdue while still open.
    pub due_date: Option<DateTime<Utc>>,
    /// IDs of the tasks or people this task is waiting on.
    #[serde(default)]
    pub blocked_by: Vec<String>,
    /// Marked by the user when the task went backwards.
    #[serde(default)]
    pub is_setback: bool,
    pub project_id: Option<Uuid>,
}

/// A captured brain dump. It stays "unprocessed" until it has a summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrainDumpRecord {
    pub ai_summary: Option<String>,
}

impl BrainDumpRecord {
    pub fn is_processed(&self) -> bool {
        self.ai_summary
            .as_deref()
            .is_some_and(|summary| !summary.trim().is_empty())
    }
}

/// Raw counts of open work items, recomputed on every evaluation.
///
/// Counts are unbounded: scoring clamps its outputs rather than rejecting
/// large inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkItemCounts {
    pub open_projects: u32,
    pub open_tasks: u32,
    pub unprocessed_dumps: u32,
    pub overdue_tasks: u32,
    pub blocked_tasks: u32,
    pub setback_tasks: u32,
}

impl WorkItemCounts {
    /// Aggregate counts from the data layer's records.
    ///
    /// A collection the data layer could not provide (`None`) counts as empty,
    /// so an outage degrades to a stable, no-load baseline.
    pub fn from_records(
        projects: Option<&[ProjectRecord]>,
        tasks: Option<&[TaskRecord]>,
        dumps: Option<&[BrainDumpRecord]>,
        now: DateTime<Utc>,
    ) -> Self {
        let projects = projects.unwrap_or_default();
        let tasks = tasks.unwrap_or_default();
        let dumps = dumps.unwrap_or_default();

        let open_tasks: Vec<&TaskRecord> = tasks.iter().filter(|t| !t.is_completed).collect();

        Self {
            open_projects: saturating_len(projects.iter().filter(|p| !p.is_completed).count()),
            open_tasks: saturating_len(open_tasks.len()),
            unprocessed_dumps: saturating_len(dumps.iter().filter(|d| !d.is_processed()).count()),
            overdue_tasks: saturating_len(
                open_tasks
                    .iter()
                    .filter(|t| t.due_date.is_some_and(|due| due < now))
                    .count(),
            ),
            blocked_tasks: saturating_len(
                open_tasks.iter().filter(|t| !t.blocked_by.is_empty()).count(),
            ),
            setback_tasks: saturating_len(open_tasks.iter().filter(|t| t.is_setback).count()),
        }
    }
}

fn saturating_len(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
