use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session-scoped activity record used to derive idle time.
///
/// Written only by the activity tracker; expires with the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftState {
    /// The quest (task) the user last focused on.
    pub last_quest_id: Option<Uuid>,
    pub last_active_time: DateTime<Utc>,
    /// Set when the session first drifted into the void since the last activity.
    pub drift_triggered_at: Option<DateTime<Utc>>,
}

impl DriftState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_quest_id: None,
            last_active_time: now,
            drift_triggered_at: None,
        }
    }
}

/// A sampled drift measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReading {
    /// Disengagement score in `[0, 100]`.
    pub drift_level: f64,
    pub is_in_void: bool,
}
