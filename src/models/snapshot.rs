use serde::{Deserialize, Serialize};

use super::*;

/// Everything the UI renders for one evaluation: scores, discrete states,
/// drift and the project hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveSnapshot {
    pub counts: WorkItemCounts,
    pub scores: LoadScores,
    pub status: Status,
    pub characters: CharacterStates,
    pub drift: DriftReading,
    /// Any critical axis is up, independent of `status`.
    pub toto_alert: bool,
    pub orbits: ProjectOrbitAssignment,
}
