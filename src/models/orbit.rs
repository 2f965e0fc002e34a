use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ProjectRecord;

/// The minimal view of an open project needed to place it in orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrbitProject {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<&ProjectRecord> for OrbitProject {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
        }
    }
}

/// Fixed-capacity priority hierarchy over open projects.
///
/// The oldest project is the planet, the next two are moons, the next three
/// are probes and everything after that is only counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOrbitAssignment {
    pub planet: Option<Uuid>,
    pub moons: Vec<Uuid>,
    pub probes: Vec<Uuid>,
    pub archived_count: usize,
    pub can_add_planet: bool,
    pub can_add_moon: bool,
    pub can_add_probe: bool,
}

impl ProjectOrbitAssignment {
    /// Number of projects placed in a named bucket.
    pub fn placed(&self) -> usize {
        usize::from(self.planet.is_some()) + self.moons.len() + self.probes.len()
    }

    /// Every project the assignment accounts for, placed or archived.
    pub fn total(&self) -> usize {
        self.placed() + self.archived_count
    }
}
