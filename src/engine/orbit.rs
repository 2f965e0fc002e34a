//! Orbit partitioning of open projects.

use crate::models::{OrbitProject, ProjectOrbitAssignment};

pub const MAX_MOONS: usize = 2;
pub const MAX_PROBES: usize = 3;

/// Partition open projects into planet, moons and probes by age.
///
/// The oldest project is the planet. Projects created at the same instant
/// keep the order they were supplied in.
pub fn partition_orbits(projects: &[OrbitProject]) -> ProjectOrbitAssignment {
    let mut ordered: Vec<&OrbitProject> = projects.iter().collect();
    // `sort_by_key` is stable, which is what breaks ties by input order.
    ordered.sort_by_key(|p| p.created_at);

    let mut ids = ordered.into_iter().map(|p| p.id);
    let planet = ids.next();
    let moons: Vec<_> = ids.by_ref().take(MAX_MOONS).collect();
    let probes: Vec<_> = ids.by_ref().take(MAX_PROBES).collect();
    let archived_count = ids.count();

    ProjectOrbitAssignment {
        can_add_planet: planet.is_none(),
        can_add_moon: moons.len() < MAX_MOONS,
        can_add_probe: probes.len() < MAX_PROBES,
        planet,
        moons,
        probes,
        archived_count,
    }
}
