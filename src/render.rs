//! Plain-text rendering of snapshots for the terminal.

use std::collections::HashMap;
use std::fmt::Write;

use uuid::Uuid;

use crate::engine::{dialogue, intervention_key};
use crate::models::{
    Character, CharacterState, CognitiveSnapshot, GateAssessment, ProjectOrbitAssignment,
};

const PLANET: char = '●';
const MOON: char = '◐';
const PROBE: char = '○';

fn character_symbol(state: CharacterState) -> char {
    match state {
        CharacterState::Healthy => '✓',
        CharacterState::Stressed => '!',
        CharacterState::Burnout => '✗',
    }
}

/// Render an orbit assignment as a tree rooted at the planet.
///
/// `names` maps project IDs to display names; unknown IDs print as the ID.
///
/// Example output:
/// ```text
/// ● Tax prep
/// ├── ◐ Etsy shop
/// ├── ◐ Garden
/// ├── ○ Podcast
/// └── +2 archived
/// ```
pub fn render_orbits(orbits: &ProjectOrbitAssignment, names: &HashMap<Uuid, String>) -> String {
    let name = |id: &Uuid| names.get(id).cloned().unwrap_or_else(|| id.to_string());

    let mut output = String::new();
    match &orbits.planet {
        Some(id) => {
            output.push(PLANET);
            output.push(' ');
            output.push_str(&name(id));
        }
        None => output.push_str("(no planet)"),
    }
    output.push('\n');

    let mut branches: Vec<String> = Vec::new();
    branches.extend(orbits.moons.iter().map(|id| format!("{} {}", MOON, name(id))));
    branches.extend(orbits.probes.iter().map(|id| format!("{} {}", PROBE, name(id))));
    if orbits.archived_count > 0 {
        branches.push(format!("+{} archived", orbits.archived_count));
    }

    for (i, branch) in branches.iter().enumerate() {
        let is_last = i == branches.len() - 1;
        output.push_str(if is_last { "└── " } else { "├── " });
        output.push_str(branch);
        output.push('\n');
    }
    output
}

/// Render a full snapshot as a short report.
///
/// The orbit tree is appended when any project is placed; `names` is passed
/// through to [`render_orbits`].
pub fn render_snapshot(snapshot: &CognitiveSnapshot, names: &HashMap<Uuid, String>) -> String {
    let s = &snapshot.scores;
    let mut output = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        output,
        "Status: {} (RAM {:.0}%){}",
        snapshot.status.as_str(),
        s.ram_usage,
        if snapshot.toto_alert { "  [Toto is barking]" } else { "" }
    );
    let _ = writeln!(
        output,
        "Drift: {:.0}%{}",
        snapshot.drift.drift_level,
        if snapshot.drift.is_in_void { " (in the void)" } else { "" }
    );

    for character in Character::ALL {
        let state = snapshot.characters.get(character);
        let _ = writeln!(
            output,
            "  {} {:<9} {:>3.0}  {}",
            character_symbol(state),
            character.display_name(),
            s.for_character(character),
            state.as_str()
        );
    }

    if snapshot.orbits.total() > 0 {
        output.push_str("Orbits:\n");
        output.push_str(&render_orbits(&snapshot.orbits, names));
    }
    output
}

/// Render a gate assessment as the menu the user would see.
pub fn render_assessment(assessment: &GateAssessment) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Impulse: {} ({})",
        assessment
            .impulse
            .name
            .as_deref()
            .unwrap_or(assessment.impulse.impulse_type.as_str()),
        assessment.classification.as_str()
    );
    let advice = dialogue::intervention_message(intervention_key(assessment));
    let _ = writeln!(output, "  \"{}\"", advice.text);

    if assessment.blocked {
        output.push_str("Blocked.\n");
        return output;
    }

    if assessment.can_proceed {
        output.push_str("  proceed\n");
    }
    let delays: Vec<String> = assessment
        .delay_minutes
        .iter()
        .map(|m| format!("{}m", m))
        .collect();
    let _ = writeln!(output, "  delay: {}", delays.join(", "));
    let destinations: Vec<&str> = assessment.destinations.iter().map(|c| c.as_str()).collect();
    let _ = writeln!(output, "  route: {}", destinations.join(", "));
    if let Some(suggested) = assessment.suggested_destination {
        let _ = writeln!(output, "  suggested: {}", suggested.display_name());
    }
    output
}
