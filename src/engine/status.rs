//! Discrete states derived from the load scores.

use crate::config::{CharacterThresholds, Thresholds};
use crate::models::{Character, CharacterState, CharacterStates, DriftReading, LoadScores, Status};

const OVERLOAD_AT: f64 = 85.0;
const CRITICAL_AT: f64 = 65.0;
const ELEVATED_AT: f64 = 40.0;

/// Any single axis at or above its alarm level raises Toto.
const TOTO_RAM_AT: f64 = 65.0;
const TOTO_EMOTIONAL_AT: f64 = 60.0;
const TOTO_ANXIETY_AT: f64 = 60.0;
const TOTO_DRIFT_AT: f64 = 60.0;

/// Map overall RAM usage to a status.
///
/// Total and non-decreasing over every `f64`; NaN is treated as stable.
pub fn classify_status(ram_usage: f64) -> Status {
    if ram_usage >= OVERLOAD_AT {
        Status::Overload
    } else if ram_usage >= CRITICAL_AT {
        Status::Critical
    } else if ram_usage >= ELEVATED_AT {
        Status::Elevated
    } else {
        Status::Stable
    }
}

pub fn classify_character(score: f64, thresholds: Thresholds) -> CharacterState {
    if score >= thresholds.burnout {
        CharacterState::Burnout
    } else if score >= thresholds.stressed {
        CharacterState::Stressed
    } else {
        CharacterState::Healthy
    }
}

pub fn classify_characters(scores: &LoadScores, thresholds: &CharacterThresholds) -> CharacterStates {
    let state = |character: Character| {
        classify_character(scores.for_character(character), thresholds.get(character))
    };

    CharacterStates {
        tin_man: state(Character::TinMan),
        scarecrow: state(Character::Scarecrow),
        lion: state(Character::Lion),
        dorothy: state(Character::Dorothy),
    }
}

/// "Any critical axis" alarm, independent of the overall status.
pub fn toto_alert(scores: &LoadScores, drift: &DriftReading) -> bool {
    scores.ram_usage >= TOTO_RAM_AT
        || scores.emotional_load >= TOTO_EMOTIONAL_AT
        || scores.anxiety_level >= TOTO_ANXIETY_AT
        || drift.drift_level >= TOTO_DRIFT_AT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds_are_inclusive() {
        assert_eq!(classify_status(0.0), Status::Stable);
        assert_eq!(classify_status(39.99), Status::Stable);
        assert_eq!(classify_status(40.0), Status::Elevated);
        assert_eq!(classify_status(65.0), Status::Critical);
        assert_eq!(classify_status(85.0), Status::Overload);
        assert_eq!(classify_status(100.0), Status::Overload);
    }

    #[test]
    fn status_is_total_over_odd_inputs() {
        assert_eq!(classify_status(f64::NEG_INFINITY), Status::Stable);
        assert_eq!(classify_status(f64::NAN), Status::Stable);
        assert_eq!(classify_status(f64::INFINITY), Status::Overload);
    }

    #[test]
    fn tin_man_burns_out_at_seventy() {
        let thresholds = CharacterThresholds::default().tin_man;
        assert_eq!(classify_character(39.0, thresholds), CharacterState::Healthy);
        assert_eq!(classify_character(40.0, thresholds), CharacterState::Stressed);
        assert_eq!(classify_character(70.0, thresholds), CharacterState::Burnout);
    }

    #[test]
    fn characters_follow_their_own_scores() {
        let scores = LoadScores {
            emotional_load: 80.0,
            logic_load: 10.0,
            anxiety_level: 35.0,
            executive_load: 75.0,
            ..Default::default()
        };
        let states = classify_characters(&scores, &CharacterThresholds::default());
        assert_eq!(states.tin_man, CharacterState::Burnout);
        assert_eq!(states.scarecrow, CharacterState::Healthy);
        assert_eq!(states.lion, CharacterState::Stressed);
        assert_eq!(states.dorothy, CharacterState::Burnout);
    }

    #[test]
    fn toto_fires_on_any_axis() {
        let calm = LoadScores::default();
        let still = DriftReading::default();
        assert!(!toto_alert(&calm, &still));

        let anxious = LoadScores {
            anxiety_level: 60.0,
            ..Default::default()
        };
        assert!(toto_alert(&anxious, &still));

        let drifting = DriftReading {
            drift_level: 60.0,
            is_in_void: false,
        };
        assert!(toto_alert(&calm, &drifting));
    }

    #[test]
    fn toto_can_fire_while_status_is_stable() {
        let scores = LoadScores {
            emotional_load: 90.0,
            ..Default::default()
        };
        assert_eq!(classify_status(scores.ram_usage), Status::Stable);
        assert!(toto_alert(&scores, &DriftReading::default()));
    }
}
