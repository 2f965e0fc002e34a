//! The intervention gate.
//!
//! Rules, in priority order:
//! 1. A destructive impulse is blocked whatever the load.
//! 2. In overload, proceeding directly is not offered; delay and route are.
//! 3. Otherwise every option is offered.
//!
//! Routing is permissive: any impulse may be sent to any companion. The
//! classification only supplies a suggestion.

use thiserror::Error;

use crate::models::{
    Character, DELAY_MENU_MINUTES, GateAssessment, GateChoice, GateOutcome, Impulse,
    ImpulseClassification, ImpulseType, InterventionKey, Status,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Proceeding is not available while in {0}")]
    ProceedUnavailable(&'static str),

    #[error("Delay of {0} minutes is not on the menu")]
    DelayUnavailable(u32),
}

pub fn classify_impulse(impulse_type: ImpulseType) -> ImpulseClassification {
    match impulse_type {
        ImpulseType::NewProject | ImpulseType::NewIdea => ImpulseClassification::Novelty,
        ImpulseType::Purchase => ImpulseClassification::Emotional,
        ImpulseType::Avoidance => ImpulseClassification::Fear,
        ImpulseType::Research => ImpulseClassification::Logic,
        ImpulseType::Reorganize => ImpulseClassification::Executive,
        ImpulseType::PlannedWork | ImpulseType::Other => ImpulseClassification::Legitimate,
        ImpulseType::Abandon => ImpulseClassification::Destructive,
    }
}

/// The companion best suited to handle an impulse of this kind.
pub fn suggested_destination(classification: ImpulseClassification) -> Option<Character> {
    match classification {
        ImpulseClassification::Emotional => Some(Character::TinMan),
        ImpulseClassification::Logic => Some(Character::Scarecrow),
        ImpulseClassification::Fear => Some(Character::Lion),
        ImpulseClassification::Novelty
        | ImpulseClassification::Executive
        | ImpulseClassification::Legitimate => Some(Character::Dorothy),
        ImpulseClassification::Destructive => None,
    }
}

/// Build the menu the user sees for an impulse under the current status.
pub fn assess(impulse: &Impulse, status: Status) -> GateAssessment {
    let classification = classify_impulse(impulse.impulse_type);
    let blocked = classification == ImpulseClassification::Destructive;

    if blocked {
        tracing::info!(
            impulse = impulse.impulse_type.as_str(),
            name = impulse.name.as_deref().unwrap_or(""),
            "Blocked destructive impulse"
        );
    }

    let (delay_minutes, destinations) = if blocked {
        (Vec::new(), Vec::new())
    } else {
        (DELAY_MENU_MINUTES.to_vec(), Character::ALL.to_vec())
    };

    GateAssessment {
        impulse: impulse.clone(),
        classification,
        status,
        suggested_destination: suggested_destination(classification),
        blocked,
        can_proceed: !blocked && status != Status::Overload,
        delay_minutes,
        destinations,
    }
}

/// The wizard intervention that accompanies an assessment.
///
/// An impulse held back only by overload gets the overload message; anything
/// else speaks to its classification.
pub fn intervention_key(assessment: &GateAssessment) -> InterventionKey {
    if !assessment.blocked && assessment.status == Status::Overload {
        InterventionKey::Overload
    } else {
        InterventionKey::from(assessment.classification)
    }
}

/// Resolve the user's choice against an assessment.
///
/// A blocked assessment resolves to [`GateOutcome::Block`] for every choice.
/// Picking an option the assessment did not offer is an error.
pub fn resolve(assessment: &GateAssessment, choice: GateChoice) -> Result<GateOutcome, GateError> {
    if assessment.blocked {
        return Ok(GateOutcome::Block);
    }

    match choice {
        GateChoice::Proceed if assessment.can_proceed => Ok(GateOutcome::Proceed),
        GateChoice::Proceed => Err(GateError::ProceedUnavailable(assessment.status.as_str())),
        GateChoice::Delay { minutes } if assessment.delay_minutes.contains(&minutes) => {
            Ok(GateOutcome::Delay {
                pending_minutes: minutes,
            })
        }
        GateChoice::Delay { minutes } => Err(GateError::DelayUnavailable(minutes)),
        GateChoice::Route { destination } => Ok(GateOutcome::Route { destination }),
    }
}
