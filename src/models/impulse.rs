use serde::{Deserialize, Serialize};

use super::{Character, Status};

/// Coarse type of a pending user action, as tagged by the UI.
///
/// Unrecognized tags deserialize to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseType {
    NewProject,
    NewIdea,
    Purchase,
    Avoidance,
    Research,
    Reorganize,
    PlannedWork,
    Abandon,
    #[serde(other)]
    Other,
}

impl ImpulseType {
    pub const ALL: [ImpulseType; 9] = [
        ImpulseType::NewProject,
        ImpulseType::NewIdea,
        ImpulseType::Purchase,
        ImpulseType::Avoidance,
        ImpulseType::Research,
        ImpulseType::Reorganize,
        ImpulseType::PlannedWork,
        ImpulseType::Abandon,
        ImpulseType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewProject => "new_project",
            Self::NewIdea => "new_idea",
            Self::Purchase => "purchase",
            Self::Avoidance => "avoidance",
            Self::Research => "research",
            Self::Reorganize => "reorganize",
            Self::PlannedWork => "planned_work",
            Self::Abandon => "abandon",
            Self::Other => "other",
        }
    }

    /// Parse a UI tag. Unknown tags fall back to `Other` instead of failing.
    pub fn parse(s: &str) -> Self {
        match s {
            "new_project" => Self::NewProject,
            "new_idea" => Self::NewIdea,
            "purchase" => Self::Purchase,
            "avoidance" => Self::Avoidance,
            "research" => Self::Research,
            "reorganize" => Self::Reorganize,
            "planned_work" => Self::PlannedWork,
            "abandon" => Self::Abandon,
            _ => Self::Other,
        }
    }
}

/// A pending user action submitted to the intervention gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Impulse {
    #[serde(rename = "type")]
    pub impulse_type: ImpulseType,
    #[serde(default)]
    pub name: Option<String>,
}

impl Impulse {
    pub fn new(impulse_type: ImpulseType) -> Self {
        Self {
            impulse_type,
            name: None,
        }
    }

    pub fn named(impulse_type: ImpulseType, name: impl Into<String>) -> Self {
        Self {
            impulse_type,
            name: Some(name.into()),
        }
    }
}

/// What drives an impulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseClassification {
    Novelty,
    Emotional,
    Fear,
    Logic,
    Executive,
    Legitimate,
    Destructive,
}

impl ImpulseClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novelty => "novelty",
            Self::Emotional => "emotional",
            Self::Fear => "fear",
            Self::Logic => "logic",
            Self::Executive => "executive",
            Self::Legitimate => "legitimate",
            Self::Destructive => "destructive",
        }
    }
}

/// How long an impulse may be parked.
pub const DELAY_MENU_MINUTES: [u32; 4] = [5, 10, 30, 60];

/// The gate's reading of an impulse under the current status.
///
/// This is the menu presented to the user; [`GateChoice`] is what they pick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateAssessment {
    pub impulse: Impulse,
    pub classification: ImpulseClassification,
    pub status: Status,
    /// Where the impulse would best be handled. `None` when blocked.
    pub suggested_destination: Option<Character>,
    pub blocked: bool,
    pub can_proceed: bool,
    pub delay_minutes: Vec<u32>,
    pub destinations: Vec<Character>,
}

/// The user's pick from a [`GateAssessment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GateChoice {
    Proceed,
    Delay { minutes: u32 },
    Route { destination: Character },
}

/// Terminal state of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    Proceed,
    Delay { pending_minutes: u32 },
    Route { destination: Character },
    Block,
}
