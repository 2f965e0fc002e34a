use serde::{Deserialize, Serialize};

use super::{ImpulseClassification, Status};

/// Emotional register of a wizard message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Encouraging,
    Calming,
    Warning,
    Celebrating,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Encouraging => "encouraging",
            Self::Calming => "calming",
            Self::Warning => "warning",
            Self::Celebrating => "celebrating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    Greeting,
    Completion,
    Onboarding,
    Intervention,
    Status,
}

impl MessageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Greeting => "greeting",
            Self::Completion => "completion",
            Self::Onboarding => "onboarding",
            Self::Intervention => "intervention",
            Self::Status => "status",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "greeting" => Some(Self::Greeting),
            "completion" => Some(Self::Completion),
            "onboarding" => Some(Self::Onboarding),
            "intervention" => Some(Self::Intervention),
            "status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// The seven daily onboarding stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStage {
    Day1,
    Day2,
    Day3,
    Day4,
    Day5,
    Day6,
    Day7,
}

impl OnboardingStage {
    pub const ALL: [OnboardingStage; 7] = [
        OnboardingStage::Day1,
        OnboardingStage::Day2,
        OnboardingStage::Day3,
        OnboardingStage::Day4,
        OnboardingStage::Day5,
        OnboardingStage::Day6,
        OnboardingStage::Day7,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "day1",
            Self::Day2 => "day2",
            Self::Day3 => "day3",
            Self::Day4 => "day4",
            Self::Day5 => "day5",
            Self::Day6 => "day6",
            Self::Day7 => "day7",
        }
    }

    /// Parse a stage key, accepting the stage names used before the
    /// onboarding flow was split into days.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "day1" | "welcome" => Some(Self::Day1),
            "day2" | "first_capture" => Some(Self::Day2),
            "day3" | "first_project" => Some(Self::Day3),
            "day4" | "first_task" => Some(Self::Day4),
            "day5" => Some(Self::Day5),
            "day6" => Some(Self::Day6),
            "day7" | "complete" | "graduated" => Some(Self::Day7),
            _ => None,
        }
    }
}

/// Keys of the fixed intervention messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKey {
    Novelty,
    Emotional,
    Fear,
    Logic,
    Executive,
    Legitimate,
    Destructive,
    Drift,
    Overload,
}

impl InterventionKey {
    pub const ALL: [InterventionKey; 9] = [
        InterventionKey::Novelty,
        InterventionKey::Emotional,
        InterventionKey::Fear,
        InterventionKey::Logic,
        InterventionKey::Executive,
        InterventionKey::Legitimate,
        InterventionKey::Destructive,
        InterventionKey::Drift,
        InterventionKey::Overload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novelty => "novelty",
            Self::Emotional => "emotional",
            Self::Fear => "fear",
            Self::Logic => "logic",
            Self::Executive => "executive",
            Self::Legitimate => "legitimate",
            Self::Destructive => "destructive",
            Self::Drift => "drift",
            Self::Overload => "overload",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "novelty" => Some(Self::Novelty),
            "emotional" => Some(Self::Emotional),
            "fear" => Some(Self::Fear),
            "logic" => Some(Self::Logic),
            "executive" => Some(Self::Executive),
            "legitimate" => Some(Self::Legitimate),
            "destructive" => Some(Self::Destructive),
            "drift" | "void" => Some(Self::Drift),
            "overload" => Some(Self::Overload),
            _ => None,
        }
    }
}

impl From<ImpulseClassification> for InterventionKey {
    fn from(classification: ImpulseClassification) -> Self {
        match classification {
            ImpulseClassification::Novelty => Self::Novelty,
            ImpulseClassification::Emotional => Self::Emotional,
            ImpulseClassification::Fear => Self::Fear,
            ImpulseClassification::Logic => Self::Logic,
            ImpulseClassification::Executive => Self::Executive,
            ImpulseClassification::Legitimate => Self::Legitimate,
            ImpulseClassification::Destructive => Self::Destructive,
        }
    }
}

/// A piece of coaching copy, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardMessage {
    pub text: String,
    pub tone: Tone,
    pub category: MessageCategory,
}

/// A request for a wizard message.
///
/// Stage and intervention keys come from UI strings; unknown keys
/// deserialize to `None` and the selector falls back to its default entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRequest {
    pub category: MessageCategory,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient_key")]
    pub stage: Option<OnboardingStage>,
    #[serde(default, deserialize_with = "lenient_key")]
    pub intervention: Option<InterventionKey>,
}

impl MessageRequest {
    pub fn new(category: MessageCategory) -> Self {
        Self {
            category,
            status: None,
            stage: None,
            intervention: None,
        }
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_stage(mut self, stage: OnboardingStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_intervention(mut self, intervention: InterventionKey) -> Self {
        self.intervention = Some(intervention);
        self
    }
}

/// Keys that can be parsed from a loosely-typed UI string.
pub trait LenientKey: Sized {
    fn parse_key(s: &str) -> Option<Self>;
}

impl LenientKey for OnboardingStage {
    fn parse_key(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

impl LenientKey for InterventionKey {
    fn parse_key(s: &str) -> Option<Self> {
        Self::from_str(s)
    }
}

fn lenient_key<'de, D, K>(deserializer: D) -> Result<Option<K>, D::Error>
where
    D: serde::Deserializer<'de>,
    K: LenientKey,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(K::parse_key))
}
