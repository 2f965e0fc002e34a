use serde::{Deserialize, Serialize};

/// The five independent load scores, each clamped to `[0, 100]`.
///
/// The scores are deliberately not normalized against each other: every one
/// models a different character's burden and they may disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadScores {
    /// Overall aggregate load.
    pub ram_usage: f64,
    /// Tin Man (heart).
    pub emotional_load: f64,
    /// Scarecrow (brain).
    pub logic_load: f64,
    /// Lion (courage).
    pub anxiety_level: f64,
    /// Dorothy (getting things home).
    pub executive_load: f64,
}

impl LoadScores {
    /// The sub-score a character is driven by.
    pub fn for_character(&self, character: Character) -> f64 {
        match character {
            Character::TinMan => self.emotional_load,
            Character::Scarecrow => self.logic_load,
            Character::Lion => self.anxiety_level,
            Character::Dorothy => self.executive_load,
        }
    }
}

/// Overall status, ordered from calmest to worst.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Stable,
    Elevated,
    Critical,
    Overload,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Stable,
        Status::Elevated,
        Status::Critical,
        Status::Overload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Elevated => "elevated",
            Self::Critical => "critical",
            Self::Overload => "overload",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "stable" => Some(Self::Stable),
            "elevated" => Some(Self::Elevated),
            "critical" => Some(Self::Critical),
            "overload" => Some(Self::Overload),
            _ => None,
        }
    }
}

/// The four companions, each personifying one load axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Character {
    #[serde(rename = "tinman", alias = "tin_man")]
    TinMan,
    Scarecrow,
    Lion,
    Dorothy,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::TinMan,
        Character::Scarecrow,
        Character::Lion,
        Character::Dorothy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TinMan => "tinman",
            Self::Scarecrow => "scarecrow",
            Self::Lion => "lion",
            Self::Dorothy => "dorothy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tinman" | "tin_man" => Some(Self::TinMan),
            "scarecrow" => Some(Self::Scarecrow),
            "lion" => Some(Self::Lion),
            "dorothy" => Some(Self::Dorothy),
            _ => None,
        }
    }

    /// Display name used in coaching copy.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TinMan => "Tin Man",
            Self::Scarecrow => "Scarecrow",
            Self::Lion => "Lion",
            Self::Dorothy => "Dorothy",
        }
    }
}

/// Three-level state of a single character.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CharacterState {
    #[default]
    Healthy,
    Stressed,
    Burnout,
}

impl CharacterState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Stressed => "stressed",
            Self::Burnout => "burnout",
        }
    }
}

/// Derived state of all four characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStates {
    pub tin_man: CharacterState,
    pub scarecrow: CharacterState,
    pub lion: CharacterState,
    pub dorothy: CharacterState,
}

impl CharacterStates {
    pub fn get(&self, character: Character) -> CharacterState {
        match character {
            Character::TinMan => self.tin_man,
            Character::Scarecrow => self.scarecrow,
            Character::Lion => self.lion,
            Character::Dorothy => self.dorothy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_wire_names_match_as_str() {
        for character in Character::ALL {
            let json = serde_json::to_string(&character).unwrap();
            assert_eq!(json, format!("\"{}\"", character.as_str()));
        }
    }

    #[test]
    fn tin_man_accepts_legacy_wire_name() {
        let character: Character = serde_json::from_str("\"tin_man\"").unwrap();
        assert_eq!(character, Character::TinMan);
    }
}
