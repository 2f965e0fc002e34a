//! Tunable engine constants and server settings.
//!
//! [`EngineConfig`] is loaded from an optional JSON file; every field has a
//! default so partial files are fine. [`ServerConfig`] comes from environment
//! variables:
//! - `OZ_PORT` - HTTP port (default: `17020`)
//! - `OZ_API_KEY` - bearer token required by the API (optional for local use)
//! - `OZ_CORS_ORIGINS` - allowed origins, comma-separated
//! - `OZ_RATE_LIMIT` - requests per minute per client when an API key is set
//! - `OZ_SESSION_TTL` - minutes a session may go unused before it expires
//!   (default: `120`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Character;

pub const DEFAULT_PORT: u16 = 17020;
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 120;
const MAX_SESSION_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Per-item weights of the overall RAM usage score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RamWeights {
    pub project: f64,
    pub task: f64,
    pub dump: f64,
    pub overdue: f64,
}

impl Default for RamWeights {
    fn default() -> Self {
        Self {
            project: 15.0,
            task: 3.0,
            dump: 5.0,
            overdue: 10.0,
        }
    }
}

/// `[stressed, burnout]` score thresholds of one character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub stressed: f64,
    pub burnout: f64,
}

impl Thresholds {
    pub const fn new(stressed: f64, burnout: f64) -> Self {
        Self { stressed, burnout }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterThresholds {
    pub tin_man: Thresholds,
    pub scarecrow: Thresholds,
    pub lion: Thresholds,
    pub dorothy: Thresholds,
}

impl CharacterThresholds {
    pub fn get(&self, character: Character) -> Thresholds {
        match character {
            Character::TinMan => self.tin_man,
            Character::Scarecrow => self.scarecrow,
            Character::Lion => self.lion,
            Character::Dorothy => self.dorothy,
        }
    }
}

impl Default for CharacterThresholds {
    fn default() -> Self {
        Self {
            tin_man: Thresholds::new(40.0, 70.0),
            scarecrow: Thresholds::new(40.0, 70.0),
            lion: Thresholds::new(30.0, 60.0),
            dorothy: Thresholds::new(40.0, 75.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub ram_weights: RamWeights,
    pub characters: CharacterThresholds,
}

impl EngineConfig {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No engine config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// HTTP server settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub api_key: Option<String>,
    pub cors_origins: Option<Vec<String>>,
    pub rate_limit: u32,
    pub session_ttl_minutes: i64,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("OZ_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_key = std::env::var("OZ_API_KEY").ok().filter(|k| !k.is_empty());

        let cors_origins = std::env::var("OZ_CORS_ORIGINS")
            .ok()
            .map(|s| s.split(',').map(|s| s.trim().to_string()).collect());

        let rate_limit = std::env::var("OZ_RATE_LIMIT")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(100);

        let session_ttl_minutes = std::env::var("OZ_SESSION_TTL")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|m| (1..=MAX_SESSION_TTL_MINUTES).contains(m))
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);

        Self {
            port,
            api_key,
            cors_origins,
            rate_limit,
            session_ttl_minutes,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            cors_origins: None,
            rate_limit: 100,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        }
    }
}
