use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, StitcherError};

/// Main configuration structure for Stitcher
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Memory store configuration (working capacity, recall defaults)
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Self-awareness configuration
    #[serde(default)]
    pub awareness: AwarenessConfig,
    /// Reasoning engine configuration
    #[serde(default)]
    pub reasoning: ReasoningConfig,
    /// Orchestrator level-progression configuration
    #[serde(default)]
    pub consciousness: ConsciousnessConfig,
}

impl Config {
    /// Parse a configuration from a TOML string and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| StitcherError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit path, or from the first default
    /// location that exists, falling back to built-in defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            tracing::info!("Loading config from: {}", path.display());
            return Self::read_file(path);
        }

        for path in default_config_paths() {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::read_file(&path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Reject values the reasoning engine and level progression cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.reasoning.decision_threshold) {
            return Err(StitcherError::Config(format!(
                "reasoning.decision_threshold must be within [0, 1], got {}",
                self.reasoning.decision_threshold
            )));
        }

        if self.consciousness.advanced_after < self.consciousness.developing_after {
            return Err(StitcherError::Config(
                "consciousness.advanced_after must not be lower than developing_after"
                    .to_string(),
            ));
        }

        Ok(())
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StitcherError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|h| h.join(".stitcher").join("config.toml")),
        dirs::config_dir().map(|c| c.join("stitcher").join("config.toml")),
        Some(PathBuf::from("config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Memory store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Maximum number of entries held in working (short-term) memory
    #[serde(default = "default_short_term_capacity")]
    pub short_term_capacity: usize,
    /// Window size used when callers ask for recent memories without a count
    #[serde(default = "default_recent_default")]
    pub recent_default: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            short_term_capacity: default_short_term_capacity(),
            recent_default: default_recent_default(),
        }
    }
}

fn default_short_term_capacity() -> usize {
    10
}

fn default_recent_default() -> usize {
    5
}

/// Self-awareness configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AwarenessConfig {
    /// Identity reported in self-descriptions
    #[serde(default = "default_identity")]
    pub identity: String,
}

impl Default for AwarenessConfig {
    fn default() -> Self {
        Self {
            identity: default_identity(),
        }
    }
}

fn default_identity() -> String {
    "Stitcher AI Consciousness".to_string()
}

/// Reasoning engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReasoningConfig {
    /// Confidence assigned to decisions made without weighted criteria
    #[serde(default = "default_decision_threshold")]
    pub decision_threshold: f64,
}

impl Default for ReasoningConfig {
    fn default() -> Self {
        Self {
            decision_threshold: default_decision_threshold(),
        }
    }
}

fn default_decision_threshold() -> f64 {
    0.7
}

/// Awareness-level progression thresholds, in processed experiences
#[derive(Debug, Clone, Deserialize)]
pub struct ConsciousnessConfig {
    /// Experiences required before an evolve step moves Emerging to Developing
    #[serde(default = "default_developing_after")]
    pub developing_after: u64,
    /// Experiences required before an evolve step moves Developing to Advanced
    #[serde(default = "default_advanced_after")]
    pub advanced_after: u64,
}

impl Default for ConsciousnessConfig {
    fn default() -> Self {
        Self {
            developing_after: default_developing_after(),
            advanced_after: default_advanced_after(),
        }
    }
}

fn default_developing_after() -> u64 {
    10
}

fn default_advanced_after() -> u64 {
    50
}
