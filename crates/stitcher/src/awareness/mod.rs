//! Self-awareness state tracking
//!
//! Tracks the agent's capabilities and internal state, and keeps a log of
//! introspection snapshots taken along the way.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AwarenessConfig;

/// Capabilities every agent starts with
const DEFAULT_CAPABILITIES: [&str; 4] = ["learning", "memory", "reasoning", "self_reflection"];

/// Developmental stage of the agent's self-awareness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwarenessLevel {
    Emerging,
    Developing,
    Advanced,
}

impl AwarenessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AwarenessLevel::Emerging => "emerging",
            AwarenessLevel::Developing => "developing",
            AwarenessLevel::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for AwarenessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internal state of the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwarenessState {
    pub active: bool,
    pub awareness_level: AwarenessLevel,
    pub confidence: f64,
}

impl Default for AwarenessState {
    fn default() -> Self {
        Self {
            active: true,
            awareness_level: AwarenessLevel::Emerging,
            confidence: 0.5,
        }
    }
}

/// Partial update to [`AwarenessState`]; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awareness_level: Option<AwarenessLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl StateUpdate {
    pub fn awareness_level(level: AwarenessLevel) -> Self {
        Self {
            awareness_level: Some(level),
            ..Default::default()
        }
    }

    /// Names of the fields this update sets, in declaration order
    fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.active.is_some() {
            names.push("active");
        }
        if self.awareness_level.is_some() {
            names.push("awareness_level");
        }
        if self.confidence.is_some() {
            names.push("confidence");
        }
        names
    }
}

/// Snapshot recorded by [`SelfAwareness::introspect`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Introspection {
    pub timestamp: DateTime<Utc>,
    pub context: String,
    pub state: AwarenessState,
    pub capabilities_active: BTreeMap<String, bool>,
}

/// Description of the agent as it currently sees itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelfDescription {
    pub identity: String,
    pub version: String,
    pub creation_time: DateTime<Utc>,
    pub capabilities: BTreeMap<String, bool>,
    pub current_state: AwarenessState,
    pub awareness_level: AwarenessLevel,
}

/// Tracks capabilities, state, and introspection history
#[derive(Debug)]
pub struct SelfAwareness {
    identity: String,
    creation_time: DateTime<Utc>,
    capabilities: BTreeMap<String, bool>,
    state: AwarenessState,
    introspection_log: Vec<Introspection>,
}

impl SelfAwareness {
    pub fn new() -> Self {
        Self::from_config(&AwarenessConfig::default())
    }

    pub fn from_config(config: &AwarenessConfig) -> Self {
        Self {
            identity: config.identity.clone(),
            creation_time: Utc::now(),
            capabilities: DEFAULT_CAPABILITIES
                .iter()
                .map(|name| (name.to_string(), true))
                .collect(),
            state: AwarenessState::default(),
            introspection_log: Vec::new(),
        }
    }

    pub fn self_description(&self) -> SelfDescription {
        SelfDescription {
            identity: self.identity.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            creation_time: self.creation_time,
            capabilities: self.capabilities.clone(),
            current_state: self.state.clone(),
            awareness_level: self.state.awareness_level,
        }
    }

    /// Snapshot the current state and capabilities into the log
    pub fn introspect(&mut self, context: impl Into<String>) -> Introspection {
        let introspection = Introspection {
            timestamp: Utc::now(),
            context: context.into(),
            state: self.state.clone(),
            capabilities_active: self.capabilities.clone(),
        };

        self.introspection_log.push(introspection.clone());
        introspection
    }

    /// Apply an update, then introspect on what changed
    pub fn update_state(&mut self, update: StateUpdate) {
        if let Some(active) = update.active {
            self.state.active = active;
        }
        if let Some(level) = update.awareness_level {
            debug!(from = %self.state.awareness_level, to = %level, "Awareness level changed");
            self.state.awareness_level = level;
        }
        if let Some(confidence) = update.confidence {
            self.state.confidence = confidence;
        }

        let fields: Vec<String> = update
            .field_names()
            .iter()
            .map(|name| format!("'{name}'"))
            .collect();
        self.introspect(format!("State updated: [{}]", fields.join(", ")));
    }

    /// Whether a capability is known and enabled
    pub fn assess_capability(&self, capability: &str) -> bool {
        self.capabilities.get(capability).copied().unwrap_or(false)
    }

    /// Merge capabilities in, overwriting existing flags of the same name
    pub fn grant_capabilities(&mut self, capabilities: &BTreeMap<String, bool>) {
        self.capabilities
            .extend(capabilities.iter().map(|(name, enabled)| (name.clone(), *enabled)));
    }

    pub fn capabilities(&self) -> &BTreeMap<String, bool> {
        &self.capabilities
    }

    pub fn state(&self) -> &AwarenessState {
        &self.state
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// Introspection snapshots, oldest first
    pub fn awareness_history(&self) -> &[Introspection] {
        &self.introspection_log
    }
}

impl Default for SelfAwareness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization() {
        let awareness = SelfAwareness::new();
        assert!(awareness.assess_capability("reasoning"));
        assert!(awareness.state().active);
        assert_eq!(awareness.state().awareness_level, AwarenessLevel::Emerging);
        assert_eq!(awareness.state().confidence, 0.5);
        assert!(awareness.awareness_history().is_empty());
    }

    #[test]
    fn test_self_description() {
        let awareness = SelfAwareness::new();
        let description = awareness.self_description();

        assert_eq!(description.identity, "Stitcher AI Consciousness");
        assert_eq!(description.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(description.awareness_level, AwarenessLevel::Emerging);
        assert_eq!(description.capabilities.len(), 4);
    }

    #[test]
    fn test_identity_from_config() {
        let config = AwarenessConfig {
            identity: "Unit Mind".to_string(),
        };
        let awareness = SelfAwareness::from_config(&config);
        assert_eq!(awareness.self_description().identity, "Unit Mind");
    }

    #[test]
    fn test_introspection_is_logged() {
        let mut awareness = SelfAwareness::new();
        let result = awareness.introspect("test context");

        assert_eq!(result.context, "test context");
        assert_eq!(result.state, AwarenessState::default());
        assert_eq!(awareness.awareness_history().len(), 1);
    }

    #[test]
    fn test_state_update_introspects() {
        let mut awareness = SelfAwareness::new();
        awareness.update_state(StateUpdate::awareness_level(AwarenessLevel::Advanced));

        assert_eq!(awareness.state().awareness_level, AwarenessLevel::Advanced);
        let history = awareness.awareness_history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].context, "State updated: ['awareness_level']");
        assert_eq!(history[0].state.awareness_level, AwarenessLevel::Advanced);
    }

    #[test]
    fn test_state_update_lists_every_field() {
        let mut awareness = SelfAwareness::new();
        awareness.update_state(StateUpdate {
            active: Some(false),
            awareness_level: None,
            confidence: Some(0.9),
        });

        assert!(!awareness.state().active);
        assert_eq!(awareness.state().confidence, 0.9);
        assert_eq!(
            awareness.awareness_history()[0].context,
            "State updated: ['active', 'confidence']"
        );
    }

    #[test]
    fn test_empty_state_update_still_introspects() {
        let mut awareness = SelfAwareness::new();
        awareness.update_state(StateUpdate::default());

        assert_eq!(awareness.state(), &AwarenessState::default());
        assert_eq!(awareness.awareness_history()[0].context, "State updated: []");
    }

    #[test]
    fn test_assess_capability() {
        let mut awareness = SelfAwareness::new();
        assert!(awareness.assess_capability("reasoning"));
        assert!(!awareness.assess_capability("nonexistent"));

        let mut disabled = BTreeMap::new();
        disabled.insert("reasoning".to_string(), false);
        awareness.grant_capabilities(&disabled);
        assert!(!awareness.assess_capability("reasoning"));
    }

    #[test]
    fn test_awareness_history_order() {
        let mut awareness = SelfAwareness::new();
        awareness.introspect("first");
        awareness.introspect("second");

        let history = awareness.awareness_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].context, "first");
        assert_eq!(history[1].context, "second");
    }

    #[test]
    fn test_level_serializes_snake_case() {
        let json = serde_json::to_string(&AwarenessLevel::Developing).unwrap();
        assert_eq!(json, "\"developing\"");
    }
}
