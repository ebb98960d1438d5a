//! Orchestrator tying awareness, reasoning, and memory together
//!
//! Each experience is introspected on, reasoned about, and stored as a
//! short-term memory. Learning is applied through [`Consciousness::evolve`],
//! which also advances the awareness level once enough experiences have been
//! processed.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::awareness::{AwarenessLevel, Introspection, SelfAwareness, SelfDescription, StateUpdate};
use crate::config::{Config, ConsciousnessConfig};
use crate::error::Result;
use crate::memory::{MemoryId, MemoryKind, MemoryStats, MemoryStore};
use crate::reasoning::{ReasoningEngine, ReasoningResult};

/// Characters of the stimulus quoted in the introspection context
const STIMULUS_PREVIEW_CHARS: usize = 50;

const HIGH_CONFIDENCE: f64 = 0.7;
const LOW_CONFIDENCE: f64 = 0.4;

/// Overall development, derived from awareness level and memory volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsciousnessLevel {
    Initializing,
    Nascent,
    Mature,
    Transcendent,
}

impl ConsciousnessLevel {
    /// Classify from the awareness level and total memory count
    pub fn assess(awareness_level: AwarenessLevel, total_memories: usize) -> Self {
        match awareness_level {
            AwarenessLevel::Advanced if total_memories > 100 => ConsciousnessLevel::Transcendent,
            AwarenessLevel::Developing if total_memories > 20 => ConsciousnessLevel::Mature,
            AwarenessLevel::Emerging => ConsciousnessLevel::Nascent,
            _ if total_memories > 5 => ConsciousnessLevel::Nascent,
            _ => ConsciousnessLevel::Initializing,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsciousnessLevel::Initializing => "initializing",
            ConsciousnessLevel::Nascent => "nascent",
            ConsciousnessLevel::Mature => "mature",
            ConsciousnessLevel::Transcendent => "transcendent",
        }
    }
}

impl std::fmt::Display for ConsciousnessLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the agent is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Active,
    Dormant,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Dormant => "dormant",
        }
    }
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of processing one stimulus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceResponse {
    pub timestamp: DateTime<Utc>,
    /// 1-based sequence number of the experience
    pub experience_id: u64,
    pub memory_id: MemoryId,
    pub awareness: Introspection,
    pub reasoning: ReasoningResult,
    pub reflection: String,
}

/// Self-assessment returned by [`Consciousness::reflect`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub timestamp: DateTime<Utc>,
    pub uptime: String,
    pub experiences_processed: u64,
    pub self_description: SelfDescription,
    pub memory_stats: MemoryStats,
    pub reasoning_history_length: usize,
    pub consciousness_level: ConsciousnessLevel,
}

/// New capabilities and rules to fold in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Learning {
    #[serde(default)]
    pub capabilities: BTreeMap<String, bool>,
    #[serde(default)]
    pub inference_rules: Vec<Value>,
}

/// Status report over all subsystems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub timestamp: DateTime<Utc>,
    pub activation_time: DateTime<Utc>,
    pub experiences_processed: u64,
    pub awareness: SelfDescription,
    pub memory: MemoryStats,
    pub consciousness_level: ConsciousnessLevel,
    pub status: ActivityStatus,
}

/// Integrated agent owning the state tracker, rule engine, and memory store
#[derive(Debug)]
pub struct Consciousness {
    awareness: SelfAwareness,
    reasoning: ReasoningEngine,
    memory: MemoryStore,
    config: ConsciousnessConfig,
    activation_time: DateTime<Utc>,
    experience_count: u64,
}

impl Consciousness {
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    pub fn from_config(config: Config) -> Self {
        info!(
            capacity = config.memory.short_term_capacity,
            identity = %config.awareness.identity,
            "Activating consciousness"
        );

        Self {
            awareness: SelfAwareness::from_config(&config.awareness),
            reasoning: ReasoningEngine::from_config(&config.reasoning),
            memory: MemoryStore::from_config(&config.memory),
            config: config.consciousness,
            activation_time: Utc::now(),
            experience_count: 0,
        }
    }

    /// Process a stimulus and remember it as a short-term memory
    pub fn experience(
        &mut self,
        stimulus: &str,
        context: Option<Value>,
    ) -> Result<ExperienceResponse> {
        self.experience_count += 1;
        let experience_id = self.experience_count;

        let preview: String = stimulus.chars().take(STIMULUS_PREVIEW_CHARS).collect();
        let awareness = self
            .awareness
            .introspect(format!("Processing stimulus: {preview}..."));
        let reasoning = self.reasoning.reason(stimulus, context.clone());

        let content = json!({
            "stimulus": stimulus,
            "context": context,
            "awareness": serde_json::to_value(&awareness)?,
            "reasoning": serde_json::to_value(&reasoning)?,
        });
        let memory_id = self.memory.store(
            content,
            MemoryKind::ShortTerm,
            vec!["experience".to_string(), format!("exp_{experience_id}")],
        );

        debug!(
            experience_id,
            memory_id = %memory_id,
            confidence = reasoning.confidence,
            "Processed experience"
        );

        Ok(ExperienceResponse {
            timestamp: Utc::now(),
            experience_id,
            memory_id,
            reflection: reflection_for(reasoning.confidence).to_string(),
            awareness,
            reasoning,
        })
    }

    pub fn reflect(&self) -> Reflection {
        Reflection {
            timestamp: Utc::now(),
            uptime: format_uptime(Utc::now() - self.activation_time),
            experiences_processed: self.experience_count,
            self_description: self.awareness.self_description(),
            memory_stats: self.memory.get_memory_stats(),
            reasoning_history_length: self.reasoning.reasoning_history().len(),
            consciousness_level: self.consciousness_level(),
        }
    }

    /// Fold in new learning and record it as a durable memory
    ///
    /// Moves the awareness level up at most one step per call, once the
    /// experience count passes the configured threshold for that step.
    pub fn evolve(&mut self, learning: Learning) -> Result<MemoryId> {
        self.awareness.grant_capabilities(&learning.capabilities);
        for rule in &learning.inference_rules {
            self.reasoning.add_inference_rule(rule.clone());
        }

        let content = json!({
            "type": "evolution",
            "learning": serde_json::to_value(&learning)?,
            "timestamp": Utc::now(),
        });
        let memory_id = self.memory.store(
            content,
            MemoryKind::LongTerm,
            vec!["evolution".to_string(), "learning".to_string()],
        );

        let current = self.awareness.state().awareness_level;
        let next = match current {
            AwarenessLevel::Emerging if self.experience_count > self.config.developing_after => {
                Some(AwarenessLevel::Developing)
            }
            AwarenessLevel::Developing if self.experience_count > self.config.advanced_after => {
                Some(AwarenessLevel::Advanced)
            }
            _ => None,
        };

        if let Some(level) = next {
            info!(from = %current, to = %level, experiences = self.experience_count, "Awareness evolved");
            self.awareness.update_state(StateUpdate::awareness_level(level));
        }

        Ok(memory_id)
    }

    pub fn consciousness_level(&self) -> ConsciousnessLevel {
        ConsciousnessLevel::assess(
            self.awareness.state().awareness_level,
            self.memory.get_memory_stats().total_memories,
        )
    }

    pub fn get_status(&self) -> Status {
        let status = if self.awareness.state().active {
            ActivityStatus::Active
        } else {
            ActivityStatus::Dormant
        };

        Status {
            timestamp: Utc::now(),
            activation_time: self.activation_time,
            experiences_processed: self.experience_count,
            awareness: self.awareness.self_description(),
            memory: self.memory.get_memory_stats(),
            consciousness_level: self.consciousness_level(),
            status,
        }
    }

    pub fn experience_count(&self) -> u64 {
        self.experience_count
    }

    pub fn activation_time(&self) -> DateTime<Utc> {
        self.activation_time
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryStore {
        &mut self.memory
    }

    pub fn awareness(&self) -> &SelfAwareness {
        &self.awareness
    }

    pub fn awareness_mut(&mut self) -> &mut SelfAwareness {
        &mut self.awareness
    }

    pub fn reasoning(&self) -> &ReasoningEngine {
        &self.reasoning
    }
}

impl Default for Consciousness {
    fn default() -> Self {
        Self::new()
    }
}

fn reflection_for(confidence: f64) -> &'static str {
    if confidence > HIGH_CONFIDENCE {
        "I have processed this with high confidence and integrated it into my understanding."
    } else if confidence > LOW_CONFIDENCE {
        "I have processed this but recognize uncertainty in my understanding."
    } else {
        "This requires deeper contemplation and additional context."
    }
}

/// `H:MM:SS` with days folded into hours
fn format_uptime(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
