//! Rule-based reasoning
//!
//! Draws a conclusion and a confidence score from a premise and an optional
//! context object, and picks among options using weighted criteria. Scores
//! are plain arithmetic over the amount of evidence supplied.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ReasoningConfig;

/// Confidence before any evidence is counted
pub const BASE_CONFIDENCE: f64 = 0.5;
/// Confidence added per piece of evidence
pub const EVIDENCE_STEP: f64 = 0.1;
/// Cap on the confidence evidence can add
pub const MAX_EVIDENCE_BONUS: f64 = 0.4;
/// Cap on the confidence of a criteria-weighted decision
pub const MAX_DECISION_CONFIDENCE: f64 = 0.9;

/// Confidence for a premise, given whether a context was supplied and how
/// many evidence items it listed
///
/// Rounded to two decimals.
pub fn calculate_confidence(has_context: bool, evidence_count: usize) -> f64 {
    let mut confidence = BASE_CONFIDENCE;
    if has_context {
        confidence += MAX_EVIDENCE_BONUS.min(evidence_count as f64 * EVIDENCE_STEP);
    }
    (confidence * 100.0).round() / 100.0
}

/// Number of items in the context's `evidence` array; 0 when absent or not an array
fn evidence_count(context: &Value) -> usize {
    context
        .get("evidence")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Whether the context's `evidence` value is present and non-empty
fn has_evidence(context: &Value) -> bool {
    match context.get("evidence") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

fn draw_conclusion(premise: &str, context: Option<&Value>) -> String {
    if context.is_some_and(has_evidence) {
        format!("Based on '{premise}' and available evidence, proceeding with analysis")
    } else {
        format!("Processing premise: {premise}")
    }
}

/// Outcome of [`ReasoningEngine::reason`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub timestamp: DateTime<Utc>,
    pub premise: String,
    /// Context as supplied, or an empty object
    pub context: Value,
    pub conclusion: String,
    pub confidence: f64,
}

/// Outcome of [`ReasoningEngine::make_decision`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub timestamp: DateTime<Utc>,
    pub options_considered: Vec<String>,
    pub criteria: BTreeMap<String, f64>,
    pub selected_option: Option<String>,
    pub confidence: f64,
    pub reasoning: String,
}

/// A rule added through learning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceRule {
    pub timestamp: DateTime<Utc>,
    pub rule: Value,
}

/// One entry of the reasoning history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReasoningRecord {
    Inference(ReasoningResult),
    Decision(Decision),
}

/// Stateless-per-call reasoning with an append-only history
#[derive(Debug)]
pub struct ReasoningEngine {
    decision_threshold: f64,
    history: Vec<ReasoningRecord>,
    inference_rules: Vec<InferenceRule>,
}

impl ReasoningEngine {
    pub fn new() -> Self {
        Self::from_config(&ReasoningConfig::default())
    }

    pub fn from_config(config: &ReasoningConfig) -> Self {
        Self {
            decision_threshold: config.decision_threshold,
            history: Vec::new(),
            inference_rules: Vec::new(),
        }
    }

    /// Reason about a premise
    ///
    /// A context carrying a non-empty `evidence` value changes the conclusion;
    /// every evidence array item adds 0.1 confidence, up to 0.4.
    pub fn reason(&mut self, premise: &str, context: Option<Value>) -> ReasoningResult {
        let confidence = calculate_confidence(
            context.is_some(),
            context.as_ref().map_or(0, evidence_count),
        );
        let conclusion = draw_conclusion(premise, context.as_ref());

        let result = ReasoningResult {
            timestamp: Utc::now(),
            premise: premise.to_string(),
            context: context.unwrap_or_else(|| Value::Object(Map::new())),
            conclusion,
            confidence,
        };

        self.history.push(ReasoningRecord::Inference(result.clone()));
        result
    }

    /// Pick one of `options` using weighted `criteria`
    ///
    /// With no options nothing is selected and nothing is recorded.
    pub fn make_decision(
        &mut self,
        options: &[String],
        criteria: &BTreeMap<String, f64>,
    ) -> Decision {
        if options.is_empty() {
            return Decision {
                timestamp: Utc::now(),
                options_considered: Vec::new(),
                criteria: criteria.clone(),
                selected_option: None,
                confidence: 0.0,
                reasoning: "No options available".to_string(),
            };
        }

        let (selected, confidence) = if criteria.is_empty() {
            (&options[0], self.decision_threshold)
        } else {
            let total_weight: f64 = criteria.values().sum();
            let mean_weight = total_weight / criteria.len() as f64;
            let confidence = MAX_DECISION_CONFIDENCE.min(BASE_CONFIDENCE + mean_weight * 0.1);
            let selected = if options.len() == 1 {
                &options[0]
            } else {
                &options[criteria.len() % options.len()]
            };
            (selected, confidence)
        };

        let decision = Decision {
            timestamp: Utc::now(),
            options_considered: options.to_vec(),
            criteria: criteria.clone(),
            selected_option: Some(selected.clone()),
            confidence,
            reasoning: format!(
                "Selected '{}' from {} options using {} criteria",
                selected,
                options.len(),
                criteria.len()
            ),
        };

        self.history.push(ReasoningRecord::Decision(decision.clone()));
        decision
    }

    pub fn add_inference_rule(&mut self, rule: Value) {
        self.inference_rules.push(InferenceRule {
            timestamp: Utc::now(),
            rule,
        });
    }

    pub fn inference_rules(&self) -> &[InferenceRule] {
        &self.inference_rules
    }

    /// Inferences and decisions, oldest first
    pub fn reasoning_history(&self) -> &[ReasoningRecord] {
        &self.history
    }

    pub fn decision_threshold(&self) -> f64 {
        self.decision_threshold
    }
}

impl Default for ReasoningEngine {
    fn default() -> Self {
        Self::new()
    }
}
