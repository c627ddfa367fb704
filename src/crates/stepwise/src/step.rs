//! Sub-task model
//!
//! A query is decomposed into an ordered list of [`SubTask`]s. Each one names
//! the [`Capability`] that should handle it, carries that capability's
//! parameters, and records a single [`StepOutcome`] once executed.

use crate::tools::calculator::{Calculation, Operator};
use crate::tools::translator::Translation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Parameter bag handed to a capability
pub type Parameters = Map<String, Value>;

/// Parameter keys understood by the executor
pub mod param {
    pub const OPERATOR: &str = "operator";
    pub const OPERAND1: &str = "operand1";
    pub const OPERAND2: &str = "operand2";
    pub const TEXT: &str = "text";
}

/// The kind of handler a sub-task is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Calculator,
    Translator,
    KnowledgeAnswerer,
    /// Nothing specific was recognized; answered like a knowledge question
    None,
    /// A tag this build does not know how to run
    #[serde(other)]
    Unknown,
}

impl Capability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Calculator => "calculator",
            Capability::Translator => "translator",
            Capability::KnowledgeAnswerer => "knowledge_answerer",
            Capability::None => "none",
            Capability::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = std::convert::Infallible;

    /// Unrecognized tags map to [`Capability::Unknown`] rather than failing,
    /// so that the step still runs and reports its own failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "calculator" => Capability::Calculator,
            "translator" => Capability::Translator,
            "knowledge_answerer" | "knowledge" | "llm" => Capability::KnowledgeAnswerer,
            "none" => Capability::None,
            _ => Capability::Unknown,
        })
    }
}

/// Value produced by a successful step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepPayload {
    Calculation(Calculation),
    Translation(Translation),
    Answer { text: String },
}

/// Result of executing a sub-task
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum StepOutcome {
    #[default]
    NotRun,
    Success(StepPayload),
    Failure(String),
}

impl StepOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        StepOutcome::Failure(reason.into())
    }

    pub fn is_not_run(&self) -> bool {
        matches!(self, StepOutcome::NotRun)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success(_))
    }
}

/// One unit of work identified in a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    /// Human-readable summary, e.g. "Calculate 5 × 6"
    pub description: String,
    pub capability: Capability,
    pub parameters: Parameters,
    #[serde(default)]
    outcome: StepOutcome,
}

impl SubTask {
    pub fn new(
        description: impl Into<String>,
        capability: Capability,
        parameters: Parameters,
    ) -> Self {
        Self {
            description: description.into(),
            capability,
            parameters,
            outcome: StepOutcome::NotRun,
        }
    }

    /// Binary arithmetic on two operands
    pub fn arithmetic(operator: Operator, operand1: f64, operand2: f64) -> Self {
        let mut parameters = Parameters::new();
        parameters.insert(param::OPERATOR.into(), Value::from(operator.symbol()));
        parameters.insert(param::OPERAND1.into(), Value::from(operand1));
        parameters.insert(param::OPERAND2.into(), Value::from(operand2));

        Self::new(
            format!(
                "Calculate {} {} {}",
                operand1,
                operator.display_symbol(),
                operand2
            ),
            Capability::Calculator,
            parameters,
        )
    }

    /// Translation of a quoted phrase into German
    pub fn translation(phrase: &str) -> Self {
        Self::new(
            format!("Translate '{}' to German", phrase),
            Capability::Translator,
            text_parameters(phrase),
        )
    }

    /// A question for the knowledge answerer
    pub fn knowledge(question: &str) -> Self {
        Self::new(
            format!("Answer: {}", question),
            Capability::KnowledgeAnswerer,
            text_parameters(question),
        )
    }

    /// The whole query, when nothing more specific was found
    pub fn fallback(query: &str) -> Self {
        Self::new(
            format!("Process query: {}", query),
            Capability::None,
            text_parameters(query),
        )
    }

    pub fn outcome(&self) -> &StepOutcome {
        &self.outcome
    }

    /// True once the step has run successfully
    pub fn is_completed(&self) -> bool {
        self.outcome.is_success()
    }

    /// Record the step's outcome. Only the first recording sticks.
    pub(crate) fn record(&mut self, outcome: StepOutcome) -> bool {
        if outcome.is_not_run() {
            return false;
        }
        if !self.outcome.is_not_run() {
            warn!(
                step = %self.description,
                "Ignoring second outcome for an already executed step"
            );
            return false;
        }
        self.outcome = outcome;
        true
    }

    pub fn text_param(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(Value::as_str)
    }

    pub fn number_param(&self, key: &str) -> Option<f64> {
        self.parameters.get(key).and_then(Value::as_f64)
    }
}

fn text_parameters(text: &str) -> Parameters {
    let mut parameters = Parameters::new();
    parameters.insert(param::TEXT.into(), Value::from(text));
    parameters
}
