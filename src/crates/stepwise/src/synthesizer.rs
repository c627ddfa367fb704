//! Result synthesis
//!
//! Pure projection of executed steps into the user-facing answer. One step
//! gets a tailored explanation; several steps get a numbered list with a
//! completion summary.

use crate::step::{StepOutcome, StepPayload, SubTask};
use crate::tools::calculator::format_result_value;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultSynthesizer;

impl ResultSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn synthesize(&self, steps: &[SubTask], original_query: &str) -> String {
        debug!(
            steps = steps.len(),
            query_len = original_query.len(),
            "Synthesizing response"
        );

        match steps {
            [single] => render_single(single),
            _ => render_multi(steps),
        }
    }
}

fn render_single(step: &SubTask) -> String {
    match step.outcome() {
        StepOutcome::Success(StepPayload::Calculation(calc)) => format!(
            "Step-by-step response:

1. **Question Analysis**: You asked for a mathematical calculation
2. **Tool Usage**: I used the calculator tool
3. **Calculation**: {}
4. **Result**: The answer is {}",
            calc.expression,
            format_result_value(calc.result)
        ),
        StepOutcome::Success(StepPayload::Translation(t)) => format!(
            "Step-by-step response:

1. **Question Analysis**: You asked for a translation
2. **Tool Usage**: I used the translator tool
3. **Translation**: '{}' → '{}'
4. **Result**: The German translation is '{}'",
            t.source, t.translated, t.translated
        ),
        StepOutcome::Success(StepPayload::Answer { text }) => text.clone(),
        StepOutcome::Failure(reason) => format!("Error in processing: {}", reason),
        StepOutcome::NotRun => "Error in processing: step was not executed".to_string(),
    }
}

fn render_multi(steps: &[SubTask]) -> String {
    let mut parts = vec!["Step-by-step multi-task response:".to_string()];

    for (i, step) in steps.iter().enumerate() {
        parts.push(format!("\n{}. **{}**", i + 1, step.description));
        parts.push(match step.outcome() {
            StepOutcome::Success(payload) => format!("   Result: {}", summarize(payload)),
            StepOutcome::Failure(reason) => format!("   Error: {}", reason),
            StepOutcome::NotRun => "   Error: not executed".to_string(),
        });
    }

    let completed = steps.iter().filter(|s| s.is_completed()).count();
    parts.push(format!(
        "\n**Summary**: Successfully completed {} out of {} tasks.",
        completed,
        steps.len()
    ));

    parts.join("\n")
}

/// One-line projection of a payload
fn summarize(payload: &StepPayload) -> String {
    match payload {
        StepPayload::Calculation(calc) => calc.expression.clone(),
        StepPayload::Translation(t) => format!("'{}'", t.translated),
        StepPayload::Answer { text } => text.clone(),
    }
}
