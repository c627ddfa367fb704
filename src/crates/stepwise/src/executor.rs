//! Step execution
//!
//! [`StepExecutor::execute`] runs one [`SubTask`] against its capability
//! handler and records the outcome. Nothing escapes: every problem becomes
//! a `Failure` on that step and the next step runs regardless.

use crate::step::{param, Capability, StepOutcome, StepPayload, SubTask};
use crate::tools::{Calculator, KnowledgeAnswerer, Translator};
use tracing::{debug, info, warn};

/// Failure reason for capabilities this build cannot run
pub const UNKNOWN_TOOL: &str = "unknown tool type";

#[derive(Debug, Clone, Default)]
pub struct StepExecutor {
    calculator: Calculator,
    translator: Translator,
    knowledge: KnowledgeAnswerer,
}

impl StepExecutor {
    pub fn new(
        calculator: Calculator,
        translator: Translator,
        knowledge: KnowledgeAnswerer,
    ) -> Self {
        Self {
            calculator,
            translator,
            knowledge,
        }
    }

    /// Offline executor with default handlers
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn knowledge(&self) -> &KnowledgeAnswerer {
        &self.knowledge
    }

    /// Execute `step` and return it with its outcome set.
    ///
    /// A step that already has an outcome is returned untouched.
    pub async fn execute(&self, mut step: SubTask) -> SubTask {
        if !step.outcome().is_not_run() {
            warn!(step = %step.description, "Step already executed, skipping");
            return step;
        }

        let outcome = self.dispatch(&step).await;
        match &outcome {
            StepOutcome::Failure(reason) => warn!(
                step = %step.description,
                capability = %step.capability,
                reason = %reason,
                "Step failed"
            ),
            _ => info!(
                step = %step.description,
                capability = %step.capability,
                "Step completed"
            ),
        }

        step.record(outcome);
        step
    }

    async fn dispatch(&self, step: &SubTask) -> StepOutcome {
        match step.capability {
            Capability::Calculator => self.run_calculator(step),
            Capability::Translator => self.run_translator(step),
            Capability::KnowledgeAnswerer | Capability::None => self.run_knowledge(step).await,
            Capability::Unknown => StepOutcome::failure(UNKNOWN_TOOL),
        }
    }

    fn run_calculator(&self, step: &SubTask) -> StepOutcome {
        let params = (
            step.text_param(param::OPERATOR),
            step.number_param(param::OPERAND1),
            step.number_param(param::OPERAND2),
        );
        let (Some(operator), Some(a), Some(b)) = params else {
            return missing_parameters(step, &[param::OPERATOR, param::OPERAND1, param::OPERAND2]);
        };

        match self.calculator.apply(operator, a, b) {
            Ok(calculation) => StepOutcome::Success(StepPayload::Calculation(calculation)),
            Err(e) => StepOutcome::failure(e.to_string()),
        }
    }

    fn run_translator(&self, step: &SubTask) -> StepOutcome {
        let Some(phrase) = step.text_param(param::TEXT) else {
            return missing_parameters(step, &[param::TEXT]);
        };

        match self.translator.lookup(phrase) {
            Ok(translation) => StepOutcome::Success(StepPayload::Translation(translation)),
            Err(e) => StepOutcome::failure(e.to_string()),
        }
    }

    async fn run_knowledge(&self, step: &SubTask) -> StepOutcome {
        let Some(question) = step.text_param(param::TEXT) else {
            return missing_parameters(step, &[param::TEXT]);
        };

        match self.knowledge.answer(question).await {
            Ok(text) => StepOutcome::Success(StepPayload::Answer { text }),
            Err(e) => {
                if e.is_auth_error() {
                    warn!(
                        backend = self.knowledge.backend_label(),
                        "Knowledge backend rejected the API key"
                    );
                } else if e.is_retryable() {
                    debug!(
                        backend = self.knowledge.backend_label(),
                        "Knowledge backend failure is transient"
                    );
                }
                StepOutcome::failure(tooling::error::inline_error_chain(&e))
            }
        }
    }
}

fn missing_parameters(step: &SubTask, expected: &[&str]) -> StepOutcome {
    StepOutcome::failure(format!(
        "Missing or invalid parameters for {}: expected {}",
        step.capability,
        expected.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Parameters;
    use crate::tools::calculator::Operator;
    use async_trait::async_trait;
    use llm::{LanguageModel, LlmError};
    use serde_json::Value;
    use std::sync::Arc;

    struct DownModel;

    #[async_trait]
    impl LanguageModel for DownModel {
        async fn generate(&self, _prompt: &str) -> llm::Result<String> {
            Err(LlmError::RateLimitExceeded("try again in 20s".into()))
        }

        fn name(&self) -> &str {
            "down"
        }
    }

    fn calc_step(operator: &str, a: f64, b: f64) -> SubTask {
        let mut params = Parameters::new();
        params.insert(param::OPERATOR.into(), Value::from(operator));
        params.insert(param::OPERAND1.into(), Value::from(a));
        params.insert(param::OPERAND2.into(), Value::from(b));
        SubTask::new("Calculate", Capability::Calculator, params)
    }

    #[tokio::test]
    async fn test_calculator_success() {
        let step = StepExecutor::offline()
            .execute(SubTask::arithmetic(Operator::Multiply, 5.0, 6.0))
            .await;

        match step.outcome() {
            StepOutcome::Success(StepPayload::Calculation(calc)) => {
                assert_eq!(calc.result, 30.0);
                assert_eq!(calc.expression, "5 × 6 = 30.0");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_calculator_failures() {
        let executor = StepExecutor::offline();

        let step = executor.execute(calc_step("/", 1.0, 0.0)).await;
        assert_eq!(
            step.outcome(),
            &StepOutcome::failure("Division by zero is not allowed")
        );

        let step = executor.execute(calc_step("%", 1.0, 2.0)).await;
        assert_eq!(step.outcome(), &StepOutcome::failure("Unsupported operation: %"));
    }

    #[tokio::test]
    async fn test_missing_parameters() {
        let step = SubTask::new("Calculate", Capability::Calculator, Parameters::new());
        let step = StepExecutor::offline().execute(step).await;
        match step.outcome() {
            StepOutcome::Failure(reason) => assert!(reason.contains("operand1")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_translator_outcomes() {
        let executor = StepExecutor::offline();

        let step = executor.execute(SubTask::translation("Sunshine")).await;
        match step.outcome() {
            StepOutcome::Success(StepPayload::Translation(t)) => {
                assert_eq!(t.translated, "Sonnenschein")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let step = executor.execute(SubTask::translation("xylophone")).await;
        assert_eq!(
            step.outcome(),
            &StepOutcome::failure("Translation not available for this text")
        );
    }

    #[tokio::test]
    async fn test_knowledge_offline() {
        let step = StepExecutor::offline()
            .execute(SubTask::fallback("What is the capital of Italy?"))
            .await;
        match step.outcome() {
            StepOutcome::Success(StepPayload::Answer { text }) => assert!(text.contains("Rome")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_error_becomes_failure() {
        let executor = StepExecutor::new(
            Calculator::new(),
            Translator::new(),
            KnowledgeAnswerer::new(Some(Arc::new(DownModel))),
        );
        let step = executor.execute(SubTask::knowledge("capital of Italy")).await;
        assert_eq!(
            step.outcome(),
            &StepOutcome::failure("Rate limit exceeded: try again in 20s")
        );
    }

    #[tokio::test]
    async fn test_unknown_capability() {
        let step = SubTask::new("Check the weather", Capability::Unknown, Parameters::new());
        let step = StepExecutor::offline().execute(step).await;
        assert_eq!(step.outcome(), &StepOutcome::failure(UNKNOWN_TOOL));
    }

    #[tokio::test]
    async fn test_executed_step_is_not_rerun() {
        let executor = StepExecutor::offline();
        let step = executor.execute(calc_step("/", 1.0, 0.0)).await;
        let again = executor.execute(step.clone()).await;
        assert_eq!(again, step);
    }
}
