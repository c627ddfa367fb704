//! Common test utilities: scripted language models and orchestrator setup

#![allow(dead_code)]

use async_trait::async_trait;
use llm::{LanguageModel, LlmError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stepwise::tools::{Calculator, KnowledgeAnswerer, Translator};
use stepwise::{IntentExtractor, Orchestrator, StepExecutor};

/// Answers every prompt with the same text and keeps the prompts it saw
pub struct ScriptedModel {
    answer: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, prompt: &str) -> llm::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Always fails with an authentication error
#[derive(Default)]
pub struct FailingModel {
    calls: AtomicUsize,
}

impl FailingModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for FailingModel {
    async fn generate(&self, _prompt: &str) -> llm::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::AuthenticationError("invalid API key".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Orchestrator whose knowledge questions go to `model`
pub fn orchestrator_with_model(model: Arc<dyn LanguageModel>) -> Orchestrator {
    let executor = StepExecutor::new(
        Calculator::new(),
        Translator::new(),
        KnowledgeAnswerer::new(Some(model)),
    );
    Orchestrator::new(IntentExtractor::new(), executor)
}
