//! Collaborator construction from configuration
//!
//! Backends and sinks are built once at startup and injected into the
//! [`Orchestrator`].

use crate::audit::{AuditFanout, AuditSink, FileAuditLog};
use crate::config::{AuditConfig, LlmConfig, StepwiseConfig};
use crate::error::Result;
use crate::executor::StepExecutor;
use crate::extractor::IntentExtractor;
use crate::orchestrator::Orchestrator;
use crate::tools::knowledge::SYSTEM_PROMPT;
use crate::tools::{Calculator, KnowledgeAnswerer, Translator};
use llm::{LanguageModel, LlmProvider, ProviderKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the configured language model.
///
/// Returns `None` (offline answers) for the fallback provider and when the
/// remote provider has no API key.
pub fn build_language_model(config: &LlmConfig) -> Result<Option<Arc<dyn LanguageModel>>> {
    if !config.provider.is_remote() {
        info!("Using offline answers for knowledge questions");
        return Ok(None);
    }

    let Some(mut remote) = config.remote_config() else {
        warn!(
            provider = %config.provider,
            "Using fallback mode - no API key configured"
        );
        return Ok(None);
    };

    if config.provider == ProviderKind::OpenAi {
        remote = remote.with_system_prompt(SYSTEM_PROMPT);
    }

    info!(provider = %config.provider, model = %remote.model, "Using remote language model");
    let model: Arc<dyn LanguageModel> = Arc::new(LlmProvider::new(config.provider, remote)?);
    Ok(Some(model))
}

/// File sink for the configured paths, or `None` when auditing is off
pub fn build_audit_sink(config: &AuditConfig) -> Option<Arc<dyn AuditSink>> {
    config.enabled.then(|| {
        Arc::new(FileAuditLog::new(&config.text_log, &config.history_json)) as Arc<dyn AuditSink>
    })
}

/// Assemble an orchestrator from configuration, audit sink included
pub fn build_orchestrator(config: &StepwiseConfig) -> Result<Orchestrator> {
    let orchestrator = base_orchestrator(config)?;
    Ok(match build_audit_sink(&config.audit) {
        Some(sink) => orchestrator.with_audit_sink(sink),
        None => orchestrator,
    })
}

/// Like [`build_orchestrator`], additionally recording into `extra`.
///
/// `extra` receives every record even when file auditing is disabled.
pub fn build_orchestrator_with_sink(
    config: &StepwiseConfig,
    extra: Arc<dyn AuditSink>,
) -> Result<Orchestrator> {
    let mut sinks = vec![extra];
    sinks.extend(build_audit_sink(&config.audit));

    let sink: Arc<dyn AuditSink> = Arc::new(AuditFanout::new(sinks));
    Ok(base_orchestrator(config)?.with_audit_sink(sink))
}

fn base_orchestrator(config: &StepwiseConfig) -> Result<Orchestrator> {
    let model = build_language_model(&config.llm)?;
    let executor = StepExecutor::new(
        Calculator::new(),
        Translator::new(),
        KnowledgeAnswerer::new(model),
    );
    let extractor = IntentExtractor::with_options(config.tools.extractor_options());
    Ok(Orchestrator::new(extractor, executor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::MemoryAuditLog;

    #[test]
    fn test_fallback_provider_is_offline() {
        let config = LlmConfig {
            provider: ProviderKind::Fallback,
            api_key: Some("unused".into()),
            ..Default::default()
        };
        assert!(build_language_model(&config).unwrap().is_none());
    }

    #[test]
    fn test_missing_key_is_offline() {
        let config = LlmConfig::default();
        assert!(build_language_model(&config).unwrap().is_none());
    }

    #[test]
    fn test_unset_key_reference_is_offline() {
        let mut config = StepwiseConfig::default();
        config.llm.api_key = Some("${STEPWISE_BOOTSTRAP_TEST_UNSET_KEY}".into());
        config.resolve_env_vars();

        assert!(build_language_model(&config.llm).unwrap().is_none());
    }

    #[test]
    fn test_remote_model_built() {
        let config = LlmConfig {
            provider: ProviderKind::OpenAi,
            api_key: Some("test-key".into()),
            ..Default::default()
        };
        let model = build_language_model(&config).unwrap().unwrap();
        assert_eq!(model.name(), "openai");
    }

    #[test]
    fn test_audit_sink_disabled() {
        let config = AuditConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(build_audit_sink(&config).is_none());
        assert!(build_audit_sink(&AuditConfig::default()).is_some());
    }

    #[test]
    fn test_build_orchestrator_offline() {
        let mut config = StepwiseConfig::default();
        config.llm.provider = ProviderKind::Fallback;
        config.audit.enabled = false;

        let orchestrator = build_orchestrator(&config).unwrap();
        assert_eq!(orchestrator.backend_label(), "fallback");
    }

    #[tokio::test]
    async fn test_build_orchestrator_with_extra_sink() {
        let mut config = StepwiseConfig::default();
        config.llm.provider = ProviderKind::Fallback;
        config.audit.enabled = false;

        let history = Arc::new(MemoryAuditLog::new());
        let orchestrator = build_orchestrator_with_sink(&config, history.clone()).unwrap();
        orchestrator.handle("Add 2 and 2").await;

        assert_eq!(history.len(), 1);
        assert_eq!(history.records()[0].trace.query, "Add 2 and 2");
    }
}
