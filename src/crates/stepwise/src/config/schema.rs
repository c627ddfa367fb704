//! Configuration schema for stepwise

use crate::extractor::ExtractorOptions;
use llm::{ProviderKind, RemoteLlmConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Main stepwise configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StepwiseConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub audit: AuditConfig,
}

/// A configuration file. Sections it leaves out keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub llm: Option<LlmConfig>,
    pub tools: Option<ToolsConfig>,
    pub logging: Option<LoggingConfig>,
    pub audit: Option<AuditConfig>,
}

/// Knowledge backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "openai", "gemini" or "fallback"
    pub provider: ProviderKind,

    /// Model name; the provider's default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API key (supports `${VAR}` interpolation)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API base URL (for custom endpoints)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// OpenAI organization ID; ignored by other providers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,

    pub temperature: f32,

    pub max_tokens: u32,

    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: None,
            api_key: None,
            api_base: None,
            organization: None,
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 60,
        }
    }
}

impl LlmConfig {
    /// Configured model, or the provider's default
    pub fn effective_model(&self) -> Option<String> {
        self.model
            .clone()
            .or_else(|| self.provider.default_model().map(str::to_string))
    }

    /// True when a non-empty, resolved API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| {
            !key.trim().is_empty() && !tooling::config::is_env_reference(key)
        })
    }

    /// Client settings for the remote provider.
    ///
    /// `None` for the fallback provider or when no key is configured.
    pub fn remote_config(&self) -> Option<RemoteLlmConfig> {
        if !self.provider.is_remote() || !self.has_api_key() {
            return None;
        }

        let api_key = self.api_key.clone()?;
        let base_url = self
            .api_base
            .clone()
            .or_else(|| self.provider.default_base_url().map(str::to_string))?;
        let model = self.effective_model()?;

        let mut remote = RemoteLlmConfig::new(api_key, base_url, model)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        if let (ProviderKind::OpenAi, Some(org)) = (self.provider, &self.organization) {
            remote = remote.with_organization(org);
        }
        Some(remote)
    }
}

/// Optional capability handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub calculator_enabled: bool,
    pub translator_enabled: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            calculator_enabled: true,
            translator_enabled: true,
        }
    }
}

impl ToolsConfig {
    pub fn extractor_options(&self) -> ExtractorOptions {
        ExtractorOptions {
            translation: self.translator_enabled,
            arithmetic: self.calculator_enabled,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive: "trace", "debug", "info", "warn", "error"
    pub level: String,

    /// "compact", "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

/// Audit trail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub enabled: bool,

    /// Human-readable interaction log
    pub text_log: PathBuf,

    /// JSON array of every processed query
    pub history_json: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text_log: PathBuf::from("interaction_logs.txt"),
            history_json: PathBuf::from("logs/full_history.json"),
        }
    }
}

impl StepwiseConfig {
    /// Replace the sections present in `file`
    pub fn merge(&mut self, file: ConfigFile) {
        if let Some(llm) = file.llm {
            self.llm = llm;
        }
        if let Some(tools) = file.tools {
            self.tools = tools;
        }
        if let Some(logging) = file.logging {
            self.logging = logging;
        }
        if let Some(audit) = file.audit {
            self.audit = audit;
        }
    }

    /// Expand `${VAR}` references in string settings
    ///
    /// An API key naming an unset variable is dropped, so that the provider's
    /// own key variable or offline mode takes over.
    pub fn resolve_env_vars(&mut self) {
        if let Some(key) = self.llm.api_key.take() {
            let expanded = tooling::config::expand_env_var(&key);
            if tooling::config::is_env_reference(&expanded) {
                debug!(reference = %expanded, "llm.api_key references an unset variable");
            } else {
                self.llm.api_key = Some(expanded);
            }
        }
        if let Some(base) = &self.llm.api_base {
            self.llm.api_base = Some(tooling::config::expand_env_var(base));
        }
    }

    /// Problems that degrade behavior without preventing startup
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.llm.provider.is_remote() && !self.llm.has_api_key() {
            let var = self.llm.provider.api_key_env().unwrap_or("an API key");
            warnings.push(format!(
                "{} not found; knowledge questions will use fallback mode",
                var
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            warnings.push(format!(
                "llm.temperature {} is outside 0.0..=2.0",
                self.llm.temperature
            ));
        }
        if self.llm.max_tokens == 0 {
            warnings.push("llm.max_tokens is 0".to_string());
        }

        warnings
    }

    /// TOML rendering with secrets masked
    pub fn to_redacted_toml(&self) -> crate::Result<String> {
        let rendered = toml::to_string_pretty(self)
            .map_err(|e| crate::StepwiseError::config(format!("Failed to render config: {}", e)))?;
        Ok(tooling::logging::sanitize_for_logging(&rendered))
    }
}
