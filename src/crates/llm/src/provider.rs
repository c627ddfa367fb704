//! Provider selection
//!
//! Maps a configured provider name onto one of the concrete clients so that
//! callers can hold a single [`LanguageModel`] regardless of backend.

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::model::LanguageModel;
use crate::remote::{GeminiClient, OpenAiClient, GEMINI_BASE_URL, OPENAI_BASE_URL};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which backend answers knowledge questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[default]
    Gemini,
    /// No remote backend; canned offline answers
    Fallback,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Fallback => "fallback",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("gpt-3.5-turbo"),
            Self::Gemini => Some("gemini-1.5-pro"),
            Self::Fallback => None,
        }
    }

    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some(OPENAI_BASE_URL),
            Self::Gemini => Some(GEMINI_BASE_URL),
            Self::Fallback => None,
        }
    }

    /// Conventional environment variable holding the provider's key
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAi => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Fallback => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Fallback)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" | "google" => Ok(Self::Gemini),
            "fallback" | "offline" | "none" => Ok(Self::Fallback),
            other => Err(LlmError::ConfigError(format!(
                "Unsupported LLM provider: {}. Available: openai, gemini, fallback",
                other
            ))),
        }
    }
}

/// A concrete remote client
pub enum LlmProvider {
    OpenAi(OpenAiClient),
    Gemini(GeminiClient),
}

impl fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi(_) => write!(f, "LlmProvider::OpenAi"),
            Self::Gemini(_) => write!(f, "LlmProvider::Gemini"),
        }
    }
}

impl LlmProvider {
    /// Build the client for `kind`. `Fallback` has no client and is rejected,
    /// as is a blank API key.
    pub fn new(kind: ProviderKind, config: RemoteLlmConfig) -> Result<Self> {
        if kind.is_remote() && config.api_key.trim().is_empty() {
            return Err(LlmError::ApiKeyNotFound(
                kind.api_key_env().unwrap_or("api_key").to_string(),
            ));
        }
        match kind {
            ProviderKind::OpenAi => Ok(Self::OpenAi(OpenAiClient::new(config)?)),
            ProviderKind::Gemini => Ok(Self::Gemini(GeminiClient::new(config)?)),
            ProviderKind::Fallback => Err(LlmError::ConfigError(
                "The fallback provider has no remote client".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::OpenAi(_) => ProviderKind::OpenAi,
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }
}

#[async_trait]
impl LanguageModel for LlmProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Self::OpenAi(client) => client.generate(prompt).await,
            Self::Gemini(client) => client.generate(prompt).await,
        }
    }

    fn name(&self) -> &str {
        self.kind().as_str()
    }
}
