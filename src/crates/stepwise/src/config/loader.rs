//! Configuration loader with dual-location support
//!
//! Loads configuration from:
//! 1. Default values
//! 2. User-level config: ~/.stepwise/stepwise.toml
//! 3. Project-level config: ./.stepwise/stepwise.toml
//! 4. `STEPWISE_*` environment variables
//!
//! Later sources override earlier ones.

use crate::config::schema::{ConfigFile, StepwiseConfig};
use crate::error::{Result, StepwiseError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tooling::config::{build_env_key, get_env, get_env_bool, get_env_parse};
use tracing::{debug, info};

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "STEPWISE_";

const CONFIG_DIR: &str = ".stepwise";
const CONFIG_FILE: &str = "stepwise.toml";

pub struct ConfigLoader {
    user_config_path: Option<PathBuf>,
    project_config_path: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            user_config_path: dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE)),
            project_config_path: PathBuf::from(CONFIG_DIR).join(CONFIG_FILE),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Loader reading explicit files
    pub fn with_paths(user: Option<PathBuf>, project: PathBuf) -> Self {
        Self {
            user_config_path: user,
            project_config_path: project,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn user_config_path(&self) -> Option<&Path> {
        self.user_config_path.as_deref()
    }

    pub fn project_config_path(&self) -> &Path {
        &self.project_config_path
    }

    /// Load configuration from every source
    ///
    /// A missing file is skipped; a file that fails to parse is an error.
    pub async fn load(&self) -> Result<StepwiseConfig> {
        let mut config = StepwiseConfig::default();

        if let Some(user_path) = &self.user_config_path {
            if let Some(file) = self.load_from_path(user_path).await? {
                debug!(path = %user_path.display(), "Loaded user-level config");
                config.merge(file);
            }
        }

        if let Some(file) = self.load_from_path(&self.project_config_path).await? {
            debug!(path = %self.project_config_path.display(), "Loaded project-level config");
            config.merge(file);
        }

        config.resolve_env_vars();
        apply_env_overrides(&mut config, &self.env_prefix)?;

        info!(provider = %config.llm.provider, "Configuration loaded");
        Ok(config)
    }

    async fn load_from_path(&self, path: &Path) -> Result<Option<ConfigFile>> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found");
                return Ok(None);
            }
            Err(e) => {
                return Err(StepwiseError::config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let file = toml::from_str(&content).map_err(|e| {
            StepwiseError::config(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(Some(file))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `{prefix}*` environment variables, then fill a missing API key from
/// the provider's conventional variable.
pub fn apply_env_overrides(config: &mut StepwiseConfig, prefix: &str) -> Result<()> {
    let key = |name: &str| build_env_key(prefix, name);

    if let Some(provider) = get_env(&key("llm_provider"))? {
        config.llm.provider = provider
            .parse()
            .map_err(|e: llm::LlmError| StepwiseError::config(e.to_string()))?;
    }
    if let Some(model) = get_env(&key("llm_model"))? {
        config.llm.model = Some(model);
    }
    if let Some(api_base) = get_env(&key("llm_api_base"))? {
        config.llm.api_base = Some(api_base);
    }
    if let Some(organization) = get_env(&key("llm_organization"))? {
        config.llm.organization = Some(organization);
    }
    if let Some(temperature) = get_env_parse(&key("llm_temperature"))? {
        config.llm.temperature = temperature;
    }
    if let Some(max_tokens) = get_env_parse(&key("llm_max_tokens"))? {
        config.llm.max_tokens = max_tokens;
    }
    if let Some(level) = get_env(&key("log_level"))? {
        config.logging.level = level;
    }
    if let Some(format) = get_env(&key("log_format"))? {
        config.logging.format = format;
    }
    if let Some(enabled) = get_env_bool(&key("audit_enabled"))? {
        config.audit.enabled = enabled;
    }
    if let Some(enabled) = get_env_bool(&key("calculator_enabled"))? {
        config.tools.calculator_enabled = enabled;
    }
    if let Some(enabled) = get_env_bool(&key("translator_enabled"))? {
        config.tools.translator_enabled = enabled;
    }

    if !config.llm.has_api_key() {
        if let Some(var) = config.llm.provider.api_key_env() {
            if let Some(api_key) = get_env(var)? {
                debug!(var, "Using API key from environment");
                config.llm.api_key = Some(api_key);
            }
        }
    }

    Ok(())
}
