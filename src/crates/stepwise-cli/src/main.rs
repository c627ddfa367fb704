//! stepwise CLI - multi-step assistant for arithmetic, German phrases and
//! knowledge questions
//!
//! Main entry point for the `stepwise` command-line tool.

mod commands;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use llm::ProviderKind;
use stepwise::{ConfigLoader, StepwiseConfig};
use tooling::config::get_env;
use tooling::logging::{init_tracing, LogFormat};
use tracing::warn;

#[derive(Parser)]
#[command(name = "stepwise")]
#[command(about = "Multi-step assistant: calculations, German translations and knowledge questions", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Knowledge backend: openai, gemini or fallback
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Model name for the knowledge backend
    #[arg(long, global = true)]
    model: Option<String>,

    /// Log filter, e.g. "debug" or "stepwise=trace"
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Do not write interaction logs
    #[arg(long, global = true)]
    no_audit: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive shell (default)
    Shell,

    /// Answer a single query
    Ask {
        /// The query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Also print the execution trace as JSON
        #[arg(long)]
        trace: bool,
    },

    /// Run the scripted demonstration queries
    Demo,

    /// Detect and evaluate a single calculation
    Calc {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Translate a phrase into German
    Translate {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the sub-tasks a query decomposes into, without running them
    Extract {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Print the effective configuration
    Config,
}

impl Cli {
    fn apply_overrides(&self, config: &mut StepwiseConfig) -> anyhow::Result<()> {
        if let Some(provider) = &self.provider {
            let kind: ProviderKind = provider.parse()?;
            if kind != config.llm.provider {
                switch_provider(config, kind)?;
            }
        }
        if let Some(model) = &self.model {
            config.llm.model = Some(model.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.no_audit {
            config.audit.enabled = false;
        }
        Ok(())
    }
}

/// Change provider, swapping a key picked up from the old provider's
/// environment variable for the new provider's one.
fn switch_provider(config: &mut StepwiseConfig, kind: ProviderKind) -> anyhow::Result<()> {
    let key_from_env = |kind: ProviderKind| -> anyhow::Result<Option<String>> {
        match kind.api_key_env() {
            Some(var) => Ok(get_env(var)?),
            None => Ok(None),
        }
    };

    if config.llm.api_key.is_some() && config.llm.api_key == key_from_env(config.llm.provider)? {
        config.llm.api_key = None;
    }
    config.llm.provider = kind;
    if config.llm.api_key.is_none() {
        config.llm.api_key = key_from_env(kind)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let loader = ConfigLoader::new();
    let mut config = loader.load().await.context("Failed to load configuration")?;
    cli.apply_overrides(&mut config)?;

    let format: LogFormat = config.logging.format.parse()?;
    init_tracing(&config.logging.level, format)?;
    for warning in config.validate() {
        warn!("{}", warning);
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => commands::shell::run(&config).await,
        Commands::Ask { query, trace } => commands::ask::run(&config, &query.join(" "), trace).await,
        Commands::Demo => commands::ask::demo(&config).await,
        Commands::Calc { text } => commands::tools::calc(&text.join(" ")),
        Commands::Translate { text } => commands::tools::translate(&text.join(" ")),
        Commands::Extract { query } => commands::tools::extract(&config, &query.join(" ")),
        Commands::Config => commands::config::show(&config, &loader),
    }
}
