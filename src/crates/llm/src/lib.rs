//! Language-model backends for stepwise.
//!
//! Every backend implements [`LanguageModel`], a single
//! `generate(prompt) -> String` call. The returned text is treated as opaque,
//! already formatted output by callers.
//!
//! # Remote Providers
//!
//! - **OpenAI** - chat completions API (GPT-3.5, GPT-4, ...)
//! - **Gemini** - Google's `generateContent` API
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::GeminiClient;
//! use llm::{LanguageModel, RemoteLlmConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::new(
//!         std::env::var("GEMINI_API_KEY")?,
//!         "https://generativelanguage.googleapis.com/v1beta",
//!         "gemini-1.5-pro",
//!     )
//!     .with_temperature(0.7)
//!     .with_max_tokens(1000);
//!
//!     let client = GeminiClient::new(config)?;
//!     println!("{}", client.generate("What is the capital of Italy?").await?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod remote;

pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use model::LanguageModel;
pub use provider::{LlmProvider, ProviderKind};
