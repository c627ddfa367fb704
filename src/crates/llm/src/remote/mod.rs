//! Remote LLM provider implementations.
//!
//! Cloud-hosted APIs that require an API key:
//!
//! - **OpenAI** - chat completions (GPT-3.5 Turbo, GPT-4, ...)
//! - **Gemini** - Google's Gemini models via `generateContent`

pub mod gemini;
pub mod openai;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Default OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
