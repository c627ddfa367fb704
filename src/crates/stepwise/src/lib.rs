//! # stepwise
//!
//! Multi-step query handling: a free-text query is decomposed into
//! sub-tasks, each sub-task is dispatched to a capability handler, and the
//! partial results are recombined into one answer.
//!
//! ## Pipeline
//!
//! - [`IntentExtractor`] turns a query into ordered [`SubTask`]s
//! - [`StepExecutor`] runs one sub-task and records its [`StepOutcome`]
//! - [`ResultSynthesizer`] renders the executed steps as text
//! - [`Orchestrator`] drives the three and hands an [`ExecutionTrace`] to
//!   the audit sink
//!
//! ## Example
//!
//! ```rust,no_run
//! use stepwise::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator = Orchestrator::offline();
//!     let response = orchestrator
//!         .handle("Translate 'Good Morning' into German and then multiply 5 and 6.")
//!         .await;
//!     println!("{}", response.text);
//! }
//! ```

pub mod audit;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod executor;
pub mod extractor;
pub mod orchestrator;
pub mod step;
pub mod synthesizer;
pub mod tools;
pub mod trace;

pub use audit::{AuditFanout, AuditRecord, AuditSink, FileAuditLog, MemoryAuditLog};
pub use bootstrap::{
    build_audit_sink, build_language_model, build_orchestrator, build_orchestrator_with_sink,
};
pub use config::{ConfigLoader, StepwiseConfig};
pub use error::{Result, StepwiseError};
pub use executor::StepExecutor;
pub use extractor::{ExtractorOptions, IntentExtractor};
pub use orchestrator::{Orchestrator, Progress, Response};
pub use step::{Capability, Parameters, StepOutcome, StepPayload, SubTask};
pub use synthesizer::ResultSynthesizer;
pub use trace::ExecutionTrace;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
