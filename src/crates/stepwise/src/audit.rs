//! Audit trail of processed queries
//!
//! The orchestrator hands one [`AuditRecord`] per query to an [`AuditSink`].
//! Persisting is best-effort: a failing sink is logged, never surfaced.

use crate::error::{Result, StepwiseError};
use crate::step::StepOutcome;
use crate::trace::ExecutionTrace;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const RULE: &str = "==================================================";

/// One processed query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(flatten)]
    pub trace: ExecutionTrace,
    pub response: String,
    /// Backend that answered knowledge questions
    pub backend: String,
}

impl AuditRecord {
    pub fn new(trace: ExecutionTrace, response: impl Into<String>, backend: impl Into<String>) -> Self {
        Self {
            trace,
            response: response.into(),
            backend: backend.into(),
        }
    }

    /// Human-readable block for the text log
    pub fn to_text_block(&self) -> String {
        let mut out = format!("\n{}\n", RULE);
        out.push_str(&format!("Timestamp: {}\n", self.trace.timestamp.to_rfc3339()));
        out.push_str(&format!("LLM Type: {}\n", self.backend));
        out.push_str(&format!("User Question: {}\n", self.trace.query));
        out.push_str(&format!("Steps Executed: {}\n", self.trace.total_count()));

        for (i, step) in self.trace.steps.iter().enumerate() {
            out.push_str(&format!(
                "  Step {}: {} ({})\n",
                i + 1,
                step.description,
                step.capability
            ));
            out.push_str(&format!("    Completed: {}\n", step.is_completed()));
            if let StepOutcome::Failure(reason) = step.outcome() {
                out.push_str(&format!("    Error: {}\n", reason));
            }
        }

        out.push_str(&format!("Response:\n{}\n", self.response));
        out.push_str(RULE);
        out.push('\n');
        out
    }
}

/// Destination for audit records
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, record: &AuditRecord) -> Result<()>;
}

/// Appends to a text log and maintains a JSON history array on disk
#[derive(Debug)]
pub struct FileAuditLog {
    text_log: PathBuf,
    history_json: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileAuditLog {
    pub fn new(text_log: impl Into<PathBuf>, history_json: impl Into<PathBuf>) -> Self {
        Self {
            text_log: text_log.into(),
            history_json: history_json.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn text_log(&self) -> &Path {
        &self.text_log
    }

    pub fn history_json(&self) -> &Path {
        &self.history_json
    }

    /// Entries currently in the JSON history. Missing or corrupt files read as empty.
    pub async fn load_history(&self) -> Result<Vec<Value>> {
        let content = match fs::read_to_string(&self.history_json).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Vec<Value>>(&content) {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!(
                    path = %self.history_json.display(),
                    error = %e,
                    "History file is not a JSON array, starting a new one"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn append_text(&self, record: &AuditRecord) -> Result<()> {
        ensure_parent(&self.text_log).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.text_log)
            .await?;
        file.write_all(record.to_text_block().as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn append_history(&self, record: &AuditRecord) -> Result<()> {
        let mut history = self.load_history().await?;
        history.push(serde_json::to_value(record)?);

        ensure_parent(&self.history_json).await?;
        let json = serde_json::to_string_pretty(&history)?;
        fs::write(&self.history_json, json).await?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for FileAuditLog {
    async fn record(&self, record: &AuditRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        self.append_text(record).await.map_err(|e| {
            StepwiseError::audit(format!("{}: {}", self.text_log.display(), e))
        })?;
        self.append_history(record).await.map_err(|e| {
            StepwiseError::audit(format!("{}: {}", self.history_json.display(), e))
        })?;

        debug!(id = %record.trace.id, "Audit record written");
        Ok(())
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AuditRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AuditSink for MemoryAuditLog {
    async fn record(&self, record: &AuditRecord) -> Result<()> {
        self.lock().push(record.clone());
        Ok(())
    }
}

/// Fans a record out to several sinks; every sink is attempted.
#[derive(Default)]
pub struct AuditFanout {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl AuditFanout {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }
}

#[async_trait]
impl AuditSink for AuditFanout {
    async fn record(&self, record: &AuditRecord) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(e) = sink.record(record).await {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
