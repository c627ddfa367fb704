//! Per-query execution record

use crate::step::SubTask;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Steps of one query, in extraction order, with their outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionTrace {
    pub id: Uuid,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub steps: Vec<SubTask>,
}

impl ExecutionTrace {
    pub fn new(query: impl Into<String>, steps: Vec<SubTask>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            timestamp: Utc::now(),
            steps,
        }
    }

    /// Number of steps that succeeded
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed()).count()
    }

    pub fn total_count(&self) -> usize {
        self.steps.len()
    }
}
