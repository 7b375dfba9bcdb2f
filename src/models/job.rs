// src/models/job.rs

use serde::{Deserialize, Serialize};

use crate::models::quiz::Quiz;

/// Lifecycle marker carried in the job payload. Only `Pending` is ever
/// written here; the worker owns the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
}

/// Question-generation job pushed onto the Redis list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub teacher_id: i64,
    pub quiz_id: String,
    pub quiz_name: String,
    pub file_name: String,
    pub status: JobStatus,
    /// Unix milliseconds.
    pub created_at: i64,
}

impl Job {
    pub fn pending_for(quiz: &Quiz) -> Self {
        Self {
            teacher_id: quiz.teacher_id,
            quiz_id: quiz.quiz_id.clone(),
            quiz_name: quiz.quiz_name.clone(),
            file_name: quiz.file_name.clone(),
            status: JobStatus::Pending,
            created_at: quiz.created_at.timestamp_millis(),
        }
    }
}
