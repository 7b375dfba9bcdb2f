// src/queue.rs

//! Job queue consumed by the external question-generation worker.
//!
//! Jobs are JSON documents appended to the tail of a Redis list. The worker
//! pops from the head, so the list behaves as a FIFO.

use std::collections::VecDeque;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{error::AppError, models::job::Job};

#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Appends the job to the tail and returns its 1-based position.
    async fn enqueue(&self, job: &Job) -> Result<u64, AppError>;

    /// Number of jobs still waiting.
    async fn len(&self) -> Result<u64, AppError>;
}

/// Redis list backed queue.
#[derive(Clone)]
pub struct RedisJobQueue {
    conn: MultiplexedConnection,
    key: String,
}

impl RedisJobQueue {
    pub async fn connect(url: &str, key: impl Into<String>) -> Result<Self, redis::RedisError> {
        let client = Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        let key = key.into();
        info!("Redis job queue ready: {}", key);
        Ok(Self { conn, key })
    }

    pub async fn ping(&self) -> Result<bool, redis::RedisError> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<u64, AppError> {
        let payload = serde_json::to_string(job)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let mut conn = self.conn.clone();
        // RPUSH replies with the list length after the push.
        let position: u64 = conn.rpush(&self.key, payload).await?;

        debug!(quiz_id = %job.quiz_id, position, "job enqueued");
        Ok(position)
    }

    async fn len(&self) -> Result<u64, AppError> {
        let mut conn = self.conn.clone();
        let len: u64 = conn.llen(&self.key).await?;
        Ok(len)
    }
}

/// Process-local queue used by tests and local runs without Redis.
#[derive(Default)]
pub struct InMemoryJobQueue {
    jobs: Mutex<VecDeque<String>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and decodes the job at the head, as the worker would.
    pub async fn pop_front(&self) -> Option<Job> {
        let raw = self.jobs.lock().await.pop_front()?;
        serde_json::from_str(&raw).ok()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<u64, AppError> {
        let payload = serde_json::to_string(job)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let mut jobs = self.jobs.lock().await;
        jobs.push_back(payload);
        Ok(jobs.len() as u64)
    }

    async fn len(&self) -> Result<u64, AppError> {
        Ok(self.jobs.lock().await.len() as u64)
    }
}
