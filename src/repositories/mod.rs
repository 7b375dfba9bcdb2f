// src/repositories/mod.rs

//! Storage seams for users and quizzes.
//!
//! Handlers only see the traits. Postgres backs them in production and the
//! in-memory versions back the integration tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    quiz::{NewQuiz, Question, Quiz},
    user::{NewUser, User},
};

pub use memory::{InMemoryQuizRepository, InMemoryUserRepository};
pub use postgres::{PgQuizRepository, PgUserRepository};

#[derive(Debug, Error)]
pub enum RepoError {
    /// A unique key is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `RepoError::Conflict` when the email is taken.
    async fn create(&self, user: NewUser) -> RepoResult<User>;
    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;
}

#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Fails with `RepoError::Conflict` when the quiz code is taken.
    async fn create(&self, quiz: NewQuiz) -> RepoResult<Quiz>;
    async fn find_by_quiz_id(&self, quiz_id: &str) -> RepoResult<Option<Quiz>>;
    /// Newest first.
    async fn list_by_teacher(&self, teacher_id: i64) -> RepoResult<Vec<Quiz>>;
    /// Replaces the question set. Returns `None` when the quiz does not exist.
    async fn set_questions(&self, quiz_id: &str, questions: &[Question])
    -> RepoResult<Option<Quiz>>;
}
