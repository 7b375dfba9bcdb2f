// src/repositories/memory.rs

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use super::{QuizRepository, RepoError, RepoResult, UserRepository};
use crate::models::{
    quiz::{NewQuiz, Question, Quiz},
    user::{NewUser, User},
};

/// Process-local user store with the same uniqueness rules as Postgres.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
            return Err(RepoError::Conflict("Email already registered".to_string()));
        }

        let created = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: user.email,
            password: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

/// Process-local quiz store.
#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<Vec<Quiz>>,
    next_id: AtomicI64,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: NewQuiz) -> RepoResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;

        if quizzes.iter().any(|q| q.quiz_id == quiz.quiz_id) {
            return Err(RepoError::Conflict(format!(
                "Quiz code '{}' already exists",
                quiz.quiz_id
            )));
        }

        let now = Utc::now();
        let created = Quiz {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            quiz_id: quiz.quiz_id,
            quiz_name: quiz.quiz_name,
            teacher_id: quiz.teacher_id,
            file_name: quiz.file_name,
            questions: Json(Vec::new()),
            created_at: now,
            updated_at: now,
        };
        quizzes.push(created.clone());

        Ok(created)
    }

    async fn find_by_quiz_id(&self, quiz_id: &str) -> RepoResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes.iter().find(|q| q.quiz_id == quiz_id).cloned())
    }

    async fn list_by_teacher(&self, teacher_id: i64) -> RepoResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        // Insertion order is creation order, so reversing gives newest first.
        Ok(quizzes
            .iter()
            .rev()
            .filter(|q| q.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn set_questions(
        &self,
        quiz_id: &str,
        questions: &[Question],
    ) -> RepoResult<Option<Quiz>> {
        let mut quizzes = self.quizzes.write().await;

        Ok(quizzes.iter_mut().find(|q| q.quiz_id == quiz_id).map(|quiz| {
            quiz.questions = Json(questions.to_vec());
            quiz.updated_at = Utc::now();
            quiz.clone()
        }))
    }
}
