// src/repositories/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};
use tracing::{error, info};

use super::{QuizRepository, RepoError, RepoResult, UserRepository};
use crate::models::{
    quiz::{NewQuiz, Question, Quiz},
    user::{NewUser, User},
};

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, role, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Conflict("Email already registered".to_string())
            } else {
                error!("Failed to insert user: {:?}", e);
                RepoError::from(e)
            }
        })?;

        info!(user_id = created.id, role = %created.role, "user created");
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, role, created_at
            FROM users
            WHERE LOWER(email) = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[derive(Clone)]
pub struct PgQuizRepository {
    pool: PgPool,
}

impl PgQuizRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizRepository for PgQuizRepository {
    async fn create(&self, quiz: NewQuiz) -> RepoResult<Quiz> {
        sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (quiz_id, quiz_name, teacher_id, file_name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, quiz_id, quiz_name, teacher_id, file_name, questions, created_at, updated_at
            "#,
        )
        .bind(&quiz.quiz_id)
        .bind(&quiz.quiz_name)
        .bind(quiz.teacher_id)
        .bind(&quiz.file_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RepoError::Conflict(format!("Quiz code '{}' already exists", quiz.quiz_id))
            } else {
                error!("Failed to insert quiz: {:?}", e);
                RepoError::from(e)
            }
        })
    }

    async fn find_by_quiz_id(&self, quiz_id: &str) -> RepoResult<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, quiz_id, quiz_name, teacher_id, file_name, questions, created_at, updated_at
            FROM quizzes
            WHERE quiz_id = $1
            "#,
        )
        .bind(quiz_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }

    async fn list_by_teacher(&self, teacher_id: i64) -> RepoResult<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, quiz_id, quiz_name, teacher_id, file_name, questions, created_at, updated_at
            FROM quizzes
            WHERE teacher_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(quizzes)
    }

    async fn set_questions(
        &self,
        quiz_id: &str,
        questions: &[Question],
    ) -> RepoResult<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            UPDATE quizzes
            SET questions = $2, updated_at = NOW()
            WHERE quiz_id = $1
            RETURNING id, quiz_id, quiz_name, teacher_id, file_name, questions, created_at, updated_at
            "#,
        )
        .bind(quiz_id)
        .bind(Json(questions))
        .fetch_optional(&self.pool)
        .await?;

        Ok(quiz)
    }
}
