// src/models/quiz.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use validator::{Validate, ValidationError};

/// One generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = validate_correct_option))]
pub struct Question {
    #[serde(alias = "text")]
    #[validate(length(min = 1, message = "Question text must not be empty."))]
    pub question: String,

    /// Option key (e.g. "a") to option text.
    #[validate(length(min = 2, message = "A question needs at least two options."))]
    pub options: BTreeMap<String, String>,

    #[serde(alias = "correctOptionKey")]
    pub correct_option: String,
}

fn validate_correct_option(question: &Question) -> Result<(), ValidationError> {
    if question.options.contains_key(&question.correct_option) {
        Ok(())
    } else {
        Err(ValidationError::new("correct_option_not_in_options")
            .with_message("Correct option must be one of the option keys.".into()))
    }
}

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(skip)]
    pub id: i64,

    /// Public 10-character code.
    pub quiz_id: String,

    pub quiz_name: String,

    pub teacher_id: i64,

    pub file_name: String,

    /// Empty until the worker calls back.
    pub questions: Json<Vec<Question>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// A quiz is ready once questions have been attached.
    pub fn is_ready(&self) -> bool {
        !self.questions.is_empty()
    }
}

/// Data needed to insert a pending quiz.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub quiz_id: String,
    pub quiz_name: String,
    pub teacher_id: i64,
    pub file_name: String,
}

/// Row in the teacher's quiz list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub quiz_id: String,
    pub quiz_name: String,
    pub quiz_exists: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            quiz_id: quiz.quiz_id.clone(),
            quiz_name: quiz.quiz_name.clone(),
            quiz_exists: quiz.is_ready(),
            created_at: quiz.created_at,
        }
    }
}

/// Full quiz view, questions included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDetail {
    pub quiz_id: String,
    pub quiz_name: String,
    pub quiz_exists: bool,
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

impl From<Quiz> for QuizDetail {
    fn from(quiz: Quiz) -> Self {
        let quiz_exists = quiz.is_ready();
        Self {
            quiz_id: quiz.quiz_id,
            quiz_name: quiz.quiz_name,
            quiz_exists,
            questions: quiz.questions.0,
            created_at: quiz.created_at,
        }
    }
}

/// Payload of the worker callback. `quiz` is accepted for older workers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionsRequest {
    #[serde(default)]
    pub quiz_id: String,
    #[serde(default, alias = "quiz")]
    pub questions: Vec<Question>,
}
