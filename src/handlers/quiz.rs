// src/handlers/quiz.rs

use axum::{
    Extension, Json,
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        job::Job,
        quiz::{NewQuiz, Quiz, QuizDetail, QuizSummary, SubmitQuestionsRequest},
    },
    repositories::RepoError,
    state::AppState,
    utils::{
        code::generate_quiz_code,
        html::clean_text,
        jwt::Claims,
        response::respond,
        upload::{PDF_FIELD, discard_pdf, ensure_pdf, save_pdf},
    },
};

/// Multipart field carrying the quiz title.
const NAME_FIELD: &str = "quizName";

/// How many fresh codes to try before giving up on a collision streak.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Parsed `POST /quiz/create` form.
struct QuizUpload {
    quiz_name: Option<String>,
    pdf: Option<(Option<String>, Bytes)>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuizCreated {
    quiz_id: String,
    quiz_name: String,
    queue_position: u64,
    display_message: String,
}

/// Reads the multipart form, enforcing the upload cap while streaming.
async fn read_upload(multipart: &mut Multipart, max_bytes: usize) -> Result<QuizUpload, AppError> {
    let mut upload = QuizUpload {
        quiz_name: None,
        pdf: None,
    };

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            NAME_FIELD => upload.quiz_name = Some(field.text().await?),
            PDF_FIELD => {
                let content_type = field.content_type().map(str::to_owned);
                let mut buf = Vec::new();
                while let Some(chunk) = field.chunk().await? {
                    if buf.len() + chunk.len() > max_bytes {
                        return Err(AppError::BadRequest(format!(
                            "File too large. Maximum size is {} bytes",
                            max_bytes
                        )));
                    }
                    buf.extend_from_slice(&chunk);
                }
                upload.pdf = Some((content_type, Bytes::from(buf)));
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Persists a pending quiz, retrying with a new code when one is taken.
async fn insert_with_fresh_code(
    state: &AppState,
    quiz_name: &str,
    teacher_id: i64,
    file_name: &str,
) -> Result<Quiz, AppError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let new_quiz = NewQuiz {
            quiz_id: generate_quiz_code(),
            quiz_name: quiz_name.to_string(),
            teacher_id,
            file_name: file_name.to_string(),
        };

        match state.quizzes.create(new_quiz).await {
            Ok(quiz) => return Ok(quiz),
            Err(RepoError::Conflict(msg)) if attempt < MAX_CODE_ATTEMPTS => {
                warn!(attempt, "{}; generating a new code", msg);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Creates a quiz from an uploaded PDF and hands it to the worker queue.
///
/// * Validates the form (name + PDF under the size cap).
/// * Stores the PDF and persists the quiz with no questions. The PDF is
///   removed again if the quiz cannot be persisted.
/// * Appends a job to the tail of the queue and reports the position.
///
/// Persisting and enqueuing are not atomic: if the push fails the quiz stays
/// pending with no job behind it.
pub async fn create_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    WithRejection(mut multipart, _): WithRejection<Multipart, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let teacher_id = claims.user_id()?;
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;

    let quiz_name = upload
        .quiz_name
        .as_deref()
        .map(clean_text)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("All fields (quizName) are required".to_string()))?;

    let (content_type, bytes) = upload
        .pdf
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("Quiz PDF file is required".to_string()))?;

    ensure_pdf(content_type.as_deref(), &bytes)?;

    let file_name = save_pdf(&state.config.upload_dir, &bytes).await?;

    let quiz = match insert_with_fresh_code(&state, &quiz_name, teacher_id, &file_name).await {
        Ok(quiz) => quiz,
        Err(e) => {
            discard_pdf(&state.config.upload_dir, &file_name).await;
            return Err(e);
        }
    };

    let position = state
        .queue
        .enqueue(&Job::pending_for(&quiz))
        .await
        .inspect_err(|e| {
            error!(quiz_id = %quiz.quiz_id, "quiz stored but job not enqueued: {}", e);
        })?;

    info!(quiz_id = %quiz.quiz_id, teacher_id, position, "quiz queued for generation");

    Ok(respond(
        StatusCode::CREATED,
        "Quiz created successfully",
        QuizCreated {
            display_message: format!(
                "Please wait till we generate the quiz. It will take 10 to 15 minutes. \
                 You can close this window and relax. You are at {} in the queue.",
                position
            ),
            quiz_id: quiz.quiz_id,
            quiz_name: quiz.quiz_name,
            queue_position: position,
        },
    ))
}

/// Worker callback attaching generated questions to a quiz.
///
/// Unauthenticated. Replaces any existing question set, which moves the quiz
/// from pending to ready.
pub async fn submit_questions(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<SubmitQuestionsRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let quiz_id = payload.quiz_id.trim();

    if quiz_id.is_empty() {
        return Err(AppError::BadRequest("Quiz ID is required".to_string()));
    }

    if state.quizzes.find_by_quiz_id(quiz_id).await?.is_none() {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    if payload.questions.len() <= 1 {
        return Err(AppError::BadRequest(
            "Quiz must contain more than one question".to_string(),
        ));
    }

    for (index, question) in payload.questions.iter().enumerate() {
        if let Err(errors) = question.validate() {
            return Err(AppError::BadRequest(format!(
                "Question {}: {}",
                index + 1,
                errors
            )));
        }
    }

    let quiz = state
        .quizzes
        .set_questions(quiz_id, &payload.questions)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    info!(quiz_id = %quiz.quiz_id, questions = quiz.questions.len(), "quiz is ready");

    Ok(respond(
        StatusCode::OK,
        "Quiz questions submitted successfully",
        json!({
            "quizId": quiz.quiz_id,
            "quizName": quiz.quiz_name,
            "displayMessage": "Quiz is ready. You can now view the quiz.",
        }),
    ))
}

/// Lists the quizzes created by the logged-in teacher, newest first.
pub async fn view_all_quizzes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = state.quizzes.list_by_teacher(claims.user_id()?).await?;

    let summaries: Vec<QuizSummary> = quizzes.iter().map(QuizSummary::from).collect();

    Ok(respond(
        StatusCode::OK,
        "Quizzes fetched successfully",
        json!({ "quizzes": summaries }),
    ))
}

/// Fetches one quiz with its questions.
pub async fn view_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = state
        .quizzes
        .find_by_quiz_id(&quiz_id)
        .await?
        .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    Ok(respond(
        StatusCode::OK,
        "Quiz fetched successfully",
        QuizDetail::from(quiz),
    ))
}
