// tests/common/mod.rs

#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc};

use neoquiz::{
    config::{AUTH_COOKIE, Config},
    queue::{InMemoryJobQueue, JobQueue},
    repositories::{InMemoryQuizRepository, InMemoryUserRepository, QuizRepository},
    routes,
    state::AppState,
};
use reqwest::{
    Client, Response,
    header::{COOKIE, SET_COOKIE},
    multipart::{Form, Part},
};

pub const PASSWORD: &str = "password123";
pub const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj << /Type /Catalog >> endobj\n%%EOF";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub queue: Arc<InMemoryJobQueue>,
    pub upload_dir: PathBuf,
    pub config: Config,
}

pub fn test_config(max_upload_bytes: usize) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        redis_url: "redis://unused".to_string(),
        job_queue: "quiz_jobs_test".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        password_prefix: "pre::".to_string(),
        password_suffix: "::post".to_string(),
        upload_dir: std::env::temp_dir().join(format!("neoquiz-{}", uuid::Uuid::new_v4())),
        max_upload_bytes,
        port: 0,
        rust_log: "error".to_string(),
    }
}

/// Spawns the app on a random port with in-memory storage and queue.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config(1024 * 1024)).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let queue = Arc::new(InMemoryJobQueue::new());
    let address = serve(&config, Arc::new(InMemoryQuizRepository::new()), queue.clone()).await;

    TestApp {
        address,
        client: Client::new(),
        queue,
        upload_dir: config.upload_dir.clone(),
        config,
    }
}

/// Spawns the app with custom quiz storage and queue.
///
/// `TestApp::queue` is left empty; the supplied queue is the one the app uses.
pub async fn spawn_app_with_backends(
    quizzes: Arc<dyn QuizRepository>,
    queue: Arc<dyn JobQueue>,
) -> TestApp {
    let config = test_config(1024 * 1024);
    let address = serve(&config, quizzes, queue).await;

    TestApp {
        address,
        client: Client::new(),
        queue: Arc::new(InMemoryJobQueue::new()),
        upload_dir: config.upload_dir.clone(),
        config,
    }
}

async fn serve(
    config: &Config,
    quizzes: Arc<dyn QuizRepository>,
    queue: Arc<dyn JobQueue>,
) -> String {
    let state = AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        quizzes,
        queue,
        config.clone(),
    );

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://127.0.0.1:{}", port)
}

/// Names of the files currently in the upload directory.
pub fn stored_files(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@school.io", prefix, &uuid::Uuid::new_v4().to_string()[..8])
}

/// Extracts the session token from a login response's Set-Cookie header.
pub fn session_token(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix(&format!("{AUTH_COOKIE}=")))
        .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    pub async fn register(&self, email: &str, role: &str) -> Response {
        self.client
            .post(self.url("/user/register"))
            .json(&serde_json::json!({
                "email": email,
                "password": PASSWORD,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str, role: &str) -> Response {
        self.client
            .post(self.url("/user/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "role": role
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers a fresh user and returns the session token.
    pub async fn signed_in(&self, role: &str) -> String {
        let email = unique_email(role);
        assert_eq!(self.register(&email, role).await.status().as_u16(), 201);

        let response = self.login(&email, PASSWORD, role).await;
        assert_eq!(response.status().as_u16(), 200);
        session_token(&response).expect("login did not set the session cookie")
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> Response {
        self.client
            .get(self.url(path))
            .header(COOKIE, format!("{AUTH_COOKIE}={token}"))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn create_quiz(&self, token: &str, form: Form) -> Response {
        self.client
            .post(self.url("/quiz/create"))
            .header(COOKIE, format!("{AUTH_COOKIE}={token}"))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn submit(&self, body: serde_json::Value) -> Response {
        self.client
            .put(self.url("/quiz/submit"))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn pdf_part(bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name("chapter1.pdf")
        .mime_str("application/pdf")
        .unwrap()
}

pub fn quiz_form(name: &str) -> Form {
    Form::new()
        .text("quizName", name.to_string())
        .part("pdfFile", pdf_part(PDF_BYTES))
}

pub fn questions(n: usize) -> serde_json::Value {
    serde_json::Value::Array(
        (0..n)
            .map(|i| {
                serde_json::json!({
                    "question": format!("Question {}", i + 1),
                    "options": {"a": "Alpha", "b": "Beta", "c": "Gamma", "d": "Delta"},
                    "correct_option": "b"
                })
            })
            .collect(),
    )
}
