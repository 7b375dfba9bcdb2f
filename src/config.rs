// src/config.rs

use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::utils::hash::PasswordPepper;

/// Default cap for uploaded quiz PDFs (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Length of the public quiz code handed to teachers and students.
pub const QUIZ_CODE_LENGTH: usize = 10;

/// Name of the cookie carrying the session JWT.
pub const AUTH_COOKIE: &str = "token";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub job_queue: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds. Also used as the cookie Max-Age.
    pub jwt_expiration: u64,
    pub password_prefix: String,
    pub password_suffix: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let redis_url =
            env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

        let job_queue = env::var("REDIS_JOB_QUEUE").unwrap_or_else(|_| "quiz_jobs".to_string());

        let jwt_expiration = parse_or("JWT_EXPIRATION", 86_400)?;
        let max_upload_bytes = parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        let port = parse_or("PORT", 3000)?;

        let password_prefix = env::var("PASSWORD_EXTENDER_PREFIX").unwrap_or_default();
        let password_suffix = env::var("PASSWORD_EXTENDER_SUFFIX").unwrap_or_default();

        let upload_dir = env::var("PDF_UPLOAD_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads/pdfs"));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            redis_url,
            job_queue,
            jwt_secret,
            jwt_expiration,
            password_prefix,
            password_suffix,
            upload_dir,
            max_upload_bytes,
            port,
            rust_log,
        })
    }

    pub fn pepper(&self) -> PasswordPepper {
        PasswordPepper::new(self.password_prefix.clone(), self.password_suffix.clone())
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
