// src/state.rs

use std::{sync::Arc, time::Instant};

use axum::extract::FromRef;

use crate::{
    config::Config,
    queue::JobQueue,
    repositories::{QuizRepository, UserRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub queue: Arc<dyn JobQueue>,
    pub config: Config,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        quizzes: Arc<dyn QuizRepository>,
        queue: Arc<dyn JobQueue>,
        config: Config,
    ) -> Self {
        Self {
            users,
            quizzes,
            queue,
            config,
            started_at: Instant::now(),
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
