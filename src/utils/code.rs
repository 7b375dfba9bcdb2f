// src/utils/code.rs

use rand::{Rng, distributions::Alphanumeric};

use crate::config::QUIZ_CODE_LENGTH;

/// Random quiz code drawn from `[A-Za-z0-9]`.
pub fn generate_quiz_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(QUIZ_CODE_LENGTH)
        .map(char::from)
        .collect()
}
