// src/models/mod.rs

pub mod job;
pub mod quiz;
pub mod user;
