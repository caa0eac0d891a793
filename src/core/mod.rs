//! Core translation module

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod preferences;
pub mod rate_limiter;
pub mod retry;
pub mod translator;
