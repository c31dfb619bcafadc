//! HTTP server for the mood-insight pipeline.
//!
//! # Endpoints
//!
//! - `GET  /health`                 : Liveness probe
//! - `POST /users/:user_id/moods`   : Log a mood entry
//! - `GET  /users/:user_id/insights`: Mood pattern insight
//! - `GET  /coping/:mood`           : Coping suggestions
//! - `POST /analyze`                : Single-text sentiment analysis
//! - `POST /batch-analyze`          : Batch sentiment analysis

pub mod routes;

pub use routes::{app_router, AppState};
