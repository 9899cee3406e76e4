//! Elban administration server
//!
//! REST JSON API for the airport electronics unit: equipment inventory,
//! maintenance logs, tasks, schedules, document archive, complaints and
//! account approval. The [`client`] module holds the typed page core
//! (session, route guard, list stores) that drives the API.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod guard;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod session;
pub mod summary;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
