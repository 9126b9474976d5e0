//! Bookshelf
//!
//! A REST JSON API for creating, listing, searching, updating and deleting
//! book records stored in PostgreSQL.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(repository: repository::Repository) -> Self {
        Self {
            services: Arc::new(services::Services::new(repository)),
        }
    }
}
