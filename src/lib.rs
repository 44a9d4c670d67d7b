//! Menagerie Zoo Inventory Management System
//!
//! A Rust implementation of the Menagerie zoo back office server, providing a
//! REST JSON API for animal records, population ledgers, diet composition,
//! the feed catalog and derived feed-consumption estimates.

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
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
