//! Local Library
//!
//! A catalog of authors, genres, books and physical book copies, served as
//! server-rendered HTML pages with create, update and delete forms.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub controllers: Arc<controllers::Controllers>,
    pub renderer: Arc<dyn views::Renderer>,
}

impl AppState {
    /// Wire controllers and the HTML renderer over a document store
    pub fn new(store: Arc<dyn store::Store>) -> Self {
        let repository = repository::Repository::new(store);
        Self {
            controllers: Arc::new(controllers::Controllers::new(repository)),
            renderer: Arc::new(views::HtmlRenderer),
        }
    }
}
