//! HTTP handlers for the catalog pages

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{controllers::Outcome, error::AppResult, validation::RawForm, AppState};

/// Urlencoded body as decoded pairs; repeated keys are kept
pub type FormPairs = axum::Form<Vec<(String, String)>>;

pub(crate) fn raw_form(axum::Form(pairs): FormPairs) -> RawForm {
    RawForm::from_pairs(pairs)
}

/// Turn a controller outcome into a response
pub(crate) fn respond(state: &AppState, outcome: Outcome) -> AppResult<Response> {
    match outcome {
        Outcome::Render(view) => {
            let body = state.renderer.render(&view)?;
            Ok(Html(body).into_response())
        }
        Outcome::Redirect(location) => Ok(Redirect::to(&location).into_response()),
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Books
        .route("/book/create", get(books::create_form).post(books::create_submit))
        .route("/book/:id/delete", get(books::delete_form).post(books::delete_submit))
        .route("/book/:id/update", get(books::update_form).post(books::update_submit))
        .route("/book/:id", get(books::detail))
        .route("/books", get(books::list))
        // Authors
        .route("/author/create", get(authors::create_form).post(authors::create_submit))
        .route("/author/:id/delete", get(authors::delete_form).post(authors::delete_submit))
        .route("/author/:id/update", get(authors::update_form).post(authors::update_submit))
        .route("/author/:id", get(authors::detail))
        .route("/authors", get(authors::list))
        // Genres
        .route("/genre/create", get(genres::create_form).post(genres::create_submit))
        .route("/genre/:id/delete", get(genres::delete_form).post(genres::delete_submit))
        .route("/genre/:id/update", get(genres::update_form).post(genres::update_submit))
        .route("/genre/:id", get(genres::detail))
        .route("/genres", get(genres::list))
        // Book instances
        .route(
            "/bookinstance/create",
            get(book_instances::create_form).post(book_instances::create_submit),
        )
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_form).post(book_instances::delete_submit),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_form).post(book_instances::update_submit),
        )
        .route("/bookinstance/:id", get(book_instances::detail))
        .route("/bookinstances", get(book_instances::list));

    Router::new()
        .route("/", get(catalog::home))
        .route("/catalog/", get(catalog::home))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
