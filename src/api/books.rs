//! Book pages

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::{raw_form, respond, FormPairs};
use crate::{error::AppResult, store::RecordId};

/// List all books with their author
pub async fn list(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.books.list().await?;
    respond(&state, outcome)
}

/// Book details with author, genres and copies
pub async fn detail(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.books.detail(&id).await?;
    respond(&state, outcome)
}

pub async fn create_form(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.books.create_form().await?;
    respond(&state, outcome)
}

pub async fn create_submit(
    State(state): State<crate::AppState>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state.controllers.books.create_submit(raw_form(form)).await?;
    respond(&state, outcome)
}

pub async fn delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.books.delete_form(&id).await?;
    respond(&state, outcome)
}

/// Delete a book, refused while copies of it exist
pub async fn delete_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.books.delete_submit(&id).await?;
    respond(&state, outcome)
}

pub async fn update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.books.update_form(&id).await?;
    respond(&state, outcome)
}

pub async fn update_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state
        .controllers
        .books
        .update_submit(&id, raw_form(form))
        .await?;
    respond(&state, outcome)
}
