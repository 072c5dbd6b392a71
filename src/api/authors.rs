//! Author pages

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::{raw_form, respond, FormPairs};
use crate::{error::AppResult, store::RecordId};

/// List all authors
pub async fn list(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.authors.list().await?;
    respond(&state, outcome)
}

/// Author details with their books
pub async fn detail(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.authors.detail(&id).await?;
    respond(&state, outcome)
}

pub async fn create_form(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.authors.create_form();
    respond(&state, outcome)
}

pub async fn create_submit(
    State(state): State<crate::AppState>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state.controllers.authors.create_submit(raw_form(form)).await?;
    respond(&state, outcome)
}

pub async fn delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.authors.delete_form(&id).await?;
    respond(&state, outcome)
}

/// Delete an author, refused while books still reference them
pub async fn delete_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.authors.delete_submit(&id).await?;
    respond(&state, outcome)
}

pub async fn update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.authors.update_form(&id).await?;
    respond(&state, outcome)
}

pub async fn update_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state
        .controllers
        .authors
        .update_submit(&id, raw_form(form))
        .await?;
    respond(&state, outcome)
}
