//! Genre pages

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::{raw_form, respond, FormPairs};
use crate::{error::AppResult, store::RecordId};

pub async fn list(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.genres.list().await?;
    respond(&state, outcome)
}

pub async fn detail(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.genres.detail(&id).await?;
    respond(&state, outcome)
}

pub async fn create_form(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.genres.create_form();
    respond(&state, outcome)
}

/// Create a genre, or redirect to the one that already has this name
pub async fn create_submit(
    State(state): State<crate::AppState>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state.controllers.genres.create_submit(raw_form(form)).await?;
    respond(&state, outcome)
}

pub async fn delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.genres.delete_form(&id).await?;
    respond(&state, outcome)
}

pub async fn delete_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.genres.delete_submit(&id).await?;
    respond(&state, outcome)
}

pub async fn update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.genres.update_form(&id).await?;
    respond(&state, outcome)
}

pub async fn update_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state
        .controllers
        .genres
        .update_submit(&id, raw_form(form))
        .await?;
    respond(&state, outcome)
}
