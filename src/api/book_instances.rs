//! Book instance pages

use axum::{
    extract::{Path, State},
    response::Response,
};

use super::{raw_form, respond, FormPairs};
use crate::{error::AppResult, store::RecordId};

pub async fn list(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.book_instances.list().await?;
    respond(&state, outcome)
}

pub async fn detail(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.book_instances.detail(&id).await?;
    respond(&state, outcome)
}

pub async fn create_form(State(state): State<crate::AppState>) -> AppResult<Response> {
    let outcome = state.controllers.book_instances.create_form().await?;
    respond(&state, outcome)
}

pub async fn create_submit(
    State(state): State<crate::AppState>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state
        .controllers
        .book_instances
        .create_submit(raw_form(form))
        .await?;
    respond(&state, outcome)
}

pub async fn delete_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.book_instances.delete_form(&id).await?;
    respond(&state, outcome)
}

pub async fn delete_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.book_instances.delete_submit(&id).await?;
    respond(&state, outcome)
}

pub async fn update_form(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Response> {
    let outcome = state.controllers.book_instances.update_form(&id).await?;
    respond(&state, outcome)
}

pub async fn update_submit(
    State(state): State<crate::AppState>,
    Path(id): Path<RecordId>,
    form: FormPairs,
) -> AppResult<Response> {
    let outcome = state
        .controllers
        .book_instances
        .update_submit(&id, raw_form(form))
        .await?;
    respond(&state, outcome)
}
