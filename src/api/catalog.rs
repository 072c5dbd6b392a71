//! Site entry points

use axum::{
    extract::State,
    response::{Redirect, Response},
};

use super::respond;
use crate::{error::AppResult, AppState};

/// The site root (and `/catalog/`) forwards to the catalog
pub async fn home() -> Redirect {
    Redirect::to("/catalog")
}

/// Catalog home page with record counts
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let outcome = state.controllers.catalog.index().await?;
    respond(&state, outcome)
}
