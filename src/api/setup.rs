//! Database setup endpoint

use axum::{extract::State, Json};

use crate::error::AppResult;

use super::OkResponse;

/// Drop and recreate all tables.
///
/// Every author, book and borrow record is lost.
#[utoipa::path(
    post,
    path = "/create",
    tag = "setup",
    responses(
        (status = 200, description = "Tables recreated", body = OkResponse)
    )
)]
pub async fn create_database(State(state): State<crate::AppState>) -> AppResult<Json<OkResponse>> {
    state.services.system.reset_schema().await?;
    Ok(Json(OkResponse::ok()))
}
