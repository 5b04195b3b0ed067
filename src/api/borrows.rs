//! Borrow (circulation) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::borrow::{Borrow, CreateBorrow, ReturnQuery},
};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Borrow created", body = Borrow),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "All copies are out", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateBorrow>,
) -> AppResult<(StatusCode, Json<Borrow>)> {
    let borrow = state.services.circulation.borrow_book(&data).await?;
    Ok((StatusCode::CREATED, Json(borrow)))
}

/// List all borrow records
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    responses(
        (status = 200, description = "List of borrows", body = Vec<Borrow>)
    )
)]
pub async fn list_borrows(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.circulation.list_borrows().await?;
    Ok(Json(borrows))
}

/// Get a borrow record by ID
#[utoipa::path(
    get,
    path = "/borrow/{id}",
    tag = "borrows",
    params(("id" = i32, Path, description = "Borrow ID")),
    responses(
        (status = 200, description = "List holding the borrow", body = Vec<Borrow>),
        (status = 404, description = "Borrow not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_borrow(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrow = state.services.circulation.get_borrow(id).await?;
    Ok(Json(vec![borrow]))
}

/// Return a borrowed book
#[utoipa::path(
    patch,
    path = "/borrow/{id}/return",
    tag = "borrows",
    params(
        ("id" = i32, Path, description = "Borrow ID"),
        ReturnQuery
    ),
    responses(
        (status = 200, description = "Book returned", body = Borrow),
        (status = 400, description = "Empty return date", body = crate::error::ErrorResponse),
        (status = 404, description = "Borrow not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Already returned", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_borrow(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<ReturnQuery>,
) -> AppResult<Json<Borrow>> {
    let borrow = state.services.circulation.return_borrow(id, &query).await?;
    Ok(Json(borrow))
}
