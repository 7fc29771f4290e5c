//! Copy API handlers using repository pattern

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::error::ApiResult;
use crate::infrastructure::AppState;

/// Request DTO for adding a copy
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCopyRequest {
    pub shelf_location: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/books/{id}/copies",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book title and all its copies"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book_copies(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let result = state.catalog.list_copies(book_id).await?;
    Ok(Json(json!({
        "book_id": result.book_id,
        "title": result.title,
        "total": result.copies.len(),
        "copies": result.copies,
    })))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/copies",
    params(("id" = i32, Path, description = "Book id")),
    request_body = AddCopyRequest,
    responses(
        (status = 201, description = "Available copy added"),
        (status = 400, description = "Body is not valid JSON"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn add_copy(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
    payload: Result<Json<AddCopyRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let shelf_location = match payload {
        Ok(Json(body)) => body.shelf_location,
        // No JSON body at all: the copy is added without a shelf
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };

    let copy = state.catalog.add_copy(book_id, shelf_location).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "copy": copy,
            "message": "Copy created successfully"
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/copies/{id}",
    params(("id" = i32, Path, description = "Copy id")),
    responses(
        (status = 200, description = "Copy deleted"),
        (status = 404, description = "Copy not found"),
        (status = 409, description = "Copy has loan history")
    )
)]
pub async fn delete_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let book_id = state.catalog.delete_copy(id).await?;
    Ok(Json(json!({
        "book_id": book_id,
        "message": "Copy deleted successfully"
    })))
}
