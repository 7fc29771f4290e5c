//! Book API handlers (catalog)

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::error::{ApiJson, ApiResult};
use crate::domain::{DomainError, NewBookInput, UpdateBookInput};
use crate::infrastructure::AppState;

/// Request DTO for the create-book chain
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
    pub category: String,
    pub publisher: String,
    pub author: String,
    pub shelf_location: Option<String>,
}

/// Request DTO for editing a book
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    pub title: String,
    pub isbn: String,
    pub publication_date: Option<NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/books",
    responses((status = 200, description = "All books with authors and copy counts"))
)]
pub async fn list_books(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let books = state.catalog.list_books().await?;
    Ok(Json(json!({
        "total": books.len(),
        "books": books,
    })))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book, links and first copy created"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateBookRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = NewBookInput {
        title: payload.title,
        isbn: payload.isbn,
        publication_date: payload.publication_date,
        category: payload.category,
        publisher: payload.publisher,
        author: payload.author,
        shelf_location: payload.shelf_location,
    };

    let book = state.catalog.create_book(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "book": book,
            "message": "Book created successfully"
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let book = state
        .catalog
        .find_book(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(json!({ "book": book })))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Duplicate ISBN")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<UpdateBookRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = UpdateBookInput {
        title: payload.title,
        isbn: payload.isbn,
        publication_date: payload.publication_date,
    };

    let book = state.catalog.update_book(id, input).await?;
    Ok(Json(json!({ "book": book })))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book, its links and copies deleted"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "A copy has loan history")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    state.catalog.delete_book(id).await?;
    Ok(Json(json!({ "message": "Book deleted successfully" })))
}
