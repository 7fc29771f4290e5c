//! Staff account handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::error::{ApiJson, ApiResult};
use crate::domain::NewStaffInput;
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStaffRequest {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: String,
}

#[utoipa::path(
    get,
    path = "/api/staff",
    responses((status = 200, description = "All staff accounts, without credentials"))
)]
pub async fn list_staff(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let staff = state.membership.list_staff().await?;
    Ok(Json(json!({
        "total": staff.len(),
        "staff": staff,
    })))
}

#[utoipa::path(
    post,
    path = "/api/staff",
    request_body = CreateStaffRequest,
    responses(
        (status = 201, description = "Staff account created"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_staff(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateStaffRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = NewStaffInput {
        name: payload.name,
        username: payload.username,
        password: payload.password,
        role: payload.role,
    };

    let staff = state.membership.create_staff(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "staff": staff,
            "message": "Staff created successfully"
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    params(("id" = i32, Path, description = "Staff id")),
    responses(
        (status = 200, description = "Staff account deleted"),
        (status = 404, description = "Staff account not found"),
        (status = 409, description = "Staff member recorded on a loan")
    )
)]
pub async fn delete_staff(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    state.membership.delete_staff(id).await?;
    Ok(Json(json!({ "message": "Staff deleted successfully" })))
}
