//! Member API handlers

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
use crate::domain::{DomainError, MemberInput};
use crate::infrastructure::AppState;

/// Request DTO for registering or editing a member
#[derive(Debug, Deserialize, ToSchema)]
pub struct MemberRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    /// `Monthly` or `Annual`; anything else leaves the expiry empty
    pub membership_type: String,
}

impl From<MemberRequest> for MemberInput {
    fn from(req: MemberRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address.filter(|a| !a.trim().is_empty()),
            membership_type: req.membership_type,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/members",
    responses((status = 200, description = "All members"))
)]
pub async fn list_members(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let members = state.membership.list_members().await?;
    Ok(Json(json!({
        "total": members.len(),
        "members": members,
    })))
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = MemberRequest,
    responses(
        (status = 201, description = "Member registered"),
        (status = 409, description = "Email or phone already in use")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MemberRequest>,
) -> ApiResult<impl IntoResponse> {
    let member = state.membership.create_member(payload.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "member": member,
            "message": "Member created successfully"
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member found"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let member = state
        .membership
        .find_member(id)
        .await?
        .ok_or(DomainError::NotFound)?;
    Ok(Json(json!({ "member": member })))
}

#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    request_body = MemberRequest,
    responses(
        (status = 200, description = "Member updated"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Email or phone already in use")
    )
)]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<MemberRequest>,
) -> ApiResult<impl IntoResponse> {
    let member = state.membership.update_member(id, payload.into()).await?;
    Ok(Json(json!({ "member": member })))
}

#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 404, description = "Member not found"),
        (status = 409, description = "Member has loan history")
    )
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    state.membership.delete_member(id).await?;
    Ok(Json(json!({ "message": "Member deleted successfully" })))
}
