//! Transaction (loan) handlers: issue, return and listing

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::error::{ApiJson, ApiResult};
use crate::domain::IssueInput;
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    pub limit: Option<u64>,
}

/// Request DTO for issuing a copy
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueRequest {
    pub member_id: i32,
    pub copy_id: i32,
    /// Defaults to the configured desk account
    pub staff_id: Option<i32>,
    pub due_date: NaiveDate,
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(("limit" = Option<u64>, Query, description = "Cap on the number of rows")),
    responses((status = 200, description = "Transactions, newest first"))
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> ApiResult<impl IntoResponse> {
    let transactions = state.circulation.list_transactions(query.limit).await?;
    Ok(Json(json!({
        "total": transactions.len(),
        "transactions": transactions,
    })))
}

/// Members and shelved copies to fill the issue form
#[utoipa::path(
    get,
    path = "/api/transactions/issue-options",
    responses((status = 200, description = "All members and every available copy"))
)]
pub async fn issue_options(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let members = state.membership.list_members().await?;
    let copies = state.catalog.list_available_copies().await?;
    Ok(Json(json!({
        "members": members,
        "available_copies": copies,
    })))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Copy issued"),
        (status = 404, description = "Copy not found"),
        (status = 409, description = "Copy is not available")
    )
)]
pub async fn issue_copy(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<IssueRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = IssueInput {
        member_id: payload.member_id,
        copy_id: payload.copy_id,
        staff_id: payload.staff_id.unwrap_or(state.default_staff_id),
        due_date: payload.due_date,
    };

    let transaction = state.circulation.issue(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "transaction": transaction,
            "message": "Book issued successfully"
        })),
    ))
}

#[utoipa::path(
    post,
    path = "/api/transactions/{id}/return",
    params(("id" = i32, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Copy returned, fine charged when late"),
        (status = 404, description = "Transaction not found"),
        (status = 409, description = "Transaction already closed")
    )
)]
pub async fn return_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.circulation.return_copy(id).await?;

    let message = match (&outcome.fine, outcome.fine_failed) {
        (Some(fine), _) => format!("Book returned late, fine of {} charged", fine.amount),
        (None, true) => "Book returned, but the late fine could not be recorded".to_string(),
        (None, false) => "Book returned successfully".to_string(),
    };

    Ok(Json(json!({
        "transaction": outcome.loan,
        "fine": outcome.fine,
        "fine_failed": outcome.fine_failed,
        "message": message,
    })))
}
