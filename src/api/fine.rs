//! Fine handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

use super::error::ApiResult;
use crate::infrastructure::AppState;

#[utoipa::path(
    get,
    path = "/api/fines",
    responses((status = 200, description = "Fines with member and book, newest first"))
)]
pub async fn list_fines(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let fines = state.circulation.list_fines().await?;
    Ok(Json(json!({
        "total": fines.len(),
        "fines": fines,
    })))
}

#[utoipa::path(
    post,
    path = "/api/fines/{id}/pay",
    params(("id" = i32, Path, description = "Fine id")),
    responses(
        (status = 200, description = "Fine marked paid"),
        (status = 404, description = "Fine not found")
    )
)]
pub async fn pay_fine(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let fine = state.circulation.pay_fine(id).await?;
    Ok(Json(json!({
        "fine": fine,
        "message": "Fine paid"
    })))
}
