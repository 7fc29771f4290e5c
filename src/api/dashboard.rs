use axum::{Json, extract::State, response::IntoResponse};

use super::error::ApiResult;
use crate::infrastructure::AppState;
use crate::services::load_dashboard;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses((status = 200, description = "Counters and the latest transactions"))
)]
pub async fn get_dashboard(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let dashboard = load_dashboard(state.db(), state.circulation.as_ref()).await?;
    Ok(Json(dashboard))
}
