use axum::extract::State;
use axum::Json;
use comms_core::dashboard::DashboardSummary;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/dashboard: headline counts plus the profile header.
pub async fn get_dashboard(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let model = app.model.read().await;
    let settings = model.settings();
    Ok(Json(serde_json::json!({
        "summary": DashboardSummary::compute(&model),
        "manager": settings.manager,
        "userTitle": settings.user_title,
        "methodology": settings.methodology,
    })))
}
