use axum::extract::State;
use axum::Json;
use comms_core::CommsError;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/engagement: last gap analysis and request state.
pub async fn get_engagement(State(app): State<AppState>) -> Json<Value> {
    let eng = app.engagement.lock().await;
    Json(json!({
        "analysis": eng.analysis(),
        "request": eng.state(),
    }))
}

/// POST /api/engagement/analyze
pub async fn analyze(State(app): State<AppState>) -> Result<Json<Value>, AppError> {
    let gateway = app.gateway()?;
    let ticket = {
        let mut eng = app.engagement.lock().await;
        let model = app.model.read().await;
        eng.begin_analyze(model.stakeholders())?
    };
    info!(stakeholders = ticket.input().len(), "engagement analysis started");

    let task = tokio::spawn(async move {
        let outcome = gateway.analyze_engagement_gaps(ticket.input()).await;
        let mut eng = app.engagement.lock().await;
        let actions = eng.finish_analyze(ticket, outcome)?.actions.len();
        info!(actions, "engagement analysis finished");
        Ok::<_, CommsError>(json!({
            "analysis": eng.analysis(),
            "request": eng.state(),
        }))
    });
    Ok(Json(task.await??))
}
