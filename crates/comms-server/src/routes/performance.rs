use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use comms_core::feedback::{CommFeedback, NewFeedback};
use comms_core::issue::CommIssue;
use comms_core::CommsError;
use serde_json::{json, Value};
use tracing::info;

use super::SearchQuery;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/performance: last evaluation and request state.
pub async fn get_performance(State(app): State<AppState>) -> Json<Value> {
    let perf = app.performance.lock().await;
    Json(json!({
        "report": perf.report(),
        "request": perf.state(),
    }))
}

/// GET /api/performance/issues?q=
pub async fn list_issues(
    State(app): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<CommIssue>> {
    let perf = app.performance.lock().await;
    let model = app.model.read().await;
    Json(perf.visible_issues(model.issues(), &params.q))
}

/// GET /api/performance/feedback?q= : most recent first.
pub async fn list_feedback(
    State(app): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Value> {
    let perf = app.performance.lock().await;
    let model = app.model.read().await;
    Json(json!({
        "entries": perf.visible_feedback(model.feedback(), &params.q),
        "averageRating": model.feedback().average_rating(),
    }))
}

/// POST /api/performance/feedback
pub async fn record_feedback(
    State(app): State<AppState>,
    Json(new): Json<NewFeedback>,
) -> Result<(StatusCode, Json<CommFeedback>), AppError> {
    let mut model = app.model.write().await;
    let entry = model.record_feedback(new)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/performance/evaluate
pub async fn evaluate(State(app): State<AppState>) -> Result<Json<Value>, AppError> {
    let gateway = app.gateway()?;
    let ticket = {
        let mut perf = app.performance.lock().await;
        let model = app.model.read().await;
        perf.begin_evaluate(model.issues())?
    };
    info!(issues = ticket.input().len(), "performance evaluation started");

    let task = tokio::spawn(async move {
        let outcome = gateway.evaluate_performance(ticket.input()).await;
        let mut perf = app.performance.lock().await;
        let score = perf.finish_evaluate(ticket, outcome)?.score;
        info!(score, "performance evaluation finished");
        Ok::<_, CommsError>(json!({
            "report": perf.report(),
            "request": perf.state(),
        }))
    });
    Ok(Json(task.await??))
}
