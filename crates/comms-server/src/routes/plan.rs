use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use comms_core::requirement::{CommRequirement, NewRequirement};
use comms_core::CommsError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::SearchQuery;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/plan?q= : plan rows, constraints notes and request state.
pub async fn get_plan(
    State(app): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Value> {
    let plan = app.plan.lock().await;
    let model = app.model.read().await;
    Json(json!({
        "requirements": plan.visible(model.requirements(), &params.q),
        "constraints": plan.constraints(),
        "request": plan.state(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ConstraintsBody {
    pub constraints: String,
}

/// PUT /api/plan/constraints: replace the assumptions & constraints notes.
pub async fn put_constraints(
    State(app): State<AppState>,
    Json(body): Json<ConstraintsBody>,
) -> Json<Value> {
    let mut plan = app.plan.lock().await;
    plan.set_constraints(body.constraints);
    Json(json!({ "constraints": plan.constraints() }))
}

/// POST /api/plan/generate: replace the plan with a generated one.
pub async fn generate_plan(State(app): State<AppState>) -> Result<Json<Value>, AppError> {
    let gateway = app.gateway()?;
    let ticket = {
        let mut plan = app.plan.lock().await;
        let model = app.model.read().await;
        plan.begin_generate(model.stakeholders())?
    };
    info!(subjects = ticket.input().len(), "plan generation started");

    let task = tokio::spawn(async move {
        let outcome = gateway.generate_comm_plan(ticket.input()).await;
        let mut plan = app.plan.lock().await;
        let mut model = app.model.write().await;
        let rows =
            plan.finish_generate(ticket, outcome, |rows| model.replace_requirements(rows))?;
        info!(rows, "plan generation finished");
        Ok::<_, CommsError>(json!({
            "requirements": model.requirements(),
            "request": plan.state(),
        }))
    });
    Ok(Json(task.await??))
}

/// POST /api/plan/requirements: manual entry.
pub async fn add_requirement(
    State(app): State<AppState>,
    Json(new): Json<NewRequirement>,
) -> Result<(StatusCode, Json<CommRequirement>), AppError> {
    let mut model = app.model.write().await;
    let created = model.add_requirement(new)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/plan/requirements/{id}
pub async fn delete_requirement(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CommRequirement>, AppError> {
    let mut model = app.model.write().await;
    Ok(Json(model.remove_requirement(&id)?))
}

/// GET /api/plan/export: the plan as a Markdown document.
pub async fn export_plan(State(app): State<AppState>) -> impl IntoResponse {
    let plan = app.plan.lock().await;
    let model = app.model.read().await;
    let md = plan.export_markdown(model.settings(), model.requirements());
    (
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"communications-plan.md\"",
            ),
        ],
        md,
    )
}
