use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use comms_core::matrix::{self, MatrixRow};
use comms_core::query;
use comms_core::stakeholder::{Stakeholder, StakeholderDraft};

use super::SearchQuery;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/stakeholders?q= : the register, filtered by name and role.
pub async fn list_stakeholders(
    State(app): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<Stakeholder>> {
    let model = app.model.read().await;
    Json(query::search(model.stakeholders(), &params.q))
}

/// GET /api/stakeholders/matrix?q= : one SEAM row per visible stakeholder.
pub async fn engagement_matrix(
    State(app): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<Vec<MatrixRow>> {
    let model = app.model.read().await;
    Json(matrix::build_engagement_matrix(model.stakeholders(), &params.q))
}

/// POST /api/stakeholders: manual entry.
pub async fn add_stakeholder(
    State(app): State<AppState>,
    Json(draft): Json<StakeholderDraft>,
) -> Result<(StatusCode, Json<Stakeholder>), AppError> {
    let mut model = app.model.write().await;
    let created = model.add_stakeholder(draft)?;
    Ok((StatusCode::CREATED, Json(created)))
}
