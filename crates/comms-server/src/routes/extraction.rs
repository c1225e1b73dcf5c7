use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use comms_core::coordinator::ExtractionCoordinator;
use comms_core::CommsError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

fn view(ex: &ExtractionCoordinator) -> Value {
    json!({
        "input": ex.input(),
        "drafts": ex.drafts(),
        "saved": ex.is_saved(),
        "request": ex.state(),
    })
}

/// GET /api/extraction: input buffer, drafts and request state.
pub async fn get_extraction(State(app): State<AppState>) -> Json<Value> {
    let ex = app.extraction.lock().await;
    Json(view(&ex))
}

#[derive(Debug, Deserialize)]
pub struct InputBody {
    pub input: String,
}

/// PUT /api/extraction/input: replace the notes text.
pub async fn put_input(State(app): State<AppState>, Json(body): Json<InputBody>) -> Json<Value> {
    let mut ex = app.extraction.lock().await;
    ex.set_input(body.input);
    Json(view(&ex))
}

#[derive(Debug, Deserialize)]
pub struct ImportParams {
    pub name: String,
}

/// POST /api/extraction/import?name= : raw file body appended to the input.
pub async fn import_file(
    State(app): State<AppState>,
    Query(params): Query<ImportParams>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let mut ex = app.extraction.lock().await;
    let appended = ex.import_file(&params.name, &body)?;
    info!(file = %params.name, chars = appended, "imported file");
    Ok(Json(json!({ "appended": appended, "extraction": view(&ex) })))
}

/// POST /api/extraction/run: ask the gateway for stakeholder drafts.
///
/// Returns 409 while a previous run is outstanding and 503 when no API key
/// is configured; neither touches the coordinator.
pub async fn run_extraction(State(app): State<AppState>) -> Result<Json<Value>, AppError> {
    let gateway = app.gateway()?;
    let ticket = app.extraction.lock().await.begin_extract()?;
    info!("stakeholder extraction started");

    // Detached so a dropped connection still settles the request state.
    let task = tokio::spawn(async move {
        let outcome = gateway.extract_stakeholders(ticket.input()).await;
        let mut ex = app.extraction.lock().await;
        let found = ex.finish_extract(ticket, outcome)?.len();
        info!(found, "stakeholder extraction finished");
        Ok::<_, CommsError>(view(&ex))
    });
    Ok(Json(task.await??))
}

/// POST /api/extraction/save: replace the stakeholder register wholesale.
pub async fn save_extraction(State(app): State<AppState>) -> Result<Json<Value>, AppError> {
    let mut ex = app.extraction.lock().await;
    let mut model = app.model.write().await;
    let saved = ex.save(|drafts| model.replace_stakeholders(drafts))?;
    info!(saved, "stakeholder register replaced");
    Ok(Json(json!({ "saved": saved, "stakeholders": model.stakeholders() })))
}
