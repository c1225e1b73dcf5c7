use axum::extract::State;
use axum::Json;
use comms_core::coordinator::SettingsCoordinator;
use comms_core::settings::ProjectSettings;
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

fn form_view(form: &SettingsCoordinator) -> Value {
    json!({
        "form": form.form(),
        "dirty": form.is_dirty(),
    })
}

/// GET /api/settings: the saved project profile.
pub async fn get_settings(State(app): State<AppState>) -> Json<ProjectSettings> {
    let model = app.model.read().await;
    Json(model.settings().clone())
}

/// PUT /api/settings: edit the whole form and save it in one step. An
/// invalid body stays in the form for correction.
pub async fn put_settings(
    State(app): State<AppState>,
    Json(body): Json<ProjectSettings>,
) -> Result<Json<ProjectSettings>, AppError> {
    let mut form = app.settings.lock().await;
    let mut model = app.model.write().await;
    form.edit(|s| *s = body);
    form.save(|s| model.replace_settings(s))?;
    info!(project = %model.settings().name, "settings saved");
    Ok(Json(model.settings().clone()))
}

/// GET /api/settings/form: unsaved edits and the dirty flag.
pub async fn get_form(State(app): State<AppState>) -> Json<Value> {
    let form = app.settings.lock().await;
    Json(form_view(&form))
}

/// PUT /api/settings/form: replace the form contents without saving.
pub async fn edit_form(
    State(app): State<AppState>,
    Json(body): Json<ProjectSettings>,
) -> Json<Value> {
    let mut form = app.settings.lock().await;
    form.edit(|s| *s = body);
    Json(form_view(&form))
}

/// POST /api/settings/form/reset: discard unsaved edits.
pub async fn reset_form(State(app): State<AppState>) -> Json<Value> {
    let mut form = app.settings.lock().await;
    let model = app.model.read().await;
    form.reset(model.settings());
    Json(form_view(&form))
}

/// POST /api/settings/form/save: validate the form and replace the profile.
pub async fn save_form(State(app): State<AppState>) -> Result<Json<ProjectSettings>, AppError> {
    let mut form = app.settings.lock().await;
    let mut model = app.model.write().await;
    form.save(|s| model.replace_settings(s))?;
    info!(project = %model.settings().name, "settings saved");
    Ok(Json(model.settings().clone()))
}
