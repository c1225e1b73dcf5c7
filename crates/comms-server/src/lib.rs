pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard
        .route("/api/dashboard", get(routes::dashboard::get_dashboard))
        // Stakeholders
        .route(
            "/api/stakeholders",
            get(routes::stakeholders::list_stakeholders).post(routes::stakeholders::add_stakeholder),
        )
        .route(
            "/api/stakeholders/matrix",
            get(routes::stakeholders::engagement_matrix),
        )
        // Data input / extraction
        .route("/api/extraction", get(routes::extraction::get_extraction))
        .route("/api/extraction/input", put(routes::extraction::put_input))
        .route("/api/extraction/import", post(routes::extraction::import_file))
        .route("/api/extraction/run", post(routes::extraction::run_extraction))
        .route("/api/extraction/save", post(routes::extraction::save_extraction))
        // Plan communications
        .route("/api/plan", get(routes::plan::get_plan))
        .route("/api/plan/constraints", put(routes::plan::put_constraints))
        .route("/api/plan/generate", post(routes::plan::generate_plan))
        .route("/api/plan/export", get(routes::plan::export_plan))
        .route("/api/plan/requirements", post(routes::plan::add_requirement))
        .route(
            "/api/plan/requirements/{id}",
            delete(routes::plan::delete_requirement),
        )
        // Monitor engagement
        .route("/api/engagement", get(routes::engagement::get_engagement))
        .route("/api/engagement/analyze", post(routes::engagement::analyze))
        // Monitor communications
        .route("/api/performance", get(routes::performance::get_performance))
        .route(
            "/api/performance/issues",
            get(routes::performance::list_issues),
        )
        .route(
            "/api/performance/feedback",
            get(routes::performance::list_feedback).post(routes::performance::record_feedback),
        )
        .route(
            "/api/performance/evaluate",
            post(routes::performance::evaluate),
        )
        // Settings
        .route(
            "/api/settings",
            get(routes::settings::get_settings).put(routes::settings::put_settings),
        )
        .route(
            "/api/settings/form",
            get(routes::settings::get_form).put(routes::settings::edit_form),
        )
        .route("/api/settings/form/reset", post(routes::settings::reset_form))
        .route("/api/settings/form/save", post(routes::settings::save_form))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the API server on `port`.
pub async fn serve(app_state: AppState, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener, open_browser).await
}

/// Start the API server on a pre-bound listener.
///
/// Accepts a `TcpListener` that was already bound so the caller can read the
/// actual port before starting (useful when `port = 0` and the OS picks a
/// free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(app_state);

    tracing::info!("Communications manager listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}/api/dashboard");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
