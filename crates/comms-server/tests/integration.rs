use async_trait::async_trait;
use axum::http::StatusCode;
use comms_core::gateway::{AnalysisGateway, GapAnalysis, PerformanceReport};
use comms_core::issue::CommIssue;
use comms_core::model::AppModel;
use comms_core::requirement::RequirementDraft;
use comms_core::stakeholder::{PlanSubject, Stakeholder, StakeholderDraft};
use comms_core::types::{EngagementLevel, Influence};
use comms_core::{CommsError, Result};
use comms_server::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fake gateway
// ---------------------------------------------------------------------------

struct FakeGateway {
    fail: bool,
}

impl FakeGateway {
    fn check(&self) -> Result<()> {
        if self.fail {
            Err(CommsError::Gateway("connection reset".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl AnalysisGateway for FakeGateway {
    async fn extract_stakeholders(&self, _text: &str) -> Result<Vec<StakeholderDraft>> {
        self.check()?;
        Ok(vec![
            StakeholderDraft {
                name: "Priya Nair".into(),
                role: "CFO".into(),
                current_engagement: EngagementLevel::Resistant,
                desired_engagement: EngagementLevel::Supportive,
                power: Influence::High,
                interest: Influence::Low,
            },
            StakeholderDraft {
                name: "Tom Okafor".into(),
                role: "Security Architect".into(),
                current_engagement: EngagementLevel::Neutral,
                desired_engagement: EngagementLevel::Neutral,
                power: Influence::Low,
                interest: Influence::High,
            },
        ])
    }

    async fn generate_comm_plan(&self, subjects: &[PlanSubject]) -> Result<Vec<RequirementDraft>> {
        self.check()?;
        Ok(subjects
            .iter()
            .map(|s| RequirementDraft {
                stakeholder_name: s.name.clone(),
                info_needed: "Risk register highlights".into(),
                format: "One-page brief".into(),
                frequency: "Fortnightly".into(),
                channel: "Email".into(),
            })
            .collect())
    }

    async fn analyze_engagement_gaps(&self, _s: &[Stakeholder]) -> Result<GapAnalysis> {
        self.check()?;
        Ok(GapAnalysis {
            analysis: "Engineering is the main gap.".into(),
            actions: vec!["Pair the eng. lead with the sponsor".into()],
        })
    }

    async fn evaluate_performance(&self, _i: &[CommIssue]) -> Result<PerformanceReport> {
        self.check()?;
        Ok(PerformanceReport {
            score: 64,
            feedback: "Attachments keep bouncing.".into(),
            improvements: vec!["Use a shared drive link".into()],
        })
    }
}

fn state(fail: bool) -> AppState {
    AppState::new(AppModel::seeded(), Arc::new(FakeGateway { fail }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn send(app: axum::Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    send(app, req).await
}

async fn with_json(app: axum::Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, req).await
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    with_json(app, "POST", uri, body).await
}

async fn put_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    with_json(app, "PUT", uri, body).await
}

async fn post_empty(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    send(app, req).await
}

// ---------------------------------------------------------------------------
// Read-only views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dashboard_reports_seeded_counts() {
    let (status, body) = get(build_router(state(false)), "/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["stakeholders"], 5);
    assert_eq!(body["summary"]["openIssues"], 2);
    assert_eq!(body["manager"], "Alex Rivera, PMP");
}

#[tokio::test]
async fn stakeholder_search_matches_role_case_insensitively() {
    let (status, body) = get(build_router(state(false)), "/api/stakeholders?q=LEAD").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Sarah Miller");

    let (_, body) = get(build_router(state(false)), "/api/stakeholders?q=zzz").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn matrix_marks_current_and_desired() {
    let (status, body) = get(build_router(state(false)), "/api/stakeholders/matrix?q=emily").await;
    assert_eq!(status, StatusCode::OK);
    let cells = body[0]["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 5);
    assert_eq!(cells[3], json!({ "level": "Supportive", "current": true, "desired": false }));
    assert_eq!(cells[4], json!({ "level": "Leading", "current": false, "desired": true }));
}

#[tokio::test]
async fn issue_search_covers_status_field() {
    let (_, body) = get(build_router(state(false)), "/api/performance/issues?q=resolved").await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["stakeholder"], "Engineering Lead");
}

// ---------------------------------------------------------------------------
// Extraction flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extract_then_save_replaces_register() {
    let app_state = state(false);

    let (status, _) = put_json(
        build_router(app_state.clone()),
        "/api/extraction/input",
        json!({ "input": "Priya (CFO) doubts the budget; Tom runs security." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_empty(build_router(app_state.clone()), "/api/extraction/run").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drafts"].as_array().unwrap().len(), 2);
    assert_eq!(body["request"]["state"], "succeeded");

    let (status, body) = post_empty(build_router(app_state.clone()), "/api/extraction/save").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], 2);

    let (_, list) = get(build_router(app_state), "/api/stakeholders").await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list
        .iter()
        .all(|s| s["id"].as_str().unwrap().starts_with("extracted-")));
}

#[tokio::test]
async fn save_before_extraction_is_refused() {
    let app_state = state(false);
    let (_, before) = get(build_router(app_state.clone()), "/api/stakeholders").await;

    let (status, body) = post_empty(build_router(app_state.clone()), "/api/extraction/save").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("drafts"));

    let (_, after) = get(build_router(app_state), "/api/stakeholders").await;
    assert_eq!(before, after);
    assert_eq!(after.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn extraction_without_input_is_bad_request() {
    let (status, body) = post_empty(build_router(state(false)), "/api/extraction/run").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("input"));
}

#[tokio::test]
async fn extraction_in_flight_is_conflict() {
    let app_state = state(false);
    {
        let mut ex = app_state.extraction.lock().await;
        ex.set_input("notes");
        let _ticket = ex.begin_extract().unwrap();
    }
    let (status, _) = post_empty(build_router(app_state), "/api/extraction/run").await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn failed_extraction_leaves_register_unchanged() {
    let app_state = state(true);
    let (_, before) = get(build_router(app_state.clone()), "/api/stakeholders").await;

    put_json(
        build_router(app_state.clone()),
        "/api/extraction/input",
        json!({ "input": "anything" }),
    )
    .await;
    let (status, body) = post_empty(build_router(app_state.clone()), "/api/extraction/run").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].is_string());

    let (_, after) = get(build_router(app_state.clone()), "/api/stakeholders").await;
    assert_eq!(before, after);

    let (_, ex) = get(build_router(app_state), "/api/extraction").await;
    assert_eq!(ex["request"]["state"], "failed");
    assert!(ex["request"]["notice"].as_str().unwrap().starts_with("Failed"));
}

#[tokio::test]
async fn missing_credentials_is_service_unavailable() {
    let app_state = AppState::without_gateway(AppModel::seeded(), "GEMINI_API_KEY or API_KEY");
    let (status, body) = post_empty(build_router(app_state.clone()), "/api/engagement/analyze").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("GEMINI_API_KEY"));

    let (_, eng) = get(build_router(app_state), "/api/engagement").await;
    assert_eq!(eng["request"]["state"], "idle");
}

#[tokio::test]
async fn binary_import_is_unprocessable() {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/extraction/import?name=org-chart.png")
        .body(axum::body::Body::from(vec![0x89u8, b'P', b'N', b'G', 0, 0]))
        .unwrap();
    let (status, _) = send(build_router(state(false)), req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn text_import_appends_to_input() {
    let app_state = state(false);
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/extraction/import?name=minutes.txt")
        .body(axum::body::Body::from("Marketing VP: reports too technical"))
        .unwrap();
    let (status, body) = send(build_router(app_state), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["extraction"]["input"], "Marketing VP: reports too technical");
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_plan_replaces_requirements() {
    let app_state = state(false);
    let (status, body) = post_empty(build_router(app_state.clone()), "/api/plan/generate").await;
    assert_eq!(status, StatusCode::OK);
    let reqs = body["requirements"].as_array().unwrap();
    assert_eq!(reqs.len(), 5);
    assert!(reqs.iter().all(|r| r["stakeholderId"] == ""));
    assert!(reqs.iter().all(|r| r["owner"] == "Project Manager"));

    let (_, plan) = get(build_router(app_state), "/api/plan?q=fortnightly").await;
    // frequency is not a searchable plan field
    assert_eq!(plan["requirements"], json!([]));
}

#[tokio::test]
async fn requirement_add_and_delete() {
    let app_state = state(false);
    let (status, created) = post_json(
        build_router(app_state.clone()),
        "/api/plan/requirements",
        json!({ "stakeholderName": "Mark Davis", "infoNeeded": "Sprint review notes" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["owner"], "Project Manager");
    let id = created["id"].as_str().unwrap().to_string();

    let uri = format!("/api/plan/requirements/{id}");
    let req = axum::http::Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = send(build_router(app_state.clone()), req).await;
    assert_eq!(status, StatusCode::OK);

    let req = axum::http::Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = send(build_router(app_state), req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_is_markdown() {
    let req = axum::http::Request::builder()
        .uri("/api/plan/export")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = build_router(state(false)).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let ct = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(ct.starts_with("text/markdown"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("| Dr. Emily Chen | Project Status Report |"));
}

// ---------------------------------------------------------------------------
// Performance & settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feedback_is_prepended_and_rating_validated() {
    let app_state = state(false);
    let (status, entry) = post_json(
        build_router(app_state.clone()),
        "/api/performance/feedback",
        json!({ "stakeholder": "PMO", "item": "Risk digest", "comment": "Useful" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["rating"], 5);

    let (status, _) = post_json(
        build_router(app_state.clone()),
        "/api/performance/feedback",
        json!({ "stakeholder": "PMO", "item": "Risk digest", "comment": "x", "rating": 6 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, log) = get(build_router(app_state), "/api/performance/feedback").await;
    let entries = log["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["stakeholder"], "PMO");
}

#[tokio::test]
async fn evaluate_stores_report() {
    let app_state = state(false);
    let (status, body) = post_empty(build_router(app_state.clone()), "/api/performance/evaluate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["report"]["score"], 64);

    let (_, perf) = get(build_router(app_state), "/api/performance").await;
    assert_eq!(perf["report"]["score"], 64);
}

#[tokio::test]
async fn settings_replace_and_reject_invalid_picture() {
    let app_state = state(false);
    let (_, mut settings) = get(build_router(app_state.clone()), "/api/settings").await;
    settings["phase"] = json!("Monitoring & Control");
    let (status, saved) = put_json(build_router(app_state.clone()), "/api/settings", settings.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["phase"], "Monitoring & Control");

    settings["userPicture"] = json!("http://example.com/me.png");
    let (status, _) = put_json(build_router(app_state.clone()), "/api/settings", settings).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, current) = get(build_router(app_state), "/api/settings").await;
    assert!(current.get("userPicture").is_none());
}

#[tokio::test]
async fn settings_form_tracks_unsaved_edits() {
    let app_state = state(false);
    let (_, mut draft) = get(build_router(app_state.clone()), "/api/settings").await;
    draft["phase"] = json!("Closure");

    let (status, form) = put_json(build_router(app_state.clone()), "/api/settings/form", draft).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["dirty"], true);
    assert_eq!(form["form"]["phase"], "Closure");

    // Nothing is saved until the form is submitted.
    let (_, saved) = get(build_router(app_state.clone()), "/api/settings").await;
    assert_eq!(saved["phase"], "Execution");

    let (_, form) = post_empty(build_router(app_state.clone()), "/api/settings/form/reset").await;
    assert_eq!(form["dirty"], false);
    assert_eq!(form["form"]["phase"], "Execution");

    let (_, mut draft) = get(build_router(app_state.clone()), "/api/settings").await;
    draft["phase"] = json!("Planning");
    put_json(build_router(app_state.clone()), "/api/settings/form", draft).await;
    let (status, saved) = post_empty(build_router(app_state.clone()), "/api/settings/form/save").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["phase"], "Planning");

    let (_, form) = get(build_router(app_state), "/api/settings/form").await;
    assert_eq!(form["dirty"], false);
}
