// src/web/mod.rs
//! HTTP API: resume layout/render/export, template suggestion and the LLM proxies

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::{CompletionBackend, ConfigManager, GatewayClient};
use crate::resume::{Document, Exporter, FileSessionStore, SuggestionState, TemplateInfo};
use crate::types::response::{ChatAnswer, ChatRequest, LinkedinOptimization};
use crate::types::ResumeData;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new("Access-Control-Allow-Methods", "POST, GET, OPTIONS"));
        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ));
        response.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition",
        ));
    }
}

// ===== Templates =====

#[get("/templates")]
pub async fn get_templates() -> Json<DataResponse<Vec<TemplateInfo>>> {
    handlers::get_templates_handler().await
}

#[get("/templates/<id>/preview")]
pub async fn preview_template(id: &str) -> Result<RawHtml<String>, ApiError> {
    handlers::preview_template_handler(id).await
}

// ===== Resume =====

#[post("/resume/layout", data = "<request>")]
pub async fn layout_resume(
    request: Json<StandardRequest<LayoutRequest>>,
) -> Result<Json<DataResponse<Document>>, ApiError> {
    handlers::layout_handler(request).await
}

#[post("/resume/render", data = "<request>")]
pub async fn render_resume(
    request: Json<StandardRequest<LayoutRequest>>,
) -> Result<RawHtml<String>, ApiError> {
    handlers::render_html_handler(request).await
}

#[post("/resume/export", data = "<request>")]
pub async fn export_resume(
    request: Json<StandardRequest<ExportRequest>>,
    state: &State<AppState>,
) -> Result<FileResponse, ApiError> {
    handlers::export_handler(request, state).await
}

#[post("/resume/prefill", data = "<request>")]
pub async fn prefill_resume(
    request: Json<StandardRequest<PrefillRequest>>,
) -> Json<DataResponse<ResumeData>> {
    handlers::prefill_handler(request).await
}

// ===== Template Suggestion =====

#[get("/suggestions?<session>")]
pub async fn get_suggestion(
    session: Option<String>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SuggestionState>>, ApiError> {
    handlers::get_suggestion_handler(session, state).await
}

#[post("/suggestions/answer", data = "<request>")]
pub async fn answer_suggestion(
    request: Json<StandardRequest<SuggestionAnswerRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SuggestionState>>, ApiError> {
    handlers::answer_suggestion_handler(request, state).await
}

#[post("/suggestions/back", data = "<request>")]
pub async fn back_suggestion(
    request: Json<SessionRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SuggestionState>>, ApiError> {
    handlers::back_suggestion_handler(request, state).await
}

#[post("/suggestions/reset", data = "<request>")]
pub async fn reset_suggestion(
    request: Json<SessionRequest>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SuggestionState>>, ApiError> {
    handlers::reset_suggestion_handler(request, state).await
}

// ===== AI Assist =====

#[post("/assist/chat", data = "<request>")]
pub async fn chat(
    request: Json<StandardRequest<ChatRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ChatAnswer>>, ApiError> {
    handlers::chat_handler(request, state).await
}

#[post("/assist/analyze-resume", data = "<request>")]
pub async fn analyze_resume(
    request: Json<StandardRequest<AnalyzeResumeRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    handlers::analyze_resume_handler(request, state).await
}

#[post("/assist/linkedin", data = "<request>")]
pub async fn optimize_linkedin(
    request: Json<StandardRequest<LinkedinRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<LinkedinOptimization>>, ApiError> {
    handlers::linkedin_handler(request, state).await
}

// ===== System =====

#[get("/health")]
pub async fn health(state: &State<AppState>) -> Json<DataResponse<handlers::HealthInfo>> {
    handlers::health_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request<'_>) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("No route for {} {}", request.method(), request.uri()),
        "NOT_FOUND".to_string(),
        vec!["GET /api/health lists the service status".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "INVALID_BODY".to_string(),
        vec!["Verify field names and value types".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the API around an already-built state; tests use this with a
/// scripted backend and an in-memory store.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                get_templates,
                preview_template,
                layout_resume,
                render_resume,
                export_resume,
                prefill_resume,
                get_suggestion,
                answer_suggestion,
                back_suggestion,
                reset_suggestion,
                chat,
                analyze_resume,
                optimize_linkedin,
                health,
                options,
            ],
        )
}

/// Production state: disk-backed sessions and the hosted gateway when a key is set.
pub async fn app_state(config: &ConfigManager) -> Result<AppState> {
    let sessions = FileSessionStore::new(config.environment.session_path.clone()).await?;
    if let Err(e) = sessions.sweep_expired(config.environment.session_ttl).await {
        warn!("Session cleanup skipped: {:#}", e);
    }

    let gateway: Option<Arc<dyn CompletionBackend>> = match GatewayClient::new(&config.gateway) {
        Ok(client) => {
            info!("LLM gateway: {}", client.endpoint());
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!("AI endpoints disabled: {}", e);
            None
        }
    };

    Ok(AppState {
        sessions: Box::new(sessions),
        exporter: Exporter::new(config.export_config()),
        gateway,
        gateway_config: config.gateway.clone(),
    })
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, port: u16) -> Result<()> {
    let state = app_state(&config).await?;

    info!("Starting FlowCV resume API server");
    info!("Environment: {}", config.environment.name);
    info!("Output: {}", config.environment.output_path.display());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = build_rocket(state)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
