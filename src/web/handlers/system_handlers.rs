// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::serde::Serialize;
use rocket::State;
use tracing::info;

use crate::web::types::*;

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
    pub ai_configured: bool,
    pub pdf_converter: String,
    pub timestamp: String,
}

pub async fn health_handler(state: &State<AppState>) -> Json<DataResponse<HealthInfo>> {
    let ai_configured = state.gateway.is_some();
    info!("Health check (ai configured: {})", ai_configured);

    Json(DataResponse::success(
        "OK".to_string(),
        HealthInfo {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            ai_configured,
            pdf_converter: state.exporter.config().converter.program.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
        None,
    ))
}
