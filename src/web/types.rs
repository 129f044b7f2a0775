// src/web/types.rs
//! Request payloads, the JSON response envelope and file downloads

use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::core::{CompletionBackend, GatewayConfig, GatewayError};
use crate::resume::{ExportArtifact, Exporter, SessionStore};
use crate::types::ResumeData;

/// Everything the routes share.
pub struct AppState {
    pub sessions: Box<dyn SessionStore>,
    pub exporter: Exporter,
    pub gateway: Option<Arc<dyn CompletionBackend>>,
    pub gateway_config: GatewayConfig,
}

impl AppState {
    pub fn backend(&self) -> Result<&dyn CompletionBackend, GatewayError> {
        self.gateway.as_deref().ok_or_else(|| {
            GatewayError::NotConfigured("LLM_GATEWAY_API_KEY is not set".to_string())
        })
    }
}

// ===== File Downloads =====

pub struct FileResponse {
    pub data: Vec<u8>,
    pub content_type: ContentType,
    pub filename: String,
}

impl From<ExportArtifact> for FileResponse {
    fn from(artifact: ExportArtifact) -> Self {
        Self {
            content_type: ContentType::parse_flexible(artifact.content_type).unwrap_or(ContentType::Binary),
            filename: artifact.file_name,
            data: artifact.bytes,
        }
    }
}

/// Attachment header with an ASCII fallback name and the exact UTF-8 name
/// in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}

impl<'r> Responder<'r, 'static> for FileResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(self.content_type)
            .raw_header("Content-Disposition", content_disposition(&self.filename))
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}

// ===== Requests =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl<T> StandardRequest<T> {
    pub fn session_id(&self) -> Option<String> {
        self.session_id.clone()
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LayoutRequest {
    #[serde(default)]
    pub resume: ResumeData,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExportRequest {
    #[serde(default)]
    pub resume: ResumeData,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct PrefillRequest {
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SuggestionAnswerRequest {
    pub answer: crate::resume::Answer,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SessionRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnalyzeResumeRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub section_name: Option<String>,
    #[serde(default)]
    pub section_content: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct LinkedinRequest {
    #[serde(default)]
    pub profile_content: String,
    #[serde(default)]
    pub target_role: Option<String>,
}

// ===== Responses =====

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Error body plus the HTTP status it is sent with.
pub type ApiError = (Status, Json<StandardErrorResponse>);

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, session_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            session_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            session_id,
        }
    }

    pub fn with_status(self, status: Status) -> ApiError {
        (status, Json(self))
    }
}
