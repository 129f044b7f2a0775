// src/web/handlers/assist_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::assist::{ChatAssistant, LinkedinOptimizer, ResumeAnalyzer};
use crate::core::GatewayError;
use crate::types::response::{ChatAnswer, ChatRequest, LinkedinOptimization};
use crate::web::types::*;

pub fn gateway_error(e: GatewayError, session_id: Option<String>) -> ApiError {
    let status = Status::from_code(e.http_status()).unwrap_or(Status::InternalServerError);
    if status.code >= 500 {
        error!("Assist request failed: {}", e);
    }

    let suggestions = match e {
        GatewayError::RateLimited => vec!["Wait a minute before trying again".to_string()],
        GatewayError::PaymentRequired => vec!["Add credits to the AI workspace".to_string()],
        GatewayError::NotConfigured(_) => vec!["Set LLM_GATEWAY_API_KEY and restart the server".to_string()],
        GatewayError::Invalid(_) => vec!["Check the required request fields".to_string()],
        _ => vec!["Try again in a few moments".to_string()],
    };

    StandardErrorResponse::new(e.to_string(), e.error_code().to_string(), suggestions, session_id)
        .with_status(status)
}

pub async fn chat_handler(
    request: Json<StandardRequest<ChatRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<ChatAnswer>>, ApiError> {
    let session_id = request.session_id();
    let backend = state.backend().map_err(|e| gateway_error(e, session_id.clone()))?;
    let assistant = ChatAssistant::new(backend, state.gateway_config.chat_model.clone());

    match assistant.ask(&request.data).await {
        Ok(answer) => Ok(Json(DataResponse::success(
            "Assistant answered".to_string(),
            answer,
            session_id,
        ))),
        Err(e) => Err(gateway_error(e, session_id)),
    }
}

pub async fn analyze_resume_handler(
    request: Json<StandardRequest<AnalyzeResumeRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Value>>, ApiError> {
    let session_id = request.session_id();
    let backend = state.backend().map_err(|e| gateway_error(e, session_id.clone()))?;
    let analyzer = ResumeAnalyzer::new(backend, state.gateway_config.analysis_model.clone());
    let body = &request.data;

    let result = match body.action.as_deref().unwrap_or("analyze") {
        "analyze" => analyzer
            .analyze(body.resume_text.as_deref().unwrap_or_default())
            .await
            .and_then(|analysis| {
                serde_json::to_value(analysis).map_err(|e| GatewayError::Malformed(e.to_string()))
            }),
        "improve" => {
            let section = body.section_name.as_deref().unwrap_or("section");
            analyzer
                .improve(section, body.section_content.as_deref().unwrap_or_default())
                .await
                .map(|improved| json!({ "improved": improved }))
        }
        other => Err(GatewayError::Invalid(format!("Invalid action: {}", other))),
    };

    match result {
        Ok(data) => {
            info!("Resume assist action completed");
            Ok(Json(DataResponse::success(
                "Resume analysis complete".to_string(),
                data,
                session_id,
            )))
        }
        Err(e) => Err(gateway_error(e, session_id)),
    }
}

pub async fn linkedin_handler(
    request: Json<StandardRequest<LinkedinRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<LinkedinOptimization>>, ApiError> {
    let session_id = request.session_id();
    let backend = state.backend().map_err(|e| gateway_error(e, session_id.clone()))?;
    let optimizer = LinkedinOptimizer::new(backend, state.gateway_config.linkedin_model.clone());

    match optimizer
        .optimize(&request.data.profile_content, request.data.target_role.as_deref())
        .await
    {
        Ok(result) => Ok(Json(DataResponse::success(
            format!("Profile score improved by {}", result.score_improvement),
            result,
            session_id,
        ))),
        Err(e) => Err(gateway_error(e, session_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_status() {
        let (status, body) = gateway_error(GatewayError::RateLimited, None);
        assert_eq!(status, Status::TooManyRequests);
        assert_eq!(body.error_code, "RATE_LIMITED");

        let (status, _) = gateway_error(GatewayError::PaymentRequired, None);
        assert_eq!(status.code, 402);

        let (status, _) = gateway_error(GatewayError::NotConfigured("x".into()), None);
        assert_eq!(status, Status::ServiceUnavailable);
    }
}
