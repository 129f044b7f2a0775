// src/web/handlers/suggestion_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

use crate::resume::suggestion::SuggestionError;
use crate::resume::{SuggestionFlow, SuggestionState};
use crate::web::types::*;

type SuggestionResult = Result<Json<DataResponse<SuggestionState>>, ApiError>;

/// Reuse the caller's session id or start a new one.
fn session_or_new(session_id: Option<String>) -> String {
    session_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn suggestion_error(e: SuggestionError, session_id: String) -> ApiError {
    match e {
        SuggestionError::OutOfOrder { .. } => StandardErrorResponse::new(
            e.to_string(),
            "OUT_OF_ORDER_ANSWER".to_string(),
            vec!["Fetch the current step with GET /api/suggestions".to_string()],
            Some(session_id),
        )
        .with_status(Status::Conflict),
        SuggestionError::Store(source) => {
            error!("Suggestion store failure: {:#}", source);
            StandardErrorResponse::new(
                "Failed to access suggestion progress".to_string(),
                "SESSION_STORE_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                Some(session_id),
            )
            .with_status(Status::InternalServerError)
        }
    }
}

fn respond(message: &str, state: SuggestionState, session_id: String) -> Json<DataResponse<SuggestionState>> {
    Json(DataResponse::success(message.to_string(), state, Some(session_id)))
}

pub async fn get_suggestion_handler(session: Option<String>, state: &State<AppState>) -> SuggestionResult {
    let session_id = session_or_new(session);
    let flow = SuggestionFlow::for_session(state.sessions.as_ref(), &session_id);
    match flow.state().await {
        Ok(current) => Ok(respond("Current suggestion step", current, session_id)),
        Err(e) => Err(suggestion_error(e, session_id)),
    }
}

pub async fn answer_suggestion_handler(
    request: Json<StandardRequest<SuggestionAnswerRequest>>,
    state: &State<AppState>,
) -> SuggestionResult {
    let session_id = session_or_new(request.session_id());
    let flow = SuggestionFlow::for_session(state.sessions.as_ref(), &session_id);
    match flow.answer(request.data.answer).await {
        Ok(next) => {
            info!("Suggestion session {} moved to {:?}", session_id, next.step);
            Ok(respond("Answer recorded", next, session_id))
        }
        Err(e) => Err(suggestion_error(e, session_id)),
    }
}

pub async fn back_suggestion_handler(request: Json<SessionRequest>, state: &State<AppState>) -> SuggestionResult {
    let session_id = session_or_new(request.session_id.clone());
    let flow = SuggestionFlow::for_session(state.sessions.as_ref(), &session_id);
    match flow.back().await {
        Ok(previous) => Ok(respond("Moved back one step", previous, session_id)),
        Err(e) => Err(suggestion_error(e, session_id)),
    }
}

pub async fn reset_suggestion_handler(request: Json<SessionRequest>, state: &State<AppState>) -> SuggestionResult {
    let session_id = session_or_new(request.session_id.clone());
    let flow = SuggestionFlow::for_session(state.sessions.as_ref(), &session_id);
    match flow.reset().await {
        Ok(fresh) => Ok(respond("Suggestion flow reset", fresh, session_id)),
        Err(e) => Err(suggestion_error(e, session_id)),
    }
}
