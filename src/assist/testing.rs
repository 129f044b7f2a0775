// src/assist/testing.rs
//! Offline completion backend for tests

use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::core::{CompletionBackend, GatewayError};
use crate::types::response::CompletionRequest;

/// Replays scripted replies in order and records every request it sees.
/// The last reply repeats once the script runs out.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

enum Reply {
    Text(String),
    Fail(GatewayError),
}

fn replay(error: &GatewayError) -> GatewayError {
    match error {
        GatewayError::Invalid(m) => GatewayError::Invalid(m.clone()),
        GatewayError::NotConfigured(m) => GatewayError::NotConfigured(m.clone()),
        GatewayError::RateLimited => GatewayError::RateLimited,
        GatewayError::PaymentRequired => GatewayError::PaymentRequired,
        GatewayError::Status { status, body } => GatewayError::Status {
            status: *status,
            body: body.clone(),
        },
        GatewayError::Transport(e) => GatewayError::Status {
            status: 502,
            body: e.to_string(),
        },
        GatewayError::EmptyResponse => GatewayError::EmptyResponse,
        GatewayError::Malformed(m) => GatewayError::Malformed(m.clone()),
    }
}

impl ScriptedBackend {
    pub fn replying(text: &str) -> Self {
        Self::script(vec![text])
    }

    pub fn script(texts: Vec<&str>) -> Self {
        Self {
            replies: Mutex::new(texts.into_iter().map(|t| Reply::Text(t.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fails with `error`.
    pub fn failing(error: GatewayError) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([Reply::Fail(error)])),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }
}

#[rocket::async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests.lock().push(request.clone());
        let mut replies = self.replies.lock();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            None
        };
        let reply = reply.as_ref().or(replies.front());
        match reply {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Fail(error)) => Err(replay(error)),
            None => Err(GatewayError::EmptyResponse),
        }
    }
}
