// src/assist/chat.rs
//! Flow Assistant chat: answers, categories and navigation actions

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::core::{CompletionBackend, GatewayError, RequestSequencer, RequestTicket};
use crate::types::response::{ChatAction, ChatAnswer, ChatMessage, ChatRequest, CompletionRequest};

const HISTORY_WINDOW: usize = 4;
const MAX_ACTIONS: usize = 3;
const CONFIDENCE: f32 = 0.85;
const FALLBACK_ANSWER: &str = "I'm here to help! What would you like to know?";
const CHAT_SLOT: &str = "chat";

const SYSTEM_PROMPT: &str = r#"You are Flow Assistant, a friendly, helpful AI career coach and general assistant for students.
You help with:
1. Career discovery and guidance
2. Study tips and learning plans
3. Resume and LinkedIn advice
4. Coding and technical help
5. General questions (math, science, writing, etc.)

Be concise, actionable, and encouraging. Use simple language.
If a question relates to career tools, suggest relevant actions.

For career questions, mention these tools when relevant:
- Resume Scanner (/scanner) - for ATS analysis
- Resume Builder (/resume-builder) - to create resumes
- Career Quiz (/career-ai-quiz) - to discover career paths
- LinkedIn Transformer (/linkedin-transformer) - to optimize profiles

Keep responses under 150 words unless detailed explanation is needed.
Format with markdown when helpful (bullet points, bold for emphasis)."#;

pub struct ChatAssistant<'a, B: CompletionBackend + ?Sized> {
    backend: &'a B,
    model: String,
}

impl<'a, B: CompletionBackend + ?Sized> ChatAssistant<'a, B> {
    pub fn new(backend: &'a B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub async fn ask(&self, request: &ChatRequest) -> Result<ChatAnswer, GatewayError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(GatewayError::Invalid("Message is required".to_string()));
        }

        let skip = request.context_history.len().saturating_sub(HISTORY_WINDOW);
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
        messages.extend(request.context_history.iter().skip(skip).cloned());
        messages.push(ChatMessage::user(message));

        let mut completion = CompletionRequest::new(self.model.clone(), messages);
        completion.max_tokens = Some(500);
        completion.temperature = Some(0.7);

        let answer_text = match self.backend.complete(&completion).await {
            Ok(text) => text,
            Err(GatewayError::EmptyResponse) => FALLBACK_ANSWER.to_string(),
            Err(e) => return Err(e),
        };

        info!(
            "Chat answered for user {}",
            request.user_id.as_deref().unwrap_or("anonymous")
        );

        Ok(ChatAnswer {
            actions: detect_actions(message, &answer_text),
            categories: detect_categories(message),
            answer_text,
            confidence: CONFIDENCE,
        })
    }
}

fn action(action_type: &str, label: &str, target: &str) -> ChatAction {
    ChatAction {
        action_type: action_type.to_string(),
        label: label.to_string(),
        target: target.to_string(),
    }
}

/// Navigation shortcuts suggested by the question or the answer, at most three.
pub fn detect_actions(message: &str, answer: &str) -> Vec<ChatAction> {
    let message = message.to_lowercase();
    let answer = answer.to_lowercase();
    let mut actions = Vec::new();

    if message.contains("resume") || answer.contains("resume scanner") {
        actions.push(action("scan_resume", "Scan Resume", "/scanner"));
    }
    if message.contains("career") || message.contains("job") || answer.contains("career quiz") {
        actions.push(action("run_quiz", "Take Career Quiz", "/career-ai-quiz"));
    }
    if message.contains("linkedin") || answer.contains("linkedin") {
        actions.push(action(
            "optimize_linkedin",
            "Optimize LinkedIn",
            "/linkedin-transformer",
        ));
    }
    if message.contains("build resume") || answer.contains("resume builder") {
        actions.push(action("build_resume", "Build Resume", "/resume-builder"));
    }

    actions.truncate(MAX_ACTIONS);
    actions
}

pub fn detect_categories(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    let rules: [(&str, &[&str]); 5] = [
        ("career", &["career", "job", "work"]),
        ("resume", &["resume", "cv"]),
        ("coding", &["code", "programming", "python", "javascript"]),
        ("education", &["study", "learn", "course"]),
        ("math", &["math", "solve", "calculate"]),
    ];

    let categories: Vec<String> = rules
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(category, _)| category.to_string())
        .collect();

    if categories.is_empty() {
        vec!["general".to_string()]
    } else {
        categories
    }
}

/// One conversation. Each question is fenced with a request ticket, and an
/// answer is recorded only if no newer question was asked meanwhile.
#[derive(Default)]
pub struct ChatSession {
    user_id: Option<String>,
    history: Mutex<Vec<ChatMessage>>,
    sequencer: RequestSequencer,
}

impl ChatSession {
    pub fn new(user_id: Option<String>) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn history(&self) -> Vec<ChatMessage> {
        self.history.lock().clone()
    }

    pub fn is_waiting(&self) -> bool {
        self.sequencer.is_pending(CHAT_SLOT)
    }

    pub fn begin(&self, message: &str) -> (RequestTicket, ChatRequest) {
        let ticket = self.sequencer.issue(CHAT_SLOT);
        let request = ChatRequest {
            message: message.to_string(),
            user_id: self.user_id.clone(),
            context_history: self.history(),
        };
        (ticket, request)
    }

    /// Returns false when the answer was stale and got dropped.
    pub fn complete(&self, ticket: &RequestTicket, request: &ChatRequest, answer: &ChatAnswer) -> bool {
        if !self.sequencer.settle(ticket) {
            warn!("Discarding stale chat answer (request {})", ticket.id());
            return false;
        }
        let mut history = self.history.lock();
        history.push(ChatMessage::user(request.message.clone()));
        history.push(ChatMessage::assistant(answer.answer_text.clone()));
        true
    }

    /// Failed asks leave the history untouched.
    pub async fn ask<B: CompletionBackend + ?Sized>(
        &self,
        assistant: &ChatAssistant<'_, B>,
        message: &str,
    ) -> Result<Option<ChatAnswer>, GatewayError> {
        let (ticket, request) = self.begin(message);
        let answer = match assistant.ask(&request).await {
            Ok(answer) => answer,
            Err(e) => {
                self.sequencer.settle(&ticket);
                return Err(e);
            }
        };
        Ok(self.complete(&ticket, &request, &answer).then_some(answer))
    }
}
