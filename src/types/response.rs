// src/types/response.rs
//! Wire types exchanged with the LLM gateway and returned by the assist endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ===== Gateway (chat-completions) =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if any and not blank.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}

// ===== Resume Analysis =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub overall_score: u8,
    #[serde(default)]
    pub section_scores: BTreeMap<String, u8>,
    #[serde(default)]
    pub sections: BTreeMap<String, SectionAnalysis>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub score: u8,
    #[serde(default)]
    pub feedback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovedSection {
    pub improved: String,
}

// ===== LinkedIn Optimization =====

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSections {
    pub name: String,
    pub headline: String,
    pub about: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFeedback {
    pub headline: String,
    pub about: String,
    pub experience: String,
    pub skills: String,
    pub education: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkedinOptimization {
    pub profile_score_before: u8,
    pub profile_score_after: u8,
    pub score_improvement: i16,
    #[serde(default)]
    pub original: ProfileSections,
    #[serde(default)]
    pub optimized: ProfileSections,
    #[serde(default)]
    pub section_feedback: ProfileFeedback,
}

// ===== Chat Assistant =====

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub context_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub label: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer_text: String,
    pub categories: Vec<String>,
    pub actions: Vec<ChatAction>,
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_content_skips_blank() {
        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "   " } }]
        }))
        .unwrap();
        assert_eq!(response.first_content(), None);

        let response: CompletionResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "content": "hello" } }]
        }))
        .unwrap();
        assert_eq!(response.first_content().as_deref(), Some("hello"));
    }

    #[test]
    fn test_completion_request_omits_unset_options() {
        let request = CompletionRequest::new("m", vec![ChatMessage::user("hi")]);
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("max_tokens").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_chat_action_serializes_type_key() {
        let action = ChatAction {
            action_type: "scan_resume".to_string(),
            label: "Scan Resume".to_string(),
            target: "/scanner".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "scan_resume");
    }
}
