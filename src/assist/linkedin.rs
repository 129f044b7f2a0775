// src/assist/linkedin.rs
//! LinkedIn profile optimization and its text/print exports

use serde_json::Value;
use tracing::info;

use super::json::{clamp_score, extract_json};
use crate::core::{CompletionBackend, GatewayError};
use crate::types::response::{ChatMessage, CompletionRequest, LinkedinOptimization, ProfileSections};
use crate::utils::html_escape;

const DEFAULT_SCORE_BEFORE: u8 = 40;
const DEFAULT_SCORE_AFTER: u8 = 85;

const SYSTEM_PROMPT: &str = r#"You are an expert LinkedIn profile optimizer and career coach. Your task is to analyze LinkedIn profiles and provide comprehensive optimization suggestions.

When given a LinkedIn profile, you must:
1. Extract and identify all profile sections (Name, Headline, About, Experience, Education, Skills)
2. Score the current profile (0-100) based on completeness, keyword optimization, and professional appeal
3. Generate an optimized version of each section
4. Provide specific feedback for each section
5. Score the optimized profile

ALWAYS respond with valid JSON in this exact format:
{
  "profile_score_before": <number 0-100>,
  "profile_score_after": <number 0-100>,
  "score_improvement": <number>,
  "original": {"name": "", "headline": "", "about": "", "experience": "", "education": "", "skills": ""},
  "optimized": {"name": "", "headline": "", "about": "", "experience": "", "education": "", "skills": ""},
  "section_feedback": {"headline": "", "about": "", "experience": "", "skills": "", "education": ""}
}"#;

pub struct LinkedinOptimizer<'a, B: CompletionBackend + ?Sized> {
    backend: &'a B,
    model: String,
}

impl<'a, B: CompletionBackend + ?Sized> LinkedinOptimizer<'a, B> {
    pub fn new(backend: &'a B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub async fn optimize(
        &self,
        profile_content: &str,
        target_role: Option<&str>,
    ) -> Result<LinkedinOptimization, GatewayError> {
        if profile_content.trim().is_empty() {
            return Err(GatewayError::Invalid("Profile content is required".to_string()));
        }

        let role = target_role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| format!(" for the target role: {}", r))
            .unwrap_or_default();

        let request = CompletionRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Analyze and optimize this LinkedIn profile{}:\n\n{}\n\nProvide a complete analysis with extracted sections, scores, optimized content, and specific feedback. Respond ONLY with valid JSON.",
                    role, profile_content
                )),
            ],
        );

        let content = self.backend.complete(&request).await?;
        let result = normalize_optimization(extract_json(&content)?)?;
        info!(
            "LinkedIn profile optimized: {} -> {}",
            result.profile_score_before, result.profile_score_after
        );
        Ok(result)
    }
}

/// Missing, zero or non-numeric scores fall back to 40 before and 85 after;
/// the improvement is always recomputed.
fn normalize_optimization(mut value: Value) -> Result<LinkedinOptimization, GatewayError> {
    let before = profile_score(value.get("profile_score_before"), DEFAULT_SCORE_BEFORE);
    let after = profile_score(value.get("profile_score_after"), DEFAULT_SCORE_AFTER);

    if let Value::Object(map) = &mut value {
        map.insert("profile_score_before".to_string(), Value::from(before));
        map.insert("profile_score_after".to_string(), Value::from(after));
        map.insert(
            "score_improvement".to_string(),
            Value::from(after as i16 - before as i16),
        );
    } else {
        return Err(GatewayError::Malformed("Expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| GatewayError::Malformed(e.to_string()))
}

fn profile_score(value: Option<&Value>, default: u8) -> u8 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n != 0.0 && !n.is_nan() => clamp_score(n),
        _ => default,
    }
}

/// Plain-text download of the optimized profile.
pub fn to_text(profile: &ProfileSections) -> String {
    format!(
        "Name: {}\nHeadline: {}\n\nAbout:\n{}\n\nExperience:\n{}\n\nEducation:\n{}\n\nSkills:\n{}",
        profile.name,
        profile.headline,
        profile.about,
        profile.experience,
        profile.education,
        profile.skills
    )
}

/// Printable HTML page of the optimized profile.
pub fn to_print_html(profile: &ProfileSections) -> String {
    let multiline = |text: &str| html_escape(text).replace('\n', "<br/>");
    format!(
        "<html><head><meta charset=\"utf-8\"><title>Optimized LinkedIn Profile</title></head>\
         <body style=\"font-family:Arial,Helvetica,sans-serif;padding:24px;\">\n\
         <h1>{}</h1>\n<h3>{}</h3>\n\
         <h4>About</h4><p>{}</p>\n\
         <h4>Experience</h4><p>{}</p>\n\
         <h4>Education</h4><p>{}</p>\n\
         <h4>Skills</h4><p>{}</p>\n\
         </body></html>\n",
        html_escape(&profile.name),
        html_escape(&profile.headline),
        multiline(&profile.about),
        multiline(&profile.experience),
        html_escape(&profile.education),
        html_escape(&profile.skills)
    )
}
