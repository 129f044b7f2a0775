// src/assist/resume_analysis.rs
//! ATS scoring and section rewriting through the LLM gateway

use tracing::info;

use super::json::{extract_json, normalize_analysis_scores};
use crate::core::{CompletionBackend, GatewayError};
use crate::resume::editor::{AssistAction, AssistField, TextAssist};
use crate::types::response::{ChatMessage, CompletionRequest, ImprovedSection, ResumeAnalysis};

const ANALYZE_SYSTEM_PROMPT: &str = r#"You are an expert ATS (Applicant Tracking System) resume analyzer. Analyze resumes and provide detailed feedback.

You MUST respond with valid JSON in this exact format. ALL SCORES MUST BE INTEGERS FROM 0 TO 100 (NOT decimals, NOT single digits like 9 - use 90 instead):
{
  "overall_score": <integer 0-100>,
  "section_scores": {
    "formatting": <integer 0-100>,
    "keywords": <integer 0-100>,
    "experience": <integer 0-100>,
    "skills": <integer 0-100>,
    "grammar": <integer 0-100>
  },
  "sections": {
    "summary": {"original": "<extracted text>", "score": <integer 0-100>, "feedback": "<specific feedback>"},
    "experience": {"original": "<extracted text>", "score": <integer 0-100>, "feedback": "<specific feedback>"},
    "education": {"original": "<extracted text>", "score": <integer 0-100>, "feedback": "<specific feedback>"},
    "skills": {"original": "<extracted text>", "score": <integer 0-100>, "feedback": "<specific feedback>"},
    "projects": {"original": "<extracted text>", "score": <integer 0-100>, "feedback": "<specific feedback>"}
  },
  "missing_keywords": ["keyword1", "keyword2"],
  "improvement_suggestions": ["suggestion1", "suggestion2"]
}

Extract ACTUAL content from the resume for each section's "original" field. Only include sections that exist in the resume."#;

const IMPROVE_SYSTEM_PROMPT: &str = r#"You are an expert resume writer. Improve resume sections to be more impactful, ATS-friendly, and professional.

Focus on:
- Adding quantifiable metrics and achievements
- Using strong action verbs
- Including relevant keywords
- Making content concise yet impactful
- Professional tone

Respond with JSON: {"improved": "<improved content>"}"#;

pub struct ResumeAnalyzer<'a, B: CompletionBackend + ?Sized> {
    backend: &'a B,
    model: String,
}

impl<'a, B: CompletionBackend + ?Sized> ResumeAnalyzer<'a, B> {
    pub fn new(backend: &'a B, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub async fn analyze(&self, resume_text: &str) -> Result<ResumeAnalysis, GatewayError> {
        if resume_text.trim().is_empty() {
            return Err(GatewayError::Invalid("Resume text is required".to_string()));
        }

        let request = CompletionRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(ANALYZE_SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Analyze this resume text and provide ATS compatibility score (0-100) with detailed section-by-section feedback. Extract the actual content for each section:\n\n{}",
                    resume_text
                )),
            ],
        );

        let content = self.backend.complete(&request).await?;
        let mut value = extract_json(&content)?;
        normalize_analysis_scores(&mut value);

        let analysis: ResumeAnalysis =
            serde_json::from_value(value).map_err(|e| GatewayError::Malformed(e.to_string()))?;
        info!("Resume analyzed, overall score {}", analysis.overall_score);
        Ok(analysis)
    }

    pub async fn improve(&self, section_name: &str, content: &str) -> Result<String, GatewayError> {
        self.improve_with(section_name, content, "Make it more impactful with metrics, action verbs, and professional language.")
            .await
    }

    async fn improve_with(&self, section_name: &str, content: &str, instruction: &str) -> Result<String, GatewayError> {
        if content.trim().is_empty() {
            return Err(GatewayError::Invalid("Section content is required".to_string()));
        }

        let request = CompletionRequest::new(
            self.model.clone(),
            vec![
                ChatMessage::system(IMPROVE_SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Improve this \"{}\" section of a resume:\n\n{}\n\n{}",
                    section_name, content, instruction
                )),
            ],
        );

        let reply = self.backend.complete(&request).await?;
        let improved: ImprovedSection = serde_json::from_value(extract_json(&reply)?)
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(improved.improved)
    }
}

#[rocket::async_trait]
impl<'a, B: CompletionBackend + ?Sized> TextAssist for ResumeAnalyzer<'a, B> {
    async fn transform(&self, field: AssistField, action: AssistAction, text: &str) -> anyhow::Result<String> {
        let instruction = match action {
            AssistAction::Expand => {
                "Expand it with more concrete detail while keeping it truthful. Keep existing points."
            }
            AssistAction::Rewrite | AssistAction::Bullet => {
                "Make it more impactful with metrics, action verbs, and professional language."
            }
        };
        Ok(self.improve_with(field.label(), text, instruction).await?)
    }
}
