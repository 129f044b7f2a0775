// src/resume/catalog.rs
//! Template gallery metadata and preview rendering

use serde::Serialize;

use super::layout::Document;
use super::render::render;
use crate::types::{ResumeData, TemplateType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateType,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub fn template_info(template: TemplateType) -> TemplateInfo {
    let (name, tagline, description) = match template {
        TemplateType::Modern => (
            "Modern Gradient",
            "Clean Blue Two-Column",
            "Contemporary style with subtle gradient accents",
        ),
        TemplateType::Classic => (
            "Classic Professional",
            "Black & White Traditional",
            "ATS-friendly traditional resume with clean formatting",
        ),
        TemplateType::Creative => (
            "Student Starter CV",
            "Colorful Header Style",
            "Ideal for fresh graduates and students",
        ),
        TemplateType::Minimalist => (
            "Clean Minimal",
            "Whitespace Focused",
            "Minimalist design with whitespace focus",
        ),
        TemplateType::Elegant => (
            "Professional Elegant",
            "Professional Corporate",
            "Executive-level design for senior positions",
        ),
        TemplateType::Tech => (
            "Tech Executive",
            "Developer Terminal Style",
            "Perfect for tech professionals and developers",
        ),
    };

    TemplateInfo {
        id: template,
        name,
        tagline,
        description,
        tags: template_tags(template),
    }
}

fn template_tags(template: TemplateType) -> &'static [&'static str] {
    match template {
        TemplateType::Modern => &["Modern", "Creative", "Contemporary"],
        TemplateType::Classic => &["Professional", "ATS", "Traditional"],
        TemplateType::Creative => &["Student", "Creative", "Entry-level"],
        TemplateType::Minimalist => &["Minimal", "Clean", "Modern"],
        TemplateType::Elegant => &["Corporate", "Executive", "Elegant"],
        TemplateType::Tech => &["Tech", "Developer", "Modern"],
    }
}

pub fn catalog() -> Vec<TemplateInfo> {
    TemplateType::ALL.into_iter().map(template_info).collect()
}

/// Minimal sample shown in the gallery preview.
pub fn demo_resume() -> ResumeData {
    ResumeData {
        name: "Demo Name".to_string(),
        email: "demo@example.com".to_string(),
        ..Default::default()
    }
}

pub fn preview(template: TemplateType) -> Document {
    render(&demo_resume(), template)
}
