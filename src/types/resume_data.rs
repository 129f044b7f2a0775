// src/types/resume_data.rs
//! The single document shared by the editor, every template and the exporter

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ===== Repeatable Entries =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
}

// ===== Document =====

/// Every field is optional for rendering: an empty string or an empty list
/// means the section is left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub portfolio: String,
    pub summary: String,
    pub education: Vec<Education>,
    /// Comma separated; see [`split_skills`].
    pub skills: String,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub achievements: String,
}

/// Fresh identifier for a repeatable entry.
pub fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Split the comma separated skills string into trimmed, non-empty tokens.
pub fn split_skills(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

impl ResumeData {
    /// Whether the given section has anything to show.
    pub fn has_section(&self, section: Section) -> bool {
        match section {
            Section::Summary => has_text(&self.summary),
            Section::Experience => !self.experience.is_empty(),
            Section::Education => !self.education.is_empty(),
            Section::Skills => !split_skills(&self.skills).is_empty(),
            Section::Projects => !self.projects.is_empty(),
            Section::Achievements => has_text(&self.achievements),
        }
    }

    /// Sections with content, in canonical display order.
    pub fn present_sections(&self) -> Vec<Section> {
        Section::ORDER
            .iter()
            .copied()
            .filter(|section| self.has_section(*section))
            .collect()
    }

    /// Build a document from the account's stored profile metadata.
    ///
    /// Keys follow the profile store: `full_name`/`name`, `email_custom`,
    /// `phone`, `linkedin`, `portfolio`, `bio` and a free-text `education`.
    pub fn from_profile_metadata(metadata: &Map<String, Value>, account_email: Option<&str>) -> Self {
        let text = |key: &str| {
            metadata
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let mut data = ResumeData {
            name: text("full_name").or_else(|| text("name")).unwrap_or_default(),
            email: text("email_custom")
                .or_else(|| account_email.map(str::to_string))
                .unwrap_or_default(),
            phone: text("phone").unwrap_or_default(),
            linkedin: text("linkedin").unwrap_or_default(),
            portfolio: text("portfolio").unwrap_or_default(),
            summary: text("bio").unwrap_or_default(),
            ..Default::default()
        };

        if let Some(degree) = text("education").filter(|s| !s.is_empty()) {
            data.education.push(Education {
                id: new_item_id(),
                degree,
                institution: String::new(),
                year: String::new(),
            });
        }

        data
    }
}

// ===== Sections =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
}

impl Section {
    pub const ORDER: [Section; 6] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Achievements,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Achievements => "achievements",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Achievements => "Achievements",
        }
    }
}

// ===== Templates =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    Modern,
    Classic,
    Creative,
    Minimalist,
    Elegant,
    Tech,
}

impl TemplateType {
    pub const ALL: [TemplateType; 6] = [
        TemplateType::Modern,
        TemplateType::Classic,
        TemplateType::Creative,
        TemplateType::Minimalist,
        TemplateType::Elegant,
        TemplateType::Tech,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TemplateType::Modern => "modern",
            TemplateType::Classic => "classic",
            TemplateType::Creative => "creative",
            TemplateType::Minimalist => "minimalist",
            TemplateType::Elegant => "elegant",
            TemplateType::Tech => "tech",
        }
    }

    /// Resolve the `template` query parameter of the form route.
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(TemplateType::Modern)
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TemplateType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let requested = s.trim().to_lowercase();
        TemplateType::ALL
            .iter()
            .copied()
            .find(|t| t.id() == requested)
            .ok_or_else(|| anyhow::anyhow!("Unknown template: {}", s))
    }
}
