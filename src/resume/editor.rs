// src/resume/editor.rs
//! Form-side editing of a `ResumeData`, including AI assist on free-text fields

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

use super::layout::Document;
use super::render::render;
use crate::core::sequencer::{RequestSequencer, RequestTicket};
use crate::types::{new_item_id, Education, Experience, Project, ResumeData, TemplateType};

// ===== Field Selectors =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarField {
    Name,
    Email,
    Phone,
    Linkedin,
    Portfolio,
    Summary,
    Skills,
    Achievements,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationField {
    Degree,
    Institution,
    Year,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceField {
    Company,
    Role,
    Duration,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectField {
    Title,
    Description,
    Link,
}

/// Free-text fields that offer AI assist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistField {
    Summary,
    Skills,
    Achievements,
}

impl AssistField {
    pub fn label(&self) -> &'static str {
        match self {
            AssistField::Summary => "summary",
            AssistField::Skills => "skills",
            AssistField::Achievements => "achievements",
        }
    }

    fn slot(&self) -> String {
        format!("assist:{}", self.label())
    }
}

impl fmt::Display for AssistField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<AssistField> for ScalarField {
    fn from(field: AssistField) -> Self {
        match field {
            AssistField::Summary => ScalarField::Summary,
            AssistField::Skills => ScalarField::Skills,
            AssistField::Achievements => ScalarField::Achievements,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistAction {
    Rewrite,
    Bullet,
    Expand,
}

// ===== Assist Plumbing =====

/// External text-transform collaborator behind the AI assist buttons.
#[rocket::async_trait]
pub trait TextAssist: Send + Sync {
    async fn transform(&self, field: AssistField, action: AssistAction, text: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("AI assist for {0} is already in progress")]
    Busy(AssistField),
}

/// Handle for one in-flight assist call.
#[derive(Debug)]
pub struct AssistTicket {
    field: AssistField,
    action: AssistAction,
    request: RequestTicket,
}

impl AssistTicket {
    pub fn field(&self) -> AssistField {
        self.field
    }

    pub fn action(&self) -> AssistAction {
        self.action
    }

    pub fn request_id(&self) -> u64 {
        self.request.id()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistOutcome {
    Applied,
    /// The field keeps its prior value.
    Failed(String),
    /// A newer request or a manual edit owns the field now.
    Superseded,
}

/// Split prose into one `• ` line per sentence. Running it twice gives the
/// same result.
pub fn bulletize(text: &str) -> String {
    let sentences: Vec<String> = text
        .lines()
        .flat_map(|line| line.split(". "))
        .map(|part| {
            part.trim()
                .trim_start_matches(['•', '-', '*'])
                .trim()
                .trim_end_matches('.')
                .trim()
                .to_string()
        })
        .filter(|part| !part.is_empty())
        .collect();

    if sentences.is_empty() {
        return text.to_string();
    }
    sentences
        .iter()
        .map(|s| format!("• {}.", s))
        .collect::<Vec<_>>()
        .join("\n")
}

// ===== Editor =====

#[derive(Debug, Default)]
pub struct ResumeEditor {
    data: ResumeData,
    busy: HashSet<AssistField>,
    sequencer: RequestSequencer,
}

impl ResumeEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: ResumeData) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn into_data(self) -> ResumeData {
        self.data
    }

    pub fn render(&self, template: TemplateType) -> Document {
        render(&self.data, template)
    }

    pub fn field(&self, field: ScalarField) -> &str {
        match field {
            ScalarField::Name => &self.data.name,
            ScalarField::Email => &self.data.email,
            ScalarField::Phone => &self.data.phone,
            ScalarField::Linkedin => &self.data.linkedin,
            ScalarField::Portfolio => &self.data.portfolio,
            ScalarField::Summary => &self.data.summary,
            ScalarField::Skills => &self.data.skills,
            ScalarField::Achievements => &self.data.achievements,
        }
    }

    /// A manual edit of a field with a pending assist wins over the assist.
    pub fn set_field(&mut self, field: ScalarField, value: impl Into<String>) {
        let pending = self.busy.iter().copied().find(|f| ScalarField::from(*f) == field);
        if let Some(assist) = pending {
            self.busy.remove(&assist);
            let superseding = self.sequencer.issue(&assist.slot());
            self.sequencer.settle(&superseding);
        }
        self.write_field(field, value.into());
    }

    fn write_field(&mut self, field: ScalarField, value: String) {
        let slot = match field {
            ScalarField::Name => &mut self.data.name,
            ScalarField::Email => &mut self.data.email,
            ScalarField::Phone => &mut self.data.phone,
            ScalarField::Linkedin => &mut self.data.linkedin,
            ScalarField::Portfolio => &mut self.data.portfolio,
            ScalarField::Summary => &mut self.data.summary,
            ScalarField::Skills => &mut self.data.skills,
            ScalarField::Achievements => &mut self.data.achievements,
        };
        *slot = value;
    }

    // ----- education -----

    pub fn add_education(&mut self) -> String {
        let id = new_item_id();
        self.data.education.push(Education {
            id: id.clone(),
            degree: String::new(),
            institution: String::new(),
            year: String::new(),
        });
        id
    }

    /// Returns whether an item with `id` exists.
    pub fn update_education(&mut self, id: &str, field: EducationField, value: impl Into<String>) -> bool {
        let Some(item) = self.data.education.iter_mut().find(|e| e.id == id) else {
            debug!("No education entry {}", id);
            return false;
        };
        let value = value.into();
        match field {
            EducationField::Degree => item.degree = value,
            EducationField::Institution => item.institution = value,
            EducationField::Year => item.year = value,
        }
        true
    }

    pub fn remove_education(&mut self, id: &str) -> bool {
        let before = self.data.education.len();
        self.data.education.retain(|e| e.id != id);
        self.data.education.len() != before
    }

    // ----- experience -----

    pub fn add_experience(&mut self) -> String {
        let id = new_item_id();
        self.data.experience.push(Experience {
            id: id.clone(),
            company: String::new(),
            role: String::new(),
            duration: String::new(),
            description: String::new(),
        });
        id
    }

    pub fn update_experience(&mut self, id: &str, field: ExperienceField, value: impl Into<String>) -> bool {
        let Some(item) = self.data.experience.iter_mut().find(|e| e.id == id) else {
            debug!("No experience entry {}", id);
            return false;
        };
        let value = value.into();
        match field {
            ExperienceField::Company => item.company = value,
            ExperienceField::Role => item.role = value,
            ExperienceField::Duration => item.duration = value,
            ExperienceField::Description => item.description = value,
        }
        true
    }

    pub fn remove_experience(&mut self, id: &str) -> bool {
        let before = self.data.experience.len();
        self.data.experience.retain(|e| e.id != id);
        self.data.experience.len() != before
    }

    // ----- projects -----

    pub fn add_project(&mut self) -> String {
        let id = new_item_id();
        self.data.projects.push(Project {
            id: id.clone(),
            title: String::new(),
            description: String::new(),
            link: String::new(),
        });
        id
    }

    pub fn update_project(&mut self, id: &str, field: ProjectField, value: impl Into<String>) -> bool {
        let Some(item) = self.data.projects.iter_mut().find(|p| p.id == id) else {
            debug!("No project entry {}", id);
            return false;
        };
        let value = value.into();
        match field {
            ProjectField::Title => item.title = value,
            ProjectField::Description => item.description = value,
            ProjectField::Link => item.link = value,
        }
        true
    }

    pub fn remove_project(&mut self, id: &str) -> bool {
        let before = self.data.projects.len();
        self.data.projects.retain(|p| p.id != id);
        self.data.projects.len() != before
    }

    // ----- AI assist -----

    pub fn is_busy(&self, field: AssistField) -> bool {
        self.busy.contains(&field)
    }

    pub fn begin_assist(&mut self, field: AssistField, action: AssistAction) -> Result<AssistTicket, EditorError> {
        if !self.busy.insert(field) {
            return Err(EditorError::Busy(field));
        }
        Ok(AssistTicket {
            field,
            action,
            request: self.sequencer.issue(&field.slot()),
        })
    }

    pub fn complete_assist(&mut self, ticket: AssistTicket, result: anyhow::Result<String>) -> AssistOutcome {
        if !self.sequencer.settle(&ticket.request) {
            debug!(
                "Dropping stale assist result #{} for {}",
                ticket.request.id(),
                ticket.field
            );
            return AssistOutcome::Superseded;
        }
        self.busy.remove(&ticket.field);

        match result {
            Ok(text) => {
                self.write_field(ticket.field.into(), text);
                AssistOutcome::Applied
            }
            Err(e) => {
                warn!("AI assist failed for {}: {:#}", ticket.field, e);
                AssistOutcome::Failed(e.to_string())
            }
        }
    }

    /// Run one assist call end to end. `bullet` is computed locally.
    pub async fn assist<A: TextAssist + ?Sized>(
        &mut self,
        field: AssistField,
        action: AssistAction,
        assistant: &A,
    ) -> Result<AssistOutcome, EditorError> {
        let ticket = self.begin_assist(field, action)?;
        let current = self.field(field.into()).to_string();

        let result = match action {
            AssistAction::Bullet => Ok(bulletize(&current)),
            AssistAction::Rewrite | AssistAction::Expand => {
                assistant.transform(field, action, &current).await
            }
        };
        Ok(self.complete_assist(ticket, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    #[rocket::async_trait]
    impl TextAssist for Upper {
        async fn transform(&self, _field: AssistField, _action: AssistAction, text: &str) -> anyhow::Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct Broken;

    #[rocket::async_trait]
    impl TextAssist for Broken {
        async fn transform(&self, _field: AssistField, _action: AssistAction, _text: &str) -> anyhow::Result<String> {
            anyhow::bail!("gateway down")
        }
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut editor = ResumeEditor::new();
        let id = editor.add_education();
        editor.update_education(&id, EducationField::Degree, "B.Tech");
        let before = editor.data().clone();

        assert!(!editor.update_education("missing-id", EducationField::Degree, "X"));
        assert!(!editor.remove_education("missing-id"));
        assert_eq!(editor.data(), &before);
    }

    #[test]
    fn test_edits_only_touch_the_addressed_item() {
        let mut editor = ResumeEditor::new();
        let a = editor.add_experience();
        let b = editor.add_experience();
        let c = editor.add_experience();
        editor.update_experience(&a, ExperienceField::Company, "A Corp");
        editor.update_experience(&c, ExperienceField::Company, "C Corp");

        let snapshot_a = editor.data().experience[0].clone();
        let snapshot_c = editor.data().experience[2].clone();

        assert!(editor.update_experience(&b, ExperienceField::Role, "Intern"));
        assert!(editor.remove_experience(&b));

        let experience = &editor.data().experience;
        assert_eq!(experience.len(), 2);
        assert_eq!(experience[0], snapshot_a);
        assert_eq!(experience[1], snapshot_c);
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let mut editor = ResumeEditor::new();
        let ids = [editor.add_project(), editor.add_project(), editor.add_project()];
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert!(editor.data().projects.iter().all(|p| p.title.is_empty()));

        assert!(editor.update_project(&ids[1], ProjectField::Link, "https://x.dev"));
        assert_eq!(editor.data().projects[1].link, "https://x.dev");
    }

    #[test]
    fn test_second_begin_on_busy_field_is_rejected() {
        let mut editor = ResumeEditor::new();
        let ticket = editor.begin_assist(AssistField::Summary, AssistAction::Rewrite).unwrap();
        assert!(editor.is_busy(AssistField::Summary));
        assert_eq!(
            editor.begin_assist(AssistField::Summary, AssistAction::Expand).unwrap_err(),
            EditorError::Busy(AssistField::Summary)
        );
        // Other fields stay available.
        assert!(editor.begin_assist(AssistField::Skills, AssistAction::Bullet).is_ok());

        editor.complete_assist(ticket, Ok("done".to_string()));
        assert!(!editor.is_busy(AssistField::Summary));
        assert_eq!(editor.data().summary, "done");
    }

    #[test]
    fn test_failure_keeps_prior_value() {
        let mut editor = ResumeEditor::new();
        editor.set_field(ScalarField::Achievements, "Hackathon winner");
        let ticket = editor.begin_assist(AssistField::Achievements, AssistAction::Expand).unwrap();

        let outcome = editor.complete_assist(ticket, Err(anyhow::anyhow!("rate limited")));
        assert_eq!(outcome, AssistOutcome::Failed("rate limited".to_string()));
        assert_eq!(editor.data().achievements, "Hackathon winner");
        assert!(!editor.is_busy(AssistField::Achievements));
    }

    #[test]
    fn test_manual_edit_supersedes_pending_assist() {
        let mut editor = ResumeEditor::new();
        editor.set_field(ScalarField::Summary, "draft");
        let ticket = editor.begin_assist(AssistField::Summary, AssistAction::Rewrite).unwrap();

        editor.set_field(ScalarField::Summary, "typed by hand");
        assert!(!editor.is_busy(AssistField::Summary));

        let outcome = editor.complete_assist(ticket, Ok("late AI text".to_string()));
        assert_eq!(outcome, AssistOutcome::Superseded);
        assert_eq!(editor.data().summary, "typed by hand");
    }

    #[tokio::test]
    async fn test_assist_round_trip() {
        let mut editor = ResumeEditor::new();
        editor.set_field(ScalarField::Summary, "curious engineer");

        let outcome = editor
            .assist(AssistField::Summary, AssistAction::Rewrite, &Upper)
            .await
            .unwrap();
        assert_eq!(outcome, AssistOutcome::Applied);
        assert_eq!(editor.data().summary, "CURIOUS ENGINEER");

        let outcome = editor
            .assist(AssistField::Summary, AssistAction::Expand, &Broken)
            .await
            .unwrap();
        assert!(matches!(outcome, AssistOutcome::Failed(_)));
        assert_eq!(editor.data().summary, "CURIOUS ENGINEER");
        assert!(!editor.is_busy(AssistField::Summary));
    }

    #[tokio::test]
    async fn test_bullet_is_local() {
        let mut editor = ResumeEditor::new();
        editor.set_field(ScalarField::Achievements, "Won a hackathon. Led the robotics club.");
        editor
            .assist(AssistField::Achievements, AssistAction::Bullet, &Broken)
            .await
            .unwrap();
        assert_eq!(
            editor.data().achievements,
            "• Won a hackathon.\n• Led the robotics club."
        );
    }

    #[test]
    fn test_bulletize_is_idempotent() {
        let once = bulletize("Built APIs with Node.js. Shipped fast.\nMentored juniors");
        assert_eq!(once, "• Built APIs with Node.js.\n• Shipped fast.\n• Mentored juniors.");
        assert_eq!(bulletize(&once), once);
        assert_eq!(bulletize("   "), "   ");
    }
}
