// src/resume/suggestion.rs
//! Questionnaire that maps {purpose, tone, field} to a template shortlist

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::session::{SessionStore, SessionStoreExt};
use crate::types::TemplateType;

/// Fixed key the flow state lives under.
pub const STORAGE_KEY: &str = "aiTemplateSuggestion";

pub const SHORTLIST_LEN: usize = 3;

// ===== Answers =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Job,
    Internship,
    College,
    Student,
    Scholarship,
}

impl Purpose {
    pub const ALL: [Purpose; 5] = [
        Purpose::Job,
        Purpose::Internship,
        Purpose::College,
        Purpose::Student,
        Purpose::Scholarship,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Purpose::Job => "Job Application",
            Purpose::Internship => "Internship",
            Purpose::College => "College Admission",
            Purpose::Student => "Student CV",
            Purpose::Scholarship => "Scholarship Application",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Creative,
    Minimal,
    Ats,
    Modern,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Creative,
        Tone::Minimal,
        Tone::Ats,
        Tone::Modern,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Creative => "Creative",
            Tone::Minimal => "Minimal",
            Tone::Ats => "ATS Friendly",
            Tone::Modern => "Modern Clean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Engineering,
    It,
    Business,
    Finance,
    Design,
    Marketing,
    Healthcare,
    Science,
    Arts,
    Commerce,
    Other,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Engineering,
        Field::It,
        Field::Business,
        Field::Finance,
        Field::Design,
        Field::Marketing,
        Field::Healthcare,
        Field::Science,
        Field::Arts,
        Field::Commerce,
        Field::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Engineering => "Engineering",
            Field::It => "IT / Software",
            Field::Business => "Business / Management",
            Field::Finance => "Finance",
            Field::Design => "Design",
            Field::Marketing => "Marketing",
            Field::Healthcare => "Medicine / Healthcare",
            Field::Science => "Science",
            Field::Arts => "Arts",
            Field::Commerce => "Commerce",
            Field::Other => "Any other",
        }
    }
}

// ===== Rule Table =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub template: TemplateType,
    pub name: String,
    pub reason: String,
    pub use_case: String,
    pub aesthetic: String,
    pub ats_compatibility: u8,
    pub ats_note: String,
    pub top_pick: bool,
}

struct Pick {
    template: TemplateType,
    name: &'static str,
    reason: &'static str,
    use_case: &'static str,
    aesthetic: &'static str,
    ats_compatibility: u8,
    ats_note: &'static str,
}

const ATS_FIRST: Pick = Pick {
    template: TemplateType::Classic,
    name: "Classic Professional",
    reason: "Optimized for ATS scanning and applicant tracking systems",
    use_case: "Perfect for large companies and formal job applications",
    aesthetic: "Traditional, clean, easy-to-parse formatting",
    ats_compatibility: 99,
    ats_note: "Best for automated screening",
};

const TECH_STYLED: Pick = Pick {
    template: TemplateType::Tech,
    name: "Tech Executive",
    reason: "Perfect for tech professionals and modern roles",
    use_case: "Ideal for software engineers, designers, and tech roles",
    aesthetic: "Contemporary, code-like styling, developer-friendly",
    ats_compatibility: 95,
    ats_note: "Good for tech-focused companies",
};

const CREATIVE: Pick = Pick {
    template: TemplateType::Creative,
    name: "Student Starter CV",
    reason: "Stands out with creative flair while staying professional",
    use_case: "Great for creative roles and design positions",
    aesthetic: "Vibrant, modern, visually appealing",
    ats_compatibility: 85,
    ats_note: "Better for direct human review",
};

const MINIMAL_FALLBACK: Pick = Pick {
    template: TemplateType::Minimalist,
    name: "Clean Minimal",
    reason: "Versatile design works across all industries and purposes",
    use_case: "Universal choice for any application",
    aesthetic: "Minimalist, focus on content, elegant whitespace",
    ats_compatibility: 97,
    ats_note: "Excellent parsing compatibility",
};

const FILLERS: [Pick; 2] = [
    Pick {
        template: TemplateType::Modern,
        name: "Modern Gradient",
        reason: "Contemporary design with subtle visual interest",
        use_case: "Good for startups and progressive companies",
        aesthetic: "Modern, gradient accents, professional but fresh",
        ats_compatibility: 90,
        ats_note: "Good for most applications",
    },
    Pick {
        template: TemplateType::Elegant,
        name: "Professional Elegant",
        reason: "Executive-level design for senior positions",
        use_case: "Management, finance, and corporate roles",
        aesthetic: "Sophisticated, premium feel, corporate",
        ats_compatibility: 92,
        ats_note: "Good ATS compatibility",
    },
];

/// Deterministic and total: always three distinct templates, the first
/// flagged as top pick.
pub fn recommend(purpose: Purpose, tone: Tone, field: Field) -> Vec<Recommendation> {
    let mut picks: Vec<&Pick> = Vec::with_capacity(SHORTLIST_LEN);

    if tone == Tone::Ats || purpose == Purpose::Job {
        picks.push(&ATS_FIRST);
    }
    if tone == Tone::Modern || (field == Field::It && purpose == Purpose::Job) {
        picks.push(&TECH_STYLED);
    }
    if tone == Tone::Creative || matches!(field, Field::Design | Field::Marketing) {
        picks.push(&CREATIVE);
    }
    if picks.is_empty() {
        picks.push(&MINIMAL_FALLBACK);
    }

    for filler in &FILLERS {
        if picks.len() >= SHORTLIST_LEN {
            break;
        }
        if !picks.iter().any(|p| p.template == filler.template) {
            picks.push(filler);
        }
    }

    picks
        .into_iter()
        .enumerate()
        .map(|(index, pick)| Recommendation {
            template: pick.template,
            name: pick.name.to_string(),
            reason: pick.reason.to_string(),
            use_case: pick.use_case.to_string(),
            aesthetic: pick.aesthetic.to_string(),
            ats_compatibility: pick.ats_compatibility,
            ats_note: pick.ats_note.to_string(),
            top_pick: index == 0,
        })
        .collect()
}

// ===== Flow State =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    #[default]
    Purpose,
    Tone,
    Field,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "question", content = "value", rename_all = "lowercase")]
pub enum Answer {
    Purpose(Purpose),
    Tone(Tone),
    Field(Field),
}

impl Answer {
    fn step(&self) -> Step {
        match self {
            Answer::Purpose(_) => Step::Purpose,
            Answer::Tone(_) => Step::Tone,
            Answer::Field(_) => Step::Field,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionState {
    pub step: Step,
    pub purpose: Option<Purpose>,
    pub tone: Option<Tone>,
    pub field: Option<Field>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Expected an answer for {expected:?}, got {answered:?}")]
    OutOfOrder { expected: Step, answered: Step },
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// The questionnaire driven step by step, persisted after every change so a
/// reopened flow resumes where it left off.
pub struct SuggestionFlow<'a> {
    store: &'a dyn SessionStore,
    key: String,
}

impl<'a> SuggestionFlow<'a> {
    pub fn new(store: &'a dyn SessionStore) -> Self {
        Self {
            store,
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Separate flows per client session on a shared store.
    pub fn for_session(store: &'a dyn SessionStore, session_id: &str) -> Self {
        Self {
            store,
            key: format!("{}:{}", STORAGE_KEY, session_id),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn state(&self) -> Result<SuggestionState, SuggestionError> {
        Ok(self.store.load(&self.key).await?.unwrap_or_default())
    }

    pub async fn answer(&self, answer: Answer) -> Result<SuggestionState, SuggestionError> {
        let mut state = self.state().await?;
        if answer.step() != state.step {
            return Err(SuggestionError::OutOfOrder {
                expected: state.step,
                answered: answer.step(),
            });
        }

        match answer {
            Answer::Purpose(purpose) => {
                state.purpose = Some(purpose);
                state.step = Step::Tone;
            }
            Answer::Tone(tone) => {
                state.tone = Some(tone);
                state.step = Step::Field;
            }
            Answer::Field(field) => {
                state.field = Some(field);
                // Earlier answers are always set by the time the field step is reached.
                if let (Some(purpose), Some(tone)) = (state.purpose, state.tone) {
                    state.recommendations = recommend(purpose, tone, field);
                    state.step = Step::Results;
                    info!(
                        "Template suggestion for {:?}/{:?}/{:?}: {:?}",
                        purpose,
                        tone,
                        field,
                        state.recommendations.iter().map(|r| r.template.id()).collect::<Vec<_>>()
                    );
                } else {
                    state.step = Step::Purpose;
                }
            }
        }

        self.store.save(&self.key, &state).await?;
        Ok(state)
    }

    /// Step back one question; answers are kept.
    pub async fn back(&self) -> Result<SuggestionState, SuggestionError> {
        let mut state = self.state().await?;
        state.step = match state.step {
            Step::Purpose | Step::Tone => Step::Purpose,
            Step::Field => Step::Tone,
            Step::Results => {
                state.recommendations.clear();
                Step::Field
            }
        };
        self.store.save(&self.key, &state).await?;
        Ok(state)
    }

    pub async fn reset(&self) -> Result<SuggestionState, SuggestionError> {
        self.store.clear(&self.key).await?;
        Ok(SuggestionState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::session::MemorySessionStore;
    use std::collections::HashSet;

    fn templates(recs: &[Recommendation]) -> Vec<TemplateType> {
        recs.iter().map(|r| r.template).collect()
    }

    #[test]
    fn test_rule_table_is_total() {
        for purpose in Purpose::ALL {
            for tone in Tone::ALL {
                for field in Field::ALL {
                    let recs = recommend(purpose, tone, field);
                    assert_eq!(recs.len(), 3, "{purpose:?}/{tone:?}/{field:?}");
                    assert!(recs[0].top_pick);
                    assert!(recs[1..].iter().all(|r| !r.top_pick));
                    let unique: HashSet<_> = recs.iter().map(|r| r.template).collect();
                    assert_eq!(unique.len(), 3);
                    assert_eq!(recs, recommend(purpose, tone, field));
                }
            }
        }
    }

    #[test]
    fn test_ats_rule_fires_first() {
        let recs = recommend(Purpose::Job, Tone::Ats, Field::It);
        assert_eq!(
            templates(&recs),
            vec![TemplateType::Classic, TemplateType::Tech, TemplateType::Modern]
        );
        assert_eq!(recs[0].name, "Classic Professional");
        assert_eq!(recs[0].ats_compatibility, 99);
    }

    #[test]
    fn test_fallback_and_fillers() {
        let recs = recommend(Purpose::College, Tone::Professional, Field::Science);
        assert_eq!(
            templates(&recs),
            vec![TemplateType::Minimalist, TemplateType::Modern, TemplateType::Elegant]
        );
    }

    #[test]
    fn test_three_rules_need_no_filler() {
        let recs = recommend(Purpose::Job, Tone::Modern, Field::Design);
        assert_eq!(
            templates(&recs),
            vec![TemplateType::Classic, TemplateType::Tech, TemplateType::Creative]
        );
    }

    #[tokio::test]
    async fn test_flow_walkthrough_persists_and_resets() {
        let store = MemorySessionStore::new();
        let flow = SuggestionFlow::new(&store);

        assert_eq!(flow.state().await.unwrap().step, Step::Purpose);
        flow.answer(Answer::Purpose(Purpose::Internship)).await.unwrap();
        flow.answer(Answer::Tone(Tone::Creative)).await.unwrap();

        // A fresh flow over the same store resumes at the field question.
        let reopened = SuggestionFlow::new(&store);
        assert_eq!(reopened.state().await.unwrap().step, Step::Field);

        let done = reopened.answer(Answer::Field(Field::Design)).await.unwrap();
        assert_eq!(done.step, Step::Results);
        assert_eq!(done.recommendations[0].template, TemplateType::Creative);

        let reset = reopened.reset().await.unwrap();
        assert_eq!(reset, SuggestionState::default());
        assert!(store.load_raw(STORAGE_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_order_answer_is_rejected() {
        let store = MemorySessionStore::new();
        let flow = SuggestionFlow::new(&store);
        let err = flow.answer(Answer::Field(Field::It)).await.unwrap_err();
        assert!(matches!(
            err,
            SuggestionError::OutOfOrder {
                expected: Step::Purpose,
                answered: Step::Field
            }
        ));
    }

    #[tokio::test]
    async fn test_back_keeps_answers() {
        let store = MemorySessionStore::new();
        let flow = SuggestionFlow::for_session(&store, "abc");
        flow.answer(Answer::Purpose(Purpose::Job)).await.unwrap();
        flow.answer(Answer::Tone(Tone::Ats)).await.unwrap();
        flow.answer(Answer::Field(Field::Finance)).await.unwrap();

        let state = flow.back().await.unwrap();
        assert_eq!(state.step, Step::Field);
        assert!(state.recommendations.is_empty());
        assert_eq!(state.tone, Some(Tone::Ats));

        let state = flow.back().await.unwrap();
        assert_eq!(state.step, Step::Tone);
        assert_eq!(flow.key(), "aiTemplateSuggestion:abc");
    }

    #[test]
    fn test_answer_serde_shape() {
        let answer: Answer =
            serde_json::from_value(serde_json::json!({"question": "tone", "value": "ats"})).unwrap();
        assert_eq!(answer, Answer::Tone(Tone::Ats));
    }
}
