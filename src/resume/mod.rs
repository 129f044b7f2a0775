// src/resume/mod.rs
//! Resume core: layout engine, materializers, export, editing and template choice
pub mod catalog;
pub mod editor;
pub mod export;
pub mod html;
pub mod layout;
pub mod render;
pub mod session;
pub mod suggestion;
pub mod text;
pub mod theme;

pub use catalog::{catalog, demo_resume, preview, template_info, TemplateInfo};
pub use editor::{AssistAction, AssistField, AssistOutcome, EditorError, ResumeEditor, TextAssist};
pub use export::{ExportArtifact, ExportError, ExportFormat, Exporter};
pub use html::to_html;
pub use layout::{Document, SectionBody};
pub use render::render;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, SessionStoreExt};
pub use suggestion::{recommend, Answer, Recommendation, SuggestionFlow, SuggestionState};
pub use text::to_text;
pub use theme::Theme;
