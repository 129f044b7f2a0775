// src/assist/mod.rs
//! LLM-backed collaborators: resume scoring, section rewriting, LinkedIn
//! optimization and the chat assistant

pub mod chat;
pub mod json;
pub mod linkedin;
pub mod resume_analysis;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use chat::{ChatAssistant, ChatSession};
pub use linkedin::LinkedinOptimizer;
pub use resume_analysis::ResumeAnalyzer;
