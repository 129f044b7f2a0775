// src/types/mod.rs
pub mod response;
pub mod resume_data;

pub use resume_data::{
    new_item_id, split_skills, Education, Experience, Project, ResumeData, Section, TemplateType,
};
