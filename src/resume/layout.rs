// src/resume/layout.rs
//! Layout tree produced by the render engine and consumed by the materializers

use serde::Serialize;

use super::theme::{Region, Theme};
use crate::types::{Section, TemplateType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSize {
    pub width_mm: u16,
    pub height_mm: u16,
}

pub const A4: PageSize = PageSize {
    width_mm: 210,
    height_mm: 297,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub template: TemplateType,
    pub page: PageSize,
    pub header: Header,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub name: String,
    pub is_placeholder: bool,
    pub contacts: Vec<ContactLine>,
    pub contact_region: Region,
    pub contact_heading: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Email,
    Phone,
    Linkedin,
    Portfolio,
}

impl ContactKind {
    pub fn id(&self) -> &'static str {
        match self {
            ContactKind::Email => "email",
            ContactKind::Phone => "phone",
            ContactKind::Linkedin => "linkedin",
            ContactKind::Portfolio => "portfolio",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactKind::Email => "Email",
            ContactKind::Phone => "Phone",
            ContactKind::Linkedin => "LinkedIn",
            ContactKind::Portfolio => "Portfolio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLine {
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionBlock {
    pub section: Section,
    pub region: Region,
    pub heading: Option<String>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum SectionBody {
    Paragraph(String),
    Entries(Vec<Entry>),
    Tokens(Vec<String>),
}

/// One education, experience or project item. Empty strings are omitted
/// by every materializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub title: String,
    pub subtitle: String,
    pub meta: String,
    pub body: String,
    pub link: String,
}

impl Document {
    pub fn theme(&self) -> Theme {
        Theme::for_template(self.template)
    }

    pub fn section(&self, section: Section) -> Option<&SectionBlock> {
        self.sections.iter().find(|block| block.section == section)
    }

    /// Blocks placed in `region`, in canonical order.
    pub fn sections_in(&self, region: Region) -> impl Iterator<Item = &SectionBlock> {
        self.sections
            .iter()
            .filter(move |block| block.region == region)
    }

    pub fn section_ids(&self) -> Vec<&'static str> {
        self.sections.iter().map(|block| block.section.id()).collect()
    }
}
