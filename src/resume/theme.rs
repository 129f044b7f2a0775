// src/resume/theme.rs
//! Style descriptors for the six resume templates

use serde::Serialize;

use crate::types::{Section, TemplateType};

/// Where a block is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Inside the header, under the name.
    Banner,
    Sidebar,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    SingleColumn,
    /// Sidebar on the left taking `width_pct` of the page width.
    Sidebar { width_pct: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStyle {
    Inline { separator: &'static str },
    Pills,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillsStyle {
    Joined { separator: &'static str },
    Pills,
    Bullets,
    JsonArray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    Plain,
    Card,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRule {
    /// Thin line under the heading text.
    Underline,
    /// Full-width accent bar below the heading.
    Bar,
    /// Hairline above the section, centered heading.
    Divider,
    /// Shell prompt, no rule.
    Prompt,
    /// Icon tile next to the heading.
    Tile,
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub page_bg: &'static str,
    pub text: &'static str,
    pub heading: &'static str,
    pub accent: &'static str,
    pub muted: &'static str,
    /// CSS background for the header band; may be a gradient.
    pub header_bg: &'static str,
    pub header_text: &'static str,
    pub sidebar_bg: &'static str,
    pub sidebar_text: &'static str,
    pub surface: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub template: TemplateType,
    pub font_family: &'static str,
    pub palette: Palette,
    pub layout: LayoutKind,
    pub header_align: Align,
    pub header_band: bool,
    /// Name sits at the top of the sidebar instead of a full-width header.
    pub header_in_sidebar: bool,
    pub name_placeholder: &'static str,
    pub name_weight: u16,
    pub contact_region: Region,
    pub contact_style: ContactStyle,
    pub contact_heading: Option<&'static str>,
    pub banner: &'static [Section],
    pub sidebar: &'static [Section],
    pub heading_rule: HeadingRule,
    pub uppercase_headings: bool,
    pub skills_style: SkillsStyle,
    pub entry_style: EntryStyle,
    pub page_padding_mm: u8,
    pub terminal_chrome: bool,
}

impl Theme {
    pub fn for_template(template: TemplateType) -> Theme {
        match template {
            TemplateType::Classic => CLASSIC,
            TemplateType::Creative => CREATIVE,
            TemplateType::Elegant => ELEGANT,
            TemplateType::Minimalist => MINIMALIST,
            TemplateType::Modern => MODERN,
            TemplateType::Tech => TECH,
        }
    }

    pub fn region_for(&self, section: Section) -> Region {
        if self.banner.contains(&section) {
            Region::Banner
        } else if self.sidebar.contains(&section)
            && matches!(self.layout, LayoutKind::Sidebar { .. })
        {
            Region::Sidebar
        } else {
            Region::Main
        }
    }

    /// Heading text for a section, `None` when the template shows it unlabeled.
    pub fn heading(&self, section: Section) -> Option<&'static str> {
        if self.region_for(section) == Region::Banner {
            return None;
        }
        match self.template {
            TemplateType::Classic => Some(match section {
                Section::Summary => "PROFESSIONAL SUMMARY",
                Section::Experience => "EXPERIENCE",
                Section::Education => "EDUCATION",
                Section::Skills => "SKILLS",
                Section::Projects => "PROJECTS",
                Section::Achievements => "ACHIEVEMENTS & CERTIFICATIONS",
            }),
            TemplateType::Elegant => Some(match section {
                Section::Experience => "Professional Experience",
                Section::Projects => "Key Projects",
                Section::Achievements => "Achievements & Certifications",
                other => other.title(),
            }),
            TemplateType::Minimalist => match section {
                Section::Summary => None,
                other => Some(other.title()),
            },
            TemplateType::Tech => Some(match section {
                Section::Summary => "$ cat summary.txt",
                Section::Experience => "$ cat experience/*.md",
                Section::Education => "$ ls education/",
                Section::Skills => "$ cat skills.json",
                Section::Projects => "$ git log --projects",
                Section::Achievements => "$ cat achievements.txt",
            }),
            TemplateType::Creative | TemplateType::Modern => Some(section.title()),
        }
    }
}

const CLASSIC: Theme = Theme {
    template: TemplateType::Classic,
    font_family: "Georgia, 'Times New Roman', serif",
    palette: Palette {
        page_bg: "#ffffff",
        text: "#000000",
        heading: "#000000",
        accent: "#000000",
        muted: "#333333",
        header_bg: "transparent",
        header_text: "#000000",
        sidebar_bg: "transparent",
        sidebar_text: "#000000",
        surface: "transparent",
    },
    layout: LayoutKind::SingleColumn,
    header_align: Align::Center,
    header_band: false,
    header_in_sidebar: false,
    name_placeholder: "YOUR NAME",
    name_weight: 700,
    contact_region: Region::Banner,
    contact_style: ContactStyle::Inline { separator: "•" },
    contact_heading: None,
    banner: &[],
    sidebar: &[],
    heading_rule: HeadingRule::Underline,
    uppercase_headings: true,
    skills_style: SkillsStyle::Joined { separator: "•" },
    entry_style: EntryStyle::Plain,
    page_padding_mm: 13,
    terminal_chrome: false,
};

const CREATIVE: Theme = Theme {
    template: TemplateType::Creative,
    font_family: "Poppins, 'Segoe UI', sans-serif",
    palette: Palette {
        page_bg: "#ffffff",
        text: "#111827",
        heading: "#1f2937",
        accent: "#9333ea",
        muted: "#4b5563",
        header_bg: "linear-gradient(90deg, #a855f7 0%, #ec4899 50%, #f97316 100%)",
        header_text: "#ffffff",
        sidebar_bg: "transparent",
        sidebar_text: "#111827",
        surface: "#f9fafb",
    },
    layout: LayoutKind::SingleColumn,
    header_align: Align::Left,
    header_band: true,
    header_in_sidebar: false,
    name_placeholder: "Your Name",
    name_weight: 700,
    contact_region: Region::Banner,
    contact_style: ContactStyle::Pills,
    contact_heading: None,
    banner: &[Section::Summary],
    sidebar: &[],
    heading_rule: HeadingRule::Tile,
    uppercase_headings: false,
    skills_style: SkillsStyle::Pills,
    entry_style: EntryStyle::Card,
    page_padding_mm: 8,
    terminal_chrome: false,
};

const ELEGANT: Theme = Theme {
    template: TemplateType::Elegant,
    font_family: "Roboto, 'Helvetica Neue', sans-serif",
    palette: Palette {
        page_bg: "#ffffff",
        text: "#111827",
        heading: "#111827",
        accent: "#111827",
        muted: "#4b5563",
        header_bg: "#111827",
        header_text: "#ffffff",
        sidebar_bg: "#1f2937",
        sidebar_text: "#ffffff",
        surface: "transparent",
    },
    layout: LayoutKind::Sidebar { width_pct: 33 },
    header_align: Align::Left,
    header_band: true,
    header_in_sidebar: false,
    name_placeholder: "Your Name",
    name_weight: 700,
    contact_region: Region::Sidebar,
    contact_style: ContactStyle::List,
    contact_heading: Some("Contact"),
    banner: &[Section::Summary],
    sidebar: &[Section::Skills, Section::Education],
    heading_rule: HeadingRule::Underline,
    uppercase_headings: false,
    skills_style: SkillsStyle::Bullets,
    entry_style: EntryStyle::Plain,
    page_padding_mm: 10,
    terminal_chrome: false,
};

const MINIMALIST: Theme = Theme {
    template: TemplateType::Minimalist,
    font_family: "Lato, 'Helvetica Neue', sans-serif",
    palette: Palette {
        page_bg: "#ffffff",
        text: "#1f2937",
        heading: "#1f2937",
        accent: "#e5e7eb",
        muted: "#6b7280",
        header_bg: "transparent",
        header_text: "#1f2937",
        sidebar_bg: "transparent",
        sidebar_text: "#1f2937",
        surface: "transparent",
    },
    layout: LayoutKind::SingleColumn,
    header_align: Align::Center,
    header_band: false,
    header_in_sidebar: false,
    name_placeholder: "Your Name",
    name_weight: 300,
    contact_region: Region::Banner,
    contact_style: ContactStyle::Inline { separator: "" },
    contact_heading: None,
    banner: &[],
    sidebar: &[],
    heading_rule: HeadingRule::Divider,
    uppercase_headings: false,
    skills_style: SkillsStyle::Joined { separator: "·" },
    entry_style: EntryStyle::Plain,
    page_padding_mm: 17,
    terminal_chrome: false,
};

const MODERN: Theme = Theme {
    template: TemplateType::Modern,
    font_family: "Inter, 'Segoe UI', sans-serif",
    palette: Palette {
        page_bg: "#ffffff",
        text: "#111827",
        heading: "#2563eb",
        accent: "#2563eb",
        muted: "#4b5563",
        header_bg: "transparent",
        header_text: "#ffffff",
        sidebar_bg: "#2563eb",
        sidebar_text: "#ffffff",
        surface: "rgba(255, 255, 255, 0.2)",
    },
    layout: LayoutKind::Sidebar { width_pct: 33 },
    header_align: Align::Left,
    header_band: false,
    header_in_sidebar: true,
    name_placeholder: "Your Name",
    name_weight: 700,
    contact_region: Region::Sidebar,
    contact_style: ContactStyle::List,
    contact_heading: Some("Contact"),
    banner: &[],
    sidebar: &[Section::Skills],
    heading_rule: HeadingRule::Bar,
    uppercase_headings: true,
    skills_style: SkillsStyle::Pills,
    entry_style: EntryStyle::Plain,
    page_padding_mm: 8,
    terminal_chrome: false,
};

const TECH: Theme = Theme {
    template: TemplateType::Tech,
    font_family: "Monaco, Menlo, 'Courier New', monospace",
    palette: Palette {
        page_bg: "#030712",
        text: "#4ade80",
        heading: "#22c55e",
        accent: "#86efac",
        muted: "#9ca3af",
        header_bg: "#111827",
        header_text: "#86efac",
        sidebar_bg: "transparent",
        sidebar_text: "#d1d5db",
        surface: "#030712",
    },
    layout: LayoutKind::SingleColumn,
    header_align: Align::Left,
    header_band: true,
    header_in_sidebar: false,
    name_placeholder: "Developer Name",
    name_weight: 700,
    contact_region: Region::Main,
    contact_style: ContactStyle::List,
    contact_heading: Some("$ ls contact/"),
    banner: &[Section::Summary],
    sidebar: &[],
    heading_rule: HeadingRule::Prompt,
    uppercase_headings: false,
    skills_style: SkillsStyle::JsonArray,
    entry_style: EntryStyle::Terminal,
    page_padding_mm: 8,
    terminal_chrome: true,
};
