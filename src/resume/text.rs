// src/resume/text.rs
//! Plain-text `Key: value` dump of a rendered document

use super::layout::{Document, SectionBody};

pub fn to_text(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    if !doc.header.is_placeholder {
        lines.push(format!("Name: {}", doc.header.name));
    }
    for contact in &doc.header.contacts {
        lines.push(format!("{}: {}", contact.kind.label(), contact.value));
    }

    for block in &doc.sections {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{}:", block.section.title()));

        match &block.body {
            SectionBody::Paragraph(text) => lines.push(text.clone()),
            SectionBody::Tokens(tokens) => lines.push(tokens.join(", ")),
            SectionBody::Entries(entries) => {
                for entry in entries {
                    let head: Vec<&str> = [&entry.title, &entry.subtitle, &entry.meta]
                        .into_iter()
                        .map(String::as_str)
                        .filter(|s| !s.is_empty())
                        .collect();
                    lines.push(format!("- {}", head.join(" | ")));
                    if !entry.body.is_empty() {
                        for line in entry.body.lines() {
                            lines.push(format!("  {}", line));
                        }
                    }
                    if !entry.link.is_empty() {
                        lines.push(format!("  Link: {}", entry.link));
                    }
                }
            }
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
