// src/resume/render.rs
//! The layout engine: one pure function from `ResumeData` to a `Document`

use super::layout::{ContactKind, ContactLine, Document, Entry, Header, SectionBody, SectionBlock, A4};
use super::theme::Theme;
use crate::types::{split_skills, ResumeData, Section, TemplateType};

pub fn render(data: &ResumeData, template: TemplateType) -> Document {
    let theme = Theme::for_template(template);

    let sections = data
        .present_sections()
        .into_iter()
        .map(|section| SectionBlock {
            section,
            region: theme.region_for(section),
            heading: theme.heading(section).map(str::to_string),
            body: section_body(data, section),
        })
        .collect();

    Document {
        template,
        page: A4,
        header: build_header(data, &theme),
        sections,
    }
}

fn build_header(data: &ResumeData, theme: &Theme) -> Header {
    let name = data.name.trim();
    let contacts: Vec<ContactLine> = [
        (ContactKind::Email, &data.email),
        (ContactKind::Phone, &data.phone),
        (ContactKind::Linkedin, &data.linkedin),
        (ContactKind::Portfolio, &data.portfolio),
    ]
    .into_iter()
    .filter_map(|(kind, value)| {
        let value = value.trim();
        (!value.is_empty()).then(|| ContactLine {
            kind,
            value: value.to_string(),
        })
    })
    .collect();

    // No heading over an empty contact block.
    let contact_heading = if contacts.is_empty() {
        None
    } else {
        theme.contact_heading.map(str::to_string)
    };

    Header {
        name: if name.is_empty() {
            theme.name_placeholder.to_string()
        } else {
            name.to_string()
        },
        is_placeholder: name.is_empty(),
        contacts,
        contact_region: theme.contact_region,
        contact_heading,
    }
}

fn section_body(data: &ResumeData, section: Section) -> SectionBody {
    match section {
        Section::Summary => SectionBody::Paragraph(data.summary.trim().to_string()),
        Section::Achievements => SectionBody::Paragraph(data.achievements.trim().to_string()),
        Section::Skills => SectionBody::Tokens(split_skills(&data.skills)),
        Section::Experience => SectionBody::Entries(
            data.experience
                .iter()
                .map(|item| Entry {
                    key: item.id.clone(),
                    title: item.role.trim().to_string(),
                    subtitle: item.company.trim().to_string(),
                    meta: item.duration.trim().to_string(),
                    body: item.description.trim().to_string(),
                    link: String::new(),
                })
                .collect(),
        ),
        Section::Education => SectionBody::Entries(
            data.education
                .iter()
                .map(|item| Entry {
                    key: item.id.clone(),
                    title: item.degree.trim().to_string(),
                    subtitle: item.institution.trim().to_string(),
                    meta: item.year.trim().to_string(),
                    ..Default::default()
                })
                .collect(),
        ),
        Section::Projects => SectionBody::Entries(
            data.projects
                .iter()
                .map(|item| Entry {
                    key: item.id.clone(),
                    title: item.title.trim().to_string(),
                    body: item.description.trim().to_string(),
                    link: item.link.trim().to_string(),
                    ..Default::default()
                })
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::theme::Region;
    use crate::types::{Education, Experience};

    fn education(id: &str, degree: &str) -> Education {
        Education {
            id: id.to_string(),
            degree: degree.to_string(),
            institution: "X".to_string(),
            year: "2024".to_string(),
        }
    }

    #[test]
    fn test_empty_document_has_only_placeholder() {
        for template in TemplateType::ALL {
            let doc = render(&ResumeData::default(), template);
            assert!(doc.sections.is_empty(), "{template} rendered sections");
            assert!(doc.header.is_placeholder);
            assert!(doc.header.contacts.is_empty());
            assert_eq!(doc.header.contact_heading, None);
            assert_eq!(doc.page, A4);
        }
    }

    #[test]
    fn test_placeholder_text_per_template() {
        let data = ResumeData::default();
        assert_eq!(render(&data, TemplateType::Classic).header.name, "YOUR NAME");
        assert_eq!(render(&data, TemplateType::Tech).header.name, "Developer Name");
        assert_eq!(render(&data, TemplateType::Modern).header.name, "Your Name");
    }

    #[test]
    fn test_sections_stay_in_canonical_order() {
        let data = ResumeData {
            name: "Ada".to_string(),
            summary: "Engineer".to_string(),
            skills: "Rust, Go".to_string(),
            achievements: "Award".to_string(),
            education: vec![education("1", "B.Tech")],
            experience: vec![Experience {
                id: "e1".to_string(),
                company: "Acme".to_string(),
                role: "Intern".to_string(),
                duration: "2023".to_string(),
                description: String::new(),
            }],
            ..Default::default()
        };
        for template in TemplateType::ALL {
            let doc = render(&data, template);
            assert_eq!(
                doc.section_ids(),
                vec!["summary", "experience", "education", "skills", "achievements"]
            );
        }
    }

    #[test]
    fn test_education_entry_fields() {
        let data = ResumeData {
            education: vec![education("1", "B.Tech")],
            ..Default::default()
        };
        let doc = render(&data, TemplateType::Elegant);
        let block = doc.section(Section::Education).unwrap();
        assert_eq!(block.region, Region::Sidebar);
        match &block.body {
            SectionBody::Entries(entries) => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].key, "1");
                assert_eq!(entries[0].title, "B.Tech");
                assert_eq!(entries[0].subtitle, "X");
                assert_eq!(entries[0].meta, "2024");
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn test_contacts_skip_blank_fields() {
        let data = ResumeData {
            email: "ada@example.com".to_string(),
            phone: "   ".to_string(),
            portfolio: "ada.dev".to_string(),
            ..Default::default()
        };
        let doc = render(&data, TemplateType::Modern);
        let kinds: Vec<_> = doc.header.contacts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ContactKind::Email, ContactKind::Portfolio]);
        assert_eq!(doc.header.contact_heading.as_deref(), Some("Contact"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let data = ResumeData {
            name: "Ada".to_string(),
            skills: "React, Node.js, , Python".to_string(),
            ..Default::default()
        };
        assert_eq!(render(&data, TemplateType::Tech), render(&data, TemplateType::Tech));
        let doc = render(&data, TemplateType::Tech);
        assert_eq!(
            doc.section(Section::Skills).map(|b| b.body.clone()),
            Some(SectionBody::Tokens(vec![
                "React".to_string(),
                "Node.js".to_string(),
                "Python".to_string()
            ]))
        );
    }
}
