// src/resume/html.rs
//! Materialize a `Document` as a standalone, print-ready HTML page

use super::layout::{ContactLine, Document, Entry, PageSize, SectionBlock, SectionBody};
use super::theme::{Align, ContactStyle, EntryStyle, HeadingRule, LayoutKind, Region, SkillsStyle, Theme};
use crate::types::Section;
use crate::utils::html_escape;

pub fn to_html(doc: &Document) -> String {
    let theme = doc.theme();
    let template = doc.template.id();
    let mut out = String::with_capacity(16 * 1024);

    let title = if doc.header.is_placeholder {
        "Resume".to_string()
    } else {
        format!("{} - Resume", doc.header.name)
    };

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(&title)));
    out.push_str("<style>\n");
    out.push_str(&stylesheet(&theme, doc.page));
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&format!(
        "<div class=\"resume-page template-{template}\" data-template=\"{template}\">\n"
    ));

    if theme.terminal_chrome {
        out.push_str(
            "<div class=\"terminal-bar\"><span class=\"dot dot-red\"></span>\
             <span class=\"dot dot-yellow\"></span><span class=\"dot dot-green\"></span>\
             <span class=\"terminal-title\">resume.sh</span></div>\n",
        );
    }

    if !theme.header_in_sidebar {
        write_header(&mut out, doc, &theme);
    }

    match theme.layout {
        LayoutKind::Sidebar { .. } => {
            out.push_str("<div class=\"resume-columns\">\n<aside class=\"resume-sidebar\">\n");
            if theme.header_in_sidebar {
                write_header(&mut out, doc, &theme);
            }
            if doc.header.contact_region == Region::Sidebar {
                write_contact_block(&mut out, doc, &theme);
            }
            for block in doc.sections_in(Region::Sidebar) {
                write_section(&mut out, block, &theme);
            }
            out.push_str("</aside>\n<main class=\"resume-main\">\n");
            for block in doc.sections_in(Region::Main) {
                write_section(&mut out, block, &theme);
            }
            out.push_str("</main>\n</div>\n");
        }
        LayoutKind::SingleColumn => {
            out.push_str("<main class=\"resume-main\">\n");
            if doc.header.contact_region == Region::Main {
                write_contact_block(&mut out, doc, &theme);
            }
            for block in doc.sections_in(Region::Main) {
                write_section(&mut out, block, &theme);
            }
            out.push_str("</main>\n");
        }
    }

    if theme.terminal_chrome {
        out.push_str("<p class=\"prompt prompt-exit\">$ exit</p>\n");
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

// ===== Header =====

fn write_header(out: &mut String, doc: &Document, theme: &Theme) {
    out.push_str("<header class=\"resume-header\">\n");
    if theme.terminal_chrome {
        out.push_str("<p class=\"prompt\">$ cat profile.txt</p>\n");
    }

    let class = if doc.header.is_placeholder {
        "resume-name placeholder"
    } else {
        "resume-name"
    };
    out.push_str(&format!(
        "<h1 class=\"{class}\">{}</h1>\n",
        html_escape(&doc.header.name)
    ));
    if theme.header_in_sidebar {
        out.push_str("<div class=\"name-rule\"></div>\n");
    }

    for block in doc.sections_in(Region::Banner) {
        if let SectionBody::Paragraph(text) = &block.body {
            out.push_str(&format!(
                "<section class=\"resume-section banner-section\" data-section=\"{}\">\
                 <p class=\"banner-text\">{}</p></section>\n",
                block.section.id(),
                html_escape(text)
            ));
        }
    }

    if doc.header.contact_region == Region::Banner {
        write_contact_list(out, &doc.header.contacts, theme.contact_style);
    }
    out.push_str("</header>\n");
}

fn write_contact_block(out: &mut String, doc: &Document, theme: &Theme) {
    if doc.header.contacts.is_empty() {
        return;
    }
    out.push_str("<div class=\"contact-block\">\n");
    if let Some(heading) = &doc.header.contact_heading {
        out.push_str(&format!(
            "<h2 class=\"section-heading\">{}</h2>\n",
            html_escape(heading)
        ));
    }
    write_contact_list(out, &doc.header.contacts, theme.contact_style);
    out.push_str("</div>\n");
}

fn write_contact_list(out: &mut String, contacts: &[ContactLine], style: ContactStyle) {
    if contacts.is_empty() {
        return;
    }
    let variant = match style {
        ContactStyle::Inline { .. } => "contact-inline",
        ContactStyle::Pills => "contact-pills",
        ContactStyle::List => "contact-stack",
    };
    out.push_str(&format!("<ul class=\"contact-list {variant}\">\n"));
    for contact in contacts {
        out.push_str(&format!(
            "<li class=\"contact\" data-contact=\"{}\" title=\"{}\">{}</li>\n",
            contact.kind.id(),
            contact.kind.label(),
            html_escape(&contact.value)
        ));
    }
    out.push_str("</ul>\n");
}

// ===== Sections =====

fn write_section(out: &mut String, block: &SectionBlock, theme: &Theme) {
    let id = block.section.id();
    out.push_str(&format!(
        "<section class=\"resume-section section-{id}\" data-section=\"{id}\">\n"
    ));
    if let Some(heading) = &block.heading {
        out.push_str(&format!(
            "<h2 class=\"section-heading\">{}</h2>\n",
            html_escape(heading)
        ));
    }

    match &block.body {
        SectionBody::Paragraph(text) => {
            out.push_str(&format!(
                "<p class=\"section-text\">{}</p>\n",
                html_escape(text)
            ));
        }
        SectionBody::Tokens(tokens) => write_skills(out, tokens, theme.skills_style),
        SectionBody::Entries(entries) => {
            out.push_str("<div class=\"entries\">\n");
            for (index, entry) in entries.iter().enumerate() {
                write_entry(out, block.section, index, entry, theme);
            }
            out.push_str("</div>\n");
        }
    }
    out.push_str("</section>\n");
}

fn write_skills(out: &mut String, tokens: &[String], style: SkillsStyle) {
    let spans = |sep: &str| {
        tokens
            .iter()
            .map(|token| format!("<span class=\"skill\">{}</span>", html_escape(token)))
            .collect::<Vec<_>>()
            .join(sep)
    };

    match style {
        SkillsStyle::Joined { separator } => {
            let sep = format!(
                "<span class=\"skill-sep\" aria-hidden=\"true\"> {} </span>",
                html_escape(separator)
            );
            out.push_str(&format!(
                "<p class=\"skills skills-joined\">{}</p>\n",
                spans(&sep)
            ));
        }
        SkillsStyle::Pills => {
            out.push_str(&format!(
                "<div class=\"skills skills-pills\">{}</div>\n",
                spans("")
            ));
        }
        SkillsStyle::Bullets => {
            out.push_str("<ul class=\"skills skills-bullets\">\n");
            for token in tokens {
                out.push_str(&format!("<li class=\"skill\">{}</li>\n", html_escape(token)));
            }
            out.push_str("</ul>\n");
        }
        SkillsStyle::JsonArray => {
            let items = tokens
                .iter()
                .map(|token| format!("&quot;<span class=\"skill\">{}</span>&quot;", html_escape(token)))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "<pre class=\"skills skills-json\">{{\n  &quot;languages&quot;: [{items}]\n}}</pre>\n"
            ));
        }
    }
}

fn write_entry(out: &mut String, section: Section, index: usize, entry: &Entry, theme: &Theme) {
    let variant = match theme.entry_style {
        EntryStyle::Plain => "entry-plain",
        EntryStyle::Card => "entry-card",
        EntryStyle::Terminal => "entry-terminal",
    };
    out.push_str(&format!(
        "<article class=\"entry {variant}\" data-entry=\"{}\">\n",
        html_escape(&entry.key)
    ));

    if theme.entry_style == EntryStyle::Terminal && section == Section::Experience {
        out.push_str(&format!(
            "<p class=\"entry-file\"># File: experience_{}.md</p>\n",
            index + 1
        ));
    }

    out.push_str("<div class=\"entry-head\">\n<div class=\"entry-heading\">\n");
    if !entry.title.is_empty() {
        out.push_str(&format!(
            "<h3 class=\"entry-title\">{}</h3>\n",
            html_escape(&entry.title)
        ));
    }
    if !entry.subtitle.is_empty() {
        out.push_str(&format!(
            "<p class=\"entry-subtitle\">{}</p>\n",
            html_escape(&entry.subtitle)
        ));
    }
    out.push_str("</div>\n");
    if !entry.meta.is_empty() {
        out.push_str(&format!(
            "<span class=\"entry-meta\">{}</span>\n",
            html_escape(&entry.meta)
        ));
    }
    out.push_str("</div>\n");

    if !entry.body.is_empty() {
        out.push_str(&format!(
            "<p class=\"entry-body\">{}</p>\n",
            html_escape(&entry.body)
        ));
    }
    if !entry.link.is_empty() {
        let text = html_escape(&entry.link);
        if is_safe_href(&entry.link) {
            out.push_str(&format!(
                "<p class=\"entry-link\"><a href=\"{text}\">{text}</a></p>\n"
            ));
        } else {
            out.push_str(&format!("<p class=\"entry-link\">{text}</p>\n"));
        }
    }
    out.push_str("</article>\n");
}

fn is_safe_href(link: &str) -> bool {
    let lower = link.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://") || lower.starts_with("mailto:")
}

// ===== Stylesheet =====

fn stylesheet(theme: &Theme, page: PageSize) -> String {
    let p = &theme.palette;
    let pad = theme.page_padding_mm;
    let align = match theme.header_align {
        Align::Left => "left",
        Align::Center => "center",
    };
    let transform = if theme.uppercase_headings {
        "uppercase"
    } else {
        "none"
    };

    let mut css = format!(
        "@page {{ size: A4; margin: 0; }}
* {{ box-sizing: border-box; }}
html, body {{ margin: 0; padding: 0; }}
body {{ background: #e5e7eb; -webkit-print-color-adjust: exact; print-color-adjust: exact; }}
.resume-page {{ width: {width}mm; min-height: {height}mm; margin: 0 auto; display: flex; flex-direction: column; background: {page_bg}; color: {text}; font-family: {font}; font-size: 10.5pt; line-height: 1.45; }}
.resume-header {{ padding: {pad}mm {pad}mm {half}mm; text-align: {align}; background: {header_bg}; color: {header_text}; }}
.resume-name {{ margin: 0; font-size: 24pt; font-weight: {name_weight}; }}
.resume-name.placeholder {{ opacity: 0.7; }}
.banner-text {{ margin: 2mm 0 0; white-space: pre-line; }}
.resume-main {{ flex: 1; padding: {half}mm {pad}mm {pad}mm; }}
.resume-section {{ margin-bottom: 6mm; }}
.section-heading {{ margin: 0 0 2mm; font-size: 12pt; font-weight: 600; color: {heading}; text-transform: {transform}; letter-spacing: 0.03em; }}
.section-text {{ margin: 0; white-space: pre-line; }}
.entry {{ margin-bottom: 3mm; break-inside: avoid; }}
.entry-head {{ display: flex; justify-content: space-between; align-items: baseline; gap: 4mm; }}
.entry-title {{ margin: 0; font-size: 11pt; font-weight: 600; }}
.entry-subtitle {{ margin: 0; color: {muted}; }}
.entry-meta {{ color: {muted}; font-size: 9pt; white-space: nowrap; }}
.entry-body {{ margin: 1mm 0 0; white-space: pre-line; }}
.entry-link {{ margin: 1mm 0 0; font-size: 9pt; color: {accent}; word-break: break-all; }}
.entry-link a {{ color: inherit; }}
.contact-list {{ list-style: none; margin: 2mm 0 0; padding: 0; font-size: 9.5pt; }}
.skills {{ margin: 0; }}
",
        width = page.width_mm,
        height = page.height_mm,
        page_bg = p.page_bg,
        text = p.text,
        font = theme.font_family,
        header_bg = p.header_bg,
        header_text = p.header_text,
        half = pad / 2,
        name_weight = theme.name_weight,
        heading = p.heading,
        muted = p.muted,
        accent = p.accent,
    );

    if let LayoutKind::Sidebar { width_pct } = theme.layout {
        css.push_str(&format!(
            ".resume-columns {{ flex: 1; display: flex; }}
.resume-sidebar {{ width: {width_pct}%; padding: {pad}mm {half}mm; background: {bg}; color: {fg}; }}
.resume-sidebar .section-heading {{ color: {fg}; }}
.resume-sidebar .resume-header {{ padding: 0 0 6mm; background: transparent; }}
.resume-sidebar .contact-block {{ margin-bottom: 6mm; }}
.name-rule {{ height: 1mm; width: 16mm; margin-top: 2mm; background: {fg}; }}
.resume-columns .resume-main {{ padding: {pad}mm; }}
",
            bg = p.sidebar_bg,
            fg = p.sidebar_text,
            half = pad / 2,
        ));
    }

    css.push_str(&match theme.contact_style {
        ContactStyle::Inline { separator } => format!(
            ".contact-inline {{ display: flex; flex-wrap: wrap; justify-content: {justify}; gap: 0 2mm; }}
.contact-inline .contact + .contact::before {{ content: \"{separator}\"; margin-right: 2mm; }}
",
            justify = if theme.header_align == Align::Center { "center" } else { "flex-start" },
        ),
        ContactStyle::Pills => format!(
            ".contact-pills {{ display: flex; flex-wrap: wrap; gap: 2mm; }}
.contact-pills .contact {{ padding: 1mm 3mm; border-radius: 999px; background: rgba(255, 255, 255, 0.2); color: {fg}; }}
",
            fg = p.header_text,
        ),
        ContactStyle::List => ".contact-stack .contact { margin-bottom: 1.5mm; word-break: break-all; }\n".to_string(),
    });

    css.push_str(&match theme.heading_rule {
        HeadingRule::Underline => format!(
            ".resume-main .section-heading {{ border-bottom: 1px solid {accent}; padding-bottom: 1mm; }}\n",
            accent = p.accent
        ),
        HeadingRule::Bar => format!(
            ".resume-main .section-heading::after {{ content: \"\"; display: block; height: 0.6mm; margin-top: 1mm; background: {accent}; }}\n",
            accent = p.accent
        ),
        HeadingRule::Divider => format!(
            ".resume-main .resume-section {{ border-top: 1px solid {accent}; padding-top: 4mm; }}
.resume-main .section-heading {{ text-align: center; font-weight: 300; letter-spacing: 0.2em; }}
.section-summary .section-text {{ text-align: center; font-weight: 300; }}
.resume-header {{ font-weight: 300; }}
",
            accent = p.accent
        ),
        HeadingRule::Prompt => format!(
            ".section-heading, .prompt {{ margin: 0 0 2mm; font-size: 10.5pt; color: {heading}; }}
.section-heading {{ font-weight: 700; }}
.resume-section {{ padding-left: 3mm; border-left: 1px solid {muted}; }}
",
            heading = p.heading,
            muted = p.muted
        ),
        HeadingRule::Tile => format!(
            ".section-heading::before {{ content: \"\"; display: inline-block; width: 5mm; height: 5mm; margin-right: 2mm; vertical-align: middle; border-radius: 1.5mm; background: {header_bg}; }}\n",
            header_bg = p.header_bg
        ),
    });

    css.push_str(&match theme.skills_style {
        SkillsStyle::Joined { .. } => ".skills-joined .skill-sep { color: inherit; }\n".to_string(),
        SkillsStyle::Pills => format!(
            ".skills-pills {{ display: flex; flex-wrap: wrap; gap: 1.5mm; }}
.skills-pills .skill {{ padding: 0.8mm 2.5mm; border-radius: 1mm; background: {surface}; font-size: 9pt; }}
.resume-main .skills-pills .skill {{ background: {accent}; color: #ffffff; border-radius: 999px; }}
",
            surface = p.surface,
            accent = p.accent
        ),
        SkillsStyle::Bullets => ".skills-bullets { margin: 0; padding-left: 4mm; }\n".to_string(),
        SkillsStyle::JsonArray => format!(
            ".skills-json {{ margin: 0; font-family: inherit; white-space: pre-wrap; color: {accent}; }}\n",
            accent = p.accent
        ),
    });

    css.push_str(&match theme.entry_style {
        EntryStyle::Plain => String::new(),
        EntryStyle::Card => format!(
            ".entry-card {{ padding: 3mm; border-radius: 2mm; background: {surface}; border-left: 1mm solid {accent}; }}\n",
            surface = p.surface,
            accent = p.accent
        ),
        EntryStyle::Terminal => format!(
            ".terminal-bar {{ display: flex; align-items: center; gap: 1.5mm; padding: 2mm 3mm; background: {header_bg}; }}
.dot {{ width: 3mm; height: 3mm; border-radius: 50%; }}
.dot-red {{ background: #ef4444; }}
.dot-yellow {{ background: #eab308; }}
.dot-green {{ background: #22c55e; }}
.terminal-title {{ margin-left: 2mm; color: {muted}; font-size: 9pt; }}
.prompt-exit {{ padding: 0 {pad}mm {pad}mm; }}
.banner-text::before {{ content: \"# \"; }}
.contact::before {{ content: attr(data-contact) \": \"; color: {muted}; }}
.entry-file {{ margin: 0; color: {muted}; font-size: 9pt; }}
.section-experience .entry-title::before {{ content: \"## \"; }}
.section-projects .entry-title::before {{ content: \"commit: \"; }}
.section-education .entry-meta::before {{ content: \"(\"; }}
.section-education .entry-meta::after {{ content: \")\"; }}
.entry-link::before {{ content: \"link: \"; }}
.entry-subtitle {{ font-weight: 700; color: {accent}; }}
",
            header_bg = p.header_bg,
            muted = p.muted,
            accent = p.accent
        ),
    });

    if theme.header_band {
        css.push_str(".resume-header { margin-bottom: 4mm; }\n");
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::render::render;
    use crate::types::{Project, ResumeData, TemplateType};

    #[test]
    fn test_page_is_a4_with_print_rules() {
        let html = to_html(&render(&ResumeData::default(), TemplateType::Classic));
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("width: 210mm; min-height: 297mm"));
        assert!(html.contains("@page { size: A4; margin: 0; }"));
        assert!(html.contains("print-color-adjust: exact"));
        assert!(html.contains("YOUR NAME"));
        assert!(!html.contains("data-section="));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let data = ResumeData {
            name: "<script>alert(1)</script>".to_string(),
            summary: "R&D \"lead\"".to_string(),
            ..Default::default()
        };
        for template in TemplateType::ALL {
            let html = to_html(&render(&data, template));
            assert!(!html.contains("<script>"), "{template} leaked markup");
            assert!(html.contains("&lt;script&gt;"));
            assert!(html.contains("R&amp;D &quot;lead&quot;"));
        }
    }

    #[test]
    fn test_unsafe_links_are_not_hyperlinked() {
        let data = ResumeData {
            projects: vec![
                Project {
                    id: "p1".to_string(),
                    title: "Site".to_string(),
                    description: String::new(),
                    link: "javascript:alert(1)".to_string(),
                },
                Project {
                    id: "p2".to_string(),
                    title: "Repo".to_string(),
                    description: String::new(),
                    link: "https://github.com/ada/repo".to_string(),
                },
            ],
            ..Default::default()
        };
        let html = to_html(&render(&data, TemplateType::Modern));
        assert!(!html.contains("href=\"javascript:"));
        assert!(html.contains("href=\"https://github.com/ada/repo\""));
    }

    #[test]
    fn test_terminal_chrome_only_on_tech() {
        let data = ResumeData::default();
        assert!(to_html(&render(&data, TemplateType::Tech)).contains("resume.sh"));
        assert!(!to_html(&render(&data, TemplateType::Elegant)).contains("resume.sh"));
    }

    #[test]
    fn test_contact_heading_hidden_without_contacts() {
        let contact_block = scraper::Selector::parse("div.contact-block").unwrap();
        let html = to_html(&render(&ResumeData::default(), TemplateType::Modern));
        let page = scraper::Html::parse_document(&html);
        assert!(page.select(&contact_block).next().is_none());

        let data = ResumeData {
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        let html = to_html(&render(&data, TemplateType::Modern));
        let page = scraper::Html::parse_document(&html);
        assert_eq!(page.select(&contact_block).count(), 1);
        assert!(html.contains("data-contact=\"email\""));
    }
}
