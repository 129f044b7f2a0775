// src/lib.rs
//! Resume builder: one layout engine for six templates, HTML/text/PDF export,
//! template suggestion and the LLM-backed writing assistants

pub mod assist;
pub mod cli;
pub mod config;
pub mod core;
pub mod resume;
pub mod types;
pub mod utils;
pub mod web;

use anyhow::Result;
use std::path::PathBuf;

pub use config::{ExportConfig, PdfConverterConfig};
pub use resume::{render, to_html, to_text, Document, ExportFormat, Exporter};
pub use types::{ResumeData, TemplateType};
pub use web::start_web_server;

/// Render straight to a standalone HTML page.
pub fn render_resume(data: &ResumeData, template: TemplateType) -> String {
    to_html(&render(data, template))
}

/// Convenience function for quick exports into `output_dir`
pub async fn export_resume(
    data: &ResumeData,
    template: TemplateType,
    format: ExportFormat,
    output_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    let mut config = ExportConfig::new();
    if let Some(dir) = output_dir {
        config = config.with_output_dir(dir);
    }

    let exporter = Exporter::new(config);
    let artifact = exporter.export(&render(data, template), format).await?;
    exporter.save(&artifact).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> ResumeData {
        ResumeData {
            name: "Ada Lovelace".to_string(),
            summary: "Analyst of engines.".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_resume_is_standalone_html() {
        let html = render_resume(&ada(), TemplateType::Elegant);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("data-template=\"elegant\""));
    }

    #[tokio::test]
    async fn test_export_resume_writes_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_resume(&ada(), TemplateType::Classic, ExportFormat::Text, Some(dir.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("Ada_Lovelace_classic.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Name: Ada Lovelace\n"));
        assert!(text.contains("Analyst of engines."));
    }
}
