// src/resume/export.rs
//! Turn an already-rendered `Document` into a downloadable file

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tokio::process::Command;
use tracing::{error, info, warn};

use super::html::to_html;
use super::layout::Document;
use super::text::to_text;
use crate::config::ExportConfig;
use crate::utils::{ensure_dir_exists, read_bytes_safe, remove_file_if_exists, sanitize_filename, write_file_safe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Pdf,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Text => "text",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            "text" | "txt" => Ok(ExportFormat::Text),
            other => anyhow::bail!("Unsupported export format: {}", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Export failures are transient: the caller keeps its document and may retry.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to prepare export workspace: {0}")]
    Workspace(String),
    #[error("Failed to launch PDF converter `{program}`: {message}")]
    ConverterUnavailable { program: String, message: String },
    #[error("PDF conversion failed ({status}): {stderr}")]
    ConversionFailed { status: String, stderr: String },
    #[error("PDF converter produced no output")]
    EmptyOutput,
}

impl ExportError {
    pub fn user_message(&self) -> &'static str {
        "Failed to generate PDF. Please try again."
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::Workspace(_) => "EXPORT_WORKSPACE_ERROR",
            ExportError::ConverterUnavailable { .. } => "PDF_CONVERTER_UNAVAILABLE",
            ExportError::ConversionFailed { .. } => "PDF_CONVERSION_FAILED",
            ExportError::EmptyOutput => "PDF_EMPTY_OUTPUT",
        }
    }
}

/// `<name or "resume">_<template>.<ext>`
pub fn export_file_name(doc: &Document, format: ExportFormat) -> String {
    let base = if doc.header.is_placeholder {
        String::new()
    } else {
        sanitize_filename(&doc.header.name)
    };
    let base = if base.is_empty() { "resume".to_string() } else { base };
    format!("{}_{}.{}", base, doc.template.id(), format.extension())
}

pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub async fn export(&self, doc: &Document, format: ExportFormat) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Html => to_html(doc).into_bytes(),
            ExportFormat::Text => to_text(doc).into_bytes(),
            ExportFormat::Pdf => self.convert_to_pdf(&to_html(doc)).await?,
        };

        let artifact = ExportArtifact {
            file_name: export_file_name(doc, format),
            content_type: format.content_type(),
            bytes,
        };
        info!(
            "Exported {} ({} bytes, {} template)",
            artifact.file_name,
            artifact.bytes.len(),
            doc.template
        );
        Ok(artifact)
    }

    /// Write an artifact into the configured output directory.
    pub async fn save(&self, artifact: &ExportArtifact) -> anyhow::Result<PathBuf> {
        let output_dir = self.config.output_dir_absolute();
        ensure_dir_exists(&output_dir).await?;
        let path = output_dir.join(&artifact.file_name);
        tokio::fs::write(&path, &artifact.bytes)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(path)
    }

    async fn convert_to_pdf(&self, html: &str) -> Result<Vec<u8>, ExportError> {
        let workspace = self.config.workspace_dir_absolute();
        let job = uuid::Uuid::new_v4();
        let input = workspace.join(format!("{}.html", job));
        let output = workspace.join(format!("{}.pdf", job));

        write_file_safe(&input, html)
            .await
            .map_err(|e| ExportError::Workspace(format!("{:#}", e)))?;

        let result = self.run_converter(&input, &output).await;

        // Scratch files go whether or not the conversion worked.
        for path in [input.as_path(), output.as_path()] {
            if let Err(e) = remove_file_if_exists(path).await {
                warn!("Failed to clean export workspace: {:#}", e);
            }
        }

        result
    }

    async fn run_converter(&self, input: &Path, output: &Path) -> Result<Vec<u8>, ExportError> {
        let converter = &self.config.converter;
        let args = converter.resolved_args(&input.to_string_lossy(), &output.to_string_lossy());

        let result = Command::new(&converter.program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExportError::ConverterUnavailable {
                program: converter.program.clone(),
                message: e.to_string(),
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            error!("PDF conversion failed: {}", stderr);
            return Err(ExportError::ConversionFailed {
                status: result.status.to_string(),
                stderr,
            });
        }

        let bytes = read_bytes_safe(output)
            .await
            .map_err(|_| ExportError::EmptyOutput)?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyOutput);
        }
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PdfConverterConfig;
    use crate::resume::render::render;
    use crate::types::{ResumeData, TemplateType};

    fn exporter_in(dir: &std::path::Path, converter: PdfConverterConfig) -> Exporter {
        Exporter::new(
            ExportConfig::new()
                .with_output_dir(dir.join("out"))
                .with_workspace_dir(dir.join("work"))
                .with_converter(converter),
        )
    }

    #[test]
    fn test_file_name() {
        let named = ResumeData {
            name: "Ada Lovelace".to_string(),
            ..Default::default()
        };
        let doc = render(&named, TemplateType::Classic);
        assert_eq!(export_file_name(&doc, ExportFormat::Pdf), "Ada_Lovelace_classic.pdf");

        let doc = render(&ResumeData::default(), TemplateType::Tech);
        assert_eq!(export_file_name(&doc, ExportFormat::Text), "resume_tech.txt");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[tokio::test]
    async fn test_html_export_matches_materializer() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter_in(dir.path(), PdfConverterConfig::default());
        let doc = render(&ResumeData::default(), TemplateType::Modern);

        let artifact = exporter.export(&doc, ExportFormat::Html).await.unwrap();
        assert_eq!(artifact.bytes, to_html(&doc).into_bytes());
        assert_eq!(artifact.content_type, "text/html; charset=utf-8");

        let path = exporter.save(&artifact).await.unwrap();
        assert!(path.ends_with("out/resume_modern.html"));
    }

    #[tokio::test]
    async fn test_missing_converter_is_reported_and_workspace_cleaned() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter_in(
            dir.path(),
            PdfConverterConfig {
                program: "definitely-not-a-pdf-converter".to_string(),
                args: vec!["{input}".to_string(), "{output}".to_string()],
            },
        );
        let doc = render(&ResumeData::default(), TemplateType::Classic);

        let err = exporter.export(&doc, ExportFormat::Pdf).await.unwrap_err();
        assert!(matches!(err, ExportError::ConverterUnavailable { .. }));
        assert_eq!(err.user_message(), "Failed to generate PDF. Please try again.");

        let leftovers = std::fs::read_dir(dir.path().join("work")).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_converter_output_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        // `cp` stands in for a converter: the "PDF" is the HTML itself.
        let exporter = exporter_in(
            dir.path(),
            PdfConverterConfig {
                program: "cp".to_string(),
                args: vec!["{input}".to_string(), "{output}".to_string()],
            },
        );
        let doc = render(&ResumeData::default(), TemplateType::Elegant);

        let artifact = exporter.export(&doc, ExportFormat::Pdf).await.unwrap();
        assert_eq!(artifact.file_name, "resume_elegant.pdf");
        assert_eq!(artifact.content_type, "application/pdf");
        assert_eq!(artifact.bytes, to_html(&doc).into_bytes());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_converter_surfaces_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = exporter_in(
            dir.path(),
            PdfConverterConfig {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()],
            },
        );
        let doc = render(&ResumeData::default(), TemplateType::Minimalist);

        match exporter.export(&doc, ExportFormat::Pdf).await {
            Err(ExportError::ConversionFailed { stderr, .. }) => assert_eq!(stderr, "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
