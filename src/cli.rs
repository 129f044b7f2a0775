// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::core::ConfigManager;
use crate::resume::{catalog, preview, recommend, render, to_html, to_text, Document, ExportFormat, Exporter};
use crate::types::{ResumeData, TemplateType};
use crate::utils::{get_file_extension, write_file_safe};

#[derive(Parser)]
#[command(name = "resume-cli")]
#[command(about = "Render, export and pick templates for resumes offline")]
pub struct ResumeCli {
    #[command(subcommand)]
    pub command: ResumeCommand,

    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum ResumeCommand {
    /// Render a resume JSON file as html, text or the layout tree (json)
    Render {
        input: PathBuf,
        #[arg(short, long, default_value = "modern")]
        template: String,
        /// Defaults to the output file's extension, then html
        #[arg(short, long)]
        format: Option<String>,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a resume JSON file into the output directory (pdf, html or text)
    Export {
        input: PathBuf,
        #[arg(short, long, default_value = "modern")]
        template: String,
        #[arg(short, long, default_value = "pdf")]
        format: String,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Recommend three templates for a purpose, tone and field
    Suggest {
        purpose: String,
        tone: String,
        field: String,
    },
    /// List the available templates
    Templates,
    /// Render a template with demo data
    Preview {
        template: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse a lowercase choice through its serde name, e.g. `ats` or `it`.
fn parse_choice<T: DeserializeOwned>(kind: &str, value: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .with_context(|| format!("Unknown {}: {}", kind, value))
}

async fn read_resume(path: &Path) -> Result<ResumeData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read resume file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid resume JSON in {}", path.display()))
}

async fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            write_file_safe(path, content).await?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn materialize(doc: &Document, format: &str) -> Result<String> {
    match format {
        "html" => Ok(to_html(doc)),
        "text" | "txt" => Ok(to_text(doc)),
        "json" => serde_json::to_string_pretty(doc).context("Failed to serialize layout"),
        other => anyhow::bail!("Unsupported render format: {}. Use html, text or json", other),
    }
}

pub async fn handle_resume_command(cli: ResumeCli) -> Result<()> {
    match cli.command {
        ResumeCommand::Render {
            input,
            template,
            format,
            output,
        } => {
            let template: TemplateType = template.parse()?;
            let format = format
                .or_else(|| {
                    output
                        .as_deref()
                        .and_then(|p| p.to_str())
                        .and_then(get_file_extension)
                })
                .unwrap_or_else(|| "html".to_string());
            let data = read_resume(&input).await?;
            let doc = render(&data, template);
            emit(&materialize(&doc, &format)?, output.as_deref()).await?;
        }

        ResumeCommand::Export {
            input,
            template,
            format,
            output_dir,
        } => {
            let template: TemplateType = template.parse()?;
            let format: ExportFormat = format.parse()?;
            let data = read_resume(&input).await?;

            let config = ConfigManager::load_from(&cli.config)?;
            let mut export_config = config.export_config();
            if let Some(dir) = output_dir {
                export_config = export_config.with_output_dir(dir);
            }
            let exporter = Exporter::new(export_config);

            let doc = render(&data, template);
            match exporter.export(&doc, format).await {
                Ok(artifact) => {
                    let path = exporter.save(&artifact).await?;
                    println!("✅ Exported {}", path.display());
                }
                Err(e) => {
                    error!("Export failed: {}", e);
                    anyhow::bail!("{} ({})", e.user_message(), e);
                }
            }
        }

        ResumeCommand::Suggest {
            purpose,
            tone,
            field,
        } => {
            let recommendations = recommend(
                parse_choice("purpose", &purpose)?,
                parse_choice("tone", &tone)?,
                parse_choice("field", &field)?,
            );
            for (rank, rec) in recommendations.iter().enumerate() {
                let marker = if rec.top_pick { " (top pick)" } else { "" };
                println!("{}. {} [{}]{}", rank + 1, rec.name, rec.template, marker);
                println!("   {}", rec.reason);
                println!("   ATS compatibility: {}% - {}", rec.ats_compatibility, rec.ats_note);
            }
        }

        ResumeCommand::Templates => {
            for info in catalog() {
                println!("{:<11} {} - {}", info.id.id(), info.name, info.description);
            }
        }

        ResumeCommand::Preview { template, output } => {
            let template: TemplateType = template.parse()?;
            emit(&to_html(&preview(template)), output.as_deref()).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::suggestion::{Field, Purpose, Tone};

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice::<Tone>("tone", "ATS").unwrap(), Tone::Ats);
        assert_eq!(parse_choice::<Field>("field", "it").unwrap(), Field::It);
        assert_eq!(parse_choice::<Purpose>("purpose", " job ").unwrap(), Purpose::Job);
        assert!(parse_choice::<Tone>("tone", "loud").is_err());
    }

    #[test]
    fn test_materialize_formats() {
        let doc = render(&ResumeData::default(), TemplateType::Classic);
        assert!(materialize(&doc, "html").unwrap().starts_with("<!DOCTYPE html>"));
        assert!(materialize(&doc, "json").unwrap().contains("\"template\""));
        assert!(materialize(&doc, "pdf").is_err());
    }

    #[test]
    fn test_cli_parses_render() {
        let cli = ResumeCli::try_parse_from(["resume-cli", "render", "me.json", "-t", "tech"]).unwrap();
        match cli.command {
            ResumeCommand::Render { template, format, .. } => {
                assert_eq!(template, "tech");
                assert_eq!(format, None);
            }
            _ => panic!("expected render"),
        }
    }
}
