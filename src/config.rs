// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const INPUT_PLACEHOLDER: &str = "{input}";
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// External HTML to PDF converter. `{input}` and `{output}` in `args` are
/// replaced by the scratch HTML path and the target PDF path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConverterConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for PdfConverterConfig {
    fn default() -> Self {
        Self::wkhtmltopdf("wkhtmltopdf")
    }
}

impl PdfConverterConfig {
    /// A4, zero margins, print stylesheet.
    pub fn wkhtmltopdf(program: &str) -> Self {
        let args = [
            "--quiet",
            "--page-size",
            "A4",
            "--orientation",
            "Portrait",
            "--margin-top",
            "0",
            "--margin-right",
            "0",
            "--margin-bottom",
            "0",
            "--margin-left",
            "0",
            "--print-media-type",
            "--enable-local-file-access",
            INPUT_PLACEHOLDER,
            OUTPUT_PLACEHOLDER,
        ];
        Self {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn resolved_args(&self, input: &str, output: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, input)
                    .replace(OUTPUT_PLACEHOLDER, output)
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub workspace_dir: PathBuf,
    pub converter: PdfConverterConfig,
    pub root_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        // Capture the current directory at creation time
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self {
            output_dir: PathBuf::from("output"),
            workspace_dir: PathBuf::from("tmp_workspace"),
            converter: PdfConverterConfig::default(),
            root_dir: current_dir,
        }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn with_workspace_dir(mut self, dir: PathBuf) -> Self {
        self.workspace_dir = dir;
        self
    }

    pub fn with_converter(mut self, converter: PdfConverterConfig) -> Self {
        self.converter = converter;
        self
    }

    fn absolute_path(&self, relative_path: &PathBuf) -> PathBuf {
        if relative_path.is_absolute() {
            relative_path.clone()
        } else {
            self.root_dir.join(relative_path)
        }
    }

    pub fn output_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.output_dir)
    }

    pub fn workspace_dir_absolute(&self) -> PathBuf {
        self.absolute_path(&self.workspace_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_placeholders_are_resolved() {
        let converter = PdfConverterConfig::default();
        let args = converter.resolved_args("/tmp/in.html", "/tmp/out.pdf");
        assert_eq!(args[args.len() - 2], "/tmp/in.html");
        assert_eq!(args[args.len() - 1], "/tmp/out.pdf");
        assert!(args.iter().any(|a| a == "A4"));
    }

    #[test]
    fn test_relative_dirs_resolve_against_root() {
        let config = ExportConfig::new()
            .with_output_dir(PathBuf::from("out"))
            .with_workspace_dir(PathBuf::from("/scratch"));
        assert_eq!(config.output_dir_absolute(), config.root_dir.join("out"));
        assert_eq!(config.workspace_dir_absolute(), PathBuf::from("/scratch"));
    }
}
