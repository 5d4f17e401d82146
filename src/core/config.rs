//! Configuration for locating, parsing and presenting coverage reports.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::errors::{CoverageError, Result};
use crate::detectors::coverage::ParseOptions;

/// Default report location produced by the Gradle JaCoCo plugin
pub const DEFAULT_REPORT_PATH: &str = "build/reports/jacoco/test/jacocoTestReport.xml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GutterConfig {
    /// Where the report lives and how it is parsed
    #[serde(default)]
    pub report: ReportConfig,

    /// How classification results are printed
    #[serde(default)]
    pub output: OutputConfig,
}

impl GutterConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            CoverageError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        serde_yaml::from_str(&content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            CoverageError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.report.validate()
    }
}

/// Report location and parsing behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report path, relative to `workspace_root` unless absolute
    #[serde(default = "default_report_path")]
    pub path: PathBuf,

    /// Directory relative report paths are resolved against
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,

    /// Treat a `<line>` without a positive `nr` as a malformed report
    #[serde(default)]
    pub strict_line_numbers: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
            workspace_root: None,
            strict_line_numbers: false,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(CoverageError::config_field(
                "Report path must not be empty",
                "report.path",
            ));
        }
        if let Some(root) = &self.workspace_root {
            if root.as_os_str().is_empty() {
                return Err(CoverageError::config_field(
                    "Workspace root must not be empty when set",
                    "report.workspace_root",
                ));
            }
        }
        Ok(())
    }

    /// Resolve the report path against the workspace root
    pub fn resolved_path(&self) -> PathBuf {
        resolve_against(self.workspace_root.as_deref(), &self.path)
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_line_numbers: self.strict_line_numbers,
        }
    }
}

/// Output settings for the command-line collaborator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Summary,
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn resolve_against(root: Option<&Path>, path: &Path) -> PathBuf {
    match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    }
}
