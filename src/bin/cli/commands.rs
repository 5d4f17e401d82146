//! Command execution.

use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing::{info, warn};

use jacoco_gutter::core::config::GutterConfig;
use jacoco_gutter::{CoverageSnapshot, FileCoverage};

use super::args::{ClassifyArgs, ValidateConfigArgs};
use super::output::render;

/// Load configuration from a file, or fall back to defaults
pub fn load_configuration(path: Option<&Path>) -> anyhow::Result<GutterConfig> {
    let config = match path {
        Some(path) => GutterConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => GutterConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// Parse the report, classify it and print the result
pub fn classify_command(args: &ClassifyArgs) -> anyhow::Result<()> {
    let mut config = load_configuration(args.config.as_deref())?;
    if let Some(report) = &args.report {
        config.report.path = report.clone();
    }
    if let Some(root) = &args.workspace_root {
        config.report.workspace_root = Some(root.clone());
    }
    if args.strict {
        config.report.strict_line_numbers = true;
    }
    if let Some(format) = args.format {
        config.output.format = format.into();
    }

    let report_path = config.report.resolved_path();
    let mut snapshot = CoverageSnapshot::from_config(&config.report);

    if report_path.is_file() {
        info!("Classifying coverage report {}", report_path.display());
        snapshot
            .refresh_from_path(Some(report_path.as_path()))
            .with_context(|| format!("Failed to classify {}", report_path.display()))?;
    } else {
        warn!(
            "No coverage report at {}, nothing to show",
            report_path.display()
        );
        snapshot.refresh_from_path(None)?;
    }

    let files: Vec<FileCoverage> = if args.documents.is_empty() {
        snapshot.into_files()
    } else {
        snapshot
            .files()
            .iter()
            .filter(|coverage| {
                args.documents
                    .iter()
                    .any(|document| coverage.matches_document(document))
            })
            .cloned()
            .collect()
    };

    println!("{}", render(&files, config.output.format)?);
    Ok(())
}

/// Print default configuration
pub fn print_default_config() -> anyhow::Result<()> {
    println!("# Default jacoco-gutter configuration");
    println!("# Usage: jacoco-gutter classify --config your-config.yml");
    let yaml_output = serde_yaml::to_string(&GutterConfig::default())?;
    println!("{yaml_output}");
    Ok(())
}

/// Validate a configuration file
pub fn validate_config(args: &ValidateConfigArgs) -> anyhow::Result<()> {
    let config = load_configuration(Some(args.config.as_path()))?;
    println!(
        "{} {}",
        "Configuration file is valid:".bright_green().bold(),
        args.config.display()
    );
    println!(
        "  report: {}",
        config.report.resolved_path().display().to_string().cyan()
    );
    println!(
        "  strict line numbers: {}",
        config.report.strict_line_numbers
    );
    Ok(())
}
