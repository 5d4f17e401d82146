//! CLI argument structures.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use jacoco_gutter::core::config::OutputFormat;

/// Classify JaCoCo line coverage for editor gutters
#[derive(Parser)]
#[command(name = "jacoco-gutter")]
#[command(version = jacoco_gutter::VERSION)]
#[command(about = "Classify JaCoCo line coverage into fully, partly and not covered lines")]
#[command(long_about = "
Read a JaCoCo XML report and classify every reported line as fully covered,
partly covered or not covered. Line indices in the output are zero-based.

Common Usage:

  # Classify the default Gradle report location
  jacoco-gutter classify

  # Classify a specific report and only show files open in the editor
  jacoco-gutter classify build/jacoco.xml --document src/main/java/com/app/Main.java

  # Print a per-file summary table
  jacoco-gutter classify --format summary
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a report and print classified lines
    Classify(ClassifyArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Validate a configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// Report path (defaults to the configured report path)
    pub report: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory relative report paths are resolved against
    #[arg(long)]
    pub workspace_root: Option<PathBuf>,

    /// Only print records matching these open documents (repeatable)
    #[arg(short, long = "document")]
    pub documents: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Reject lines without a positive line number instead of skipping them
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    #[arg(short, long)]
    pub config: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Json,
    Yaml,
    Summary,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
            FormatArg::Summary => OutputFormat::Summary,
        }
    }
}
