//! Rendering of classification results.

use tabled::{settings::Style as TableStyle, Table, Tabled};

use jacoco_gutter::core::config::OutputFormat;
use jacoco_gutter::FileCoverage;

/// Render classified files in the requested format
pub fn render(files: &[FileCoverage], format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(files)?,
        OutputFormat::Yaml => serde_yaml::to_string(files)?,
        OutputFormat::Summary => render_summary(files),
    };
    Ok(rendered)
}

fn render_summary(files: &[FileCoverage]) -> String {
    if files.is_empty() {
        return "No coverage data".to_string();
    }

    #[derive(Tabled)]
    struct SummaryRow {
        #[tabled(rename = "File")]
        file: String,
        #[tabled(rename = "Full")]
        fully: usize,
        #[tabled(rename = "Partial")]
        partly: usize,
        #[tabled(rename = "None")]
        not: usize,
        #[tabled(rename = "Line coverage")]
        coverage: String,
    }

    let rows = files.iter().map(|file| {
        let summary = file.summary();
        SummaryRow {
            file: summary.file_name,
            fully: summary.fully_covered,
            partly: summary.partly_covered,
            not: summary.not_covered,
            coverage: format!("{:.1}%", summary.line_coverage * 100.0),
        }
    });

    let mut table = Table::new(rows);
    table.with(TableStyle::rounded());
    table.to_string()
}
