//! Parse-and-classify entry points and the caller-held coverage snapshot.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::config::ReportConfig;
use crate::core::errors::{CoverageError, Result};
use crate::detectors::coverage::{
    classify_report, parse_jacoco_xml_with, Classification, FileCoverage, ParseOptions,
};

/// Parse report bytes and classify every line, lenient about line numbers.
pub fn parse_and_classify(bytes: &[u8]) -> Result<Vec<FileCoverage>> {
    parse_and_classify_with(bytes, &ParseOptions::default()).map(|c| c.files)
}

/// Parse report bytes and classify every line, keeping skipped-line diagnostics.
pub fn parse_and_classify_with(bytes: &[u8], options: &ParseOptions) -> Result<Classification> {
    let report = parse_jacoco_xml_with(bytes, options)?;
    Ok(classify_report(&report))
}

/// Read a report from disk. A missing file is an error; an empty one is not.
pub fn read_report(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|err| {
        CoverageError::io(
            format!("Failed to read coverage report at {}", path.display()),
            err,
        )
    })
}

/// The latest classification result, held explicitly by the caller.
///
/// A refresh replaces the whole set of records; there is no incremental
/// update. After a failed refresh the snapshot is empty, so consumers show
/// "no coverage data" rather than stale results.
#[derive(Debug, Clone, Default)]
pub struct CoverageSnapshot {
    options: ParseOptions,
    classification: Classification,
}

impl CoverageSnapshot {
    /// An empty snapshot using lenient parsing
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty snapshot that will parse with the given options
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            classification: Classification::default(),
        }
    }

    /// An empty snapshot configured from the report section of the config
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::with_options(config.parse_options())
    }

    /// Re-parse the report and replace the snapshot.
    ///
    /// `None` means no report is selected and clears the snapshot.
    pub fn refresh(&mut self, bytes: Option<&[u8]>) -> Result<()> {
        let Some(bytes) = bytes else {
            debug!("No coverage report selected, clearing snapshot");
            self.classification = Classification::default();
            return Ok(());
        };

        match parse_and_classify_with(bytes, &self.options) {
            Ok(classification) => {
                info!(
                    files = classification.files.len(),
                    skipped_lines = classification.skipped.len(),
                    "Coverage snapshot refreshed"
                );
                self.classification = classification;
                Ok(())
            }
            Err(err) => {
                warn!("Coverage report could not be parsed: {err}");
                self.classification = Classification::default();
                Err(err)
            }
        }
    }

    /// Read the report at `path` (if any) and refresh from its contents
    pub fn refresh_from_path(&mut self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => match read_report(path) {
                Ok(bytes) => self.refresh(Some(bytes.as_slice())),
                Err(err) => {
                    self.classification = Classification::default();
                    Err(err)
                }
            },
            None => self.refresh(None),
        }
    }

    pub fn files(&self) -> &[FileCoverage] {
        &self.classification.files
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn is_empty(&self) -> bool {
        self.classification.files.is_empty()
    }

    /// Records whose canonical identity is a suffix of the document path
    pub fn for_document<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FileCoverage> + 'a {
        self.classification
            .files
            .iter()
            .filter(move |coverage| coverage.matches_document(path))
    }

    /// Consume the snapshot, handing the records to the caller
    pub fn into_files(self) -> Vec<FileCoverage> {
        self.classification.files
    }
}
