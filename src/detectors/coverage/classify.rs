//! Line classification engine.
//!
//! Walks a parsed [`Report`] and sorts every line of every source file into
//! one of the three [`CoverageState`] buckets.

use tracing::{debug, warn};

use crate::detectors::coverage::types::{
    Classification, CoverageState, FileCoverage, Report, SkippedLine,
};

/// Classify every source file in the report, in document order.
///
/// Never fails: a line without a usable number is recorded in
/// [`Classification::skipped`] and left out of all buckets, while the rest of
/// its file is classified normally.
pub fn classify_report(report: &Report) -> Classification {
    let mut classification = Classification {
        files: Vec::with_capacity(report.sourcefile_count()),
        skipped: Vec::new(),
    };

    for package in &report.packages {
        for sourcefile in &package.sourcefiles {
            let mut coverage = FileCoverage::new(sourcefile.canonical_name(package));

            for line in &sourcefile.lines {
                match line.index() {
                    Some(index) => coverage.push(CoverageState::of(line), index),
                    None => {
                        warn!(
                            file = %coverage.file_name,
                            raw = ?line.raw_number,
                            "Skipping line with invalid number"
                        );
                        classification.skipped.push(SkippedLine {
                            file_name: coverage.file_name.clone(),
                            raw_number: line.raw_number.clone(),
                        });
                    }
                }
            }

            classification.files.push(coverage);
        }
    }

    debug!(
        files = classification.files.len(),
        skipped = classification.skipped.len(),
        "Classified coverage report"
    );
    classification
}
