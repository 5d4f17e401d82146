//! JaCoCo coverage report parsing and per-line classification.
//!
//! The pipeline is `bytes -> Report -> Classification`. Both steps are pure;
//! reading the report from disk and deciding when to re-run belong to the
//! caller.

pub mod classify;
pub mod parsers;
pub mod types;

pub use classify::classify_report;
pub use parsers::{parse_jacoco_xml, parse_jacoco_xml_with, ParseOptions};
pub use types::{
    Classification, CoverageState, FileCoverage, FileSummary, Line, Package, Report, SkippedLine,
    SourceFile,
};
