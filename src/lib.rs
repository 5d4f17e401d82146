//! # jacoco-gutter: JaCoCo line-coverage classification
//!
//! Parses a JaCoCo XML coverage report and sorts every reported source line
//! into one of three buckets, ready for gutter decorations in an editor:
//!
//! - **Fully covered**: no missed instructions on the line
//! - **Partly covered**: some instructions executed, some missed
//! - **Not covered**: no instruction on the line executed
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ report bytes │ -> │ Report tree  │ -> │ FileCoverage ... │
//! └──────────────┘    └──────────────┘    └──────────────────┘
//!        parsers::parse_jacoco_xml   classify::classify_report
//! ```
//!
//! Both steps are pure. Reading the report, deciding when to refresh and
//! painting the results are left to the caller, which holds the latest
//! result in a [`CoverageSnapshot`].
//!
//! ## Quick Start
//!
//! ```rust
//! use jacoco_gutter::parse_and_classify;
//!
//! let xml = br#"<report><package name="com/app"><sourcefile name="Main.java">
//!     <line nr="5" mi="0" ci="3"/>
//! </sourcefile></package></report>"#;
//!
//! let files = parse_and_classify(xml)?;
//! assert_eq!(files[0].file_name, "com/app/Main.java");
//! assert_eq!(files[0].fully_covered, vec![4]);
//! # Ok::<(), jacoco_gutter::CoverageError>(())
//! ```

#![warn(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// Configuration and error handling
pub mod core {
    //! Configuration and error types.

    pub mod config;
    pub mod errors;
}

// Report parsing and classification
pub mod detectors {
    //! Coverage report detectors.

    pub mod coverage;
}

// Public API
pub mod api {
    //! Entry points and the caller-held snapshot.

    pub mod engine;
}

pub use crate::api::engine::{parse_and_classify, parse_and_classify_with, CoverageSnapshot};
pub use crate::core::config::GutterConfig;
pub use crate::core::errors::{CoverageError, Result};
pub use crate::detectors::coverage::{
    Classification, CoverageState, FileCoverage, FileSummary, ParseOptions, SkippedLine,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
