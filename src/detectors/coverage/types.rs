use serde::{Deserialize, Serialize};

/// Parsed JaCoCo report tree. Rebuilt on every parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub packages: Vec<Package>,
}

impl Report {
    /// Total number of source files across all packages
    pub fn sourcefile_count(&self) -> usize {
        self.packages.iter().map(|p| p.sourcefiles.len()).sum()
    }
}

/// A `<package>` element; its name is the path prefix of its source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub sourcefiles: Vec<SourceFile>,
}

/// A `<sourcefile>` element within a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub lines: Vec<Line>,
}

impl SourceFile {
    /// Canonical identity exposed to collaborators: `package/sourcefile`
    pub fn canonical_name(&self, package: &Package) -> String {
        format!("{}/{}", package.name, self.name)
    }
}

/// A `<line>` element with its raw counters.
///
/// Counters are kept exactly as read; absent, unparseable and negative values
/// all read back as zero through the accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// Parsed `nr` attribute; `None` when absent or not an integer
    pub number: Option<i64>,
    /// Raw `nr` text, kept for diagnostics
    pub raw_number: Option<String>,
    pub mi: Option<i64>,
    pub ci: Option<i64>,
    pub mb: Option<i64>,
    pub cb: Option<i64>,
}

impl Line {
    pub fn missed_instructions(&self) -> u64 {
        counter(self.mi)
    }

    pub fn covered_instructions(&self) -> u64 {
        counter(self.ci)
    }

    /// Zero-based editor index, or `None` if the line number is unusable
    pub fn index(&self) -> Option<usize> {
        self.number
            .filter(|nr| *nr >= 1)
            .and_then(|nr| usize::try_from(nr - 1).ok())
    }
}

fn counter(value: Option<i64>) -> u64 {
    value.map_or(0, |v| u64::try_from(v).unwrap_or(0))
}

/// Coverage bucket a single line is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageState {
    FullyCovered,
    PartlyCovered,
    NotCovered,
}

impl CoverageState {
    /// Classify a line by its instruction counters.
    ///
    /// Priority order: no missed instructions wins regardless of branches,
    /// then no covered instructions, then the partial residue.
    pub fn of(line: &Line) -> Self {
        if line.missed_instructions() == 0 {
            Self::FullyCovered
        } else if line.covered_instructions() == 0 {
            Self::NotCovered
        } else {
            Self::PartlyCovered
        }
    }
}

/// Classified lines of one source file, as zero-based indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCoverage {
    pub file_name: String,
    pub fully_covered: Vec<usize>,
    pub partly_covered: Vec<usize>,
    pub not_covered: Vec<usize>,
}

impl FileCoverage {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, state: CoverageState, index: usize) {
        match state {
            CoverageState::FullyCovered => self.fully_covered.push(index),
            CoverageState::PartlyCovered => self.partly_covered.push(index),
            CoverageState::NotCovered => self.not_covered.push(index),
        }
    }

    /// Bucket holding the given zero-based index, if any
    pub fn state_of(&self, index: usize) -> Option<CoverageState> {
        if self.fully_covered.contains(&index) {
            Some(CoverageState::FullyCovered)
        } else if self.partly_covered.contains(&index) {
            Some(CoverageState::PartlyCovered)
        } else if self.not_covered.contains(&index) {
            Some(CoverageState::NotCovered)
        } else {
            None
        }
    }

    /// Total number of classified lines
    pub fn line_count(&self) -> usize {
        self.fully_covered.len() + self.partly_covered.len() + self.not_covered.len()
    }

    /// Whether this record belongs to a document at `path`.
    ///
    /// A record matches when its canonical identity is a suffix of the
    /// document path. Windows separators are normalised first.
    pub fn matches_document(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        normalized.ends_with(&self.file_name)
    }

    pub fn summary(&self) -> FileSummary {
        let total = self.line_count();
        let exercised = self.fully_covered.len() + self.partly_covered.len();
        let line_coverage = if total == 0 {
            0.0
        } else {
            exercised as f64 / total as f64
        };

        FileSummary {
            file_name: self.file_name.clone(),
            fully_covered: self.fully_covered.len(),
            partly_covered: self.partly_covered.len(),
            not_covered: self.not_covered.len(),
            line_coverage,
        }
    }
}

/// Bucket counts for one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSummary {
    pub file_name: String,
    pub fully_covered: usize,
    pub partly_covered: usize,
    pub not_covered: usize,
    /// Share of lines with at least one executed instruction, in `0.0..=1.0`
    pub line_coverage: f64,
}

/// A line the classifier could not place in any bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLine {
    pub file_name: String,
    pub raw_number: Option<String>,
}

/// Full classifier output: per-file records plus skipped-line diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub files: Vec<FileCoverage>,
    pub skipped: Vec<SkippedLine>,
}
