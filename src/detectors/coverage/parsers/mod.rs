use crate::core::errors::{CoverageError, Result};
use crate::detectors::coverage::types::{Line, Package, Report, SourceFile};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

/// Options controlling how strictly a report is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject a `<line>` whose `nr` is missing or not a positive integer
    /// instead of leaving it for the classifier to skip.
    pub strict_line_numbers: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            strict_line_numbers: true,
        }
    }
}

/// Element currently open in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Report,
    Group,
    Package,
    SourceFile,
    Other,
}

/// Parse a JaCoCo XML report into a [`Report`] tree using lenient line numbers.
pub fn parse_jacoco_xml(bytes: &[u8]) -> Result<Report> {
    parse_jacoco_xml_with(bytes, &ParseOptions::default())
}

/// Parse a JaCoCo XML report into a [`Report`] tree.
///
/// Empty or whitespace-only input yields an empty report. Document order is
/// preserved for packages, source files and lines; packages nested in
/// `<group>` elements are flattened in the order they appear.
pub fn parse_jacoco_xml_with(bytes: &[u8], options: &ParseOptions) -> Result<Report> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty coverage report, nothing to parse");
        return Ok(Report::default());
    }

    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut builder = ReportBuilder::new(*options);

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => builder.open(&tag, false, position)?,
            Ok(Event::Empty(tag)) => builder.open(&tag, true, position)?,
            Ok(Event::End(_)) => builder.close(position)?,
            Ok(Event::Text(text)) => {
                if builder.stack.is_empty() && !text.is_empty() {
                    return Err(CoverageError::malformed_at(
                        "Text content outside of the <report> element",
                        position,
                    ));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(CoverageError::malformed_at(
                    format!("Failed to parse JaCoCo XML: {err}"),
                    reader.buffer_position(),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    let report = builder.finish(reader.buffer_position())?;
    debug!(
        packages = report.packages.len(),
        sourcefiles = report.sourcefile_count(),
        "Parsed JaCoCo report"
    );
    Ok(report)
}

struct ReportBuilder {
    options: ParseOptions,
    stack: Vec<Scope>,
    root_closed: bool,
    packages: Vec<Package>,
    current_package: Option<Package>,
    current_file: Option<SourceFile>,
}

impl ReportBuilder {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            root_closed: false,
            packages: Vec::new(),
            current_package: None,
            current_file: None,
        }
    }

    fn open(&mut self, tag: &BytesStart<'_>, is_empty: bool, position: usize) -> Result<()> {
        let name = tag.name();
        let parent = self.stack.last().copied();

        let scope = match (parent, name.as_ref()) {
            (None, _) if self.root_closed => {
                return Err(CoverageError::malformed_at(
                    "Multiple root elements in coverage report",
                    position,
                ));
            }
            (None, b"report") => Scope::Report,
            (None, other) => {
                return Err(CoverageError::malformed_at(
                    format!(
                        "Expected <report> root element, found <{}>",
                        String::from_utf8_lossy(other)
                    ),
                    position,
                ));
            }
            (Some(Scope::Report | Scope::Group), b"group") => Scope::Group,
            (Some(Scope::Report | Scope::Group), b"package") => {
                self.current_package = Some(Package {
                    name: attribute_value(tag, b"name", position)?.unwrap_or_default(),
                    sourcefiles: Vec::new(),
                });
                Scope::Package
            }
            (Some(Scope::Package), b"sourcefile") => {
                self.open_sourcefile(tag, position)?;
                Scope::SourceFile
            }
            (Some(Scope::SourceFile), b"line") => {
                self.push_line(tag, position)?;
                Scope::Other
            }
            (_, b"package" | b"sourcefile" | b"line") => {
                return Err(CoverageError::malformed_at(
                    format!(
                        "Unexpected <{}> element at this nesting level",
                        String::from_utf8_lossy(name.as_ref())
                    ),
                    position,
                ));
            }
            _ => Scope::Other,
        };

        if is_empty {
            self.finish_scope(scope, position)
        } else {
            self.stack.push(scope);
            Ok(())
        }
    }

    fn close(&mut self, position: usize) -> Result<()> {
        let scope = self.stack.pop().ok_or_else(|| {
            CoverageError::malformed_at("Closing tag without a matching opening tag", position)
        })?;
        self.finish_scope(scope, position)
    }

    fn finish_scope(&mut self, scope: Scope, position: usize) -> Result<()> {
        match scope {
            Scope::Report => self.root_closed = true,
            Scope::Package => {
                if let Some(package) = self.current_package.take() {
                    self.packages.push(package);
                }
            }
            Scope::SourceFile => {
                let file = self.current_file.take();
                match (self.current_package.as_mut(), file) {
                    (Some(package), Some(file)) => package.sourcefiles.push(file),
                    _ => {
                        return Err(CoverageError::malformed_at(
                            "Source file closed outside of a package",
                            position,
                        ));
                    }
                }
            }
            Scope::Group | Scope::Other => {}
        }
        Ok(())
    }

    fn open_sourcefile(&mut self, tag: &BytesStart<'_>, position: usize) -> Result<()> {
        let package_name = self
            .current_package
            .as_ref()
            .map(|p| p.name.as_str())
            .unwrap_or_default();
        if package_name.is_empty() {
            return Err(CoverageError::malformed_at(
                "Package containing source files has no name",
                position,
            ));
        }

        let name = attribute_value(tag, b"name", position)?.unwrap_or_default();
        if name.is_empty() {
            return Err(CoverageError::malformed_at(
                format!("Source file in package {package_name} has no name"),
                position,
            ));
        }

        self.current_file = Some(SourceFile {
            name,
            lines: Vec::new(),
        });
        Ok(())
    }

    fn push_line(&mut self, tag: &BytesStart<'_>, position: usize) -> Result<()> {
        let line = extract_jacoco_line(tag, position)?;

        if self.options.strict_line_numbers && line.index().is_none() {
            let file_name = self
                .current_package
                .as_ref()
                .zip(self.current_file.as_ref())
                .map(|(package, file)| file.canonical_name(package))
                .unwrap_or_default();
            return Err(CoverageError::malformed_at(
                CoverageError::invalid_line_number(file_name, line.raw_number).to_string(),
                position,
            ));
        }

        if let Some(file) = self.current_file.as_mut() {
            file.lines.push(line);
        }
        Ok(())
    }

    fn finish(self, position: usize) -> Result<Report> {
        if let Some(open) = self.stack.last() {
            return Err(CoverageError::malformed_at(
                format!("Unexpected end of document inside {open:?} element"),
                position,
            ));
        }
        if !self.root_closed {
            return Err(CoverageError::malformed_at(
                "Coverage report has no <report> root element",
                position,
            ));
        }

        Ok(Report {
            packages: self.packages,
        })
    }
}

/// Extract a line's number and counters from JaCoCo line tag attributes.
fn extract_jacoco_line(tag: &BytesStart<'_>, position: usize) -> Result<Line> {
    let counter = |name: &[u8]| -> Result<Option<i64>> {
        Ok(attribute_value(tag, name, position)?
            .as_deref()
            .and_then(parse_integer))
    };

    let raw_number = attribute_value(tag, b"nr", position)?;
    let number = raw_number.as_deref().and_then(parse_integer);

    Ok(Line {
        number,
        raw_number,
        mi: counter(b"mi")?,
        ci: counter(b"ci")?,
        mb: counter(b"mb")?,
        cb: counter(b"cb")?,
    })
}

fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Entity-decoded value of the named attribute, if present.
fn attribute_value(tag: &BytesStart<'_>, name: &[u8], position: usize) -> Result<Option<String>> {
    let Some(attr) = tag
        .attributes()
        .with_checks(false)
        .flatten()
        .find(|attr| attr.key.as_ref() == name)
    else {
        return Ok(None);
    };

    match attr.unescape_value() {
        Ok(value) => Ok(Some(value.into_owned())),
        Err(err) => Err(CoverageError::malformed_at(
            format!(
                "Invalid value for attribute {}: {err}",
                String::from_utf8_lossy(name)
            ),
            position,
        )),
    }
}

#[cfg(test)]
mod tests;
