use super::*;

const FULL_JACOCO_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<!DOCTYPE report PUBLIC "-//JACOCO//DTD Report 1.1//EN" "report.dtd">
<report name="demo">
  <sessioninfo id="host-1234" start="1700000000000" dump="1700000001000"/>
  <package name="com/example">
    <class name="com/example/Foo" sourcefilename="Foo.java">
      <method name="bar" desc="()V" line="12">
        <counter type="INSTRUCTION" missed="0" covered="3"/>
      </method>
    </class>
    <sourcefile name="Foo.java">
      <line nr="12" mi="0" ci="3" mb="0" cb="0"/>
      <line nr="13" mi="2" ci="0" mb="1" cb="0"/>
      <counter type="LINE" missed="1" covered="1"/>
    </sourcefile>
    <counter type="LINE" missed="1" covered="1"/>
  </package>
  <counter type="LINE" missed="1" covered="1"/>
</report>
"#;

#[test]
fn test_parse_jacoco_xml_basic() {
    let xml = r#"
        <report>
          <package name="com/app">
            <sourcefile name="Main.java">
              <line nr="5" mi="0" ci="3" mb="0" cb="0" />
            </sourcefile>
          </package>
        </report>
    "#;

    let report = parse_jacoco_xml(xml.as_bytes()).unwrap();
    assert_eq!(report.packages.len(), 1);
    let package = &report.packages[0];
    assert_eq!(package.name, "com/app");
    assert_eq!(package.sourcefiles.len(), 1);

    let file = &package.sourcefiles[0];
    assert_eq!(file.canonical_name(package), "com/app/Main.java");
    assert_eq!(file.lines.len(), 1);
    let line = &file.lines[0];
    assert_eq!(line.number, Some(5));
    assert_eq!(line.mi, Some(0));
    assert_eq!(line.ci, Some(3));
}

#[test]
fn test_parse_full_report_ignores_auxiliary_elements() {
    let report = parse_jacoco_xml(FULL_JACOCO_REPORT.as_bytes()).unwrap();
    assert_eq!(report.packages.len(), 1);
    assert_eq!(report.sourcefile_count(), 1);

    let lines = &report.packages[0].sourcefiles[0].lines;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].number, Some(13));
    assert_eq!(lines[1].mb, Some(1));
}

#[test]
fn test_parse_preserves_document_order() {
    let xml = r#"
        <report>
          <package name="z/last">
            <sourcefile name="B.java"><line nr="9" mi="0" ci="1"/><line nr="2" mi="0" ci="1"/></sourcefile>
            <sourcefile name="A.java"/>
          </package>
          <package name="a/first">
            <sourcefile name="C.java"/>
          </package>
        </report>
    "#;

    let report = parse_jacoco_xml(xml.as_bytes()).unwrap();
    let names: Vec<String> = report
        .packages
        .iter()
        .flat_map(|p| p.sourcefiles.iter().map(move |s| s.canonical_name(p)))
        .collect();
    assert_eq!(names, vec!["z/last/B.java", "z/last/A.java", "a/first/C.java"]);

    let numbers: Vec<_> = report.packages[0].sourcefiles[0]
        .lines
        .iter()
        .map(|l| l.number)
        .collect();
    assert_eq!(numbers, vec![Some(9), Some(2)]);
}

#[test]
fn test_parse_flattens_groups() {
    let xml = r#"
        <report name="multi">
          <group name="module-a">
            <package name="a/pkg"><sourcefile name="A.java"/></package>
          </group>
          <group name="module-b">
            <group name="nested">
              <package name="b/pkg"><sourcefile name="B.java"/></package>
            </group>
          </group>
        </report>
    "#;

    let report = parse_jacoco_xml(xml.as_bytes()).unwrap();
    let packages: Vec<_> = report.packages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(packages, vec!["a/pkg", "b/pkg"]);
}

#[test]
fn test_parse_zero_packages() {
    let report = parse_jacoco_xml(b"<report name=\"empty\"></report>").unwrap();
    assert!(report.packages.is_empty());

    let report = parse_jacoco_xml(b"<report/>").unwrap();
    assert!(report.packages.is_empty());
}

#[test]
fn test_parse_empty_input_is_not_an_error() {
    assert_eq!(parse_jacoco_xml(b"").unwrap(), Report::default());
    assert_eq!(parse_jacoco_xml(b"  \n\t ").unwrap(), Report::default());
}

#[test]
fn test_parse_keeps_line_without_nr_in_lenient_mode() {
    let xml = r#"
        <report>
          <package name="p">
            <sourcefile name="S.java">
              <line mi="0" ci="1"/>
              <line nr="abc" mi="0" ci="1"/>
              <line nr="3" mi="0" ci="1"/>
            </sourcefile>
          </package>
        </report>
    "#;

    let report = parse_jacoco_xml(xml.as_bytes()).unwrap();
    let lines = &report.packages[0].sourcefiles[0].lines;
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].number, None);
    assert_eq!(lines[0].raw_number, None);
    assert_eq!(lines[1].number, None);
    assert_eq!(lines[1].raw_number.as_deref(), Some("abc"));
    assert_eq!(lines[2].number, Some(3));
}

#[test]
fn test_parse_strict_mode_rejects_bad_line_numbers() {
    for line in [
        r#"<line mi="0" ci="1"/>"#,
        r#"<line nr="abc" mi="0" ci="1"/>"#,
        r#"<line nr="0" mi="0" ci="1"/>"#,
        r#"<line nr="-4" mi="0" ci="1"/>"#,
    ] {
        let xml = format!(
            r#"<report><package name="p"><sourcefile name="S.java">{line}</sourcefile></package></report>"#
        );
        let err = parse_jacoco_xml_with(xml.as_bytes(), &ParseOptions::strict()).unwrap_err();
        assert!(err.is_malformed_report(), "expected malformed for {line}");
        assert!(
            err.to_string().contains("Invalid line number"),
            "unexpected message {err}"
        );
        assert!(err.to_string().contains("p/S.java"));
    }
}

#[test]
fn test_parse_decodes_escaped_attribute_values() {
    let xml = r#"
        <report>
          <package name="com/app">
            <sourcefile name="Tom&amp;Jerry.java">
              <line nr="&#53;" mi="&#x30;" ci="1"/>
            </sourcefile>
          </package>
        </report>
    "#;

    let report = parse_jacoco_xml(xml.as_bytes()).unwrap();
    let package = &report.packages[0];
    let file = &package.sourcefiles[0];
    assert_eq!(file.canonical_name(package), "com/app/Tom&Jerry.java");

    let line = &file.lines[0];
    assert_eq!(line.raw_number.as_deref(), Some("5"));
    assert_eq!(line.index(), Some(4));
    assert_eq!(line.mi, Some(0));
}

#[test]
fn test_parse_rejects_unknown_entity_in_attribute() {
    let xml = r#"<report><package name="p"><sourcefile name="A&bogus;.java"/></package></report>"#;
    let err = parse_jacoco_xml(xml.as_bytes()).unwrap_err();
    assert!(err.is_malformed_report());
    assert!(err.to_string().contains("attribute name"));
}

#[test]
fn test_parse_tolerates_odd_counters() {
    let xml = r#"
        <report>
          <package name="p">
            <sourcefile name="S.java">
              <line nr="1" mi="-2" ci="x"/>
            </sourcefile>
          </package>
        </report>
    "#;

    let report = parse_jacoco_xml(xml.as_bytes()).unwrap();
    let line = &report.packages[0].sourcefiles[0].lines[0];
    assert_eq!(line.mi, Some(-2));
    assert_eq!(line.ci, None);
    assert_eq!(line.mb, None);
    assert_eq!(line.missed_instructions(), 0);
}

#[test]
fn test_parse_rejects_malformed_xml() {
    let cases: &[&[u8]] = &[
        b"<report><package name=\"p\"></report>",
        b"<report><package name=\"p\">",
        b"<report",
        b"garbage",
        b"<?xml version=\"1.0\"?>",
        b"<report/><report/>",
    ];

    for case in cases {
        let err = parse_jacoco_xml(case).unwrap_err();
        assert!(
            err.is_malformed_report(),
            "expected malformed for {:?}, got {err:?}",
            String::from_utf8_lossy(case)
        );
    }
}

#[test]
fn test_parse_rejects_text_after_root() {
    let err = parse_jacoco_xml(b"<report/>\ntrailing text\n").unwrap_err();
    match err {
        CoverageError::MalformedReport { message, position } => {
            assert!(message.contains("outside of the <report> element"));
            assert!(position.is_some());
        }
        other => panic!("expected MalformedReport, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_wrong_root() {
    let err = parse_jacoco_xml(b"<coverage><packages/></coverage>").unwrap_err();
    assert!(err.is_malformed_report());
    assert!(err.to_string().contains("<coverage>"));
}

#[test]
fn test_parse_rejects_nameless_package_with_sourcefiles() {
    let xml = r#"<report><package><sourcefile name="A.java"/></package></report>"#;
    let err = parse_jacoco_xml(xml.as_bytes()).unwrap_err();
    assert!(err.is_malformed_report());

    // A nameless package without source files is harmless.
    let report = parse_jacoco_xml(b"<report><package/></report>").unwrap();
    assert_eq!(report.packages.len(), 1);
    assert!(report.packages[0].name.is_empty());
}

#[test]
fn test_parse_rejects_nameless_sourcefile() {
    let xml = r#"<report><package name="p"><sourcefile><line nr="1"/></sourcefile></package></report>"#;
    let err = parse_jacoco_xml(xml.as_bytes()).unwrap_err();
    assert!(err.is_malformed_report());
}

#[test]
fn test_parse_rejects_misplaced_elements() {
    let cases = [
        r#"<report><sourcefile name="A.java"/></report>"#,
        r#"<report><package name="p"><line nr="1"/></package></report>"#,
        r#"<report><package name="p"><sourcefile name="A.java"><package name="q"/></sourcefile></package></report>"#,
    ];

    for case in cases {
        let err = parse_jacoco_xml(case.as_bytes()).unwrap_err();
        assert!(err.is_malformed_report(), "expected malformed for {case}");
    }
}

#[test]
fn test_malformed_error_carries_position() {
    let xml = b"<report>\n  <package name=\"p\">\n  </sourcefile>\n</report>";
    match parse_jacoco_xml(xml).unwrap_err() {
        CoverageError::MalformedReport { position, .. } => assert!(position.is_some()),
        other => panic!("expected MalformedReport, got {other:?}"),
    }
}
