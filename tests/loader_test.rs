//! Integration tests for loading thesis documents from disk.

use std::io::Write;

use thesisdoc::error::LoadError;
use thesisdoc::{ContentItem, ContentSection, Error, Loader, Scalar};

fn write_temp(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_demo_document() {
    let doc = thesisdoc::load_file(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/thesis.json"))
        .unwrap();

    assert_eq!(doc.section_count(), 4);
    assert_eq!(doc.image_count(), 1);
    assert_eq!(doc.meta.authors.len(), 2);
    assert_eq!(doc.meta.fields.len(), 1);
    assert!(doc.meta.fields[0].plain);
    assert_eq!(doc.bibliography_ids(), vec!["1", "2", "3"]);
}

#[test]
fn test_file_url_location() {
    let file = write_temp(r#"{"meta": {"title": "Via URL"}}"#);
    let location = format!("file://{}", file.path().display());

    let doc = Loader::with_defaults().load(&location).unwrap();
    assert_eq!(doc.meta.title, "Via URL");
}

#[test]
fn test_loose_shapes_normalized() {
    let file = write_temp(
        r#"{
            "meta": {"title": "T", "date": 2024, "author": "Solo Author", "fields": []},
            "content": [
                {"type": "section", "number": "3", "heading": "Three", "content": [
                    {"type": "paragraph"}
                ]},
                {"heading": "untyped"}
            ]
        }"#,
    );
    let doc = thesisdoc::load_file(file.path()).unwrap();

    assert_eq!(doc.meta.date, "2024");
    assert_eq!(doc.meta.authors.len(), 1);
    assert!(doc.meta.authors[0].plain);
    assert!(doc.meta.fields.is_empty());

    match &doc.content[0] {
        ContentSection::Section(section) => {
            assert_eq!(section.number, Some(Scalar::Text("3".to_string())));
            assert_eq!(section.display_heading(), "3. Three");
            assert_eq!(
                section.content[0],
                ContentItem::Paragraph {
                    text: String::new()
                }
            );
        }
        other => panic!("expected section, got {:?}", other),
    }
    assert!(matches!(
        doc.content[1],
        ContentSection::Unknown { tag: None }
    ));
}

#[test]
fn test_missing_file_is_status_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");

    let err = thesisdoc::load_file(&missing).unwrap_err();
    assert!(err.is_load_error());
    match err {
        Error::Load(load) => assert_eq!(load.status(), Some(404)),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_malformed_body_is_parse_error() {
    let file = write_temp("{\"meta\": ");
    let err = thesisdoc::load_file(file.path()).unwrap_err();
    assert!(matches!(err, Error::Load(LoadError::Parse(_))));
}

#[test]
fn test_unsupported_scheme() {
    let err = Loader::with_defaults()
        .load("ftp://example.org/thesis.json")
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Load(LoadError::UnsupportedScheme(ref scheme)) if scheme == "ftp"
    ));
}

#[test]
fn test_builder_end_to_end() {
    let file = write_temp(
        r#"{"content": [{"type": "section", "heading": "S", "content": [
            {"type": "paragraph", "text": "<b>x</b> [1]"}
        ]}]}"#,
    );

    let result = thesisdoc::Thesisdoc::new()
        .escape_text()
        .fragment()
        .load(&file.path().to_string_lossy())
        .unwrap();

    let html = result.to_html().unwrap();
    assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    assert!(html.starts_with("<div id=\"app\">"));

    let report = result.audit();
    assert_eq!(report.unresolved, vec!["1"]);
}
