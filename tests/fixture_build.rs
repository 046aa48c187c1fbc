use std::fs;
use std::path::{Path, PathBuf};

use storybook::error::ErrorKind;
use storybook::runtime::PageOptions;
use storybook::story::{self, Layout, Stage};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/storybook.json")
}

#[test]
fn fixture_loads_clean() {
    let loaded = story::load(&fixture()).expect("fixture should load");
    assert!(loaded.warnings.is_empty(), "warnings: {:?}", loaded.warnings);

    let book = loaded.storybook;
    assert_eq!(book.milestones.len(), 6);
    assert_eq!(book.captions.len(), 13);
    assert_eq!(book.milestones[3].stage, Stage::Consolidacion);
    assert_eq!(book.settings.gallery_interval_ms, Some(4000));
    assert_eq!(book.settings.typewriter_interval_ms, 60);
    // `imageUrl` lands in `images`
    assert_eq!(book.milestones[1].images.len(), 1);
    assert_eq!(book.layout_at(0), Layout::Intro);
    assert_eq!(book.layout_at(5), Layout::Finale);
}

#[test]
fn fixture_compiles_to_single_page() {
    let out = storybook::compile_file(&fixture(), true, &PageOptions::default())
        .expect("fixture should compile in strict mode");

    assert!(out.html.starts_with("<!DOCTYPE html>"));
    assert_eq!(out.html.matches("<section ").count(), 6);
    assert!(out.html.contains("Die With A Smile"));
    assert!(out.html.contains("Aquí empezó todo"));
    assert!(out.html.contains(r#"data-goto="0""#));
    // exactly one inline script, closed once
    assert_eq!(out.html.matches("<script>").count(), 1);
    assert_eq!(out.html.matches("</script>").count(), 1);
}

#[test]
fn unsorted_captions_are_rejected_with_path() {
    let source = fs::read_to_string(fixture()).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&source).unwrap();
    value["captions"][2]["timestamp"] = serde_json::json!(1.0);

    let dir = std::env::temp_dir().join(format!("storybook-it-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("unsorted.json");
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let err = storybook::compile_file(&path, false, &PageOptions::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Invalid(_)));
    assert_eq!(err.path.as_deref(), Some(path.as_path()));
}

#[test]
fn malformed_json_reports_location() {
    let err = storybook::compile_page("{\n  \"title\": \"x\",\n  \"audio\": [\n}").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Json(_)));
    let (line, _) = err.location.expect("json errors carry a location");
    assert_eq!(line, 4);
}
