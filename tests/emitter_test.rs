use std::fs;
use std::path::{Path, PathBuf};

use grafe::config::SiteConfig;
use grafe::emitter::{emit_page, Emitted};
use grafe::error::Error;
use grafe::markdown::Metadata;
use grafe::render::RenderedDocument;
use grafe::template::TemplateRegistry;
use serde_json::json;
use tempfile::TempDir;

const LAYOUT: &str = "<title>{{ title }}</title>\
<p>{{ summary }}</p>\
<div>{{ body }}</div>\
<span>{{ page_params.color }}|{{ site_params.siteName }}|{{ site_params.color }}</span>";

fn registry(root: &Path) -> TemplateRegistry {
    let layouts = root.join("templates/layouts");
    fs::create_dir_all(&layouts).unwrap();
    fs::write(layouts.join("page.html"), LAYOUT).unwrap();
    TemplateRegistry::build(root.join("templates")).unwrap()
}

fn document(metadata: serde_json::Value) -> RenderedDocument {
    RenderedDocument {
        source: PathBuf::from("content/index.md"),
        body: "<h1>Hello &amp; welcome</h1>".to_string(),
        metadata: serde_json::from_value(metadata).unwrap(),
    }
}

fn site() -> SiteConfig {
    let values: Metadata =
        serde_json::from_value(json!({"params": {"siteName": "Acme", "color": "blue"}})).unwrap();
    SiteConfig::new(values)
}

#[test]
fn test_emit_page() {
    let temp_dir = TempDir::new().unwrap();
    let registry = registry(temp_dir.path());
    let dest = temp_dir.path().join("public/nested/index.html");

    let doc = document(json!({
        "title": "Home",
        "summary": "A & B",
        "template": "page",
        "params": {"color": "red"}
    }));
    let outcome = emit_page(&registry, &doc, &site(), &dest).unwrap();

    assert_eq!(outcome, Emitted::Page);
    let html = fs::read_to_string(&dest).unwrap();
    assert!(html.contains("<title>Home</title>"));
    assert!(html.contains("<p>A &amp; B</p>"));
    // The body is already HTML and must not be escaped a second time.
    assert!(html.contains("<div><h1>Hello &amp; welcome</h1></div>"));
    // Page and site parameters live in separate namespaces.
    assert!(html.contains("<span>red|Acme|blue</span>"));
}

#[test]
fn test_page_params_default_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    let registry = registry(temp_dir.path());
    let dest = temp_dir.path().join("public/index.html");

    let outcome = emit_page(&registry, &document(json!({"template": "page"})), &site(), &dest);

    assert_eq!(outcome.unwrap(), Emitted::Page);
    let html = fs::read_to_string(&dest).unwrap();
    assert!(html.contains("<title></title>"));
    assert!(html.contains("<span>|Acme|blue</span>"));
}

#[test]
fn test_draft_is_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let registry = registry(temp_dir.path());
    let dest = temp_dir.path().join("public/draft.html");

    for metadata in [json!({"draft": true}), json!({"draft": true, "template": "missing"})] {
        let outcome = emit_page(&registry, &document(metadata), &site(), &dest).unwrap();
        assert_eq!(outcome, Emitted::Draft);
        assert!(!dest.exists());
    }
}

#[test]
fn test_unknown_template_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let registry = registry(temp_dir.path());
    let dest = temp_dir.path().join("public/index.html");

    let result = emit_page(&registry, &document(json!({"template": "missing"})), &site(), &dest);

    match result {
        Err(Error::MissingTemplate { template }) => assert_eq!(template, "missing.html"),
        other => panic!("Expected MissingTemplate, got {other:?}"),
    }
    assert!(!dest.exists());
}

#[test]
fn test_missing_template_field_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let registry = registry(temp_dir.path());
    let dest = temp_dir.path().join("public/index.html");

    let result = emit_page(&registry, &document(json!({"title": "Home"})), &site(), &dest);

    assert!(matches!(result, Err(Error::MissingMetadata { field: "template", .. })));
    assert!(!dest.exists());
}
