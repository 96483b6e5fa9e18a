use std::path::PathBuf;

use grafe::path::{
    change_extension, extension_of, is_document, page_destination, rebase, remove_extension,
};

#[test]
fn test_extension_of() {
    assert_eq!(extension_of("content/a/b.md"), ".md");
    assert_eq!(extension_of("archive.tar.gz"), ".tar.gz");
    assert_eq!(extension_of("src/types.d.ts"), ".d.ts");
    assert_eq!(extension_of("dir.v2/README"), "");
    assert_eq!(extension_of("public/.nojekyll"), "");
    assert_eq!(extension_of(".eslintrc.json"), ".json");
    assert_eq!(extension_of(""), "");
}

#[test]
fn test_remove_extension() {
    assert_eq!(remove_extension("content/a/b.md"), "content/a/b");
    assert_eq!(remove_extension("archive.tar.gz"), "archive");
    assert_eq!(remove_extension("README"), "README");
}

#[test]
fn test_change_extension() {
    assert_eq!(change_extension("content/a/b.md", ".html"), "content/a/b.html");
    assert_eq!(change_extension("public/app.ts", ".js"), "public/app.js");
    // Without an extension the new one is appended to the full name.
    assert_eq!(change_extension("content/README", ".html"), "content/README.html");
}

#[test]
fn test_is_document() {
    assert!(is_document("content/index.md"));
    assert!(is_document("content/posts/hello.md"));
    assert!(!is_document("content/notes.md.bak"));
    assert!(!is_document("content/README"));
    assert!(!is_document("content/img/logo.png"));
}

#[test]
fn test_rebase() {
    let path = rebase("static/img/logo.png", "static", "public").unwrap();
    assert_eq!(path, PathBuf::from("public/img/logo.png"));

    assert!(rebase("elsewhere/logo.png", "static", "public").is_err());
}

#[test]
fn test_page_destination() {
    let path = page_destination("content/a/b.md", "content", "public").unwrap();
    assert_eq!(path, PathBuf::from("public/a/b.html"));

    let path = page_destination("content/index.md", "content", "public").unwrap();
    assert_eq!(path, PathBuf::from("public/index.html"));
}
