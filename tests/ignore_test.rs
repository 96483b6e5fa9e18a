use grafe::constants::IGNORE_FILE;
use grafe::error::Error;
use grafe::ignore::parse_ignore_file;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);

    // Test without .grafeignore
    let glob_set = parse_ignore_file(&ignore_path).unwrap();
    assert!(glob_set.is_empty());

    // Test with .grafeignore
    let mut file = File::create(&ignore_path).unwrap();
    writeln!(file, "# comment\n*.pyc\n\ndrafts/**").unwrap();

    let glob_set = parse_ignore_file(&ignore_path).unwrap();
    assert_eq!(glob_set.len(), 2);
    assert!(glob_set.is_match("file.pyc"));
    assert!(glob_set.is_match("drafts/wip.md"));
    assert!(!glob_set.is_match("posts/wip.md"));
}

#[test]
fn test_invalid_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    std::fs::write(&ignore_path, "[unclosed\n").unwrap();

    assert!(matches!(parse_ignore_file(&ignore_path), Err(Error::IgnoreError(_))));
}
