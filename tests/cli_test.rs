use grafe::cli::Args;
use grafe::processor::BuildOptions;
use grafe::walker::WalkPolicy;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("grafe")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_defaults() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert_eq!(parsed.root, PathBuf::from("."));
    assert!(parsed.transpile_ts);
    assert!(parsed.nojekyll);
    assert!(parsed.ignore_obsidian);
    assert!(!parsed.server);
    assert_eq!(parsed.port, 8081);
    assert_eq!(parsed.transpiler, "esbuild --loader=ts");
    assert_eq!(parsed.walk_errors, WalkPolicy::Warn);
    assert!(!parsed.verbose);
    assert_eq!(parsed.build_options(), BuildOptions::default());
}

#[test]
fn test_disable_stages() {
    let args = make_args(&[
        "--transpile-ts",
        "false",
        "--nojekyll",
        "false",
        "--ignore-obsidian",
        "false",
    ]);
    let options = Args::try_parse_from(args).unwrap().build_options();

    assert!(!options.transpile_scripts);
    assert!(!options.write_marker);
    assert!(!options.ignore_editor_dir);
}

#[test]
fn test_server_flags() {
    let args = make_args(&["--server", "--port", "9000", "--root", "site", "-v"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.server);
    assert_eq!(parsed.port, 9000);
    assert_eq!(parsed.root, PathBuf::from("site"));
    assert!(parsed.verbose);
}

#[test]
fn test_walk_errors() {
    let parsed = Args::try_parse_from(make_args(&["--walk-errors", "fail"])).unwrap();
    assert_eq!(parsed.build_options().walk_policy, WalkPolicy::Fail);

    assert!(Args::try_parse_from(make_args(&["--walk-errors", "ignore"])).is_err());
}

#[test]
fn test_invalid_values() {
    assert!(Args::try_parse_from(make_args(&["--port", "http"])).is_err());
    assert!(Args::try_parse_from(make_args(&["--transpile-ts", "maybe"])).is_err());
    assert!(Args::try_parse_from(make_args(&["extra"])).is_err());
}
