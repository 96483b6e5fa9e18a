//! Command-line interface implementation for grafe.
//! Provides argument parsing using clap; flags only gate pipeline stages.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::constants::{DEFAULT_PORT, DEFAULT_TRANSPILER};
use crate::processor::BuildOptions;
use crate::walker::WalkPolicy;

/// Command-line arguments structure for grafe.
#[derive(Parser, Debug)]
#[command(author, version, about = "grafe: static site generator for markdown content", long_about = None)]
pub struct Args {
    /// Project root containing content/, templates/, static/, theme/ and config.md
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Transpile all TypeScript in the `public` directory
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub transpile_ts: bool,

    /// Command reading TypeScript on stdin and writing JavaScript to stdout
    #[arg(long, value_name = "COMMAND", default_value = DEFAULT_TRANSPILER)]
    pub transpiler: String,

    /// Create `public/.nojekyll`; required to host the site on GitHub Pages
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub nojekyll: bool,

    /// Ignore the .obsidian directory in the content directory
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set)]
    pub ignore_obsidian: bool,

    /// Start an HTTP server for the `public` directory after the build
    #[arg(long)]
    pub server: bool,

    /// Port at which to host the HTTP server
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// What to do with directories that cannot be read
    #[arg(long, value_enum, default_value_t = WalkPolicy::Warn)]
    pub walk_errors: WalkPolicy,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Stage switches for the build pipeline.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            transpile_scripts: self.transpile_ts,
            write_marker: self.nojekyll,
            ignore_editor_dir: self.ignore_obsidian,
            walk_policy: self.walk_errors,
        }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
