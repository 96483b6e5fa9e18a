//! Common constants used throughout grafe.

/// Directory holding markdown documents and co-located assets
pub const CONTENT_DIR: &str = "content";

/// Directory holding project static assets
pub const STATIC_DIR: &str = "static";

/// Directory holding project layouts and includes
pub const TEMPLATES_DIR: &str = "templates";

/// Directory holding the theme's `static/` and `templates/` trees
pub const THEME_DIR: &str = "theme";

/// Layout sub-directory of a templates tree
pub const LAYOUTS_DIR: &str = "layouts";

/// Include sub-directory of a templates tree
pub const INCLUDES_DIR: &str = "includes";

/// Site configuration document
pub const CONFIG_FILE: &str = "config.md";

/// Build output directory
pub const OUTPUT_DIR: &str = "public";

/// Scratch directory used while staging templates
pub const STAGING_DIR: &str = "public-generator";

/// Project ignore file with one glob pattern per line
pub const IGNORE_FILE: &str = ".grafeignore";

/// Any path containing this substring is left out of the build
pub const IGNORE_MARKER: &str = "IGNORE";

/// Version control metadata directories
pub const VCS_DIRS: [&str; 3] = [".git", ".hg", ".svn"];

/// Obsidian vault settings directory
pub const EDITOR_DIR: &str = ".obsidian";

/// Marker file telling GitHub Pages to skip Jekyll processing
pub const MARKER_FILE: &str = ".nojekyll";

pub const DOCUMENT_EXTENSION: &str = ".md";
pub const PAGE_EXTENSION: &str = ".html";
pub const TEMPLATE_SUFFIX: &str = ".html";
pub const SOURCE_SCRIPT_EXTENSION: &str = ".ts";
pub const TARGET_SCRIPT_EXTENSION: &str = ".js";

/// Default post-processing command; reads TypeScript on stdin, writes JavaScript to stdout
pub const DEFAULT_TRANSPILER: &str = "esbuild --loader=ts";

pub const DEFAULT_PORT: u16 = 8081;
