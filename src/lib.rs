//! grafe is a static site generator.
//! It renders markdown documents through MiniJinja layouts chosen by each
//! document's front matter, mirrors assets byte-for-byte and optionally
//! transpiles TypeScript and serves the result.

/// Command-line interface module for the grafe application
pub mod cli;

/// Site configuration loaded from `config.md`
pub mod config;

/// Fixed directory and file names
pub mod constants;

/// Page emission through compiled layouts
pub mod emitter;

/// Error types and handling for the grafe application
pub mod error;

/// Exclusion rules, including the `.grafeignore` file
pub mod ignore;

/// Logger setup
pub mod logger;

/// Markdown conversion with front matter capture
pub mod markdown;

/// Typed page front matter
pub mod metadata;

/// Byte-for-byte asset copies
pub mod mirror;

/// Extension helpers and source-to-output path mapping
pub mod path;

/// Core build orchestration
/// Combines all components to generate the output tree
pub mod processor;

/// Per-document conversion
pub mod render;

/// HTTP serving of the output tree
pub mod serve;

/// Layout and include compilation
pub mod template;

/// TypeScript post-processing
pub mod transpile;

/// Recursive directory traversal
pub mod walker;
