//! Per-document conversion.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::markdown::{MarkupConverter, Metadata};

/// A converted content document, ready for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// Source path, kept for diagnostics
    pub source: PathBuf,
    /// HTML body, inserted into layouts without escaping
    pub body: String,
    pub metadata: Metadata,
}

impl RenderedDocument {
    pub fn source_name(&self) -> String {
        self.source.display().to_string()
    }
}

/// Converts `source_text` of the document at `source_path`.
/// Each call gets its own conversion context, so front matter of one document
/// never shows up in another.
pub fn render_document<P: AsRef<Path>>(
    converter: &dyn MarkupConverter,
    source_path: P,
    source_text: &str,
) -> Result<RenderedDocument> {
    let source = source_path.as_ref().to_path_buf();
    let converted = converter.convert(&source.display().to_string(), source_text)?;
    Ok(RenderedDocument { source, body: converted.body, metadata: converted.metadata })
}
