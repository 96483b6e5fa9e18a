//! Page emission: draft filtering, layout dispatch and the final write.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;
use minijinja::Value;

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::metadata::PageMeta;
use crate::render::RenderedDocument;
use crate::template::{template_key, TemplateRegistry};

/// Outcome of [`emit_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emitted {
    /// The page was written
    Page,
    /// The page is a draft and nothing was written
    Draft,
}

/// Renders `document` through its layout into `dest`.
///
/// The layout sees `title`, `summary`, `body` (already HTML, never escaped
/// again), `page_params`, `site_params`, plus the raw `page` front matter and
/// the raw `site` configuration.
///
/// # Errors
/// * `Error::MetadataError` if known front matter keys have the wrong type
/// * `Error::MissingMetadata` if a non-draft page has no `template`
/// * `Error::MissingTemplate` if the named layout was not registered
/// * `Error::FileError` / `Error::MinijinjaError` if writing or rendering fails
pub fn emit_page<P: AsRef<Path>>(
    registry: &TemplateRegistry,
    document: &RenderedDocument,
    site: &SiteConfig,
    dest: P,
) -> Result<Emitted> {
    let dest = dest.as_ref();
    let source_name = document.source_name();
    let meta = PageMeta::decode(&document.metadata, &source_name)?;

    if meta.draft {
        debug!("Skipping draft '{}'", source_name);
        return Ok(Emitted::Draft);
    }

    let key = template_key(meta.template_name(&source_name)?);
    let template = registry.lookup(&key).ok_or(Error::MissingTemplate { template: key })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::file("create directory", parent, e))?;
    }

    let mut view = vec![
        ("body", Value::from_safe_string(document.body.clone())),
        ("page_params", Value::from_serialize(meta.page_params())),
        ("site_params", Value::from_serialize(site.params())),
        ("page", Value::from_serialize(&document.metadata)),
        ("site", Value::from_serialize(site.values())),
    ];
    // Absent keys stay undefined so layouts can test them with `is defined`.
    if let Some(title) = &meta.title {
        view.push(("title", Value::from(title.as_str())));
    }
    if let Some(summary) = &meta.summary {
        view.push(("summary", Value::from(summary.as_str())));
    }
    let view: Value = view.into_iter().collect();

    let html = template.render(view)?;
    let file = File::create(dest).map_err(|e| Error::file("create", dest, e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(html.as_bytes()).map_err(|e| Error::file("write", dest, e))?;
    writer.flush().map_err(|e| Error::file("write", dest, e))?;

    debug!("Wrote '{}' with layout '{}'", dest.display(), template.name());
    Ok(Emitted::Page)
}
