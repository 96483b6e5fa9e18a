//! Site configuration loading.
//! The configuration document is a markdown file whose front matter holds the
//! site-wide values; its body is converted and discarded.

use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::markdown::{MarkupConverter, Metadata};

/// Site-wide values shared by every page of one build.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteConfig {
    values: Metadata,
}

impl SiteConfig {
    pub fn new(values: Metadata) -> Self {
        Self { values }
    }

    /// Full front matter of the configuration document.
    pub fn values(&self) -> &Metadata {
        &self.values
    }

    /// The nested `params` mapping exposed to templates as site parameters,
    /// or an empty mapping when the document has none.
    pub fn params(&self) -> serde_json::Value {
        self.values
            .get("params")
            .cloned()
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
    }
}

/// Loads the site configuration from the document at `config_path`.
///
/// # Arguments
/// * `converter` - Conversion service used to extract the front matter
/// * `config_path` - Path to the configuration document
///
/// # Errors
/// * `Error::ConfigError` if the document cannot be read
/// * `Error::FrontMatterError` if its front matter is malformed
pub fn load_config<P: AsRef<Path>>(
    converter: &dyn MarkupConverter,
    config_path: P,
) -> Result<SiteConfig> {
    let config_path = config_path.as_ref();
    debug!("Loading configuration from {}", config_path.display());

    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::ConfigError(format!("cannot read '{}': {}", config_path.display(), e))
    })?;
    let converted = converter.convert(&config_path.display().to_string(), &content)?;

    Ok(SiteConfig::new(converted.metadata))
}
