//! Typed view of a page's front matter.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::markdown::Metadata;

/// Front matter keys the pipeline acts on. Other keys are kept in the raw
/// [`Metadata`] and remain visible to templates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub summary: Option<String>,
    /// Layout name without its `.html` suffix
    pub template: Option<String>,
    /// An empty `draft:` counts as not a draft
    #[serde(deserialize_with = "null_as_false")]
    pub draft: bool,
    pub params: Option<IndexMap<String, serde_json::Value>>,
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl PageMeta {
    /// Decodes `metadata` of the document at `path`.
    ///
    /// # Errors
    /// * `Error::MetadataError` if a known key holds a value of the wrong type
    pub fn decode(metadata: &Metadata, path: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> =
            metadata.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| {
            Error::MetadataError { path: path.to_string(), message: e.to_string() }
        })
    }

    /// The layout name, required for every page that is not a draft.
    ///
    /// # Errors
    /// * `Error::MissingMetadata` if `template` is absent
    pub fn template_name(&self, path: &str) -> Result<&str> {
        self.template
            .as_deref()
            .ok_or_else(|| Error::MissingMetadata { field: "template", path: path.to_string() })
    }

    /// Page parameters, empty when the page declares none.
    pub fn page_params(&self) -> IndexMap<String, serde_json::Value> {
        self.params.clone().unwrap_or_default()
    }
}
