//! Markdown conversion service.
//!
//! The pipeline treats conversion as an opaque service behind
//! [`MarkupConverter`]: text goes in, HTML body and front matter come out.
//! [`CommonMarkConverter`] provides it with `pulldown-cmark`. Front matter is a
//! YAML block fenced by `---` lines at the very top of the document; fences
//! anywhere else are ordinary markdown (thematic breaks, setext headings).

use std::collections::HashSet;

use indexmap::IndexMap;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::error::{Error, Result};

/// Front matter of a document, in declaration order.
pub type Metadata = IndexMap<String, serde_json::Value>;

/// Result of converting one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Converted {
    /// Rendered HTML body
    pub body: String,
    /// Front matter, empty when the document has none
    pub metadata: Metadata,
}

/// Trait for markup conversion engines.
pub trait MarkupConverter {
    /// Converts `source` to HTML and extracts its front matter.
    ///
    /// # Arguments
    /// * `name` - Document name used in error messages
    /// * `source` - Raw document text
    ///
    /// # Errors
    /// * `Error::FrontMatterError` if the front matter is not a YAML mapping
    fn convert(&self, name: &str, source: &str) -> Result<Converted>;
}

/// CommonMark converter built on `pulldown-cmark`.
pub struct CommonMarkConverter {
    options: Options,
    heading_ids: bool,
}

impl CommonMarkConverter {
    /// Plain CommonMark with front matter, used for the site configuration document.
    pub fn for_config() -> Self {
        Self { options: Options::empty(), heading_ids: false }
    }

    /// Content documents: GFM-style extensions, math, wiki links, heading
    /// attributes and automatic heading ids.
    pub fn for_content() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_MATH);
        options.insert(Options::ENABLE_WIKILINKS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        Self { options, heading_ids: true }
    }
}

impl Default for CommonMarkConverter {
    fn default() -> Self {
        CommonMarkConverter::for_content()
    }
}

impl MarkupConverter for CommonMarkConverter {
    fn convert(&self, name: &str, source: &str) -> Result<Converted> {
        let (front_matter, text) = split_front_matter(source);
        let metadata = parse_front_matter(name, front_matter)?;

        let mut events: Vec<Event<'_>> = Parser::new_ext(text, self.options).collect();
        if self.heading_ids {
            assign_heading_ids(&mut events);
        }

        let mut body = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut body, events.into_iter());
        Ok(Converted { body, metadata })
    }
}

/// Splits the front matter block off the top of `source`.
///
/// The block opens with a `---` line at byte 0 and closes with the next `---`
/// or `...` line. Returns `(front_matter, body)`; without an opening fence at
/// the top or without a closing fence the whole text is the body.
pub fn split_front_matter(source: &str) -> (&str, &str) {
    let Some(rest) = source.strip_prefix("---") else {
        return ("", source);
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return ("", source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let fence = line.trim_end_matches(['\r', '\n']);
        if fence == "---" || fence == "..." {
            return (&rest[..offset], &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    ("", source)
}

/// Parses a YAML front matter block into [`Metadata`].
/// Blank front matter yields an empty mapping.
pub fn parse_front_matter(name: &str, yaml: &str) -> Result<Metadata> {
    if yaml.trim().is_empty() {
        return Ok(Metadata::new());
    }
    serde_yaml::from_str(yaml).map_err(|e| Error::FrontMatterError {
        path: name.to_string(),
        message: e.to_string(),
    })
}

/// Gives every heading without an explicit `{#id}` an id derived from its text.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut headings: Vec<(usize, String)> = Vec::new();
    let mut open: Option<(usize, String)> = None;
    // Explicit ids are taken first; generated ones must not collide with them.
    let mut used: HashSet<String> = HashSet::new();

    for (index, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => {
                used.insert(id.to_string());
            }
            Event::Start(Tag::Heading { id: None, .. }) => open = Some((index, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, heading_text)) = open.as_mut() {
                    heading_text.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = open.take() {
                    headings.push(heading);
                }
            }
            _ => {}
        }
    }

    for (index, text) in headings {
        let id = unique_slug(&text, &mut used);
        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[index] {
            *slot = Some(CowStr::from(id));
        }
    }
}

fn unique_slug(text: &str, used: &mut HashSet<String>) -> String {
    let base = slugify(text);
    let base = if base.is_empty() { "heading".to_string() } else { base };
    let mut slug = base.clone();
    let mut suffix = 0;
    while used.contains(&slug) {
        suffix += 1;
        slug = format!("{base}-{suffix}");
    }
    used.insert(slug.clone());
    slug
}

/// Lowercases alphanumerics and joins words with single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust & Go: a tale "), "rust-go-a-tale");
        assert_eq!(slugify("snake_case-Name"), "snake-case-name");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_unique_slug_suffixes_duplicates() {
        let mut used = HashSet::new();
        assert_eq!(unique_slug("Intro", &mut used), "intro");
        assert_eq!(unique_slug("Intro", &mut used), "intro-1");
        assert_eq!(unique_slug("Intro", &mut used), "intro-2");
        assert_eq!(unique_slug("", &mut used), "heading");
    }

    #[test]
    fn test_split_front_matter() {
        assert_eq!(split_front_matter("---\na: 1\n---\nbody\n"), ("a: 1\n", "body\n"));
        assert_eq!(split_front_matter("---\r\na: 1\r\n...\r\nbody"), ("a: 1\r\n", "body"));
        assert_eq!(split_front_matter("---\n---\n"), ("", ""));
        assert_eq!(split_front_matter("---\nno closing fence\n"), ("", "---\nno closing fence\n"));
        assert_eq!(split_front_matter(" ---\na: 1\n---\n"), ("", " ---\na: 1\n---\n"));
    }
}
