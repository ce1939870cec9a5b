use serde_yaml::{Mapping, Value};

pub mod content_file;
pub mod parsing_utils;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContentFormat {
    Mdx,
    Markdown,
}

impl ContentFormat {
    /// Recognised extensions, in lookup preference order.
    pub const ALL: [ContentFormat; 2] = [ContentFormat::Mdx, ContentFormat::Markdown];

    pub fn extension(&self) -> &'static str {
        match self {
            ContentFormat::Mdx => "mdx",
            ContentFormat::Markdown => "md",
        }
    }

    pub fn from_extension(ext: &str) -> Option<ContentFormat> {
        match ext {
            "mdx" => Some(ContentFormat::Mdx),
            "md" => Some(ContentFormat::Markdown),
            _ => None,
        }
    }
}

/// Untyped result of splitting a content file: the front matter as parsed YAML plus the body.
/// Nothing here has been validated yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentRecord {
    pub fields: Mapping,
    pub body: String,
}

impl ContentRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
