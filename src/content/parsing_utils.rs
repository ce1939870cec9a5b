use lazy_static::lazy_static;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::content::ContentRecord;
use crate::error::{BlogError, Result};

lazy_static! {
    static ref FRONTMATTER_REGEX: Regex = Regex::new(
        r"(?s)\A\s*---[ \t]*\r?\n(?:(?P<yaml>.*?)\r?\n)?---[ \t]*(?:\r?\n(?P<body>.*))?\z"
    ).unwrap();
}

/// Example of a content file
/// ---
/// title: "5 Ways to Reduce Patient No-Shows"
/// publishedAt: "2024-03-01"
/// tags: [scheduling, reminders]
/// ---
///
/// Body text
pub fn parse_content(slug: &str, raw: &str) -> Result<ContentRecord> {
    let (yaml, body) = split_frontmatter(raw)
        .ok_or_else(|| BlogError::parsing(slug, "Missing front matter block"))?;

    let fields = parse_yaml_block(slug, yaml)?;

    Ok(ContentRecord {
        fields,
        body: body.to_string(),
    })
}

fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let caps = FRONTMATTER_REGEX.captures(raw)?;
    let yaml = caps.name("yaml").map(|m| m.as_str()).unwrap_or("");
    let body = caps.name("body").map(|m| m.as_str()).unwrap_or("");
    Some((yaml, body))
}

fn parse_yaml_block(slug: &str, yaml: &str) -> Result<Mapping> {
    let value: Value = match serde_yaml::from_str(yaml) {
        Ok(v) => v,
        Err(e) => return Err(BlogError::parsing(slug, format!("Invalid YAML: {}", e))),
    };

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(BlogError::parsing(slug, "Front matter must be a key/value block")),
    }
}
