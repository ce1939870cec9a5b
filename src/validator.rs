use std::fmt::Write;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::post::Category;
use crate::text_utils::{is_date_format, parse_date};

pub const REQUIRED_FIELDS: [&str; 8] = [
    "title",
    "excerpt",
    "author",
    "publishedAt",
    "category",
    "tags",
    "featuredImage",
    "seo",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

#[derive(Default)]
struct Validator {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl Validator {
    fn error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message));
    }

    fn warn(&mut self, field: &str, message: impl Into<String>) {
        self.warnings.push(ValidationError::new(field, message));
    }

    fn length_warning(&mut self, field: &str, label: &str, text: &str, min: usize, max: usize) {
        let len = text.chars().count();
        if len < min || len > max {
            self.warn(field, format!("{} should be between {} and {} characters (currently {})", label, min, max, len));
        }
    }

    fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Empty strings, `false`, zero and null all count as missing, like an absent key.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Truthiness of an optional flag such as `draft`, the inverse of a missing value.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    !is_missing(value)
}

fn present<'a>(fields: &'a Mapping, key: &str) -> Option<&'a Value> {
    let value = fields.get(key);
    if is_missing(value) { None } else { value }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(|v| v.as_str()).filter(|s| !s.trim().is_empty())
}

/// Checks a parsed front matter block. Validation problems are reported, never raised.
pub fn validate_frontmatter(fields: &Mapping) -> ValidationResult {
    let mut v = Validator::default();

    for field in REQUIRED_FIELDS {
        if is_missing(fields.get(field)) {
            v.error(field, format!("Missing required field: {}", field));
        }
    }

    if let Some(title) = present(fields, "title") {
        validate_title(&mut v, title);
    }
    if let Some(excerpt) = present(fields, "excerpt") {
        validate_excerpt(&mut v, excerpt);
    }
    if let Some(author) = present(fields, "author") {
        validate_author(&mut v, author);
    }
    if let Some(published_at) = present(fields, "publishedAt") {
        validate_date(&mut v, "publishedAt", published_at);
    }
    if let Some(updated_at) = fields.get("updatedAt").filter(|d| !d.is_null()) {
        validate_date(&mut v, "updatedAt", updated_at);
    }
    if let Some(category) = present(fields, "category") {
        validate_category(&mut v, category);
    }
    if let Some(tags) = present(fields, "tags") {
        validate_tags(&mut v, tags);
    }
    if let Some(image) = present(fields, "featuredImage") {
        validate_featured_image(&mut v, image);
    }
    if let Some(seo) = present(fields, "seo") {
        validate_seo(&mut v, seo);
    }
    if let Some(draft) = fields.get("draft").filter(|d| !d.is_null() && !d.is_bool()) {
        let treated = if is_truthy(Some(draft)) { "a draft" } else { "published" };
        v.warn("draft", format!("Draft should be true or false (got {}), treating post as {}", yaml_inline(draft), treated));
    }

    v.finish()
}

fn yaml_inline(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn validate_title(v: &mut Validator, title: &Value) {
    match non_empty_str(Some(title)) {
        Some(title) => v.length_warning("title", "Title", title, 10, 100),
        None => v.error("title", "Title must be a non-empty string"),
    }
}

fn validate_excerpt(v: &mut Validator, excerpt: &Value) {
    match non_empty_str(Some(excerpt)) {
        Some(excerpt) => v.length_warning("excerpt", "Excerpt", excerpt, 150, 200),
        None => v.error("excerpt", "Excerpt must be a non-empty string"),
    }
}

fn validate_author(v: &mut Validator, author: &Value) {
    let Some(author) = author.as_mapping() else {
        v.error("author", "Author must be an object with name and role");
        return;
    };

    if non_empty_str(author.get("name")).is_none() {
        v.error("author.name", "Author name is required and must be a non-empty string");
    }
    if non_empty_str(author.get("role")).is_none() {
        v.error("author.role", "Author role is required and must be a non-empty string");
    }
    if let Some(avatar) = author.get("avatar").filter(|a| !a.is_null()) {
        if !avatar.is_string() {
            v.error("author.avatar", "Author avatar must be a string");
        }
    }
}

fn validate_date(v: &mut Validator, field: &str, value: &Value) {
    let Some(date) = value.as_str() else {
        v.error(field, format!("{} must be a string", field));
        return;
    };

    if !is_date_format(date) {
        v.error(field, format!("{} must be in YYYY-MM-DD format (got {})", field, date));
    } else if parse_date(date).is_err() {
        v.error(field, format!("{} is not a valid date: {}", field, date));
    }
}

fn validate_category(v: &mut Validator, category: &Value) {
    let known = category.as_str().and_then(Category::from_str);
    if known.is_none() {
        let valid = Category::ALL.iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        v.error("category", format!("Category must be one of: {}", valid));
    }
}

fn validate_tags(v: &mut Validator, tags: &Value) {
    let Some(tags) = tags.as_sequence() else {
        v.error("tags", "Tags must be an array");
        return;
    };

    if tags.is_empty() {
        v.error("tags", "At least one tag is required");
        return;
    }

    for (i, tag) in tags.iter().enumerate() {
        if non_empty_str(Some(tag)).is_none() {
            v.error("tags", format!("Tag at index {} must be a non-empty string", i));
        }
    }

    if tags.len() < 3 {
        v.warn("tags", format!("Consider adding at least 3 tags (currently {})", tags.len()));
    }
}

fn validate_featured_image(v: &mut Validator, image: &Value) {
    match non_empty_str(Some(image)) {
        Some(path) if !path.starts_with("/images/") => {
            v.warn("featuredImage", format!("Featured image should live under /images/ (got {})", path));
        }
        Some(_) => {}
        None => v.error("featuredImage", "Featured image must be a non-empty string"),
    }
}

fn validate_seo(v: &mut Validator, seo: &Value) {
    let Some(seo) = seo.as_mapping() else {
        v.error("seo", "SEO must be an object");
        return;
    };

    match non_empty_str(seo.get("title")) {
        Some(title) => v.length_warning("seo.title", "SEO title", title, 40, 60),
        None => v.error("seo.title", "SEO title is required"),
    }

    match non_empty_str(seo.get("description")) {
        Some(description) => v.length_warning("seo.description", "SEO description", description, 150, 160),
        None => v.error("seo.description", "SEO description is required"),
    }

    let keywords = seo.get("keywords")
        .and_then(|k| k.as_sequence())
        .filter(|k| !k.is_empty());
    let Some(keywords) = keywords else {
        v.error("seo.keywords", "SEO keywords must be a non-empty array");
        return;
    };

    for (i, keyword) in keywords.iter().enumerate() {
        if non_empty_str(Some(keyword)).is_none() {
            v.error("seo.keywords", format!("SEO keyword at index {} must be a non-empty string", i));
        }
    }

    if keywords.len() < 5 || keywords.len() > 10 {
        v.warn("seo.keywords", format!("SEO keywords should have between 5 and 10 entries (currently {})", keywords.len()));
    }
}

pub fn format_validation_result(result: &ValidationResult) -> String {
    let mut buf = String::new();

    if result.valid {
        let _ = writeln!(&mut buf, "✓ Validation passed!");
    } else {
        let _ = writeln!(&mut buf, "✗ Validation failed!");
    }

    if !result.errors.is_empty() {
        let _ = writeln!(&mut buf);
        let _ = writeln!(&mut buf, "Errors:");
        for e in result.errors.iter() {
            let _ = writeln!(&mut buf, "  - {}: {}", e.field, e.message);
        }
    }

    if !result.warnings.is_empty() {
        let _ = writeln!(&mut buf);
        let _ = writeln!(&mut buf, "Warnings:");
        for w in result.warnings.iter() {
            let _ = writeln!(&mut buf, "  - {}: {}", w.field, w.message);
        }
    }

    buf
}
