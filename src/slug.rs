use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{BlogError, Result};

lazy_static! {
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    static ref INVALID_CHARS: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_RUN: Regex = Regex::new(r"-+").unwrap();
}

/// Turns a title into a URL segment.
///
/// Accented letters are transliterated first, so "Ábaco" becomes "abaco" instead of "baco".
pub fn generate_slug(title: &str) -> Result<String> {
    if title.trim().is_empty() {
        return Err(BlogError::InvalidInput("Title must be a non-empty string".to_string()));
    }

    let ascii = unidecode::unidecode(title);
    let lower = ascii.to_lowercase();
    let stripped = INVALID_CHARS.replace_all(lower.trim(), "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    let collapsed = HYPHEN_RUN.replace_all(&hyphenated, "-");
    let slug = collapsed.trim_matches('-').to_string();

    if slug.is_empty() {
        return Err(BlogError::InvalidInput(format!("Title produces an empty slug: {}", title)));
    }

    Ok(slug)
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

pub fn sanitize_slug(slug: &str) -> Result<String> {
    if is_valid_slug(slug) {
        return Ok(slug.to_string());
    }
    generate_slug(slug)
}

pub fn is_unique_slug(slug: &str, existing: &HashSet<String>) -> bool {
    !existing.contains(slug)
}

/// Returns `base` when free, otherwise `base-N` with the smallest free N starting at 2.
pub fn make_unique_slug(base: &str, existing: &HashSet<String>) -> String {
    if is_unique_slug(base, existing) {
        return base.to_string();
    }

    let mut counter = 2u64;
    loop {
        let candidate = format!("{}-{}", base, counter);
        if is_unique_slug(&candidate, existing) {
            return candidate;
        }
        counter += 1;
    }
}

pub fn extract_slug_from_path<P: AsRef<Path>>(path: P) -> String {
    let file_name = match path.as_ref().file_name().and_then(|f| f.to_str()) {
        Some(name) => name,
        None => return String::new(),
    };

    file_name.strip_suffix(".mdx")
        .or_else(|| file_name.strip_suffix(".md"))
        .unwrap_or(file_name)
        .to_string()
}

pub fn generate_file_path<P: AsRef<Path>>(dir: P, slug: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.mdx", slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("5 Ways to Reduce Patient No-Shows").unwrap(), "5-ways-to-reduce-patient-no-shows");
        assert_eq!(generate_slug("HIPAA Compliance: What You Need to Know!").unwrap(), "hipaa-compliance-what-you-need-to-know");
        assert_eq!(generate_slug("  Spaces   everywhere  ").unwrap(), "spaces-everywhere");
        assert_eq!(generate_slug("Dashes --- and - more").unwrap(), "dashes-and-more");
        assert_eq!(generate_slug("-Leading and trailing-").unwrap(), "leading-and-trailing");
        assert_eq!(generate_slug("Post title of mine Ábaco").unwrap(), "post-title-of-mine-abaco");
    }

    #[test]
    fn test_generate_slug_invalid_input() {
        let err = generate_slug("").unwrap_err();
        assert!(matches!(err, BlogError::InvalidInput(_)));

        assert!(matches!(generate_slug("   ").unwrap_err(), BlogError::InvalidInput(_)));
        assert!(matches!(generate_slug("!!! ???").unwrap_err(), BlogError::InvalidInput(_)));
    }

    #[test]
    fn test_generated_slugs_are_valid() {
        let titles = [
            "5 Ways to Reduce Patient No-Shows",
            "HIPAA Compliance: What You Need to Know!",
            "Telehealth in 2024 -- a review",
            "  Why   clinics   love automation  ",
            "Crème brûlée & scheduling",
            "a",
        ];
        for title in titles {
            let slug = generate_slug(title).unwrap();
            assert!(is_valid_slug(&slug), "{} -> {}", title, slug);
        }
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("my-post"));
        assert!(is_valid_slug("post2024"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-my-post"));
        assert!(!is_valid_slug("my-post-"));
        assert!(!is_valid_slug("my--post"));
        assert!(!is_valid_slug("My-Post"));
        assert!(!is_valid_slug("my_post"));
    }

    #[test]
    fn test_sanitize_slug() {
        assert_eq!(sanitize_slug("already-valid").unwrap(), "already-valid");
        assert_eq!(sanitize_slug("Not Valid_Slug!").unwrap(), "not-validslug");
        assert!(sanitize_slug("--").is_err());
    }

    #[test]
    fn test_make_unique_slug() {
        assert_eq!(make_unique_slug("my-post", &set(&["my-post", "my-post-2", "my-post-3"])), "my-post-4");
        assert_eq!(make_unique_slug("test", &set(&["test", "test-2"])), "test-3");
        assert_eq!(make_unique_slug("fresh", &set(&["test"])), "fresh");
        // A gap is filled before higher numbers
        assert_eq!(make_unique_slug("gap", &set(&["gap", "gap-3"])), "gap-2");
        assert!(is_unique_slug("gap-2", &set(&["gap", "gap-3"])));
    }

    #[test]
    fn test_extract_slug_from_path() {
        assert_eq!(extract_slug_from_path("content/blog/my-post.mdx"), "my-post");
        assert_eq!(extract_slug_from_path("/abs/dir/other-post.md"), "other-post");
        assert_eq!(extract_slug_from_path("plain"), "plain");

        for slug in ["my-post", "a", "2024-recap"] {
            let path = generate_file_path("content/blog", slug);
            assert_eq!(extract_slug_from_path(&path), slug);
        }
    }
}
