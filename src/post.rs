use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::content::ContentRecord;
use crate::error::{BlogError, Result};
use crate::text_utils::{parse_date, reading_time};
use crate::validator::{is_truthy, validate_frontmatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    PracticeManagement,
    PatientCare,
    Technology,
    Compliance,
    IndustryNews,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::PracticeManagement,
        Category::PatientCare,
        Category::Technology,
        Category::Compliance,
        Category::IndustryNews,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "practice-management" => Some(Category::PracticeManagement),
            "patient-care" => Some(Category::PatientCare),
            "technology" => Some(Category::Technology),
            "compliance" => Some(Category::Compliance),
            "industry-news" => Some(Category::IndustryNews),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::PracticeManagement => "practice-management",
            Category::PatientCare => "patient-care",
            Category::Technology => "technology",
            Category::Compliance => "compliance",
            Category::IndustryNews => "industry-news",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Seo {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: Author,
    pub published_at: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDate>,
    pub category: Category,
    pub tags: Vec<String>,
    pub featured_image: String,
    pub seo: Seo,
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub reading_time: u32,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, author={}, category={}\ntitle={}\ntags={}",
               self.slug,
               self.published_at,
               self.author.name,
               self.category,
               self.title,
               self.tags.join(", ")
        )
    }
}

impl Post {
    /// Validates the record and converts it into a typed post. Reading time is computed from
    /// the full body here, so clearing `content` later leaves it intact.
    pub fn from_record(slug: &str, record: &ContentRecord, words_per_minute: u32) -> Result<Post> {
        let result = validate_frontmatter(&record.fields);
        if !result.valid {
            return Err(BlogError::InvalidFrontmatter {
                slug: slug.to_string(),
                errors: result.errors,
            });
        }

        let fields = &record.fields;
        let author = mapping_field(slug, fields, "author")?;
        let seo = mapping_field(slug, fields, "seo")?;

        let category = str_field(slug, fields, "category")?;
        let category = Category::from_str(&category)
            .ok_or_else(|| BlogError::parsing(slug, format!("Unknown category {}", category)))?;

        let updated_at = match fields.get("updatedAt").and_then(|v| v.as_str()) {
            Some(d) => Some(date_value(slug, d)?),
            None => None,
        };

        Ok(Post {
            slug: slug.to_string(),
            title: str_field(slug, fields, "title")?,
            excerpt: str_field(slug, fields, "excerpt")?,
            author: Author {
                name: str_field(slug, author, "name")?,
                role: str_field(slug, author, "role")?,
                avatar: author.get("avatar").and_then(|v| v.as_str()).map(|s| s.to_string()),
            },
            published_at: date_value(slug, &str_field(slug, fields, "publishedAt")?)?,
            updated_at,
            category,
            tags: str_list(slug, fields, "tags")?,
            featured_image: str_field(slug, fields, "featuredImage")?,
            seo: Seo {
                title: str_field(slug, seo, "title")?,
                description: str_field(slug, seo, "description")?,
                keywords: str_list(slug, seo, "keywords")?,
            },
            draft: is_truthy(fields.get("draft")),
            content: Some(record.body.clone()),
            reading_time: reading_time(&record.body, words_per_minute),
        })
    }

    /// Not a draft, and the publish date is not after `today`.
    pub fn is_published(&self, today: NaiveDate) -> bool {
        !self.draft && self.published_at <= today
    }

    pub fn strip_content(&mut self) {
        self.content = None;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

fn str_field(slug: &str, fields: &Mapping, key: &str) -> Result<String> {
    fields.get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| BlogError::parsing(slug, format!("Field {} is not a string", key)))
}

fn mapping_field<'a>(slug: &str, fields: &'a Mapping, key: &str) -> Result<&'a Mapping> {
    fields.get(key)
        .and_then(|v| v.as_mapping())
        .ok_or_else(|| BlogError::parsing(slug, format!("Field {} is not an object", key)))
}

fn str_list(slug: &str, fields: &Mapping, key: &str) -> Result<Vec<String>> {
    let items = fields.get(key)
        .and_then(|v| v.as_sequence())
        .ok_or_else(|| BlogError::parsing(slug, format!("Field {} is not a list", key)))?;

    items.iter()
        .map(|item: &Value| item.as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| BlogError::parsing(slug, format!("Field {} contains a non-string entry", key))))
        .collect()
}

fn date_value(slug: &str, date: &str) -> Result<NaiveDate> {
    parse_date(date).map_err(|e| BlogError::parsing(slug, e))
}
