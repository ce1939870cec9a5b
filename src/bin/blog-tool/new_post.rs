use std::collections::HashSet;
use std::fmt::Write;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use blog_content::config::Config;
use blog_content::post::Category;
use blog_content::post_list::PostList;
use blog_content::slug::{generate_file_path, generate_slug, make_unique_slug};
use blog_content::text_utils::format_date;
use blog_content::util::os_helper::get_name;

use crate::NewArgs;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Header<'a> {
    title: &'a str,
    excerpt: &'a str,
    author: HeaderAuthor<'a>,
    published_at: String,
    category: Category,
    tags: Vec<String>,
    featured_image: &'a str,
    draft: bool,
    seo: HeaderSeo<'a>,
}

#[derive(Serialize)]
struct HeaderAuthor<'a> {
    name: &'a str,
    role: &'a str,
}

#[derive(Serialize)]
struct HeaderSeo<'a> {
    title: &'a str,
    description: &'a str,
    keywords: Vec<String>,
}

fn render_header(title: &str, author: &str, role: &str, category: Category, date: &NaiveDate) -> Result<String> {
    let header = Header {
        title,
        excerpt: "Replace with a 150 to 200 character summary of the post",
        author: HeaderAuthor { name: author, role },
        published_at: format_date(date),
        category,
        tags: vec![],
        featured_image: "/images/blog/replace-me.jpg",
        draft: true,
        seo: HeaderSeo {
            title,
            description: "Replace with a 150 to 160 character description",
            keywords: vec![],
        },
    };

    Ok(format!("---\n{}---\n", serde_yaml::to_string(&header)?))
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "This is a body example");
    let _ = writeln!(&mut buf, "Please remove it and replace with your content");

    buf
}

pub fn new_post_cmd(config: &Config, args: NewArgs) -> Result<PathBuf> {
    let category = Category::from_str(&args.category).ok_or_else(|| {
        let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        anyhow!("Unknown category {}. Valid categories: {}", args.category, valid.join(", "))
    })?;
    let author = args.author.unwrap_or_else(get_name);

    let posts_dir = &config.paths.posts_dir;
    let existing: HashSet<String> = PostList::new(posts_dir.clone()).slugs().into_iter().collect();
    let slug = make_unique_slug(&generate_slug(&args.title)?, &existing);

    let header = render_header(&args.title, &author, &args.role, category, &Local::now().date_naive())?;
    let content = format!("{}{}", header, render_body());

    fs::create_dir_all(posts_dir)?;
    let path = generate_file_path(posts_dir, &slug);
    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    std::io::Write::write_all(&mut file, content.as_bytes())?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use blog_content::content::parsing_utils::parse_content;
    use blog_content::validator::validate_frontmatter;

    use super::*;

    #[test]
    fn test_scaffold_is_parseable() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let header = render_header("Say \"hello\" to AI", "Thiago", "Writer", Category::Technology, &date).unwrap();
        let source = format!("{}{}", header, render_body());

        let record = parse_content("scaffold", &source).unwrap();
        assert_eq!(record.get("title").and_then(|v| v.as_str()), Some("Say \"hello\" to AI"));
        assert_eq!(record.get("draft").and_then(|v| v.as_bool()), Some(true));

        // A fresh scaffold still needs tags and keywords before it can be published
        let result = validate_frontmatter(&record.fields);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["tags", "seo.keywords"]);
    }

    #[test]
    fn test_scaffold_keeps_quotes_and_backslashes() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let title = r#"C:\path tips for "power" users: a guide"#;
        let author = r#"Jane "JJ" Doe \ Ops"#;
        let header = render_header(title, author, "Lead: IT", Category::Compliance, &date).unwrap();

        let record = parse_content("scaffold", &format!("{}{}", header, render_body())).unwrap();
        assert_eq!(record.get("title").and_then(|v| v.as_str()), Some(title));
        assert_eq!(record.get("publishedAt").and_then(|v| v.as_str()), Some("2024-02-29"));
        assert_eq!(record.get("category").and_then(|v| v.as_str()), Some("compliance"));

        let author_fields = record.get("author").and_then(|v| v.as_mapping()).unwrap();
        assert_eq!(author_fields.get("name").and_then(|v| v.as_str()), Some(author));
        assert_eq!(author_fields.get("role").and_then(|v| v.as_str()), Some("Lead: IT"));

        let seo = record.get("seo").and_then(|v| v.as_mapping()).unwrap();
        assert_eq!(seo.get("title").and_then(|v| v.as_str()), Some(title));
    }

    #[test]
    fn test_new_post_gets_unique_slug() {
        let posts = tempfile::tempdir().unwrap();
        fs::write(posts.path().join("hello-world.md"), "").unwrap();
        let config = Config::new(posts.path(), posts.path());

        let args = NewArgs {
            title: "Hello, World!".to_string(),
            author: Some("Jane".to_string()),
            role: "Writer".to_string(),
            category: "technology".to_string(),
        };
        let path = new_post_cmd(&config, args).unwrap();
        assert_eq!(path, posts.path().join("hello-world-2.mdx"));
        let record = parse_content("hello-world-2", &fs::read_to_string(path).unwrap()).unwrap();
        let author = record.get("author").and_then(|v| v.as_mapping()).unwrap();
        assert_eq!(author.get("name").and_then(|v| v.as_str()), Some("Jane"));
    }
}
