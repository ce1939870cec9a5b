use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use spdlog::{debug, error, info};

use crate::config::Config;
use crate::content::content_file::ContentFile;
use crate::content::parsing_utils::parse_content;
use crate::error::{BlogError, ErrorKind, Result};
use crate::paginator::Paginator;
use crate::post::{Category, Post};
use crate::post_list::PostList;
use crate::search::{self, SearchResult};

const AUTHOR_PLACEHOLDER: &str = "/images/authors/placeholder.jpg";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub page: u32,
    pub total_pages: u32,
    pub total_posts: usize,
}

/// Reads posts from the content store. Every call goes back to the files; nothing is cached
/// between calls, so a loader can be built per request from the shared config.
pub struct PostLoader {
    post_list: PostList,
    public_dir: PathBuf,
    today: NaiveDate,
    words_per_minute: u32,
    related_window_days: i64,
    page_size: u32,
}

impl PostLoader {
    pub fn new(config: &Config) -> Self {
        let today = config.preview_date().unwrap_or_else(|| Local::now().date_naive());
        PostLoader {
            post_list: PostList::new(config.paths.posts_dir.clone()),
            public_dir: config.paths.public_dir.clone(),
            today,
            words_per_minute: config.defaults.words_per_minute,
            related_window_days: config.defaults.related_window_days,
            page_size: config.defaults.page_size,
        }
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn get_all_blog_slugs(&self) -> Vec<String> {
        self.post_list.slugs()
    }

    /// Loads one post, keeping the reason for a failure.
    pub fn load_post(&self, slug: &str) -> Result<Post> {
        let path = self.post_list.find(slug)
            .ok_or_else(|| BlogError::NotFound(slug.to_string()))?;
        self.load_file(slug, path)
    }

    /// Loads one post. Drafts and scheduled posts are returned too; only listings filter them.
    pub fn get_blog_post(&self, slug: &str) -> Option<Post> {
        match self.load_post(slug) {
            Ok(post) => Some(post),
            Err(e) => {
                log_failure(slug, &e);
                None
            }
        }
    }

    /// Published posts, newest first. Posts that fail to load are logged and left out.
    pub fn get_all_blog_posts(&self, include_content: bool) -> Vec<Post> {
        let mut posts = vec![];
        for (slug, path) in self.post_list.retrieve_posts() {
            let mut post = match self.load_file(&slug, path) {
                Ok(post) => post,
                Err(e) => {
                    log_failure(&slug, &e);
                    continue;
                }
            };

            if !post.is_published(self.today) {
                debug!("Skipping {}: draft or scheduled for {}", slug, post.published_at);
                continue;
            }

            if !include_content {
                post.strip_content();
            }
            posts.push(post);
        }

        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        info!("Loaded {} published posts", posts.len());
        posts
    }

    pub fn get_blog_posts_by_category(&self, category: Category) -> Vec<Post> {
        self.get_all_blog_posts(false)
            .into_iter()
            .filter(|p| p.category == category)
            .collect()
    }

    pub fn get_blog_posts_by_tag(&self, tag: &str) -> Vec<Post> {
        self.get_all_blog_posts(false)
            .into_iter()
            .filter(|p| p.has_tag(tag))
            .collect()
    }

    /// Tags of published posts with the number of posts using them, most used first.
    /// Tags differing only in case are counted together under the spelling of the newest post.
    pub fn get_all_tags(&self) -> Vec<(String, usize)> {
        let mut tag_map: HashMap<String, (String, usize)> = HashMap::new();
        for post in self.get_all_blog_posts(false) {
            let mut seen = HashSet::new();
            for tag in post.tags {
                let key = tag.to_lowercase();
                if !seen.insert(key.clone()) {
                    continue;
                }
                tag_map.entry(key).or_insert((tag, 0)).1 += 1;
            }
        }

        let mut tag_list: Vec<(String, usize)> = tag_map.into_values().collect();
        tag_list.sort_by(|(ta, ca), (tb, cb)| cb.cmp(ca).then_with(|| ta.cmp(tb)));
        tag_list
    }

    pub fn get_all_categories(&self) -> Vec<(Category, usize)> {
        let posts = self.get_all_blog_posts(false);
        Category::ALL.iter()
            .map(|c| (*c, posts.iter().filter(|p| p.category == *c).count()))
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn get_paginated_blog_posts(&self, page: u32, page_size: u32) -> Result<PostPage> {
        let posts = self.get_all_blog_posts(false);
        let paginator = Paginator::from(&posts, page_size);
        let page_posts = paginator.get_page(page)?.to_vec();

        Ok(PostPage {
            posts: page_posts,
            page,
            total_pages: paginator.page_count(),
            total_posts: posts.len(),
        })
    }

    /// A page of published posts using the configured page size.
    pub fn get_page(&self, page: u32) -> Result<PostPage> {
        self.get_paginated_blog_posts(page, self.page_size)
    }

    pub fn search_blog_posts(&self, keyword: &str) -> Vec<SearchResult> {
        if keyword.trim().is_empty() {
            return vec![];
        }
        search::search_posts(&self.get_all_blog_posts(true), keyword)
    }

    pub fn get_search_suggestions(&self, partial: &str, limit: usize) -> Vec<String> {
        if partial.trim().chars().count() < 2 {
            return vec![];
        }
        search::search_suggestions(&self.get_all_blog_posts(false), partial, limit)
    }

    pub fn get_related_posts(&self, current: &Post, limit: usize) -> Vec<Post> {
        search::related_posts(&self.get_all_blog_posts(false), current, limit, self.related_window_days)
    }

    fn load_file(&self, slug: &str, path: PathBuf) -> Result<Post> {
        let content_file = ContentFile::from_file(slug.to_string(), path)?;
        let record = parse_content(slug, &content_file.raw_content)?;
        let mut post = Post::from_record(slug, &record, self.words_per_minute)?;
        self.resolve_assets(&mut post);
        Ok(post)
    }

    /// Swaps image paths that do not point at a file under the public dir for placeholders.
    fn resolve_assets(&self, post: &mut Post) {
        if !self.asset_exists(&post.featured_image) {
            let placeholder = category_placeholder(post.category);
            debug!("Featured image {} of {} not found, using {}", post.featured_image, post.slug, placeholder);
            post.featured_image = placeholder;
        }

        let avatar_ok = post.author.avatar.as_deref().is_some_and(|a| self.asset_exists(a));
        if !avatar_ok {
            post.author.avatar = Some(AUTHOR_PLACEHOLDER.to_string());
        }
    }

    fn asset_exists(&self, path: &str) -> bool {
        if !path.starts_with('/') || path.contains("..") {
            return false;
        }
        let relative = Path::new(path.trim_start_matches('/'));
        self.public_dir.join(relative).is_file()
    }
}

pub fn category_placeholder(category: Category) -> String {
    format!("/images/blog/placeholders/{}.jpg", category.as_str())
}

fn log_failure(slug: &str, err: &BlogError) {
    match err.kind() {
        ErrorKind::NotFound => debug!("Post {} not found", slug),
        kind => error!("Error loading post {} - kind={}: {}", slug, kind, err),
    }
}
