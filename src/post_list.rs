use std::collections::BTreeMap;
use std::path::PathBuf;
use std::{fs, io};

use spdlog::{debug, warn};

use crate::content::ContentFormat;
use crate::slug::extract_slug_from_path;

/// View over the content store directory: one file per post, named `<slug>.mdx` or `<slug>.md`.
pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: PathBuf) -> Self {
        PostList { root_dir }
    }

    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        let entries = fs::read_dir(self.root_dir.as_path())?;
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            let path = entry.path();
            let known = path.extension()
                .and_then(|ext| ext.to_str())
                .and_then(ContentFormat::from_extension)
                .is_some();
            if known {
                posts.push(path);
            }
        }
        Ok(posts)
    }

    /// Slugs mapped to their file, in slug order. When both `<slug>.mdx` and `<slug>.md`
    /// exist the `.mdx` file wins.
    pub fn retrieve_posts(&self) -> BTreeMap<String, PathBuf> {
        let files = match self.retrieve_files() {
            Ok(files) => files,
            Err(e) => {
                debug!("Content store {} is not readable: {}", self.root_dir.display(), e);
                return BTreeMap::new();
            }
        };

        let mut posts: BTreeMap<String, PathBuf> = BTreeMap::new();
        for file in files {
            let slug = extract_slug_from_path(&file);
            let is_mdx = file.extension().and_then(|e| e.to_str()) == Some(ContentFormat::Mdx.extension());
            match posts.get(&slug) {
                Some(_) if !is_mdx => {
                    warn!("Ignoring {} because an .mdx file exists for {}", file.display(), slug);
                }
                Some(existing) => {
                    warn!("Ignoring {} because an .mdx file exists for {}", existing.display(), slug);
                    posts.insert(slug, file);
                }
                None => {
                    posts.insert(slug, file);
                }
            }
        }
        posts
    }

    pub fn slugs(&self) -> Vec<String> {
        self.retrieve_posts().into_keys().collect()
    }

    /// Path of the file backing `slug`, if one exists.
    pub fn find(&self, slug: &str) -> Option<PathBuf> {
        if slug.is_empty() || slug.contains('/') || slug.contains('\\') || slug.contains("..") {
            return None;
        }

        ContentFormat::ALL.iter()
            .map(|format| self.root_dir.join(format!("{}.{}", slug, format.extension())))
            .find(|path| path.is_file())
    }
}
