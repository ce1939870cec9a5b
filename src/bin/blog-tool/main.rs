use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{info, warn};

use blog_content::config::Config;
use blog_content::content::parsing_utils::parse_content;
use blog_content::highlight::extract_search_snippet;
use blog_content::logger::configure_logger;
use blog_content::post_list::PostList;
use blog_content::slug::extract_slug_from_path;
use blog_content::{format_validation_result, validate_frontmatter, PostLoader};

use crate::config::open_config;
use crate::new_post::new_post_cmd;

mod config;
mod new_post;

const CFG_FILE_NAME: &str = "blog.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validates the front matter of the given files, or of every post when none is given
    Validate {
        files: Vec<PathBuf>,
    },
    /// Creates a new draft post in the posts directory
    New(NewArgs),
    /// Lists published posts, newest first
    List {
        /// Shows a single page of `page_size` posts
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Searches published posts
    Search {
        term: String,
        #[arg(long)]
        json: bool,
    },
    /// Shows the posts most related to a post
    Related {
        slug: String,
    },
    /// Suggests search terms for a partial word
    Suggest {
        partial: String,
    },
}

#[derive(Parser, Debug)]
struct NewArgs {
    /// Title of the post
    #[arg(short, long)]
    title: String,

    /// Name of the author. If empty, OS user real name is being used
    #[arg(short, long)]
    author: Option<String>,

    /// Role shown next to the author name
    #[arg(short, long, default_value = "Contributor")]
    role: String,

    /// One of practice-management, patient-care, technology, compliance, industry-news
    #[arg(long, default_value = "practice-management")]
    category: String,
}

fn validate_cmd(config: &Config, files: Vec<PathBuf>) -> Result<bool> {
    let files = if files.is_empty() {
        PostList::new(config.paths.posts_dir.clone()).retrieve_posts().into_values().collect()
    } else {
        files
    };

    let mut all_valid = true;
    for file in files {
        let slug = extract_slug_from_path(&file);
        let raw = fs::read_to_string(&file)?;
        println!("{}", file.display());

        match parse_content(&slug, &raw) {
            Ok(record) => {
                let result = validate_frontmatter(&record.fields);
                all_valid &= result.valid;
                println!("{}", format_validation_result(&result));
            }
            Err(e) => {
                all_valid = false;
                println!("✗ {}\n", e);
            }
        }
    }
    Ok(all_valid)
}

fn list_cmd(loader: &PostLoader, page: Option<u32>, json: bool) -> Result<()> {
    let posts = match page {
        Some(page) => {
            let page = loader.get_page(page)?;
            info!("Page {} of {} ({} posts)", page.page, page.total_pages, page.total_posts);
            page.posts
        }
        None => loader.get_all_blog_posts(false),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    for post in posts {
        println!("{}  {:<40} {} ({} min)", post.published_at, post.slug, post.title, post.reading_time);
    }
    Ok(())
}

fn search_cmd(loader: &PostLoader, config: &Config, term: &str, json: bool) -> Result<()> {
    let results = loader.search_blog_posts(term);
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in results {
        let text = result.post.content.as_deref().unwrap_or(&result.post.excerpt);
        let snippet = extract_search_snippet(text, term, config.defaults.snippet_length);
        println!("[{:>3}] {} - {} {:?}", result.score, result.post.slug, result.post.title, result.matched_in);
        println!("      {}", snippet.replace('\n', " "));
    }
    Ok(())
}

fn related_cmd(loader: &PostLoader, config: &Config, slug: &str) -> Result<()> {
    let Some(current) = loader.get_blog_post(slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };

    for post in loader.get_related_posts(&current, config.defaults.related_limit) {
        println!("{}  {}", post.slug, post.title);
    }
    Ok(())
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!("Please run blog-tool --help");
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    let loader = PostLoader::new(&config);
    info!("Using posts from {} (today is {})", config.paths.posts_dir.display(), loader.today());

    match args.command {
        Command::Validate { files } => {
            if !validate_cmd(&config, files)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::New(new_args) => {
            let path = new_post_cmd(&config, new_args)?;
            println!("Created {}", path.display());
        }
        Command::List { page, json } => list_cmd(&loader, page, json)?,
        Command::Search { term, json } => search_cmd(&loader, &config, &term, json)?,
        Command::Related { slug } => related_cmd(&loader, &config, &slug)?,
        Command::Suggest { partial } => {
            for suggestion in loader.get_search_suggestions(&partial, config.defaults.suggestion_limit) {
                println!("{}", suggestion);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
