pub mod config;
pub mod content;
pub mod error;
pub mod highlight;
pub mod logger;
pub mod paginator;
pub mod post;
pub mod post_list;
pub mod post_loader;
pub mod search;
pub mod slug;
pub mod text_utils;
pub mod util;
pub mod validator;
mod test_data;

pub use error::{BlogError, Result};
pub use post::{Author, Category, Post, Seo};
pub use post_loader::PostLoader;
pub use search::{MatchedField, SearchResult};
pub use validator::{format_validation_result, validate_frontmatter, ValidationError, ValidationResult};
