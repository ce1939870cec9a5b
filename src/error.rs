use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::{fmt, io};

use thiserror::Error;

use crate::validator::ValidationError;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Error parsing front matter of {slug}: {reason}")]
    Parsing { slug: String, reason: String },

    #[error("Invalid front matter in {slug}: {}", join_errors(.errors))]
    InvalidFrontmatter {
        slug: String,
        errors: Vec<ValidationError>,
    },

    #[error("Error reading file {}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse classification of a [`BlogError`], used when logging load failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    ParsingError,
    InvalidFrontmatter,
    FileReadError,
    InvalidInput,
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::NotFound(_) => ErrorKind::NotFound,
            BlogError::Parsing { .. } => ErrorKind::ParsingError,
            BlogError::InvalidFrontmatter { .. } => ErrorKind::InvalidFrontmatter,
            BlogError::FileRead { .. } => ErrorKind::FileReadError,
            BlogError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    pub(crate) fn parsing(slug: &str, reason: impl Into<String>) -> Self {
        BlogError::Parsing {
            slug: slug.to_string(),
            reason: reason.into(),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::ParsingError => "ParsingError",
            ErrorKind::InvalidFrontmatter => "InvalidFrontmatter",
            ErrorKind::FileReadError => "FileReadError",
            ErrorKind::InvalidInput => "InvalidInput",
        };
        write!(f, "{}", name)
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors.iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, BlogError>;
