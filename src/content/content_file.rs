use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content::ContentFormat;
use crate::error::{BlogError, Result};

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub format: ContentFormat,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> Result<ContentFile> {
        let format = match Self::guess_type(&file_path) {
            None => return Err(BlogError::InvalidInput(format!("Could not guess the type of the file {}", file_path.display()))),
            Some(format) => format,
        };

        let raw_content = match fs::read_to_string(&file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(BlogError::NotFound(slug)),
            Err(source) => return Err(BlogError::FileRead { path: file_path, source }),
        };

        Ok(ContentFile {
            slug,
            file_path,
            format,
            raw_content,
        })
    }

    fn guess_type(file_name: &Path) -> Option<ContentFormat> {
        file_name.extension()
            .and_then(|ext| ext.to_str())
            .and_then(ContentFormat::from_extension)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.mdx");
        fs::write(&path, "---\ntitle: Hello\n---\nBody").unwrap();

        let file = ContentFile::from_file("hello".to_string(), path).unwrap();
        assert_eq!(file.format, ContentFormat::Mdx);
        assert!(file.raw_content.starts_with("---"));
    }

    #[test]
    fn test_missing_and_unknown_files() {
        let dir = tempfile::tempdir().unwrap();

        let err = ContentFile::from_file("nope".to_string(), dir.path().join("nope.md")).err().unwrap();
        assert!(matches!(err, BlogError::NotFound(slug) if slug == "nope"));

        let err = ContentFile::from_file("img".to_string(), dir.path().join("img.png")).err().unwrap();
        assert!(matches!(err, BlogError::InvalidInput(_)));
    }
}
