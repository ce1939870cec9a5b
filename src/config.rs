use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::util::toml_date::TomlDate;

#[derive(Deserialize, Clone)]
pub struct Paths {
    pub posts_dir: PathBuf,
    pub public_dir: PathBuf,
}

#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct Defaults {
    pub words_per_minute: u32,
    pub snippet_length: usize,
    pub suggestion_limit: usize,
    pub related_limit: usize,
    pub related_window_days: i64,
    pub page_size: u32,
    /// Used as "today" when set, so scheduled posts can be previewed.
    pub preview_date: Option<TomlDate>,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            words_per_minute: 200,
            snippet_length: 150,
            suggestion_limit: 5,
            related_limit: 3,
            related_window_days: 30,
            page_size: 10,
            preview_date: None,
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub paths: Paths,
    #[serde(default)]
    pub defaults: Defaults,
    pub log: Option<Log>,
}

impl Config {
    pub fn new(posts_dir: &Path, public_dir: &Path) -> Config {
        Config {
            paths: Paths {
                posts_dir: posts_dir.to_path_buf(),
                public_dir: public_dir.to_path_buf(),
            },
            defaults: Defaults::default(),
            log: None,
        }
    }

    pub fn preview_date(&self) -> Option<NaiveDate> {
        self.defaults.preview_date.map(|d| d.0)
    }
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent()
        .ok_or_else(|| io::Error::new(ErrorKind::NotFound, "Executable has no parent directory"))?;
    let rest = path.strip_prefix("${exe_dir}")
        .map_err(|e| io::Error::new(ErrorKind::InvalidInput, e.to_string()))?;
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        posts_dir: parse_path(cfg.paths.posts_dir)?,
        public_dir: parse_path(cfg.paths.public_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(r##"
[paths]
posts_dir = "content/blog"
public_dir = "public"

[defaults]
words_per_minute = 250
preview_date = 2024-04-22

[log]
level = "Debug"
log_to_console = true
"##).unwrap();

        assert_eq!(cfg.paths.posts_dir, PathBuf::from("content/blog"));
        assert_eq!(cfg.defaults.words_per_minute, 250);
        assert_eq!(cfg.defaults.snippet_length, 150);
        assert_eq!(cfg.defaults.related_window_days, 30);
        assert_eq!(cfg.preview_date(), NaiveDate::from_ymd_opt(2024, 4, 22));
        assert!(cfg.log.is_some());
    }

    #[test]
    fn test_minimal_config() {
        let cfg = parse_config("[paths]\nposts_dir = \"posts\"\npublic_dir = \"public\"\n").unwrap();
        assert_eq!(cfg.defaults.page_size, 10);
        assert!(cfg.preview_date().is_none());
        assert!(cfg.log.is_none());
    }

    #[test]
    fn test_exe_dir_expansion() {
        let cfg = parse_config("[paths]\nposts_dir = \"${exe_dir}/posts\"\npublic_dir = \"public\"\n").unwrap();
        assert!(cfg.paths.posts_dir.ends_with("posts"));
        assert!(!cfg.paths.posts_dir.starts_with("${exe_dir}"));
    }

    #[test]
    fn test_bad_config() {
        let err = parse_config("[paths]\nposts_dir = 3\n").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);

        let err = read_config(Path::new("/definitely/not/here/blog.toml")).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
