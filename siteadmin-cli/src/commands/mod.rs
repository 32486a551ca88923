//! Command implementations for the siteadmin CLI

pub mod auth;
pub mod browse;
pub mod config;
pub mod dashboard;
pub mod gallery;
pub mod records;

pub use auth::{run_login, run_logout, run_register};
pub use browse::run_browse;
pub use config::run_config;
pub use dashboard::run_dashboard;
pub use gallery::{run_caption, run_priority};
pub use records::{run_create, run_delete, run_edit, run_list, run_show, run_toggle};

use std::path::PathBuf;

use siteadmin_lib::table::PageSize;

/// Parses `key=value` for `--set`.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses `key=path` for `--file`.
pub fn parse_file_assignment(raw: &str) -> Result<(String, PathBuf), String> {
    let (key, path) = parse_assignment(raw)?;
    if path.trim().is_empty() {
        return Err(format!("missing file path in '{}'", raw));
    }
    Ok((key, PathBuf::from(path)))
}

pub fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let n: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    PageSize::try_from(n).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("role=Site Engineer").unwrap(),
            ("role".to_string(), "Site Engineer".to_string())
        );
        assert_eq!(
            parse_assignment("formula=a=b").unwrap(),
            ("formula".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment("caption=").unwrap(),
            ("caption".to_string(), String::new())
        );
        assert!(parse_assignment("role").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_parse_file_assignment() {
        let (key, path) = parse_file_assignment("image=./banner.png").unwrap();
        assert_eq!(key, "image");
        assert_eq!(path, PathBuf::from("./banner.png"));
        assert!(parse_file_assignment("image=").is_err());
    }

    #[test]
    fn test_parse_page_size() {
        assert_eq!(parse_page_size("25").unwrap().get(), 25);
        assert!(parse_page_size("7").is_err());
        assert!(parse_page_size("ten").is_err());
    }
}
