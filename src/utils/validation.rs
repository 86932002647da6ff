//! Input validation and sanitization utilities
//!
//! This module provides utilities for validating URLs and normalizing them
//! into the forms the API client expects.

use crate::error::ConfigError;

/// Validate that a URL is a non-empty absolute http(s) URL.
pub fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "url".to_string(),
            value: url.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            field: "url".to_string(),
            value: url.to_string(),
            reason: "URL must start with http:// or https://".to_string(),
        });
    }

    Ok(())
}

/// Strip a single trailing slash. A second slash is left alone.
pub fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Normalize an instance URL into the API root used by the login flow:
/// trailing slash stripped, `/api` appended when absent.
pub fn api_base_url(url: &str) -> String {
    let trimmed = strip_trailing_slash(url);
    if trimmed.ends_with("/api") {
        trimmed.to_string()
    } else {
        format!("{}/api", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost:3000").is_ok());
        assert!(validate_url("https://docs.example.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("localhost:3000").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_strip_trailing_slash_removes_one() {
        assert_eq!(
            strip_trailing_slash("https://docs.example.com/"),
            "https://docs.example.com"
        );
        assert_eq!(
            strip_trailing_slash("https://docs.example.com//"),
            "https://docs.example.com/"
        );
        assert_eq!(
            strip_trailing_slash("https://docs.example.com"),
            "https://docs.example.com"
        );
    }

    #[test]
    fn test_api_base_url_appends_suffix() {
        assert_eq!(
            api_base_url("https://docs.example.com"),
            "https://docs.example.com/api"
        );
        assert_eq!(
            api_base_url("https://docs.example.com/"),
            "https://docs.example.com/api"
        );
        assert_eq!(
            api_base_url("https://docs.example.com/api"),
            "https://docs.example.com/api"
        );
    }
}
