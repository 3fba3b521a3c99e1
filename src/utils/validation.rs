use crate::utils::error::{DevisError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DevisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DevisError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DevisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DevisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DevisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("trello.api_root", "https://api.trello.com/1").is_ok());
        assert!(validate_url("trello.api_root", "http://localhost:8080").is_ok());
        assert!(validate_url("trello.api_root", "").is_err());
        assert!(validate_url("trello.api_root", "invalid-url").is_err());
        assert!(validate_url("trello.api_root", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("trello.key", "abc123").is_ok());
        assert!(validate_non_empty_string("trello.key", "").is_err());
        assert!(validate_non_empty_string("trello.key", "   ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("catalog.markup_rate", 0.1, 0.0, 1.0).is_ok());
        assert!(validate_range("catalog.markup_rate", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("catalog.markup_rate", -0.1, 0.0, 1.0).is_err());
    }
}
