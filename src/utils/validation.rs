//! Input validation for connection settings

use crate::error::ConfigError;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(invalid("base_url", url, "URL cannot be empty"));
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(invalid(
            "base_url",
            url,
            "URL must start with http:// or https://",
        ));
    }

    Ok(())
}

/// Validate that a value is not blank
pub fn validate_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "value cannot be empty"));
    }
    Ok(())
}

/// Validate the API version segment, e.g. `3.1` or `4.0`
pub fn validate_api_version(version: &str) -> Result<(), ConfigError> {
    let valid = !version.is_empty()
        && version.split('.').all(|part| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
        });

    if !valid {
        return Err(invalid(
            "api_version",
            version,
            "expected a dotted version such as 3.1",
        ));
    }
    Ok(())
}

fn invalid(field: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_valid_urls() {
        assert!(validate_url("http://localhost").is_ok());
        assert!(validate_url("https://company.looker.com").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_invalid_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("company.looker.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("branch", "feature/new-explore").is_ok());
        assert!(validate_non_empty("branch", "   ").is_err());
    }

    #[test]
    fn test_validate_api_version() {
        assert!(validate_api_version("3.1").is_ok());
        assert!(validate_api_version("4.0").is_ok());
        assert!(validate_api_version("4").is_ok());
        assert!(validate_api_version("").is_err());
        assert!(validate_api_version("v3").is_err());
        assert!(validate_api_version("3.").is_err());
    }
}
