use crate::utils::error::{AdvisorError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AdvisorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => Ok(()),
        Some(extension) => Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdvisorError::InvalidConfigValueError {
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
        return Err(AdvisorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses a form quantity such as mileage. Blank input counts as zero.
pub fn parse_non_negative_f64(field_name: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| AdvisorError::validation(field_name, format!("'{}' is not a number", raw)))?;

    if !value.is_finite() {
        return Err(AdvisorError::validation(field_name, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(AdvisorError::validation(field_name, "must not be negative"));
    }
    Ok(value)
}

pub fn parse_non_negative_u32(field_name: &str, raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed.parse::<u32>().map_err(|_| {
        AdvisorError::validation(
            field_name,
            format!("'{}' is not a non-negative whole number", raw),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("advisory.endpoint", "https://example.com").is_ok());
        assert!(validate_url("advisory.endpoint", "http://example.com").is_ok());
        assert!(validate_url("advisory.endpoint", "").is_err());
        assert!(validate_url("advisory.endpoint", "invalid-url").is_err());
        assert!(validate_url("advisory.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_output_tokens", 5, 1).is_ok());
        assert!(validate_positive_number("max_output_tokens", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "vehicles.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("input", "VEHICLES.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("input", "vehicles.txt", &["csv"]).is_err());
        assert!(validate_file_extension("input", "vehicles", &["csv"]).is_err());
    }

    #[test]
    fn test_parse_non_negative_f64() {
        assert_eq!(parse_non_negative_f64("mileage", "12500.5").unwrap(), 12500.5);
        assert_eq!(parse_non_negative_f64("mileage", "  ").unwrap(), 0.0);
        assert!(parse_non_negative_f64("mileage", "-1").is_err());
        assert!(parse_non_negative_f64("mileage", "lots").is_err());
        assert!(parse_non_negative_f64("mileage", "inf").is_err());
    }

    #[test]
    fn test_parse_non_negative_u32() {
        assert_eq!(parse_non_negative_u32("accident", "3").unwrap(), 3);
        assert_eq!(parse_non_negative_u32("accident", "").unwrap(), 0);
        assert!(parse_non_negative_u32("accident", "-2").is_err());
        assert!(parse_non_negative_u32("accident", "1.5").is_err());
    }
}
