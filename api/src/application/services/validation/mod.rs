use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::error::ServiceError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Trims `value` and rejects it when nothing is left.
pub fn required(value: Option<&str>, field: &str) -> Result<String, ServiceError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => Ok(v.to_string()),
        None => Err(ServiceError::validation(format!("{field} is required"))),
    }
}

pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("player@quickcourt.in"));
        assert!(!is_valid_email("player@quickcourt"));
        assert!(!is_valid_email("no spaces@x.io"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn required_trims() {
        assert_eq!(required(Some("  Ann "), "name").unwrap(), "Ann");
        assert!(matches!(
            required(Some("   "), "name"),
            Err(ServiceError::Validation(m)) if m == "name is required"
        ));
        assert!(required(None, "email").is_err());
    }
}
