//! Form Validation
//!
//! Field-level checks used by every draft before it is sent to the backend.

use std::collections::BTreeMap;
use std::fmt;

use crate::entity::{DomainError, DomainResult};

/// Field name -> message. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field. The first error per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Convert into a result so drafts can use `?`
    pub fn into_result(self) -> DomainResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }

    pub fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "Required");
        }
    }

    pub fn require_id(&mut self, field: &'static str, value: &crate::entity::RecordId) {
        if value.as_str().trim().is_empty() {
            self.add(field, "Required");
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, msg)| format!("{}: {}", field.replace('_', " "), msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// 10-15 digits once spaces, `+` and `-` are removed
pub fn is_valid_phone(value: &str) -> bool {
    let mut digits = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '+' | '-' => {}
            _ => return false,
        }
    }
    (10..=15).contains(&digits)
}

/// Postal code: exactly six digits
pub fn is_valid_pincode(value: &str) -> bool {
    let value = value.trim();
    value.len() == 6 && value.chars().all(|c| c.is_ascii_digit())
}

/// GSTIN: fifteen ASCII alphanumerics
pub fn is_valid_gst_number(value: &str) -> bool {
    let value = value.trim();
    value.len() == 15 && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Three-letter ISO currency code
pub fn is_valid_currency(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parse a user-typed number, tolerating thousands separators
pub fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_valid_email("ops@coolair.in"));
        assert!(is_valid_email("  a.b+c@x.co.uk "));
        assert!(!is_valid_email("ops@coolair"));
        assert!(!is_valid_email("@coolair.in"));
        assert!(!is_valid_email("ops@@coolair.in"));
        assert!(!is_valid_email("o ps@coolair.in"));
    }

    #[test]
    fn test_phone() {
        assert!(is_valid_phone("+91 98765-43210"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("98765x43210"));
    }

    #[test]
    fn test_pincode_and_gst() {
        assert!(is_valid_pincode("560001"));
        assert!(is_valid_pincode("012345"));
        assert!(is_valid_pincode(" 110001 "));
        assert!(!is_valid_pincode("56001"));
        assert!(!is_valid_pincode("5600O1"));
        assert!(is_valid_gst_number("29ABCDE1234F1Z5"));
        assert!(!is_valid_gst_number("29ABCDE1234F1Z"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,25,000.50"), Some(125000.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.require("name", " ");
        errors.add("name", "Too short");
        assert_eq!(errors.get("name"), Some("Required"));
        assert_eq!(errors.to_string(), "name: Required");
        assert!(errors.into_result().is_err());
    }
}
