//! Core Entity Abstractions
//!
//! Record identifiers, the entity trait, list envelopes and the
//! domain error type shared by every module.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::validate::ValidationErrors;

/// Identifier of a backend record.
///
/// The backend hands out ids either as JSON integers or as strings, so the
/// id is kept in its textual form and written back in the shape it came in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Integer ids round-trip as JSON numbers.
    fn as_integer(&self) -> Option<i64> {
        let s = self.0.as_str();
        if s.is_empty() || s.starts_with('+') || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        s.parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl<'de> Visitor<'de> for IdVisitor {
            type Value = RecordId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<RecordId, E> {
                Ok(RecordId(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RecordId, E> {
                Ok(RecordId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Core trait for all domain records
pub trait Entity: Clone {
    /// Returns the record's backend identifier
    fn id(&self) -> &RecordId;
}

/// List endpoints answer either with a bare array or with a page envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Plain(Vec<T>),
    Page { items: Vec<T>, total: Option<usize> },
}

impl<T> ListResponse<T> {
    /// Items plus the total the server reported (falls back to the item count)
    pub fn into_parts(self) -> (Vec<T>, usize) {
        match self {
            ListResponse::Page { items, total } => {
                let total = total.unwrap_or(items.len());
                (items, total)
            }
            ListResponse::Plain(items) => {
                let total = items.len();
                (items, total)
            }
        }
    }
}

/// Serialized name of a unit enum variant (`AssetStatus::InStock` -> `in_stock`)
pub fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}

/// Inverse of [`wire_name`], used when reading `<select>` values back
pub fn from_wire<T: serde::de::DeserializeOwned>(name: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Cannot {action} while {step}")]
    InvalidTransition { step: &'static str, action: &'static str },
    #[error("{0}")]
    Validation(ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[42, "a1b2", "007"]"#).unwrap();
        assert_eq!(ids[0].as_str(), "42");
        assert_eq!(ids[1].as_str(), "a1b2");
        assert_eq!(ids[2].as_str(), "007");
    }

    #[test]
    fn test_record_id_keeps_wire_shape() {
        let json = serde_json::to_string(&vec![
            RecordId::from(42_i64),
            RecordId::from("a1b2"),
            RecordId::from("007"),
        ])
        .unwrap();
        assert_eq!(json, r#"[42,"a1b2","007"]"#);
    }

    #[test]
    fn test_list_response_shapes() {
        let plain: ListResponse<u32> = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(plain.into_parts(), (vec![1, 2, 3], 3));

        let page: ListResponse<u32> = serde_json::from_str(r#"{"items":[1],"total":40}"#).unwrap();
        assert_eq!(page.into_parts(), (vec![1], 40));

        let no_total: ListResponse<u32> = serde_json::from_str(r#"{"items":[1,2]}"#).unwrap();
        assert_eq!(no_total.into_parts(), (vec![1, 2], 2));
    }

    #[test]
    fn test_transition_error_message() {
        let err = DomainError::InvalidTransition { step: "uploading", action: "edit rows" };
        assert_eq!(err.to_string(), "Cannot edit rows while uploading");
    }
}
