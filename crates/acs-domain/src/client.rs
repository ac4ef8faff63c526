//! Client Entity
//!
//! Customers that own installation projects.

use serde::{Deserialize, Serialize};

use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::Searchable;
use crate::validate::{is_valid_email, is_valid_gst_number, is_valid_phone, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub gst_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entity for Client {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.contact_person.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.gst_number.as_deref().unwrap_or(""),
        ]
    }
}

/// Body of `POST /clients` and `PUT /clients/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientDraft {
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<String>,
}

impl ClientDraft {
    /// Pre-fill the edit dialog
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            contact_person: client.contact_person.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
            address: client.address.clone(),
            gst_number: client.gst_number.clone(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("email", &self.email);
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.add("email", "Enter a valid email address");
        }
        if !self.phone.trim().is_empty() && !is_valid_phone(&self.phone) {
            errors.add("phone", "Phone must have 10-15 digits");
        }
        if let Some(gst) = self.gst_number.as_deref().filter(|g| !g.trim().is_empty()) {
            if !is_valid_gst_number(gst) {
                errors.add("gst_number", "GST number must be 15 letters/digits");
            }
        }
        errors.into_result()
    }

    /// Trimmed copy ready to send; blank GST becomes absent
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            gst_number: self
                .gst_number
                .as_deref()
                .map(|g| g.trim().to_ascii_uppercase())
                .filter(|g| !g.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::DomainError;

    fn draft() -> ClientDraft {
        ClientDraft {
            name: "Coolair Pvt Ltd".to_string(),
            contact_person: "R. Iyer".to_string(),
            email: "ops@coolair.in".to_string(),
            phone: "+91 98765 43210".to_string(),
            address: "Bengaluru".to_string(),
            gst_number: Some(" 29abcde1234f1z5 ".to_string()),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate().is_ok());
        assert_eq!(draft().normalized().gst_number.as_deref(), Some("29ABCDE1234F1Z5"));
    }

    #[test]
    fn test_rejects_bad_fields() {
        let mut bad = draft();
        bad.name = "  ".to_string();
        bad.email = "ops-at-coolair".to_string();
        bad.phone = "123".to_string();
        match bad.validate() {
            Err(DomainError::Validation(errors)) => {
                assert_eq!(errors.get("name"), Some("Required"));
                assert!(errors.get("email").is_some());
                assert!(errors.get("phone").is_some());
                assert!(errors.get("gst_number").is_none());
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_gst_is_dropped() {
        let mut d = draft();
        d.gst_number = Some("   ".to_string());
        assert!(d.validate().is_ok());
        let json = serde_json::to_value(d.normalized()).unwrap();
        assert!(json.get("gst_number").is_none());
    }
}
