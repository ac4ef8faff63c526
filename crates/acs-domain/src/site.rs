//! Site Entity
//!
//! Physical locations within a subproject where units get installed.

use serde::{Deserialize, Serialize};

use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::Searchable;
use crate::validate::{is_valid_phone, is_valid_pincode, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: RecordId,
    pub subproject_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

impl Site {
    /// `City, State` for table cells
    pub fn locality(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        }
    }
}

impl Entity for Site {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Site {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.pincode.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteDraft {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl SiteDraft {
    pub fn from_site(site: &Site) -> Self {
        Self {
            name: site.name.clone(),
            address: site.address.clone(),
            city: site.city.clone(),
            state: site.state.clone(),
            pincode: site.pincode.clone(),
            contact_name: site.contact_name.clone(),
            contact_phone: site.contact_phone.clone(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.require("address", &self.address);
        errors.require("city", &self.city);
        if !is_valid_pincode(&self.pincode) {
            errors.add("pincode", "Pincode must be 6 digits");
        }
        if let Some(phone) = self.contact_phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if !is_valid_phone(phone) {
                errors.add("contact_phone", "Phone must have 10-15 digits");
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_draft() {
        let mut draft = SiteDraft {
            name: "Andheri depot".to_string(),
            address: "Plot 4, MIDC".to_string(),
            city: "Mumbai".to_string(),
            state: "Maharashtra".to_string(),
            pincode: "400093".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        draft.pincode = "4000".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_locality() {
        let site: Site = serde_json::from_str(r#"{"id":1,"subproject_id":2,"name":"A","city":"Pune"}"#).unwrap();
        assert_eq!(site.locality(), "Pune");
    }
}
