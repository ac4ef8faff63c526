//! Users and Roles
//!
//! Dashboard accounts managed under `/admin/users`.

use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::Searchable;
use crate::validate::{is_valid_email, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ProjectManager,
    Technician,
    Finance,
    #[default]
    Viewer,
}

status_badge!(Role {
    Admin => ("Admin", Danger),
    ProjectManager => ("Project manager", Info),
    Technician => ("Technician", Warning),
    Finance => ("Finance", Success),
    Viewer => ("Viewer", Neutral),
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub last_login: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// First letter for the avatar circle
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl Entity for User {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.as_label()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

impl UserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            active: user.active,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if !is_valid_email(&self.email) {
            errors.add("email", "Enter a valid email address");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_str(r#"{"id":3,"name":"asha","email":"asha@x.in","role":"project_manager"}"#).unwrap();
        assert!(user.active);
        assert_eq!(user.role, Role::ProjectManager);
        assert_eq!(user.initial(), "A");
    }

    #[test]
    fn test_user_draft() {
        let draft = UserDraft { name: "Asha".to_string(), email: "bad".to_string(), ..Default::default() };
        assert!(draft.validate().is_err());
    }
}
