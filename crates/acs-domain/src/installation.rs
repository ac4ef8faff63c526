//! Installation Entity
//!
//! Scheduled installation of one asset at one site.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::Searchable;
use crate::validate::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

status_badge!(InstallationStatus {
    Scheduled => ("Scheduled", Info),
    InProgress => ("In progress", Warning),
    Completed => ("Completed", Success),
    Cancelled => ("Cancelled", Neutral),
});

impl InstallationStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, InstallationStatus::Completed | InstallationStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    pub id: RecordId,
    pub asset_id: RecordId,
    pub site_id: RecordId,
    pub scheduled_date: NaiveDate,
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub technician: Option<String>,
    #[serde(default)]
    pub status: InstallationStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Entity for Installation {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Installation {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.technician.as_deref().unwrap_or(""),
            self.notes.as_deref().unwrap_or(""),
            self.status.as_label(),
            self.asset_id.as_str(),
            self.site_id.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstallationDraft {
    pub asset_id: RecordId,
    pub site_id: RecordId,
    pub scheduled_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    pub status: InstallationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InstallationDraft {
    pub fn new(scheduled_date: NaiveDate) -> Self {
        Self {
            asset_id: RecordId::default(),
            site_id: RecordId::default(),
            scheduled_date,
            technician: None,
            status: InstallationStatus::Scheduled,
            completed_date: None,
            notes: None,
        }
    }

    pub fn from_installation(installation: &Installation) -> Self {
        Self {
            asset_id: installation.asset_id.clone(),
            site_id: installation.site_id.clone(),
            scheduled_date: installation.scheduled_date,
            technician: installation.technician.clone(),
            status: installation.status,
            completed_date: installation.completed_date,
            notes: installation.notes.clone(),
        }
    }

    /// Draft that marks the installation done on `date`
    pub fn completed_on(installation: &Installation, date: NaiveDate) -> Self {
        let mut draft = Self::from_installation(installation);
        draft.status = InstallationStatus::Completed;
        draft.completed_date = Some(date);
        draft
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_id("asset_id", &self.asset_id);
        errors.require_id("site_id", &self.site_id);
        if self.status == InstallationStatus::Completed && self.completed_date.is_none() {
            errors.add("completed_date", "Completion date is required");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_on() {
        let installation: Installation = serde_json::from_str(
            r#"{"id":1,"asset_id":"a1","site_id":"s1","scheduled_date":"2026-10-10"}"#,
        )
        .unwrap();
        let draft = InstallationDraft::completed_on(&installation, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert!(draft.validate().is_ok());
        assert_eq!(draft.status, InstallationStatus::Completed);
    }

    #[test]
    fn test_requires_asset_and_site() {
        let draft = InstallationDraft::new(NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        let err = draft.validate().unwrap_err().to_string();
        assert!(err.contains("asset id"));
        assert!(err.contains("site id"));
    }
}
