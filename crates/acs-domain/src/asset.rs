//! ACS Asset Entity
//!
//! A cooling unit tracked from stock through installation, maintenance and
//! decommissioning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::{PickerOption, Searchable};
use crate::validate::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    #[default]
    InStock,
    Installed,
    UnderMaintenance,
    Decommissioned,
}

status_badge!(AssetStatus {
    InStock => ("In stock", Neutral),
    Installed => ("Installed", Success),
    UnderMaintenance => ("Under maintenance", Warning),
    Decommissioned => ("Decommissioned", Danger),
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcsAsset {
    pub id: RecordId,
    #[serde(default)]
    pub site_id: Option<RecordId>,
    #[serde(default)]
    pub subproject_id: Option<RecordId>,
    pub serial_number: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub capacity_tons: f64,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default)]
    pub installed_on: Option<NaiveDate>,
}

impl AcsAsset {
    /// Counts toward a subproject's installed units; a unit under
    /// maintenance is still on site
    pub fn is_installed(&self) -> bool {
        matches!(self.status, AssetStatus::Installed | AssetStatus::UnderMaintenance)
    }

    /// Entry for unit pickers: serial, model and capacity
    pub fn picker_option(&self) -> PickerOption {
        let mut label = self.serial_number.clone();
        if !self.model.is_empty() {
            label.push_str(" · ");
            label.push_str(&self.model);
        }
        if self.capacity_tons > 0.0 {
            label.push_str(&format!(" ({} T)", self.capacity_tons));
        }
        PickerOption::new(self.id.clone(), label)
    }
}

impl Entity for AcsAsset {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for AcsAsset {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.serial_number.as_str(), self.model.as_str(), self.status.as_label()]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssetDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subproject_id: Option<RecordId>,
    pub serial_number: String,
    pub model: String,
    pub capacity_tons: f64,
    pub status: AssetStatus,
}

impl AssetDraft {
    pub fn from_asset(asset: &AcsAsset) -> Self {
        Self {
            site_id: asset.site_id.clone(),
            subproject_id: asset.subproject_id.clone(),
            serial_number: asset.serial_number.clone(),
            model: asset.model.clone(),
            capacity_tons: asset.capacity_tons,
            status: asset.status,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require("serial_number", &self.serial_number);
        errors.require("model", &self.model);
        if !(self.capacity_tons > 0.0 && self.capacity_tons <= 50.0) {
            errors.add("capacity_tons", "Capacity must be between 0 and 50 tons");
        }
        if self.status == AssetStatus::Installed && self.site_id.as_ref().map_or(true, RecordId::is_empty) {
            errors.add("site_id", "Installed units need a site");
        }
        errors.into_result()
    }
}

/// Count assets per status, in `AssetStatus::ALL` order
pub fn count_by_status(assets: &[AcsAsset]) -> Vec<(AssetStatus, usize)> {
    AssetStatus::ALL
        .iter()
        .map(|status| (*status, assets.iter().filter(|a| a.status == *status).count()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_needs_site() {
        let mut draft = AssetDraft {
            serial_number: "SN-001".to_string(),
            model: "CoolMax 1.5".to_string(),
            capacity_tons: 1.5,
            status: AssetStatus::Installed,
            ..Default::default()
        };
        assert!(draft.validate().is_err());
        draft.site_id = Some(RecordId::from("s1"));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_count_by_status() {
        let assets: Vec<AcsAsset> = serde_json::from_str(
            r#"[{"id":1,"serial_number":"a","status":"installed"},
                {"id":2,"serial_number":"b","status":"installed"},
                {"id":3,"serial_number":"c"}]"#,
        )
        .unwrap();
        let counts = count_by_status(&assets);
        assert_eq!(counts[0], (AssetStatus::InStock, 1));
        assert_eq!(counts[1], (AssetStatus::Installed, 2));
        assert_eq!(counts[3], (AssetStatus::Decommissioned, 0));
    }

    #[test]
    fn test_picker_label() {
        let assets: Vec<AcsAsset> = serde_json::from_str(
            r#"[{"id":7,"serial_number":"SN-7","model":"Voltas","capacity_tons":1.5},
                {"id":8,"serial_number":"SN-8"}]"#,
        )
        .unwrap();
        assert_eq!(assets[0].picker_option().label, "SN-7 · Voltas (1.5 T)");
        assert_eq!(assets[0].picker_option().id, RecordId::from(7_i64));
        assert_eq!(assets[1].picker_option().label, "SN-8");
    }
}
