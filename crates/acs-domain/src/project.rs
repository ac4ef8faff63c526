//! Project and Subproject Entities
//!
//! A project belongs to a client and is split into subprojects. Each
//! subproject carries a pricing/tenure configuration that is fixed at
//! creation time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::Searchable;
use crate::validate::{parse_amount, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Planned,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

status_badge!(ProjectStatus {
    Planned => ("Planned", Neutral),
    Active => ("Active", Info),
    OnHold => ("On hold", Warning),
    Completed => ("Completed", Success),
    Cancelled => ("Cancelled", Danger),
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub client_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entity for Project {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Project {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_deref().unwrap_or(""),
            self.status.as_label(),
        ]
    }
}

/// Body of `POST /projects` and `PUT /projects/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectDraft {
    pub client_id: RecordId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            client_id: project.client_id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_id("client_id", &self.client_id);
        errors.require("name", &self.name);
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.add("end_date", "End date cannot be before the start date");
            }
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl BillingCycle {
    pub const ALL: &'static [BillingCycle] = &[
        BillingCycle::Monthly,
        BillingCycle::Quarterly,
        BillingCycle::HalfYearly,
        BillingCycle::Yearly,
    ];

    pub fn months(&self) -> u32 {
        match self {
            BillingCycle::Monthly => 1,
            BillingCycle::Quarterly => 3,
            BillingCycle::HalfYearly => 6,
            BillingCycle::Yearly => 12,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "Monthly",
            BillingCycle::Quarterly => "Quarterly",
            BillingCycle::HalfYearly => "Half-yearly",
            BillingCycle::Yearly => "Yearly",
        }
    }
}

/// Pricing/tenure snapshot locked when the subproject is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubprojectConfiguration {
    pub planned_units: u32,
    pub monthly_rental_per_unit: f64,
    #[serde(default)]
    pub installation_charge_per_unit: f64,
    pub tenure_months: u32,
    #[serde(default)]
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub gst_percent: f64,
}

impl SubprojectConfiguration {
    /// Units × (rental × tenure + one-time installation charge), before tax
    pub fn contract_value(&self) -> f64 {
        let per_unit = self.monthly_rental_per_unit * self.tenure_months as f64
            + self.installation_charge_per_unit;
        per_unit * self.planned_units as f64
    }

    /// Amount raised per billing cycle across all units, before tax
    pub fn billing_amount(&self) -> f64 {
        self.monthly_rental_per_unit * self.billing_cycle.months() as f64 * self.planned_units as f64
    }

    pub fn with_gst(&self, amount: f64) -> f64 {
        amount * (1.0 + self.gst_percent / 100.0)
    }

    fn validate_into(&self, errors: &mut ValidationErrors) {
        if self.planned_units == 0 {
            errors.add("planned_units", "At least one unit is required");
        }
        if !(self.monthly_rental_per_unit > 0.0) {
            errors.add("monthly_rental_per_unit", "Rental must be greater than zero");
        }
        if self.installation_charge_per_unit < 0.0 {
            errors.add("installation_charge_per_unit", "Installation charge cannot be negative");
        }
        if !(1..=120).contains(&self.tenure_months) {
            errors.add("tenure_months", "Tenure must be between 1 and 120 months");
        }
        if !(0.0..=28.0).contains(&self.gst_percent) {
            errors.add("gst_percent", "GST must be between 0 and 28%");
        }
    }
}

impl Default for SubprojectConfiguration {
    fn default() -> Self {
        Self {
            planned_units: 1,
            monthly_rental_per_unit: 0.0,
            installation_charge_per_unit: 0.0,
            tenure_months: 36,
            billing_cycle: BillingCycle::Monthly,
            gst_percent: 18.0,
        }
    }
}

/// Configuration fields as typed into the create dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationInput {
    pub planned_units: String,
    pub monthly_rental_per_unit: String,
    pub installation_charge_per_unit: String,
    pub tenure_months: String,
    pub billing_cycle: BillingCycle,
    pub gst_percent: String,
}

impl Default for ConfigurationInput {
    fn default() -> Self {
        let defaults = SubprojectConfiguration::default();
        Self {
            planned_units: defaults.planned_units.to_string(),
            monthly_rental_per_unit: String::new(),
            installation_charge_per_unit: "0".to_string(),
            tenure_months: defaults.tenure_months.to_string(),
            billing_cycle: defaults.billing_cycle,
            gst_percent: defaults.gst_percent.to_string(),
        }
    }
}

impl ConfigurationInput {
    /// Parse and range-check every field. A blank installation charge
    /// means none.
    pub fn parse(&self) -> Result<SubprojectConfiguration, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let planned_units = self.planned_units.trim().parse::<u32>().unwrap_or_else(|_| {
            errors.add("planned_units", "Enter a whole number of units");
            0
        });
        let monthly_rental_per_unit = parse_amount(&self.monthly_rental_per_unit).unwrap_or_else(|| {
            errors.add("monthly_rental_per_unit", "Enter an amount");
            0.0
        });
        let installation_charge_per_unit = if self.installation_charge_per_unit.trim().is_empty() {
            0.0
        } else {
            parse_amount(&self.installation_charge_per_unit).unwrap_or_else(|| {
                errors.add("installation_charge_per_unit", "Enter an amount");
                0.0
            })
        };
        let tenure_months = self.tenure_months.trim().parse::<u32>().unwrap_or_else(|_| {
            errors.add("tenure_months", "Enter a number of months");
            0
        });
        let gst_percent = parse_amount(&self.gst_percent).unwrap_or_else(|| {
            errors.add("gst_percent", "Enter a percentage");
            0.0
        });

        let configuration = SubprojectConfiguration {
            planned_units,
            monthly_rental_per_unit,
            installation_charge_per_unit,
            tenure_months,
            billing_cycle: self.billing_cycle,
            gst_percent,
        };
        configuration.validate_into(&mut errors);
        if errors.is_empty() {
            Ok(configuration)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subproject {
    pub id: RecordId,
    pub project_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub status: ProjectStatus,
    pub configuration: SubprojectConfiguration,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Entity for Subproject {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Subproject {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.status.as_label()]
    }
}

/// Body of `POST /projects/{id}/subprojects`; the only request that may
/// carry a configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubprojectDraft {
    pub name: String,
    pub status: ProjectStatus,
    pub configuration: SubprojectConfiguration,
}

impl SubprojectDraft {
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        self.configuration.validate_into(&mut errors);
        errors.into_result()
    }
}

/// Body of `PUT /projects/{p}/subprojects/{s}`. Has no configuration
/// field: the configuration is immutable after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubprojectUpdate {
    pub name: String,
    pub status: ProjectStatus,
}

impl SubprojectUpdate {
    pub fn from_subproject(subproject: &Subproject) -> Self {
        Self {
            name: subproject.name.clone(),
            status: subproject.status,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SubprojectConfiguration {
        SubprojectConfiguration {
            planned_units: 10,
            monthly_rental_per_unit: 1500.0,
            installation_charge_per_unit: 2000.0,
            tenure_months: 24,
            billing_cycle: BillingCycle::Quarterly,
            gst_percent: 18.0,
        }
    }

    #[test]
    fn test_contract_value() {
        let c = config();
        assert_eq!(c.contract_value(), 10.0 * (1500.0 * 24.0 + 2000.0));
        assert_eq!(c.billing_amount(), 1500.0 * 3.0 * 10.0);
        assert!((c.with_gst(100.0) - 118.0).abs() < 1e-9);
    }

    #[test]
    fn test_subproject_draft_validation() {
        let mut draft = SubprojectDraft {
            name: "Phase 1".to_string(),
            status: ProjectStatus::Planned,
            configuration: config(),
        };
        assert!(draft.validate().is_ok());

        draft.configuration.tenure_months = 0;
        draft.configuration.monthly_rental_per_unit = 0.0;
        let err = draft.validate().unwrap_err().to_string();
        assert!(err.contains("tenure months"));
        assert!(err.contains("monthly rental per unit"));
    }

    #[test]
    fn test_configuration_input_parsing() {
        let input = ConfigurationInput {
            planned_units: "10".to_string(),
            monthly_rental_per_unit: "1,500".to_string(),
            installation_charge_per_unit: " ".to_string(),
            tenure_months: "24".to_string(),
            billing_cycle: BillingCycle::Quarterly,
            gst_percent: "18".to_string(),
        };
        let parsed = input.parse().unwrap();
        assert_eq!(parsed.planned_units, 10);
        assert_eq!(parsed.monthly_rental_per_unit, 1500.0);
        assert_eq!(parsed.installation_charge_per_unit, 0.0);

        let bad = ConfigurationInput {
            planned_units: "ten".to_string(),
            tenure_months: "200".to_string(),
            ..input
        };
        let errors = bad.parse().unwrap_err();
        assert_eq!(errors.get("planned_units"), Some("Enter a whole number of units"));
        assert_eq!(errors.get("tenure_months"), Some("Tenure must be between 1 and 120 months"));
        assert!(errors.get("gst_percent").is_none());
    }

    #[test]
    fn test_configuration_input_defaults_need_a_rental() {
        let errors = ConfigurationInput::default().parse().unwrap_err();
        assert_eq!(errors.get("monthly_rental_per_unit"), Some("Enter an amount"));
        assert!(errors.get("planned_units").is_none());
    }

    #[test]
    fn test_update_payload_has_no_configuration() {
        let json = serde_json::to_value(SubprojectUpdate {
            name: "Phase 1b".to_string(),
            status: ProjectStatus::Active,
        })
        .unwrap();
        assert!(json.get("configuration").is_none());
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn test_project_dates_must_be_ordered() {
        let draft = ProjectDraft {
            client_id: RecordId::from("c1"),
            name: "Metro depots".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 1),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_project_decodes_with_defaults() {
        let project: Project = serde_json::from_str(
            r#"{"id": 7, "client_id": "c1", "name": "Depots", "status": "on_hold", "start_date": "2026-01-15"}"#,
        )
        .unwrap();
        assert_eq!(project.status, ProjectStatus::OnHold);
        assert_eq!(project.start_date, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert!(project.end_date.is_none());
    }
}
