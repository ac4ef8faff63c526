//! Dashboard Summary
//!
//! Headline numbers for the landing page, derived from the collections the
//! page has already fetched.

use chrono::NaiveDate;

use crate::asset::{count_by_status, AcsAsset, AssetStatus};
use crate::finance::{FinanceSummary, FinancialTransaction};
use crate::format::percentage;
use crate::installation::{Installation, InstallationStatus};
use crate::maintenance::MaintenanceTicket;
use crate::project::{Project, ProjectStatus};
use crate::timeline::{is_installation_overdue, is_sla_breached};

/// How many overdue items the landing page lists
pub const OVERDUE_LIST_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub assets_by_status: Vec<(AssetStatus, usize)>,
    pub total_assets: usize,
    pub installations_completed: usize,
    /// Scheduled installations, cancelled ones excluded
    pub installations_planned: usize,
    pub installation_completion: f64,
    pub overdue_installations: Vec<Installation>,
    pub open_tickets: usize,
    pub sla_breaches: Vec<MaintenanceTicket>,
    pub finance: FinanceSummary,
}

impl DashboardSummary {
    pub fn derive(
        projects: &[Project],
        assets: &[AcsAsset],
        installations: &[Installation],
        tickets: &[MaintenanceTicket],
        transactions: &[FinancialTransaction],
        currency: &str,
        today: NaiveDate,
    ) -> Self {
        let active_projects = projects.iter().filter(|p| p.status == ProjectStatus::Active).count();

        let planned: Vec<&Installation> = installations
            .iter()
            .filter(|i| i.status != InstallationStatus::Cancelled)
            .collect();
        let completed = planned.iter().filter(|i| i.status == InstallationStatus::Completed).count();

        // Most overdue first
        let mut overdue: Vec<Installation> = installations
            .iter()
            .filter(|i| is_installation_overdue(i, today))
            .cloned()
            .collect();
        overdue.sort_by_key(|i| i.scheduled_date);

        let mut breaches: Vec<MaintenanceTicket> = tickets
            .iter()
            .filter(|t| t.status.is_open() && is_sla_breached(t, today))
            .cloned()
            .collect();
        breaches.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.opened_on.cmp(&b.opened_on)));

        Self {
            total_projects: projects.len(),
            active_projects,
            assets_by_status: count_by_status(assets),
            total_assets: assets.len(),
            installations_completed: completed,
            installations_planned: planned.len(),
            installation_completion: percentage(completed as f64, planned.len() as f64),
            overdue_installations: overdue,
            open_tickets: tickets.iter().filter(|t| t.status.is_open()).count(),
            sla_breaches: breaches,
            finance: FinanceSummary::from_transactions(transactions, currency),
        }
    }

    pub fn outstanding(&self) -> f64 {
        self.finance.outstanding()
    }

    pub fn assets_with(&self, status: AssetStatus) -> usize {
        self.assets_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}
