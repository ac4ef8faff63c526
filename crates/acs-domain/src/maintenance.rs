//! Maintenance Tickets
//!
//! Service requests raised against installed assets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{DomainResult, Entity, RecordId};
use crate::search::Searchable;
use crate::validate::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

status_badge!(TicketPriority {
    Low => ("Low", Neutral),
    Medium => ("Medium", Info),
    High => ("High", Warning),
    Critical => ("Critical", Danger),
});

impl TicketPriority {
    /// Days allowed between opening and resolution
    pub fn sla_days(&self) -> i64 {
        match self {
            TicketPriority::Critical => 1,
            TicketPriority::High => 2,
            TicketPriority::Medium => 5,
            TicketPriority::Low => 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

status_badge!(TicketStatus {
    Open => ("Open", Danger),
    InProgress => ("In progress", Warning),
    Resolved => ("Resolved", Success),
    Closed => ("Closed", Neutral),
});

impl TicketStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, TicketStatus::Open | TicketStatus::InProgress)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTicket {
    pub id: RecordId,
    pub asset_id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TicketPriority,
    #[serde(default)]
    pub status: TicketStatus,
    pub opened_on: NaiveDate,
    #[serde(default)]
    pub resolved_on: Option<NaiveDate>,
}

impl Entity for MaintenanceTicket {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for MaintenanceTicket {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_deref().unwrap_or(""),
            self.priority.as_label(),
            self.status.as_label(),
            self.asset_id.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TicketDraft {
    pub asset_id: RecordId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_on: Option<NaiveDate>,
}

impl TicketDraft {
    pub fn from_ticket(ticket: &MaintenanceTicket) -> Self {
        Self {
            asset_id: ticket.asset_id.clone(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            priority: ticket.priority,
            status: ticket.status,
            resolved_on: ticket.resolved_on,
        }
    }

    /// Draft that resolves the ticket on `date`
    pub fn resolved(ticket: &MaintenanceTicket, date: NaiveDate) -> Self {
        let mut draft = Self::from_ticket(ticket);
        draft.status = TicketStatus::Resolved;
        draft.resolved_on = Some(date);
        draft
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_id("asset_id", &self.asset_id);
        errors.require("title", &self.title);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering_and_sla() {
        assert!(TicketPriority::Critical > TicketPriority::Low);
        assert_eq!(TicketPriority::High.sla_days(), 2);
    }

    #[test]
    fn test_resolve_draft() {
        let ticket: MaintenanceTicket = serde_json::from_str(
            r#"{"id":"t1","asset_id":"a1","title":"Gas leak","priority":"critical","opened_on":"2026-10-01"}"#,
        )
        .unwrap();
        assert!(ticket.status.is_open());
        let draft = TicketDraft::resolved(&ticket, NaiveDate::from_ymd_opt(2026, 10, 2).unwrap());
        assert_eq!(draft.status, TicketStatus::Resolved);
        assert!(draft.validate().is_ok());
    }
}
