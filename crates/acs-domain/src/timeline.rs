//! Timeline Badges
//!
//! Status pills derived from dates already present in API payloads. Every
//! function takes `today` so the result does not depend on the clock.

use chrono::NaiveDate;

use crate::badge::{Badge, Tone};
use crate::format::percentage;
use crate::installation::{Installation, InstallationStatus};
use crate::maintenance::MaintenanceTicket;
use crate::project::{Project, ProjectStatus};

/// Projects ending within this many days are flagged
pub const DUE_SOON_DAYS: i64 = 14;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallationBadge {
    Completed { late_by_days: i64 },
    Cancelled,
    Overdue { days: i64 },
    DueToday,
    Upcoming { in_days: i64 },
}

impl Badge for InstallationBadge {
    fn label(&self) -> String {
        match self {
            InstallationBadge::Completed { late_by_days: 0 } => "Completed on time".to_string(),
            InstallationBadge::Completed { late_by_days } => {
                format!("Completed {} late", plural(*late_by_days, "day"))
            }
            InstallationBadge::Cancelled => "Cancelled".to_string(),
            InstallationBadge::Overdue { days } => format!("Overdue by {}", plural(*days, "day")),
            InstallationBadge::DueToday => "Due today".to_string(),
            InstallationBadge::Upcoming { in_days } => format!("In {}", plural(*in_days, "day")),
        }
    }

    fn tone(&self) -> Tone {
        match self {
            InstallationBadge::Completed { late_by_days: 0 } => Tone::Success,
            InstallationBadge::Completed { .. } => Tone::Warning,
            InstallationBadge::Cancelled => Tone::Neutral,
            InstallationBadge::Overdue { .. } => Tone::Danger,
            InstallationBadge::DueToday => Tone::Warning,
            InstallationBadge::Upcoming { .. } => Tone::Info,
        }
    }
}

pub fn installation_badge(installation: &Installation, today: NaiveDate) -> InstallationBadge {
    match installation.status {
        InstallationStatus::Cancelled => InstallationBadge::Cancelled,
        InstallationStatus::Completed => {
            let done = installation.completed_date.unwrap_or(installation.scheduled_date);
            let late = (done - installation.scheduled_date).num_days().max(0);
            InstallationBadge::Completed { late_by_days: late }
        }
        InstallationStatus::Scheduled | InstallationStatus::InProgress => {
            let days = (installation.scheduled_date - today).num_days();
            match days {
                0 => InstallationBadge::DueToday,
                d if d > 0 => InstallationBadge::Upcoming { in_days: d },
                d => InstallationBadge::Overdue { days: -d },
            }
        }
    }
}

pub fn is_installation_overdue(installation: &Installation, today: NaiveDate) -> bool {
    matches!(installation_badge(installation, today), InstallationBadge::Overdue { .. })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlaBadge {
    Within { days_left: i64 },
    Breached { by_days: i64 },
    ResolvedWithin,
    ResolvedLate { by_days: i64 },
}

impl Badge for SlaBadge {
    fn label(&self) -> String {
        match self {
            SlaBadge::Within { days_left: 0 } => "SLA ends today".to_string(),
            SlaBadge::Within { days_left } => format!("{} left", plural(*days_left, "day")),
            SlaBadge::Breached { by_days } => format!("SLA breached by {}", plural(*by_days, "day")),
            SlaBadge::ResolvedWithin => "Resolved within SLA".to_string(),
            SlaBadge::ResolvedLate { by_days } => format!("Resolved {} past SLA", plural(*by_days, "day")),
        }
    }

    fn tone(&self) -> Tone {
        match self {
            SlaBadge::Within { days_left: 0 } => Tone::Warning,
            SlaBadge::Within { .. } => Tone::Info,
            SlaBadge::Breached { .. } => Tone::Danger,
            SlaBadge::ResolvedWithin => Tone::Success,
            SlaBadge::ResolvedLate { .. } => Tone::Warning,
        }
    }
}

pub fn ticket_sla(ticket: &MaintenanceTicket, today: NaiveDate) -> SlaBadge {
    let due = ticket.opened_on + chrono::Duration::days(ticket.priority.sla_days());
    if ticket.status.is_open() {
        let left = (due - today).num_days();
        if left >= 0 {
            SlaBadge::Within { days_left: left }
        } else {
            SlaBadge::Breached { by_days: -left }
        }
    } else {
        let resolved = ticket.resolved_on.unwrap_or(today);
        let over = (resolved - due).num_days();
        if over <= 0 {
            SlaBadge::ResolvedWithin
        } else {
            SlaBadge::ResolvedLate { by_days: over }
        }
    }
}

pub fn is_sla_breached(ticket: &MaintenanceTicket, today: NaiveDate) -> bool {
    matches!(ticket_sla(ticket, today), SlaBadge::Breached { .. })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectTimeline {
    Unscheduled,
    NotStarted { starts_in_days: i64 },
    /// Started with no end date set
    InProgress,
    OnTrack { days_left: i64 },
    DueSoon { days_left: i64 },
    Overdue { by_days: i64 },
    Completed,
    Cancelled,
}

impl Badge for ProjectTimeline {
    fn label(&self) -> String {
        match self {
            ProjectTimeline::Unscheduled => "Unscheduled".to_string(),
            ProjectTimeline::NotStarted { starts_in_days } => {
                format!("Starts in {}", plural(*starts_in_days, "day"))
            }
            ProjectTimeline::InProgress => "No end date".to_string(),
            ProjectTimeline::OnTrack { days_left } => format!("{} left", plural(*days_left, "day")),
            ProjectTimeline::DueSoon { days_left: 0 } => "Due today".to_string(),
            ProjectTimeline::DueSoon { days_left } => format!("Due in {}", plural(*days_left, "day")),
            ProjectTimeline::Overdue { by_days } => format!("Overdue by {}", plural(*by_days, "day")),
            ProjectTimeline::Completed => "Completed".to_string(),
            ProjectTimeline::Cancelled => "Cancelled".to_string(),
        }
    }

    fn tone(&self) -> Tone {
        match self {
            ProjectTimeline::Unscheduled => Tone::Neutral,
            ProjectTimeline::NotStarted { .. } => Tone::Neutral,
            ProjectTimeline::InProgress => Tone::Info,
            ProjectTimeline::OnTrack { .. } => Tone::Info,
            ProjectTimeline::DueSoon { .. } => Tone::Warning,
            ProjectTimeline::Overdue { .. } => Tone::Danger,
            ProjectTimeline::Completed => Tone::Success,
            ProjectTimeline::Cancelled => Tone::Neutral,
        }
    }
}

pub fn project_timeline(project: &Project, today: NaiveDate) -> ProjectTimeline {
    match project.status {
        ProjectStatus::Completed => return ProjectTimeline::Completed,
        ProjectStatus::Cancelled => return ProjectTimeline::Cancelled,
        _ => {}
    }
    if let Some(start) = project.start_date {
        if start > today {
            return ProjectTimeline::NotStarted { starts_in_days: (start - today).num_days() };
        }
    }
    match project.end_date {
        None if project.start_date.is_none() => ProjectTimeline::Unscheduled,
        None => ProjectTimeline::InProgress,
        Some(end) => {
            let left = (end - today).num_days();
            if left < 0 {
                ProjectTimeline::Overdue { by_days: -left }
            } else if left <= DUE_SOON_DAYS {
                ProjectTimeline::DueSoon { days_left: left }
            } else {
                ProjectTimeline::OnTrack { days_left: left }
            }
        }
    }
}

/// Installed share of the planned units, 0-100
pub fn project_progress(planned_units: u32, installed_units: usize) -> f64 {
    percentage(installed_units as f64, planned_units as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RecordId;
    use crate::maintenance::{TicketPriority, TicketStatus};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn installation(status: InstallationStatus, scheduled: NaiveDate, completed: Option<NaiveDate>) -> Installation {
        Installation {
            id: RecordId::from("i1"),
            asset_id: RecordId::from("a1"),
            site_id: RecordId::from("s1"),
            scheduled_date: scheduled,
            completed_date: completed,
            technician: None,
            status,
            notes: None,
        }
    }

    #[test]
    fn test_installation_badges() {
        let today = d(10, 17);
        let badge = installation_badge(&installation(InstallationStatus::Scheduled, d(10, 20), None), today);
        assert_eq!(badge, InstallationBadge::Upcoming { in_days: 3 });
        assert_eq!(badge.label(), "In 3 days");

        let badge = installation_badge(&installation(InstallationStatus::InProgress, d(10, 16), None), today);
        assert_eq!(badge.label(), "Overdue by 1 day");
        assert_eq!(badge.tone(), Tone::Danger);

        let badge = installation_badge(&installation(InstallationStatus::Scheduled, today, None), today);
        assert_eq!(badge, InstallationBadge::DueToday);

        let badge = installation_badge(
            &installation(InstallationStatus::Completed, d(10, 1), Some(d(10, 4))),
            today,
        );
        assert_eq!(badge.label(), "Completed 3 days late");

        let badge = installation_badge(
            &installation(InstallationStatus::Completed, d(10, 5), Some(d(10, 4))),
            today,
        );
        assert_eq!(badge.label(), "Completed on time");
    }

    fn ticket(priority: TicketPriority, status: TicketStatus, opened: NaiveDate, resolved: Option<NaiveDate>) -> MaintenanceTicket {
        MaintenanceTicket {
            id: RecordId::from("t1"),
            asset_id: RecordId::from("a1"),
            title: "Noise".to_string(),
            description: None,
            priority,
            status,
            opened_on: opened,
            resolved_on: resolved,
        }
    }

    #[test]
    fn test_ticket_sla() {
        let today = d(10, 17);
        let open = ticket(TicketPriority::High, TicketStatus::Open, d(10, 16), None);
        assert_eq!(ticket_sla(&open, today), SlaBadge::Within { days_left: 1 });

        let breached = ticket(TicketPriority::Critical, TicketStatus::InProgress, d(10, 10), None);
        assert_eq!(ticket_sla(&breached, today), SlaBadge::Breached { by_days: 6 });
        assert!(is_sla_breached(&breached, today));

        let late = ticket(TicketPriority::Medium, TicketStatus::Resolved, d(10, 1), Some(d(10, 9)));
        assert_eq!(ticket_sla(&late, today).label(), "Resolved 3 days past SLA");

        let ok = ticket(TicketPriority::Low, TicketStatus::Closed, d(10, 1), Some(d(10, 2)));
        assert_eq!(ticket_sla(&ok, today), SlaBadge::ResolvedWithin);
    }

    fn project(status: ProjectStatus, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Project {
        Project {
            id: RecordId::from("p1"),
            client_id: RecordId::from("c1"),
            name: "Depots".to_string(),
            description: None,
            status,
            start_date: start,
            end_date: end,
            created_at: None,
        }
    }

    #[test]
    fn test_project_timeline() {
        let today = d(10, 17);
        assert_eq!(project_timeline(&project(ProjectStatus::Active, None, None), today), ProjectTimeline::Unscheduled);
        assert_eq!(
            project_timeline(&project(ProjectStatus::Planned, Some(d(10, 27)), Some(d(12, 1))), today),
            ProjectTimeline::NotStarted { starts_in_days: 10 }
        );
        assert_eq!(
            project_timeline(&project(ProjectStatus::Active, Some(d(9, 1)), Some(d(10, 31))), today),
            ProjectTimeline::DueSoon { days_left: 14 }
        );
        assert_eq!(
            project_timeline(&project(ProjectStatus::Active, Some(d(9, 1)), Some(d(10, 7))), today),
            ProjectTimeline::Overdue { by_days: 10 }
        );
        assert_eq!(
            project_timeline(&project(ProjectStatus::Completed, Some(d(9, 1)), Some(d(10, 7))), today),
            ProjectTimeline::Completed
        );
    }

    #[test]
    fn test_started_project_without_end_date() {
        let today = d(10, 17);
        let timeline = project_timeline(&project(ProjectStatus::Active, Some(d(9, 1)), None), today);
        assert_eq!(timeline, ProjectTimeline::InProgress);
        assert_eq!(timeline.label(), "No end date");
        assert_eq!(timeline.tone(), Tone::Info);
    }

    #[test]
    fn test_progress() {
        assert_eq!(project_progress(40, 10), 25.0);
        assert_eq!(project_progress(0, 3), 0.0);
    }
}
