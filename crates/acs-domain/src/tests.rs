//! Cross-module Tests
//!
//! Flows that span several modules: an import from upload to revert, the
//! audit revert preview, and the landing page summary.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use crate::{
        cascade_closure, mark_reverted, revert_check, AcsAsset, ApiConfig, ApiRoute, AssetStatus, AuditEntry, Badge,
        DashboardSummary, DomainError, FinancialTransaction, ImportWizard, Installation, InstallationStatus,
        ListResponse, MaintenanceTicket, ProcessOutcome, Project, ProjectStatus, RecordId, RowStatus, TicketPriority,
        TicketStatus, TransactionKind, UploadAction, UploadRow, UploadSession, UploadStatus, WizardStep,
    };

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn upload_row(n: u32, status: RowStatus, site: &str) -> UploadRow {
        UploadRow {
            row_number: n,
            status,
            messages: if status == RowStatus::Error { vec!["unknown site".to_string()] } else { Vec::new() },
            values: BTreeMap::from([
                ("serial".to_string(), format!("SN-{}", n)),
                ("site".to_string(), site.to_string()),
            ]),
        }
    }

    fn session(rows: Vec<UploadRow>) -> UploadSession {
        UploadSession {
            id: RecordId::from(12_i64),
            project_id: RecordId::from(1_i64),
            subproject_id: RecordId::from(3_i64),
            file_name: "batch-1.xlsx".to_string(),
            status: UploadStatus::Validated,
            columns: vec!["serial".to_string(), "site".to_string()],
            rows,
            uploaded_by: Some("asha".to_string()),
            created_at: None,
        }
    }

    #[test]
    fn test_import_with_corrections() {
        let config = ApiConfig::default();
        let mut wizard = ImportWizard::new(config.max_upload_bytes());

        wizard.choose_file("batch-1.xlsx", 40_000).unwrap();
        wizard.begin_upload().unwrap();
        wizard
            .upload_succeeded(session(vec![
                upload_row(1, RowStatus::Success, "S1"),
                upload_row(2, RowStatus::Error, "S?"),
            ]))
            .unwrap();
        assert!(!wizard.can_process());

        wizard.edit_cell(2, "site", "S2").unwrap();
        let payload = serde_json::to_value(wizard.corrections()).unwrap();
        assert_eq!(payload["rows"][0]["row_number"], 2);
        assert_eq!(payload["rows"][0]["values"]["site"], "S2");

        wizard.begin_corrections().unwrap();
        wizard
            .corrections_applied(session(vec![
                upload_row(1, RowStatus::Success, "S1"),
                upload_row(2, RowStatus::Success, "S2"),
            ]))
            .unwrap();
        assert!(!wizard.has_edits());
        assert!(wizard.can_process());

        let route = ApiRoute::UploadAction {
            project: RecordId::from(1_i64),
            subproject: RecordId::from(3_i64),
            upload: wizard.session().unwrap().id.clone(),
            action: UploadAction::Process,
        };
        assert_eq!(config.url(&route.path()), "/api/projects/1/subprojects/3/uploads/12/process");

        wizard.begin_process().unwrap();
        let outcome: ProcessOutcome = serde_json::from_str(r#"{"processed_rows": 2}"#).unwrap();
        wizard.processed(outcome).unwrap();
        assert_eq!(wizard.step(), WizardStep::Completed);
        assert_eq!(wizard.outcome().unwrap().processed_rows, 2);
    }

    #[test]
    fn test_wizard_rejects_out_of_order_calls() {
        let mut wizard = ImportWizard::new(1024);
        assert!(matches!(
            wizard.processed(ProcessOutcome::default()),
            Err(DomainError::InvalidTransition { .. })
        ));
        let err = wizard.begin_revert().unwrap_err();
        assert_eq!(err.to_string(), "Cannot revert while selecting a file");
    }

    fn audit(id: i64, deps: &[i64]) -> AuditEntry {
        AuditEntry {
            id: RecordId::from(id),
            action: "site.create".to_string(),
            entity_type: "site".to_string(),
            entity_id: None,
            actor: "ravi".to_string(),
            timestamp: "2026-10-01T09:30:00Z".to_string(),
            summary: None,
            revertable: true,
            reverted: false,
            dependent_ids: deps.iter().map(|d| RecordId::from(*d)).collect(),
        }
    }

    #[test]
    fn test_audit_revert_cascade() {
        let page: ListResponse<AuditEntry> = serde_json::from_value(serde_json::json!({
            "items": [
                serde_json::to_value(audit(1, &[2])).unwrap(),
                serde_json::to_value(audit(2, &[3])).unwrap(),
                serde_json::to_value(audit(3, &[])).unwrap(),
            ],
            "total": 40
        }))
        .unwrap();
        let (mut entries, total) = page.into_parts();
        assert_eq!(total, 40);

        let preview: Vec<String> = cascade_closure(&RecordId::from(1_i64), &entries)
            .iter()
            .map(|e| e.id.to_string())
            .collect();
        assert_eq!(preview, vec!["2", "3"]);
        assert!(revert_check(&entries[0], &entries, false).is_err());
        assert!(revert_check(&entries[0], &entries, true).is_ok());

        let ids: Vec<RecordId> = [1_i64, 2, 3].into_iter().map(RecordId::from).collect();
        assert_eq!(mark_reverted(&mut entries, &ids), 3);
        assert!(matches!(revert_check(&entries[0], &entries, true), Err(DomainError::Conflict(_))));
        assert_eq!(entries[2].revert_state().label(), "Reverted");
    }

    #[test]
    fn test_dashboard_summary() {
        let today = d(10, 17);
        let project = |id: i64, status| Project {
            id: RecordId::from(id),
            client_id: RecordId::from(1_i64),
            name: format!("Project {}", id),
            description: None,
            status,
            start_date: None,
            end_date: None,
            created_at: None,
        };
        let asset = |id: i64, status| AcsAsset {
            id: RecordId::from(id),
            site_id: None,
            subproject_id: None,
            serial_number: format!("SN-{}", id),
            model: "CoolMax".to_string(),
            capacity_tons: 1.5,
            status,
            installed_on: None,
        };
        let install = |id: i64, scheduled, status| Installation {
            id: RecordId::from(id),
            asset_id: RecordId::from(id),
            site_id: RecordId::from(1_i64),
            scheduled_date: scheduled,
            completed_date: None,
            technician: None,
            status,
            notes: None,
        };
        let ticket = |id: i64, priority, opened, status| MaintenanceTicket {
            id: RecordId::from(id),
            asset_id: RecordId::from(1_i64),
            title: "Not cooling".to_string(),
            description: None,
            priority,
            status,
            opened_on: opened,
            resolved_on: None,
        };
        let txn = |kind, amount| FinancialTransaction {
            id: RecordId::from(1_i64),
            project_id: RecordId::from(1_i64),
            subproject_id: None,
            kind,
            amount,
            currency: "INR".to_string(),
            date: d(9, 1),
            reference: None,
            notes: None,
        };

        let summary = DashboardSummary::derive(
            &[project(1, ProjectStatus::Active), project(2, ProjectStatus::Completed)],
            &[asset(1, AssetStatus::Installed), asset(2, AssetStatus::InStock), asset(3, AssetStatus::Installed)],
            &[
                install(1, d(10, 1), InstallationStatus::Completed),
                install(2, d(10, 10), InstallationStatus::Scheduled),
                install(3, d(10, 5), InstallationStatus::InProgress),
                install(4, d(11, 1), InstallationStatus::Scheduled),
                install(5, d(9, 1), InstallationStatus::Cancelled),
            ],
            &[
                ticket(1, TicketPriority::Low, d(10, 1), TicketStatus::Open),
                ticket(2, TicketPriority::Critical, d(10, 14), TicketStatus::InProgress),
                ticket(3, TicketPriority::High, d(10, 16), TicketStatus::Open),
                ticket(4, TicketPriority::Critical, d(9, 1), TicketStatus::Closed),
            ],
            &[
                txn(TransactionKind::Invoice, 100_000.0),
                txn(TransactionKind::CreditNote, 10_000.0),
                txn(TransactionKind::Payment, 60_000.0),
            ],
            "INR",
            today,
        );

        assert_eq!(summary.active_projects, 1);
        assert_eq!(summary.assets_with(AssetStatus::Installed), 2);
        assert_eq!(summary.installations_planned, 4);
        assert_eq!(summary.installation_completion, 25.0);
        let overdue: Vec<&str> = summary.overdue_installations.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(overdue, vec!["3", "2"]);
        assert_eq!(summary.open_tickets, 3);
        let breached: Vec<&str> = summary.sla_breaches.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(breached, vec!["2", "1"]);
        assert_eq!(summary.outstanding(), 30_000.0);
        assert_eq!(summary.finance.excluded, 0);
    }
}
