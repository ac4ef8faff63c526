//! Import Wizard
//!
//! View-model behind the upload/import dialog. It mirrors one server-side
//! upload session and keeps the user's not-yet-submitted cell edits.
//!
//! ```text
//! SelectFile -> Uploading -> Review <-> Correcting
//!                              |
//!                              v
//!                          Processing -> Completed -> Reverting -> Reverted
//! ```
//!
//! `Failed` is reachable from any in-flight step; `reset` goes back to
//! `SelectFile` from anywhere.

use std::collections::BTreeMap;

use crate::entity::{DomainError, DomainResult};
use crate::upload::{
    has_accepted_extension, CorrectionRequest, ProcessOutcome, ProcessRequest, RowCorrection, RowStatus,
    UploadRevertOutcome, UploadSession,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    SelectFile,
    Uploading,
    Review,
    Correcting,
    Processing,
    Completed,
    Reverting,
    Reverted,
    Failed,
}

impl WizardStep {
    fn describe(&self) -> &'static str {
        match self {
            WizardStep::SelectFile => "selecting a file",
            WizardStep::Uploading => "uploading",
            WizardStep::Review => "reviewing rows",
            WizardStep::Correcting => "submitting corrections",
            WizardStep::Processing => "processing",
            WizardStep::Completed => "completed",
            WizardStep::Reverting => "reverting",
            WizardStep::Reverted => "reverted",
            WizardStep::Failed => "failed",
        }
    }

    /// Title of the dialog for this step
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::SelectFile => "Choose a file",
            WizardStep::Uploading => "Uploading…",
            WizardStep::Review | WizardStep::Correcting => "Review rows",
            WizardStep::Processing => "Processing…",
            WizardStep::Completed => "Import complete",
            WizardStep::Reverting => "Reverting…",
            WizardStep::Reverted => "Import reverted",
            WizardStep::Failed => "Import failed",
        }
    }

    /// A request is in flight; the dialog disables its buttons
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WizardStep::Uploading | WizardStep::Correcting | WizardStep::Processing | WizardStep::Reverting
        )
    }

    /// 1-based position in the progress header (select, review, process, done)
    pub fn ordinal(&self) -> usize {
        match self {
            WizardStep::SelectFile | WizardStep::Uploading => 1,
            WizardStep::Review | WizardStep::Correcting => 2,
            WizardStep::Processing => 3,
            WizardStep::Completed | WizardStep::Reverting | WizardStep::Reverted | WizardStep::Failed => 4,
        }
    }
}

/// File picked in the first step
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFile {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportWizard {
    step: WizardStep,
    max_file_bytes: u64,
    file: Option<PendingFile>,
    session: Option<UploadSession>,
    /// row number -> column -> edited value
    edits: BTreeMap<u32, BTreeMap<String, String>>,
    skip_invalid_rows: bool,
    error: Option<String>,
    outcome: Option<ProcessOutcome>,
    revert_outcome: Option<UploadRevertOutcome>,
}

impl ImportWizard {
    pub fn new(max_file_bytes: u64) -> Self {
        Self {
            step: WizardStep::SelectFile,
            max_file_bytes,
            file: None,
            session: None,
            edits: BTreeMap::new(),
            skip_invalid_rows: false,
            error: None,
            outcome: None,
            revert_outcome: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn file(&self) -> Option<&PendingFile> {
        self.file.as_ref()
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> Option<&ProcessOutcome> {
        self.outcome.as_ref()
    }

    pub fn revert_outcome(&self) -> Option<&UploadRevertOutcome> {
        self.revert_outcome.as_ref()
    }

    pub fn skip_invalid_rows(&self) -> bool {
        self.skip_invalid_rows
    }

    fn expect_step(&self, allowed: &[WizardStep], action: &'static str) -> DomainResult<()> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition { step: self.step.describe(), action })
        }
    }

    fn enter(&mut self, step: WizardStep) {
        tracing::debug!(from = ?self.step, to = ?step, "import wizard transition");
        self.step = step;
    }

    // ========================
    // Step 1: file selection and upload
    // ========================

    pub fn choose_file(&mut self, name: &str, size: u64) -> DomainResult<()> {
        self.expect_step(&[WizardStep::SelectFile, WizardStep::Failed], "choose a file")?;
        if !has_accepted_extension(name) {
            return Err(DomainError::InvalidInput(format!(
                "{} is not a CSV or Excel file",
                name
            )));
        }
        if size == 0 {
            return Err(DomainError::InvalidInput(format!("{} is empty", name)));
        }
        if size > self.max_file_bytes {
            return Err(DomainError::InvalidInput(format!(
                "{} is larger than {} MB",
                name,
                self.max_file_bytes / (1024 * 1024)
            )));
        }
        self.file = Some(PendingFile { name: name.to_string(), size });
        self.error = None;
        self.step = WizardStep::SelectFile;
        Ok(())
    }

    pub fn begin_upload(&mut self) -> DomainResult<()> {
        self.expect_step(&[WizardStep::SelectFile], "upload")?;
        if self.file.is_none() {
            return Err(DomainError::InvalidInput("Choose a file first".to_string()));
        }
        self.error = None;
        self.enter(WizardStep::Uploading);
        Ok(())
    }

    pub fn upload_succeeded(&mut self, session: UploadSession) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Uploading], "accept an upload")?;
        self.session = Some(session);
        self.edits.clear();
        self.enter(WizardStep::Review);
        Ok(())
    }

    pub fn upload_failed(&mut self, message: impl Into<String>) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Uploading], "fail an upload")?;
        self.error = Some(message.into());
        self.enter(WizardStep::Failed);
        Ok(())
    }

    // ========================
    // Step 2: review and corrections
    // ========================

    /// Value shown in a cell: the pending edit, else the server value
    pub fn effective_value(&self, row: u32, column: &str) -> Option<&str> {
        if let Some(v) = self.edits.get(&row).and_then(|cols| cols.get(column)) {
            return Some(v.as_str());
        }
        self.session
            .as_ref()
            .and_then(|s| s.row(row))
            .and_then(|r| r.values.get(column))
            .map(String::as_str)
    }

    pub fn is_edited(&self, row: u32, column: &str) -> bool {
        self.edits.get(&row).is_some_and(|cols| cols.contains_key(column))
    }

    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn edited_row_count(&self) -> usize {
        self.edits.len()
    }

    pub fn edit_cell(&mut self, row: u32, column: &str, value: &str) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Review], "edit rows")?;
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| DomainError::NotFound("upload session".to_string()))?;
        let server_row = session
            .row(row)
            .ok_or_else(|| DomainError::NotFound(format!("row {}", row)))?;
        if !session.has_column(column) {
            return Err(DomainError::InvalidInput(format!("unknown column {}", column)));
        }

        let original = server_row.values.get(column).map(String::as_str).unwrap_or("");
        if value == original {
            if let Some(cols) = self.edits.get_mut(&row) {
                cols.remove(column);
                if cols.is_empty() {
                    self.edits.remove(&row);
                }
            }
        } else {
            self.edits
                .entry(row)
                .or_default()
                .insert(column.to_string(), value.to_string());
        }
        Ok(())
    }

    pub fn discard_row(&mut self, row: u32) {
        self.edits.remove(&row);
    }

    pub fn discard_all(&mut self) {
        self.edits.clear();
    }

    /// Payload for `POST …/uploads/{id}/correct`; each corrected row carries
    /// its full set of values with the edits applied
    pub fn corrections(&self) -> CorrectionRequest {
        let rows = self
            .edits
            .iter()
            .map(|(row_number, cols)| {
                let mut values = self
                    .session
                    .as_ref()
                    .and_then(|s| s.row(*row_number))
                    .map(|r| r.values.clone())
                    .unwrap_or_default();
                values.extend(cols.iter().map(|(k, v)| (k.clone(), v.clone())));
                RowCorrection { row_number: *row_number, values }
            })
            .collect();
        CorrectionRequest { rows }
    }

    pub fn begin_corrections(&mut self) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Review], "submit corrections")?;
        if self.edits.is_empty() {
            return Err(DomainError::InvalidInput("No rows have been edited".to_string()));
        }
        self.error = None;
        self.enter(WizardStep::Correcting);
        Ok(())
    }

    /// The server re-validated the session; its copy replaces ours
    pub fn corrections_applied(&mut self, session: UploadSession) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Correcting], "apply corrections")?;
        self.session = Some(session);
        self.edits.clear();
        self.enter(WizardStep::Review);
        Ok(())
    }

    pub fn set_skip_invalid_rows(&mut self, skip: bool) {
        self.skip_invalid_rows = skip;
    }

    /// Why processing is not possible right now, if it isn't
    pub fn process_blocker(&self) -> Option<&'static str> {
        if self.step != WizardStep::Review {
            return Some("Rows are not ready for processing");
        }
        let Some(session) = self.session.as_ref() else {
            return Some("No upload session");
        };
        if !self.edits.is_empty() {
            return Some("Submit or discard your corrections first");
        }
        let counts = session.counts();
        if counts.processable() == 0 {
            return Some("There are no valid rows to process");
        }
        if counts.error > 0 && !self.skip_invalid_rows {
            return Some("Fix the rows with errors or choose to skip them");
        }
        None
    }

    pub fn can_process(&self) -> bool {
        self.process_blocker().is_none()
    }

    pub fn process_request(&self) -> ProcessRequest {
        ProcessRequest { skip_invalid_rows: self.skip_invalid_rows }
    }

    // ========================
    // Step 3: processing and revert
    // ========================

    pub fn begin_process(&mut self) -> DomainResult<()> {
        if let Some(reason) = self.process_blocker() {
            return match self.step {
                WizardStep::Review => Err(DomainError::Conflict(reason.to_string())),
                _ => Err(DomainError::InvalidTransition { step: self.step.describe(), action: "process" }),
            };
        }
        self.error = None;
        self.enter(WizardStep::Processing);
        Ok(())
    }

    pub fn processed(&mut self, outcome: ProcessOutcome) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Processing], "finish processing")?;
        self.outcome = Some(outcome);
        self.enter(WizardStep::Completed);
        Ok(())
    }

    pub fn begin_revert(&mut self) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Completed], "revert")?;
        self.error = None;
        self.enter(WizardStep::Reverting);
        Ok(())
    }

    pub fn reverted(&mut self, outcome: UploadRevertOutcome) -> DomainResult<()> {
        self.expect_step(&[WizardStep::Reverting], "finish reverting")?;
        self.revert_outcome = Some(outcome);
        self.enter(WizardStep::Reverted);
        Ok(())
    }

    /// A request for the current step failed. Failed corrections go back to
    /// review with the edits kept; everything else ends in `Failed`.
    pub fn request_failed(&mut self, message: impl Into<String>) -> DomainResult<()> {
        let message = message.into();
        match self.step {
            WizardStep::Correcting => {
                self.error = Some(message);
                self.enter(WizardStep::Review);
                Ok(())
            }
            WizardStep::Uploading | WizardStep::Processing | WizardStep::Reverting => {
                self.error = Some(message);
                self.enter(WizardStep::Failed);
                Ok(())
            }
            other => Err(DomainError::InvalidTransition { step: other.describe(), action: "report a failure" }),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.max_file_bytes);
    }

    /// Rows in display order, errors first so they are fixed first
    pub fn rows_for_review(&self) -> Vec<u32> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let mut rows: Vec<(u8, u32)> = session
            .rows
            .iter()
            .map(|r| {
                let rank = match r.status {
                    RowStatus::Error => 0,
                    RowStatus::Warning => 1,
                    RowStatus::Success => 2,
                };
                (rank, r.row_number)
            })
            .collect();
        rows.sort();
        rows.into_iter().map(|(_, n)| n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::RecordId;
    use crate::upload::{UploadRow, UploadStatus};

    const MB: u64 = 1024 * 1024;

    fn row(n: u32, status: RowStatus, serial: &str) -> UploadRow {
        UploadRow {
            row_number: n,
            status,
            messages: Vec::new(),
            values: BTreeMap::from([
                ("serial".to_string(), serial.to_string()),
                ("site".to_string(), "S1".to_string()),
            ]),
        }
    }

    fn session(rows: Vec<UploadRow>) -> UploadSession {
        UploadSession {
            id: RecordId::from("u1"),
            project_id: RecordId::from("p1"),
            subproject_id: RecordId::from("s1"),
            file_name: "units.csv".to_string(),
            status: UploadStatus::Validated,
            columns: vec!["serial".to_string(), "site".to_string()],
            rows,
            uploaded_by: None,
            created_at: None,
        }
    }

    fn in_review(rows: Vec<UploadRow>) -> ImportWizard {
        let mut wizard = ImportWizard::new(10 * MB);
        wizard.choose_file("units.csv", 2048).unwrap();
        wizard.begin_upload().unwrap();
        wizard.upload_succeeded(session(rows)).unwrap();
        wizard
    }

    #[test]
    fn test_file_checks() {
        let mut wizard = ImportWizard::new(MB);
        assert!(wizard.choose_file("units.pdf", 10).is_err());
        assert!(wizard.choose_file("units.csv", 0).is_err());
        assert!(wizard.choose_file("units.csv", 2 * MB).is_err());
        assert!(wizard.begin_upload().is_err());
        wizard.choose_file("units.xlsx", 10).unwrap();
        assert_eq!(wizard.file().unwrap().name, "units.xlsx");
        wizard.begin_upload().unwrap();
        assert!(wizard.step().is_busy());
    }

    #[test]
    fn test_edit_back_to_original_drops_edit() {
        let mut wizard = in_review(vec![row(1, RowStatus::Error, "")]);
        wizard.edit_cell(1, "serial", "SN-1").unwrap();
        assert!(wizard.is_edited(1, "serial"));
        assert_eq!(wizard.effective_value(1, "serial"), Some("SN-1"));

        wizard.edit_cell(1, "serial", "").unwrap();
        assert!(!wizard.has_edits());
        assert_eq!(wizard.effective_value(1, "serial"), Some(""));
    }

    #[test]
    fn test_edit_rejects_unknown_row_and_column() {
        let mut wizard = in_review(vec![row(1, RowStatus::Error, "")]);
        assert!(matches!(wizard.edit_cell(9, "serial", "x"), Err(DomainError::NotFound(_))));
        assert!(matches!(wizard.edit_cell(1, "colour", "x"), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_corrections_payload_carries_full_row() {
        let mut wizard = in_review(vec![row(1, RowStatus::Success, "A"), row(2, RowStatus::Error, "")]);
        wizard.edit_cell(2, "serial", "B").unwrap();
        let payload = wizard.corrections();
        assert_eq!(payload.rows.len(), 1);
        assert_eq!(payload.rows[0].row_number, 2);
        assert_eq!(payload.rows[0].values["serial"], "B");
        assert_eq!(payload.rows[0].values["site"], "S1");
    }

    #[test]
    fn test_process_requires_clean_rows_or_skip() {
        let mut wizard = in_review(vec![row(1, RowStatus::Success, "A"), row(2, RowStatus::Error, "")]);
        assert!(!wizard.can_process());
        assert!(matches!(wizard.begin_process(), Err(DomainError::Conflict(_))));

        wizard.set_skip_invalid_rows(true);
        assert!(wizard.can_process());
        assert!(wizard.process_request().skip_invalid_rows);

        wizard.edit_cell(2, "serial", "B").unwrap();
        assert_eq!(wizard.process_blocker(), Some("Submit or discard your corrections first"));
    }

    #[test]
    fn test_nothing_to_process() {
        let mut wizard = in_review(vec![row(1, RowStatus::Error, "")]);
        wizard.set_skip_invalid_rows(true);
        assert_eq!(wizard.process_blocker(), Some("There are no valid rows to process"));
    }

    #[test]
    fn test_failed_corrections_keep_edits() {
        let mut wizard = in_review(vec![row(1, RowStatus::Error, "")]);
        wizard.edit_cell(1, "serial", "X").unwrap();
        wizard.begin_corrections().unwrap();
        assert!(wizard.edit_cell(1, "serial", "Y").is_err());
        wizard.request_failed("500 Internal Server Error").unwrap();
        assert_eq!(wizard.step(), WizardStep::Review);
        assert!(wizard.has_edits());
        assert_eq!(wizard.error(), Some("500 Internal Server Error"));
    }

    #[test]
    fn test_revert_only_after_completion() {
        let mut wizard = in_review(vec![row(1, RowStatus::Success, "A")]);
        assert!(wizard.begin_revert().is_err());
        wizard.begin_process().unwrap();
        wizard.processed(ProcessOutcome { processed_rows: 1, ..Default::default() }).unwrap();
        wizard.begin_revert().unwrap();
        wizard.reverted(UploadRevertOutcome { reverted_rows: 1, message: None }).unwrap();
        assert_eq!(wizard.step(), WizardStep::Reverted);

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::SelectFile);
        assert!(wizard.session().is_none());
    }

    #[test]
    fn test_failed_revert_ends_in_failed() {
        let mut wizard = in_review(vec![row(1, RowStatus::Success, "A")]);
        wizard.begin_process().unwrap();
        wizard.processed(ProcessOutcome::default()).unwrap();
        wizard.begin_revert().unwrap();
        wizard.request_failed("timeout").unwrap();
        assert_eq!(wizard.step(), WizardStep::Failed);
        assert_eq!(wizard.error(), Some("timeout"));
        assert!(wizard.request_failed("again").is_err());
    }

    #[test]
    fn test_discard_edits() {
        let mut wizard = in_review(vec![row(1, RowStatus::Error, ""), row(2, RowStatus::Error, "")]);
        wizard.edit_cell(1, "serial", "A").unwrap();
        wizard.edit_cell(1, "site", "S2").unwrap();
        wizard.edit_cell(2, "serial", "B").unwrap();
        assert_eq!(wizard.edited_row_count(), 2);

        wizard.discard_row(1);
        assert!(!wizard.is_edited(1, "serial"));
        assert!(!wizard.is_edited(1, "site"));
        assert_eq!(wizard.effective_value(1, "serial"), Some(""));
        assert!(wizard.is_edited(2, "serial"));

        wizard.discard_all();
        assert!(!wizard.has_edits());
        assert!(wizard.corrections().rows.is_empty());
        assert!(wizard.begin_corrections().is_err());
    }

    #[test]
    fn test_failed_upload_then_new_file() {
        let mut wizard = ImportWizard::new(MB);
        assert!(wizard.upload_failed("too early").is_err());
        wizard.choose_file("units.csv", 10).unwrap();
        wizard.begin_upload().unwrap();
        wizard.upload_failed("413 Payload Too Large").unwrap();
        assert_eq!(wizard.step(), WizardStep::Failed);
        assert_eq!(wizard.error(), Some("413 Payload Too Large"));
        assert!(wizard.begin_upload().is_err());

        wizard.choose_file("units-fixed.xls", 20).unwrap();
        assert_eq!(wizard.step(), WizardStep::SelectFile);
        assert_eq!(wizard.error(), None);
        assert_eq!(wizard.file().unwrap().name, "units-fixed.xls");

        wizard.begin_upload().unwrap();
        wizard.request_failed("network error").unwrap();
        assert_eq!(wizard.step(), WizardStep::Failed);
        assert_eq!(wizard.error(), Some("network error"));
    }

    #[test]
    fn test_failed_processing_ends_in_failed() {
        let mut wizard = in_review(vec![row(1, RowStatus::Success, "A")]);
        assert!(wizard.request_failed("nothing running").is_err());
        wizard.begin_process().unwrap();
        assert!(wizard.step().is_busy());
        wizard.request_failed("502 Bad Gateway").unwrap();
        assert_eq!(wizard.step(), WizardStep::Failed);
        assert_eq!(wizard.error(), Some("502 Bad Gateway"));
        assert!(wizard.outcome().is_none());
        assert!(wizard.processed(ProcessOutcome::default()).is_err());
    }

    #[test]
    fn test_rows_for_review_puts_errors_first() {
        let wizard = in_review(vec![
            row(1, RowStatus::Success, "A"),
            row(2, RowStatus::Warning, "B"),
            row(3, RowStatus::Error, ""),
        ]);
        assert_eq!(wizard.rows_for_review(), vec![3, 2, 1]);
    }
}
