//! Upload Sessions
//!
//! Server-tracked CSV/XLSX batch imports for a subproject. Parsing and
//! row validation happen on the server; these types mirror its responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{Entity, RecordId};
use crate::search::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Uploaded,
    Validated,
    Processing,
    Processed,
    PartiallyProcessed,
    Failed,
    Reverted,
}

status_badge!(UploadStatus {
    Uploaded => ("Uploaded", Neutral),
    Validated => ("Validated", Info),
    Processing => ("Processing", Warning),
    Processed => ("Processed", Success),
    PartiallyProcessed => ("Partially processed", Warning),
    Failed => ("Failed", Danger),
    Reverted => ("Reverted", Neutral),
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    #[default]
    Success,
    Warning,
    Error,
}

status_badge!(RowStatus {
    Success => ("OK", Success),
    Warning => ("Warning", Warning),
    Error => ("Error", Danger),
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRow {
    pub row_number: u32,
    #[serde(default)]
    pub status: RowStatus,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub success: usize,
    pub warning: usize,
    pub error: usize,
}

impl RowCounts {
    pub fn total(&self) -> usize {
        self.success + self.warning + self.error
    }

    /// Rows the server will accept
    pub fn processable(&self) -> usize {
        self.success + self.warning
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadSession {
    pub id: RecordId,
    pub project_id: RecordId,
    pub subproject_id: RecordId,
    pub file_name: String,
    #[serde(default)]
    pub status: UploadStatus,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<UploadRow>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UploadSession {
    pub fn counts(&self) -> RowCounts {
        self.rows.iter().fold(RowCounts::default(), |mut acc, row| {
            match row.status {
                RowStatus::Success => acc.success += 1,
                RowStatus::Warning => acc.warning += 1,
                RowStatus::Error => acc.error += 1,
            }
            acc
        })
    }

    pub fn row(&self, row_number: u32) -> Option<&UploadRow> {
        self.rows.iter().find(|r| r.row_number == row_number)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Only fully or partially processed sessions can be rolled back
    pub fn can_revert(&self) -> bool {
        matches!(self.status, UploadStatus::Processed | UploadStatus::PartiallyProcessed)
    }
}

impl Entity for UploadSession {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for UploadSession {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.file_name.as_str(),
            self.status.as_label(),
            self.uploaded_by.as_deref().unwrap_or(""),
        ]
    }
}

/// One corrected row in `POST …/uploads/{id}/correct`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowCorrection {
    pub row_number: u32,
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionRequest {
    pub rows: Vec<RowCorrection>,
}

/// Body of `POST …/uploads/{id}/process`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ProcessRequest {
    pub skip_invalid_rows: bool,
}

/// Response of `POST …/uploads/{id}/process`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    #[serde(default)]
    pub processed_rows: u32,
    #[serde(default)]
    pub skipped_rows: u32,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST …/uploads/{id}/revert`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadRevertOutcome {
    #[serde(default)]
    pub reverted_rows: u32,
    #[serde(default)]
    pub message: Option<String>,
}

/// Extensions the backend can ingest
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

/// `accept` attribute for the file input
pub fn accept_attribute() -> String {
    ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ACCEPTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_decodes_and_counts() {
        let session: UploadSession = serde_json::from_str(
            r#"{
                "id": "u1", "project_id": 1, "subproject_id": 2, "file_name": "units.csv",
                "status": "validated", "columns": ["serial", "site"],
                "rows": [
                    {"row_number": 1, "status": "success", "values": {"serial": "A1", "site": "S1"}},
                    {"row_number": 2, "status": "warning", "messages": ["duplicate serial"]},
                    {"row_number": 3, "status": "error", "messages": ["missing site"]}
                ]
            }"#,
        )
        .unwrap();
        let counts = session.counts();
        assert_eq!(counts, RowCounts { success: 1, warning: 1, error: 1 });
        assert_eq!(counts.processable(), 2);
        assert!(!session.can_revert());
        assert!(session.has_column("site"));
        assert_eq!(session.row(2).unwrap().messages, vec!["duplicate serial".to_string()]);
    }

    #[test]
    fn test_extensions() {
        assert!(has_accepted_extension("Units.XLSX"));
        assert!(!has_accepted_extension("units.pdf"));
        assert!(!has_accepted_extension("csv"));
        assert_eq!(accept_attribute(), ".csv,.xlsx,.xls");
    }
}
