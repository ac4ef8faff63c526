//! REST Routes
//!
//! Every backend path the dashboard calls, relative to the configured base
//! URL. Ids are encoded as path segments, query values as form components.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};

use crate::entity::RecordId;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside a query key or value
const QUERY: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    Process,
    Revert,
    Correct,
    Download,
}

impl UploadAction {
    fn segment(&self) -> &'static str {
        match self {
            UploadAction::Process => "process",
            UploadAction::Revert => "revert",
            UploadAction::Correct => "correct",
            UploadAction::Download => "download",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    Clients,
    Client(RecordId),
    Projects,
    Project(RecordId),
    Subprojects { project: RecordId },
    Subproject { project: RecordId, subproject: RecordId },
    Sites { project: RecordId, subproject: RecordId },
    Site(RecordId),
    Assets,
    Asset(RecordId),
    Installations,
    Installation(RecordId),
    Tickets,
    Ticket(RecordId),
    Transactions,
    Transaction(RecordId),
    Users,
    User(RecordId),
    AuditLogs,
    AuditRevert(RecordId),
    Uploads { project: RecordId, subproject: RecordId },
    Upload { project: RecordId, subproject: RecordId, upload: RecordId },
    UploadAction { project: RecordId, subproject: RecordId, upload: RecordId, action: UploadAction },
    Documents,
    DocumentUpload,
}

fn seg(id: &RecordId) -> String {
    utf8_percent_encode(id.as_str(), SEGMENT).to_string()
}

fn subproject_path(project: &RecordId, subproject: &RecordId) -> String {
    format!("/projects/{}/subprojects/{}", seg(project), seg(subproject))
}

impl ApiRoute {
    pub fn path(&self) -> String {
        match self {
            ApiRoute::Clients => "/clients".to_string(),
            ApiRoute::Client(id) => format!("/clients/{}", seg(id)),
            ApiRoute::Projects => "/projects".to_string(),
            ApiRoute::Project(id) => format!("/projects/{}", seg(id)),
            ApiRoute::Subprojects { project } => format!("/projects/{}/subprojects", seg(project)),
            ApiRoute::Subproject { project, subproject } => subproject_path(project, subproject),
            ApiRoute::Sites { project, subproject } => {
                format!("{}/sites", subproject_path(project, subproject))
            }
            ApiRoute::Site(id) => format!("/sites/{}", seg(id)),
            ApiRoute::Assets => "/assets".to_string(),
            ApiRoute::Asset(id) => format!("/assets/{}", seg(id)),
            ApiRoute::Installations => "/installations".to_string(),
            ApiRoute::Installation(id) => format!("/installations/{}", seg(id)),
            ApiRoute::Tickets => "/maintenance/tickets".to_string(),
            ApiRoute::Ticket(id) => format!("/maintenance/tickets/{}", seg(id)),
            ApiRoute::Transactions => "/finance/transactions".to_string(),
            ApiRoute::Transaction(id) => format!("/finance/transactions/{}", seg(id)),
            ApiRoute::Users => "/admin/users".to_string(),
            ApiRoute::User(id) => format!("/admin/users/{}", seg(id)),
            ApiRoute::AuditLogs => "/audit/logs".to_string(),
            ApiRoute::AuditRevert(id) => format!("/audit/logs/{}/revert", seg(id)),
            ApiRoute::Uploads { project, subproject } => {
                format!("{}/uploads", subproject_path(project, subproject))
            }
            ApiRoute::Upload { project, subproject, upload } => {
                format!("{}/uploads/{}", subproject_path(project, subproject), seg(upload))
            }
            ApiRoute::UploadAction { project, subproject, upload, action } => format!(
                "{}/uploads/{}/{}",
                subproject_path(project, subproject),
                seg(upload),
                action.segment()
            ),
            ApiRoute::Documents => "/documents".to_string(),
            ApiRoute::DocumentUpload => "/documents/upload".to_string(),
        }
    }

    /// Path plus an encoded query string; empty values are dropped
    pub fn with_query<K: AsRef<str>, V: AsRef<str>>(&self, pairs: &[(K, V)]) -> String {
        let path = self.path();
        let query = query_string(pairs);
        if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        }
    }
}

impl fmt::Display for ApiRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

pub fn query_string<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    pairs
        .iter()
        .filter(|(_, v)| !v.as_ref().is_empty())
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k.as_ref(), QUERY),
                utf8_percent_encode(v.as_ref(), QUERY)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> RecordId {
        RecordId::from(s)
    }

    #[test]
    fn test_nested_paths() {
        assert_eq!(
            ApiRoute::Sites { project: id("1"), subproject: id("7") }.path(),
            "/projects/1/subprojects/7/sites"
        );
        assert_eq!(
            ApiRoute::UploadAction {
                project: id("1"),
                subproject: id("7"),
                upload: id("u9"),
                action: UploadAction::Correct,
            }
            .to_string(),
            "/projects/1/subprojects/7/uploads/u9/correct"
        );
        assert_eq!(ApiRoute::AuditRevert(id("42")).path(), "/audit/logs/42/revert");
        assert_eq!(ApiRoute::Tickets.path(), "/maintenance/tickets");
    }

    #[test]
    fn test_ids_are_escaped() {
        assert_eq!(ApiRoute::Client(id("a/b c")).path(), "/clients/a%2Fb%20c");
    }

    #[test]
    fn test_query_encoding() {
        let url = ApiRoute::AuditLogs.with_query(&[
            ("actor", "Asha K"),
            ("action", ""),
            ("entity_type", "site&asset"),
        ]);
        assert_eq!(url, "/audit/logs?actor=Asha%20K&entity_type=site%26asset");
        assert_eq!(ApiRoute::Documents.with_query::<&str, &str>(&[]), "/documents");
    }
}
