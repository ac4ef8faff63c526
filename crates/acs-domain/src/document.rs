//! Documents
//!
//! Files attached to projects, sites or assets via `/documents/upload`.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, RecordId};
use crate::search::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: RecordId,
    pub file_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub entity_id: Option<RecordId>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}

impl Document {
    /// Lower-case extension, used for the file icon
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

impl Entity for Document {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for Document {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.file_name.as_str(), self.entity_type.as_deref().unwrap_or("")]
    }
}

/// What a document is attached to, sent as multipart fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentTarget {
    pub entity_type: String,
    pub entity_id: RecordId,
}

impl DocumentTarget {
    pub fn is_set(&self) -> bool {
        !self.entity_type.is_empty() && !self.entity_id.is_empty()
    }
}

/// Entity types documents can be attached to
pub const DOCUMENT_ENTITY_TYPES: &[(&str, &str)] = &[
    ("project", "Project"),
    ("subproject", "Subproject"),
    ("site", "Site"),
    ("asset", "Asset"),
    ("client", "Client"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        let doc: Document = serde_json::from_str(r#"{"id":1,"file_name":"PO-221.PDF"}"#).unwrap();
        assert_eq!(doc.extension().as_deref(), Some("pdf"));
        let doc: Document = serde_json::from_str(r#"{"id":1,"file_name":"README"}"#).unwrap();
        assert_eq!(doc.extension(), None);
    }
}
