//! Audit Trail
//!
//! Logged system actions. An entry may be reverted on the server; entries
//! that depend on it are reverted with it when cascade is requested. The
//! client only previews the cascade and mirrors the result locally.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::{Badge, Tone};
use crate::entity::{DomainError, DomainResult, Entity, RecordId};
use crate::search::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: RecordId,
    pub action: String,
    pub entity_type: String,
    #[serde(default)]
    pub entity_id: Option<RecordId>,
    #[serde(default)]
    pub actor: String,
    pub timestamp: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub revertable: bool,
    #[serde(default)]
    pub reverted: bool,
    #[serde(default)]
    pub dependent_ids: Vec<RecordId>,
}

impl Entity for AuditEntry {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for AuditEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.action.as_str(),
            self.entity_type.as_str(),
            self.actor.as_str(),
            self.summary.as_deref().unwrap_or(""),
        ]
    }
}

/// Revert state shown in the last column of the audit table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertState {
    Reverted,
    Revertable,
    Permanent,
}

impl Badge for RevertState {
    fn label(&self) -> String {
        match self {
            RevertState::Reverted => "Reverted",
            RevertState::Revertable => "Revertable",
            RevertState::Permanent => "Permanent",
        }
        .to_string()
    }

    fn tone(&self) -> Tone {
        match self {
            RevertState::Reverted => Tone::Neutral,
            RevertState::Revertable => Tone::Info,
            RevertState::Permanent => Tone::Neutral,
        }
    }
}

impl AuditEntry {
    pub fn revert_state(&self) -> RevertState {
        if self.reverted {
            RevertState::Reverted
        } else if self.revertable {
            RevertState::Revertable
        } else {
            RevertState::Permanent
        }
    }
}

/// Transitive, not yet reverted dependents of `entry_id`, in breadth-first
/// discovery order. The entry itself is never part of the result.
pub fn cascade_closure<'a>(entry_id: &RecordId, entries: &'a [AuditEntry]) -> Vec<&'a AuditEntry> {
    let by_id: HashMap<&RecordId, &AuditEntry> = entries.iter().map(|e| (&e.id, e)).collect();
    let Some(root) = by_id.get(entry_id) else {
        return Vec::new();
    };

    let mut seen: HashSet<&RecordId> = HashSet::from([entry_id]);
    let mut queue: VecDeque<&RecordId> = root.dependent_ids.iter().collect();
    let mut result = Vec::new();

    while let Some(id) = queue.pop_front() {
        if !seen.insert(id) {
            continue;
        }
        // Dependents the server did not send are skipped
        let Some(entry) = by_id.get(id) else {
            continue;
        };
        if entry.reverted {
            continue;
        }
        result.push(*entry);
        queue.extend(entry.dependent_ids.iter());
    }
    result
}

/// Check whether `entry` may be reverted with the chosen cascade option
pub fn revert_check(entry: &AuditEntry, entries: &[AuditEntry], cascade: bool) -> DomainResult<()> {
    if entry.reverted {
        return Err(DomainError::Conflict("This action has already been reverted".to_string()));
    }
    if !entry.revertable {
        return Err(DomainError::InvalidInput("This action cannot be reverted".to_string()));
    }
    let dependents = cascade_closure(&entry.id, entries).len();
    if dependents > 0 && !cascade {
        return Err(DomainError::Conflict(format!(
            "{} dependent action{} must be reverted together with this one",
            dependents,
            if dependents == 1 { "" } else { "s" }
        )));
    }
    Ok(())
}

/// Body of `POST /audit/logs/{id}/revert`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevertRequest {
    pub cascade: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response of `POST /audit/logs/{id}/revert`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RevertResult {
    #[serde(default)]
    pub reverted_ids: Vec<RecordId>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Mirror a successful revert in the local list. Returns how many entries
/// changed.
pub fn mark_reverted(entries: &mut [AuditEntry], ids: &[RecordId]) -> usize {
    let ids: HashSet<&RecordId> = ids.iter().collect();
    let mut changed = 0;
    for entry in entries.iter_mut() {
        if !entry.reverted && ids.contains(&entry.id) {
            entry.reverted = true;
            changed += 1;
        }
    }
    changed
}

/// Filters of the audit log query string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditFilter {
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub actor: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl AuditFilter {
    /// Non-empty filters as query pairs
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("action", &self.action),
            ("entity_type", &self.entity_type),
            ("actor", &self.actor),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn entry(id: &str, deps: &[&str]) -> AuditEntry {
        AuditEntry {
            id: RecordId::from(id),
            action: "upload.process".to_string(),
            entity_type: "upload".to_string(),
            entity_id: None,
            actor: "asha".to_string(),
            timestamp: "2026-10-17T10:00:00Z".to_string(),
            summary: None,
            revertable: true,
            reverted: false,
            dependent_ids: deps.iter().map(|d| RecordId::from(*d)).collect(),
        }
    }

    #[test]
    fn test_cascade_is_transitive_and_cycle_safe() {
        let entries = vec![
            entry("1", &["2", "3"]),
            entry("2", &["4"]),
            entry("3", &["1"]),
            entry("4", &["2"]),
        ];
        let ids: Vec<&str> = cascade_closure(&RecordId::from("1"), &entries)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_cascade_skips_reverted_and_unknown() {
        let mut entries = vec![entry("1", &["2", "9"]), entry("2", &["3"]), entry("3", &[])];
        entries[1].reverted = true;
        assert!(cascade_closure(&RecordId::from("1"), &entries).is_empty());
        assert!(cascade_closure(&RecordId::from("404"), &entries).is_empty());
    }

    #[test]
    fn test_revert_check() {
        let mut entries = vec![entry("1", &["2"]), entry("2", &[])];
        assert!(revert_check(&entries[0], &entries, false).is_err());
        assert!(revert_check(&entries[0], &entries, true).is_ok());
        assert!(revert_check(&entries[1], &entries, false).is_ok());

        entries[1].revertable = false;
        assert!(matches!(revert_check(&entries[1], &entries, true), Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_mark_reverted() {
        let mut entries = vec![entry("1", &[]), entry("2", &[])];
        assert_eq!(mark_reverted(&mut entries, &[RecordId::from("2"), RecordId::from("7")]), 1);
        assert_eq!(entries[1].revert_state(), RevertState::Reverted);
        assert_eq!(entries[0].revert_state(), RevertState::Revertable);
    }

    #[test]
    fn test_filter_pairs() {
        let filter = AuditFilter {
            action: Some("  ".to_string()),
            actor: Some("asha".to_string()),
            from: NaiveDate::from_ymd_opt(2026, 10, 1),
            ..Default::default()
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("actor", "asha".to_string()), ("from", "2026-10-01".to_string())]
        );
    }
}
