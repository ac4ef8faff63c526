//! Financial Transactions
//!
//! Invoices, payments, expenses and credit notes per project, plus the
//! receivables summary shown on the finance page.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::badge::status_badge;
use crate::entity::{DomainResult, Entity, RecordId};
use crate::format::percentage;
use crate::search::Searchable;
use crate::validate::{is_valid_currency, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[default]
    Invoice,
    Payment,
    Expense,
    CreditNote,
}

status_badge!(TransactionKind {
    Invoice => ("Invoice", Info),
    Payment => ("Payment", Success),
    Expense => ("Expense", Warning),
    CreditNote => ("Credit note", Neutral),
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTransaction {
    pub id: RecordId,
    pub project_id: RecordId,
    #[serde(default)]
    pub subproject_id: Option<RecordId>,
    pub kind: TransactionKind,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Entity for FinancialTransaction {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Searchable for FinancialTransaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.reference.as_deref().unwrap_or(""),
            self.notes.as_deref().unwrap_or(""),
            self.kind.as_label(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    pub project_id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subproject_id: Option<RecordId>,
    pub kind: TransactionKind,
    pub amount: f64,
    pub currency: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TransactionDraft {
    pub fn new(date: NaiveDate, currency: &str) -> Self {
        Self {
            project_id: RecordId::default(),
            subproject_id: None,
            kind: TransactionKind::Invoice,
            amount: 0.0,
            currency: currency.to_string(),
            date,
            reference: None,
            notes: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();
        errors.require_id("project_id", &self.project_id);
        if !(self.amount > 0.0 && self.amount.is_finite()) {
            errors.add("amount", "Amount must be greater than zero");
        }
        if !is_valid_currency(&self.currency) {
            errors.add("currency", "Use a 3-letter currency code");
        }
        errors.into_result()
    }
}

/// Client-side filter for the transaction table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub project_id: Option<RecordId>,
    pub kind: Option<TransactionKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &FinancialTransaction) -> bool {
        self.project_id.as_ref().map_or(true, |p| *p == txn.project_id)
            && self.kind.map_or(true, |k| k == txn.kind)
            && self.from.map_or(true, |from| txn.date >= from)
            && self.to.map_or(true, |to| txn.date <= to)
    }

    pub fn apply<'a>(&self, txns: &'a [FinancialTransaction]) -> Vec<&'a FinancialTransaction> {
        txns.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Totals in one currency. Transactions in any other currency are counted
/// in `excluded` and left out of every sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinanceSummary {
    pub invoiced: f64,
    pub received: f64,
    pub expenses: f64,
    pub credited: f64,
    pub excluded: usize,
}

impl FinanceSummary {
    pub fn from_transactions<'a, I>(txns: I, currency: &str) -> Self
    where
        I: IntoIterator<Item = &'a FinancialTransaction>,
    {
        txns.into_iter().fold(Self::default(), |mut acc, t| {
            if !t.currency.trim().eq_ignore_ascii_case(currency.trim()) {
                acc.excluded += 1;
                return acc;
            }
            match t.kind {
                TransactionKind::Invoice => acc.invoiced += t.amount,
                TransactionKind::Payment => acc.received += t.amount,
                TransactionKind::Expense => acc.expenses += t.amount,
                TransactionKind::CreditNote => acc.credited += t.amount,
            }
            acc
        })
    }

    /// Note for totals that skipped other currencies
    pub fn excluded_note(&self) -> Option<String> {
        match self.excluded {
            0 => None,
            1 => Some("1 transaction in another currency excluded".to_string()),
            n => Some(format!("{} transactions in other currencies excluded", n)),
        }
    }

    /// Net billed amount after credit notes
    pub fn net_billed(&self) -> f64 {
        (self.invoiced - self.credited).max(0.0)
    }

    /// Receivable still to be collected, never below zero
    pub fn outstanding(&self) -> f64 {
        (self.net_billed() - self.received).max(0.0)
    }

    pub fn collection_rate(&self) -> f64 {
        percentage(self.received, self.net_billed())
    }

    pub fn margin(&self) -> f64 {
        self.received - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(kind: TransactionKind, amount: f64, day: u32) -> FinancialTransaction {
        txn_in(kind, amount, day, "INR")
    }

    fn txn_in(kind: TransactionKind, amount: f64, day: u32, currency: &str) -> FinancialTransaction {
        FinancialTransaction {
            id: RecordId::from(format!("t{}", day)),
            project_id: RecordId::from("p1"),
            subproject_id: None,
            kind,
            amount,
            currency: currency.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            reference: None,
            notes: None,
        }
    }

    #[test]
    fn test_summary() {
        let txns = vec![
            txn(TransactionKind::Invoice, 100_000.0, 1),
            txn(TransactionKind::CreditNote, 10_000.0, 2),
            txn(TransactionKind::Payment, 45_000.0, 3),
            txn(TransactionKind::Expense, 5_000.0, 4),
        ];
        let s = FinanceSummary::from_transactions(&txns, "INR");
        assert_eq!(s.net_billed(), 90_000.0);
        assert_eq!(s.outstanding(), 45_000.0);
        assert_eq!(s.collection_rate(), 50.0);
        assert_eq!(s.margin(), 40_000.0);
    }

    #[test]
    fn test_overpayment_does_not_go_negative() {
        let txns = vec![txn(TransactionKind::Invoice, 10.0, 1), txn(TransactionKind::Payment, 15.0, 2)];
        let s = FinanceSummary::from_transactions(&txns, "INR");
        assert_eq!(s.outstanding(), 0.0);
        assert_eq!(s.collection_rate(), 100.0);
    }

    #[test]
    fn test_other_currencies_are_excluded() {
        let txns = vec![
            txn(TransactionKind::Invoice, 100_000.0, 1),
            txn_in(TransactionKind::Payment, 100_000.0, 2, "USD"),
            txn_in(TransactionKind::Payment, 20_000.0, 3, "inr"),
        ];
        let s = FinanceSummary::from_transactions(&txns, "INR");
        assert_eq!(s.received, 20_000.0);
        assert_eq!(s.outstanding(), 80_000.0);
        assert_eq!(s.collection_rate(), 20.0);
        assert_eq!(s.excluded, 1);
        assert_eq!(s.excluded_note().as_deref(), Some("1 transaction in another currency excluded"));

        let usd = FinanceSummary::from_transactions(&txns, "USD");
        assert_eq!(usd.received, 100_000.0);
        assert_eq!(usd.outstanding(), 0.0);
        assert_eq!(usd.excluded_note().as_deref(), Some("2 transactions in other currencies excluded"));
        assert_eq!(FinanceSummary::default().excluded_note(), None);
    }

    #[test]
    fn test_filter() {
        let txns = vec![
            txn(TransactionKind::Invoice, 1.0, 1),
            txn(TransactionKind::Payment, 1.0, 5),
            txn(TransactionKind::Invoice, 1.0, 9),
        ];
        let filter = TransactionFilter {
            kind: Some(TransactionKind::Invoice),
            from: NaiveDate::from_ymd_opt(2026, 10, 2),
            ..Default::default()
        };
        let hits = filter.apply(&txns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_str(), "t9");
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = TransactionDraft::new(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(), "INR");
        draft.project_id = RecordId::from("p1");
        assert!(draft.validate().is_err());
        draft.amount = 10.0;
        assert!(draft.validate().is_ok());
        draft.currency = "RUPEE".to_string();
        assert!(draft.validate().is_err());
    }
}
