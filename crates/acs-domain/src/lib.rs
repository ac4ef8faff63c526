//! ACS Domain Layer
//!
//! Records mirrored from the backend, form drafts and their validation, and
//! the view-model logic behind the dashboard screens. No browser
//! dependencies, so everything here is tested natively.

mod badge;

mod asset;
mod audit;
mod client;
mod config;
mod dashboard;
mod document;
mod entity;
mod finance;
mod format;
mod installation;
mod maintenance;
mod project;
mod routes;
mod search;
mod site;
mod timeline;
mod upload;
mod user;
mod validate;
mod wizard;

#[cfg(test)]
mod tests;

pub use badge::{Badge, Tone};
pub use entity::{from_wire, wire_name, DomainError, DomainResult, Entity, ListResponse, RecordId};
pub use validate::{
    is_valid_currency, is_valid_email, is_valid_gst_number, is_valid_phone, is_valid_pincode, parse_amount,
    ValidationErrors,
};

pub use asset::{count_by_status, AcsAsset, AssetDraft, AssetStatus};
pub use client::{Client, ClientDraft};
pub use document::{Document, DocumentTarget, DOCUMENT_ENTITY_TYPES};
pub use finance::{FinanceSummary, FinancialTransaction, TransactionDraft, TransactionFilter, TransactionKind};
pub use installation::{Installation, InstallationDraft, InstallationStatus};
pub use maintenance::{MaintenanceTicket, TicketDraft, TicketPriority, TicketStatus};
pub use project::{
    BillingCycle, ConfigurationInput, Project, ProjectDraft, ProjectStatus, Subproject, SubprojectConfiguration,
    SubprojectDraft, SubprojectUpdate,
};
pub use site::{Site, SiteDraft};
pub use user::{Role, User, UserDraft};

pub use audit::{
    cascade_closure, mark_reverted, revert_check, AuditEntry, AuditFilter, RevertRequest, RevertResult, RevertState,
};
pub use dashboard::{DashboardSummary, OVERDUE_LIST_LIMIT};
pub use format::{
    format_currency, format_date, format_file_size, format_optional_date, format_percent, format_timestamp,
    percentage, relative_days,
};
pub use search::{
    cmp_ignore_case, filter_records, fuzzy_match, matches_query, page_count, paginate, picker_matches, sort_by_key,
    PageSlice, Pagination, PickerOption, Searchable, SortDirection,
};
pub use timeline::{
    installation_badge, is_installation_overdue, is_sla_breached, project_progress, project_timeline, ticket_sla,
    InstallationBadge, ProjectTimeline, SlaBadge, DUE_SOON_DAYS,
};
pub use upload::{
    accept_attribute, has_accepted_extension, CorrectionRequest, ProcessOutcome, ProcessRequest, RowCorrection,
    RowCounts, RowStatus, UploadRevertOutcome, UploadRow, UploadSession, UploadStatus, ACCEPTED_EXTENSIONS,
};
pub use wizard::{ImportWizard, PendingFile, WizardStep};

pub use config::{ApiConfig, PartialConfig, DEFAULT_BASE_URL};
pub use routes::{query_string, ApiRoute, UploadAction};
