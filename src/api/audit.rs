//! Audit Log Endpoints

use acs_domain::{ApiRoute, AuditEntry, AuditFilter, Pagination, RecordId, RevertRequest, RevertResult};

use super::{ApiClient, ApiResult};

/// One page of the audit log plus the server's total count
pub async fn list_audit_logs(
    api: &ApiClient,
    filter: &AuditFilter,
    pagination: Pagination,
) -> ApiResult<(Vec<AuditEntry>, usize)> {
    let mut query = filter.query_pairs();
    query.push(("page", pagination.page.to_string()));
    query.push(("page_size", pagination.page_size.to_string()));
    api.list(&ApiRoute::AuditLogs, &query).await
}

pub async fn revert_audit_entry(api: &ApiClient, id: &RecordId, request: &RevertRequest) -> ApiResult<RevertResult> {
    api.post(&ApiRoute::AuditRevert(id.clone()), request).await
}
