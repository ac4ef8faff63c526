//! Finance Endpoints

use acs_domain::{ApiRoute, FinancialTransaction, RecordId, TransactionDraft};

use super::{ApiClient, ApiResult};

pub async fn list_transactions(api: &ApiClient) -> ApiResult<Vec<FinancialTransaction>> {
    let (txns, _) = api.list(&ApiRoute::Transactions, &[]).await?;
    Ok(txns)
}

pub async fn create_transaction(api: &ApiClient, draft: &TransactionDraft) -> ApiResult<FinancialTransaction> {
    draft.validate()?;
    api.post(&ApiRoute::Transactions, draft).await
}

pub async fn delete_transaction(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Transaction(id.clone())).await
}
