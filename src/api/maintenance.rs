//! Maintenance Ticket Endpoints

use acs_domain::{ApiRoute, MaintenanceTicket, RecordId, TicketDraft};

use super::{ApiClient, ApiResult};

pub async fn list_tickets(api: &ApiClient) -> ApiResult<Vec<MaintenanceTicket>> {
    let (tickets, _) = api.list(&ApiRoute::Tickets, &[]).await?;
    Ok(tickets)
}

pub async fn create_ticket(api: &ApiClient, draft: &TicketDraft) -> ApiResult<MaintenanceTicket> {
    draft.validate()?;
    api.post(&ApiRoute::Tickets, draft).await
}

pub async fn update_ticket(api: &ApiClient, id: &RecordId, draft: &TicketDraft) -> ApiResult<MaintenanceTicket> {
    draft.validate()?;
    api.put(&ApiRoute::Ticket(id.clone()), draft).await
}

pub async fn delete_ticket(api: &ApiClient, id: &RecordId) -> ApiResult<()> {
    api.delete(&ApiRoute::Ticket(id.clone())).await
}
