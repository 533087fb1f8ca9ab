use serde_json::json;

use crate::api::wire::map_list;
use crate::api::{ApiClient, ApiError};
use super::types::TransactionRecord;

pub async fn find_history(api: &ApiClient, token: &str) -> Result<Vec<TransactionRecord>, ApiError> {
    let body = api.get(token, "/transactions/history").await?;
    Ok(map_list(&body, "transaction", TransactionRecord::from_fields))
}

/// Report a payment made outside the app (e.g. GCash) for an approved project.
pub async fn record_payment(
    api: &ApiClient,
    token: &str,
    application_id: i64,
    reference_number: &str,
    amount: f64,
) -> Result<(), ApiError> {
    let body = json!({
        "applicationId": application_id,
        "referenceNumber": reference_number,
        "amount": amount,
    });
    api.post(token, "/transactions", &body).await?;
    log::info!("Payment recorded for project {application_id}");
    Ok(())
}
