use serde_json::json;

use crate::api::wire::map_list;
use crate::api::{ApiClient, ApiError};
use super::types::ServiceRecord;

/// Every listing regardless of status (admin only).
pub async fn find_all_admin(api: &ApiClient, token: &str) -> Result<Vec<ServiceRecord>, ApiError> {
    let body = api.get(token, "/services/admin/all").await?;
    let services = map_list(&body, "service", ServiceRecord::from_fields);
    log::debug!("Fetched {} services", services.len());
    Ok(services)
}

pub async fn update_status(api: &ApiClient, token: &str, id: i64, status: &str) -> Result<(), ApiError> {
    api.put(token, &format!("/services/{id}/status"), &json!({ "status": status })).await?;
    log::info!("Service {id} status set to {status}");
    Ok(())
}
