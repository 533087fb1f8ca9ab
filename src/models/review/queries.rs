use serde_json::json;

use crate::api::wire::map_list;
use crate::api::{ApiClient, ApiError};
use super::types::ReviewRecord;

/// Reviews the signed-in user wrote.
pub async fn find_submitted(api: &ApiClient, token: &str) -> Result<Vec<ReviewRecord>, ApiError> {
    let body = api.get(token, "/reviews/submitted").await?;
    Ok(map_list(&body, "review", ReviewRecord::from_fields))
}

/// Reviews other users wrote about the signed-in user.
pub async fn find_received(api: &ApiClient, token: &str) -> Result<Vec<ReviewRecord>, ApiError> {
    let body = api.get(token, "/reviews/received").await?;
    Ok(map_list(&body, "review", ReviewRecord::from_fields))
}

pub async fn submit(
    api: &ApiClient,
    token: &str,
    application_id: i64,
    rating: u8,
    comment: &str,
) -> Result<(), ApiError> {
    let body = json!({
        "applicationId": application_id,
        "rating": rating,
        "comment": comment.trim(),
    });
    api.post(token, "/reviews", &body).await?;
    log::info!("Review submitted for project {application_id}");
    Ok(())
}
