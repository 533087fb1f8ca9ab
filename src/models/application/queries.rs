use serde_json::json;

use crate::api::wire::map_list;
use crate::api::{ApiClient, ApiError};
use super::types::{Application, PostType};

/// Applications other users sent to the signed-in user's posts.
pub async fn find_received(api: &ApiClient, token: &str) -> Result<Vec<Application>, ApiError> {
    let body = api.get(token, "/service-confirmations").await?;
    let apps = map_list(&body, "application", Application::from_fields);
    log::debug!("Fetched {} received applications", apps.len());
    Ok(apps)
}

/// Applications the signed-in user takes part in as applicant or performer.
pub async fn find_mine(api: &ApiClient, token: &str) -> Result<Vec<Application>, ApiError> {
    let body = api.get(token, "/my-applications").await?;
    Ok(map_list(&body, "application", Application::from_fields))
}

/// Projects that need a status decision from the signed-in user.
pub async fn find_for_status(api: &ApiClient, token: &str) -> Result<Vec<Application>, ApiError> {
    let body = api.get(token, "/status").await?;
    Ok(map_list(&body, "project", Application::from_fields))
}

/// Look an application up in the status list, then in the user's own applications.
pub async fn find_by_id(api: &ApiClient, token: &str, id: i64) -> Result<Option<Application>, ApiError> {
    if let Some(app) = find_for_status(api, token).await?.into_iter().find(|a| a.id == id) {
        return Ok(Some(app));
    }
    Ok(find_mine(api, token).await?.into_iter().find(|a| a.id == id))
}

pub async fn accept(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.patch(token, &format!("/service-confirmations/{id}/accept"), None).await?;
    log::info!("Application {id} accepted");
    Ok(())
}

pub async fn reject(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.patch(token, &format!("/service-confirmations/{id}/reject"), None).await?;
    log::info!("Application {id} rejected");
    Ok(())
}

pub async fn start(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.patch(token, &format!("/my-applications/{id}/start"), None).await?;
    log::info!("Project {id} started");
    Ok(())
}

pub async fn submit_proof(api: &ApiClient, token: &str, id: i64, proof_image: &str) -> Result<(), ApiError> {
    let body = json!({ "proofImage": proof_image });
    api.patch(token, &format!("/my-applications/{id}/proof"), Some(&body)).await?;
    log::info!("Proof submitted for project {id}");
    Ok(())
}

pub async fn approve_proof(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.patch(token, &format!("/status/{id}/approve"), None).await?;
    log::info!("Proof approved for project {id}");
    Ok(())
}

pub async fn reject_proof(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.patch(token, &format!("/status/{id}/reject"), None).await?;
    log::info!("Proof rejected for project {id}");
    Ok(())
}

pub async fn confirm_payment(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.patch(token, &format!("/status/{id}/confirm-payment"), None).await?;
    log::info!("Payment confirmed for project {id}");
    Ok(())
}

/// Result of accepting an application and starting the project.
#[derive(Debug)]
pub struct AcceptOutcome {
    pub redirect: &'static str,
    /// Set when the accept went through but the start call did not.
    pub start_error: Option<ApiError>,
}

/// Accept, then start the project, then pick the landing page from the post type.
///
/// A failed accept is returned as an error. A failed start leaves the
/// application accepted; the owner lands back on the confirmations list.
pub async fn accept_and_start(
    api: &ApiClient,
    token: &str,
    id: i64,
    post_type: PostType,
) -> Result<AcceptOutcome, ApiError> {
    accept(api, token, id).await?;
    match start(api, token, id).await {
        Ok(()) => Ok(AcceptOutcome { redirect: post_type.accept_redirect(), start_error: None }),
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            log::warn!("Application {id} accepted but start failed: {e}");
            Ok(AcceptOutcome { redirect: "/confirmations", start_error: Some(e) })
        }
    }
}
