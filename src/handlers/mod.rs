pub mod active_handlers;
pub mod admin;
pub mod auth_handlers;
pub mod confirmation_handlers;
pub mod dashboard;
pub mod directory_handlers;
pub mod page_handlers;
pub mod payment_handlers;
pub mod profile_handlers;
pub mod project_status_handlers;
pub mod review_handlers;
pub mod transaction_handlers;

use actix_session::Session;
use actix_web::HttpResponse;
use serde::Deserialize;

use crate::api::ApiError;
use crate::auth::session::{set_flash, FlashKind};
use crate::errors::AppError;

/// Body of POST forms that carry nothing but the CSRF token.
#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

pub fn flash_redirect(session: &Session, kind: FlashKind, message: &str, location: &str) -> HttpResponse {
    set_flash(session, kind, message);
    redirect(location)
}

/// POST-redirect-GET after a backend mutation. A 401 still ends the session;
/// any other failure becomes an error banner on `location`.
pub fn finish_mutation(
    session: &Session,
    result: Result<(), ApiError>,
    success: &str,
    location: &str,
) -> Result<HttpResponse, AppError> {
    match result {
        Ok(()) => Ok(flash_redirect(session, FlashKind::Success, success, location)),
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            log::warn!("Mutation failed, redirecting to {location}: {e}");
            Ok(flash_redirect(session, FlashKind::Error, &e.user_message(), location))
        }
    }
}

/// A list fetch that failed for any reason but auth renders as an empty list
/// with a "Try Again" banner.
pub fn load_list<T>(result: Result<Vec<T>, ApiError>) -> Result<(Vec<T>, Option<String>), AppError> {
    match result {
        Ok(items) => Ok((items, None)),
        Err(e) if e.is_unauthorized() => Err(e.into()),
        Err(e) => {
            log::warn!("List fetch failed: {e}");
            Ok((Vec::new(), Some(e.user_message())))
        }
    }
}

/// Fallback for unknown paths.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}
