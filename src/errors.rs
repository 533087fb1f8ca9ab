use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

use crate::api::ApiError;
use crate::templates_structs::ErrorTemplate;

#[derive(Debug)]
pub enum AppError {
    Api(ApiError),
    Template(askama::Error),
    Session(String),
    PermissionDenied(String),
    NotFound,
    Csrf,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::PermissionDenied(what) => write!(f, "Permission denied: {what}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
        }
    }
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

fn error_page(status: StatusCode, title: &str, message: &str) -> HttpResponse {
    let mut builder = HttpResponse::build(status);
    match (ErrorTemplate { title, message }).render() {
        Ok(body) => builder.content_type("text/html; charset=utf-8").body(body),
        Err(e) => {
            log::error!("Error page failed to render: {e}");
            builder.content_type("text/plain; charset=utf-8").body(format!("{title}\n\n{message}"))
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Api(ApiError::Unauthorized) | AppError::Session(_) => StatusCode::SEE_OTHER,
            AppError::PermissionDenied(_) | AppError::Csrf => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Backend no longer accepts the token: drop the session, then log in again
            AppError::Api(ApiError::Unauthorized) => see_other("/session-expired"),
            AppError::Session(e) => {
                log::debug!("{e}");
                see_other("/login")
            }
            AppError::PermissionDenied(_) => {
                error_page(StatusCode::FORBIDDEN, "Access denied", "You do not have access to this page.")
            }
            AppError::Csrf => error_page(
                StatusCode::FORBIDDEN,
                "Form expired",
                "The form was open too long or came from somewhere else. Reload the page and try again.",
            ),
            AppError::NotFound => error_page(StatusCode::NOT_FOUND, "Not found", "That page does not exist."),
            AppError::Api(e) => {
                log::error!("{self}");
                error_page(StatusCode::BAD_GATEWAY, "Something went wrong", &e.user_message())
            }
            AppError::Template(_) => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        AppError::Api(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render a template into a 200 HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
