use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::is_signed_in;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::templates_structs::{AboutTemplate, PrivacyTemplate, PublicContext, TermsTemplate};
use super::redirect;

fn public(session: &Session, config: &AppConfig) -> PublicContext {
    PublicContext {
        app_name: config.app_name.clone(),
        signed_in: is_signed_in(session),
    }
}

pub async fn root() -> HttpResponse {
    redirect("/dashboard")
}

pub async fn about(config: web::Data<AppConfig>, session: Session) -> Result<HttpResponse, AppError> {
    render(AboutTemplate { public: public(&session, &config) })
}

pub async fn privacy(config: web::Data<AppConfig>, session: Session) -> Result<HttpResponse, AppError> {
    render(PrivacyTemplate { public: public(&session, &config) })
}

pub async fn terms(config: web::Data<AppConfig>, session: Session) -> Result<HttpResponse, AppError> {
    render(TermsTemplate { public: public(&session, &config) })
}
