use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::{ApiClient, ApiError};
use crate::auth::session::{is_signed_in, store_login};
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::user::{self, LoginForm};
use crate::templates_structs::LoginTemplate;
use super::{redirect, CsrfOnly};

#[derive(Deserialize)]
pub struct LoginQuery {
    pub expired: Option<String>,
}

fn login_template(session: &Session, config: &AppConfig, email: &str, error: Option<String>) -> LoginTemplate {
    LoginTemplate {
        error,
        notice: None,
        email: email.to_string(),
        app_name: config.app_name.clone(),
        csrf_token: csrf::get_or_create_token(session),
    }
}

pub async fn login_page(
    config: web::Data<AppConfig>,
    session: Session,
    query: web::Query<LoginQuery>,
) -> Result<HttpResponse, AppError> {
    if is_signed_in(&session) {
        return Ok(redirect("/dashboard"));
    }
    let mut tmpl = login_template(&session, &config, "", None);
    if query.expired.is_some() {
        tmpl.notice = Some("Your session has expired. Please sign in again.".to_string());
    }
    render(tmpl)
}

pub async fn login_submit(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let email = form.email.trim();
    let error = validate::validate_email(email)
        .or_else(|| form.password.is_empty().then(|| "Password is required".to_string()));
    if let Some(error) = error {
        return render(login_template(&session, &config, email, Some(error)));
    }

    let login = match user::authenticate(&api, email, &form.password).await {
        Ok(login) => login,
        Err(ApiError::Unauthorized) => {
            log::info!("Failed login for {email}");
            let error = "Invalid email or password".to_string();
            return render(login_template(&session, &config, email, Some(error)));
        }
        Err(e) => {
            log::warn!("Login request failed: {e}");
            return render(login_template(&session, &config, email, Some(e.user_message())));
        }
    };

    if login.user.is_suspended() {
        log::info!("Suspended user {} tried to sign in", login.user.id);
        let error = "This account is suspended. Contact an administrator.".to_string();
        return render(login_template(&session, &config, email, Some(error)));
    }

    store_login(&session, &login)?;
    Ok(redirect("/dashboard"))
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(redirect("/login"))
}

/// Target of every backend 401: forget the token and start over.
pub async fn session_expired(session: Session) -> HttpResponse {
    session.purge();
    redirect("/login?expired=1")
}
