use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::session::{FlashKind, SessionContext};
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::application::{self, Application, ApplicationView, PaymentForm, StatusAction};
use crate::models::transaction;
use crate::templates_structs::{PageContext, PaymentTemplate};
use super::{finish_mutation, flash_redirect};

const BACK: &str = "/project-status";

/// The project, provided the viewer is the client and the proof was approved.
async fn payable(
    api: &ApiClient,
    user: &SessionContext,
    id: i64,
) -> Result<Result<Application, &'static str>, AppError> {
    let Some(app) = application::find_by_id(api, user.token(), id).await? else {
        return Err(AppError::NotFound);
    };
    let roles = app.roles_for(user.user_id());
    if !app.status.allows(StatusAction::Pay, &roles) {
        return Ok(Err(if roles.is_client {
            "This project is not ready for payment."
        } else {
            "Only the client can pay for this project."
        }));
    }
    Ok(Ok(app))
}

pub async fn show(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let app = match payable(&api, &user, path.into_inner()).await? {
        Ok(app) => app,
        Err(reason) => return Ok(flash_redirect(&session, FlashKind::Error, reason, BACK)),
    };
    let ctx = PageContext::build(&session, &user, &config, BACK);
    render(PaymentTemplate {
        ctx,
        item: ApplicationView::new(app, user.user_id()),
        reference_number: String::new(),
        errors: vec![],
    })
}

pub async fn submit(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<PaymentForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let app = match payable(&api, &user, path.into_inner()).await? {
        Ok(app) => app,
        Err(reason) => return Ok(flash_redirect(&session, FlashKind::Error, reason, BACK)),
    };

    if let Some(error) = validate::validate_reference_number(&form.reference_number) {
        let ctx = PageContext::build(&session, &user, &config, BACK);
        return render(PaymentTemplate {
            ctx,
            item: ApplicationView::new(app, user.user_id()),
            reference_number: form.reference_number.clone(),
            errors: vec![error],
        });
    }

    let reference: String = form.reference_number.chars().filter(|c| !c.is_whitespace()).collect();
    let result = transaction::record_payment(&api, user.token(), app.id, &reference, app.service_price).await;
    finish_mutation(
        &session,
        result,
        "Payment recorded. The freelancer will confirm once it arrives.",
        BACK,
    )
}
