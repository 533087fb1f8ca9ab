use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::{FlashKind, SessionContext};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::application::{self, filter, ApplicationView, PostType};
use crate::models::table_filter::{build_page, ListQuery};
use crate::templates_structs::{select_options, ConfirmationsTemplate, ListControls, PageContext};
use super::{finish_mutation, flash_redirect, load_list, CsrfOnly};

const PATH: &str = "/confirmations";

/// Accept button form; the post type picks the landing page afterwards.
#[derive(Deserialize)]
pub struct AcceptForm {
    pub post_type: String,
    pub csrf_token: String,
}

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let (apps, load_error) = load_list(application::find_received(&api, user.token()).await)?;

    let criteria = filter::list_filter(&query);
    let page = build_page(&apps, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, filter::SORT_COLUMNS, criteria.is_active(), load_error);
    let items = page
        .items
        .into_iter()
        .map(|a| ApplicationView::new(a, user.user_id()))
        .collect();

    render(ConfirmationsTemplate {
        ctx,
        items,
        list,
        status_options: select_options(&filter::status_options(), ListQuery::selected(&query.status)),
    })
}

pub async fn accept(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<AcceptForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    let post_type = PostType::parse(&form.post_type);

    match application::accept_and_start(&api, user.token(), id, post_type).await {
        Ok(outcome) => Ok(match outcome.start_error {
            None => flash_redirect(
                &session,
                FlashKind::Success,
                "Application accepted. The project has started.",
                outcome.redirect,
            ),
            Some(e) => flash_redirect(
                &session,
                FlashKind::Error,
                &format!("Application accepted, but the project could not be started: {}", e.user_message()),
                outcome.redirect,
            ),
        }),
        Err(e) => finish_mutation(&session, Err(e), "", PATH),
    }
}

/// Start button on an accepted application. Shares the accept form's post type.
pub async fn start(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<AcceptForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let id = path.into_inner();
    match application::start(&api, user.token(), id).await {
        Ok(()) => finish_mutation(
            &session,
            Ok(()),
            "The project has started.",
            PostType::parse(&form.post_type).accept_redirect(),
        ),
        Err(e) => finish_mutation(&session, Err(e), "", PATH),
    }
}

pub async fn reject(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let result = application::reject(&api, user.token(), path.into_inner()).await;
    finish_mutation(&session, result, "Application rejected.", PATH)
}
