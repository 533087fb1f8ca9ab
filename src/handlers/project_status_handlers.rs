use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::SessionContext;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::application::{self, filter, ApplicationView};
use crate::models::table_filter::{build_page, ListQuery};
use crate::templates_structs::{select_options, ListControls, PageContext, ProjectStatusTemplate};
use super::{finish_mutation, load_list, CsrfOnly};

const PATH: &str = "/project-status";

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let (projects, load_error) = load_list(application::find_for_status(&api, user.token()).await)?;

    let criteria = filter::list_filter(&query);
    let page = build_page(&projects, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, filter::SORT_COLUMNS, criteria.is_active(), load_error);
    let items = page
        .items
        .into_iter()
        .map(|a| ApplicationView::new(a, user.user_id()))
        .collect();

    render(ProjectStatusTemplate {
        ctx,
        items,
        list,
        status_options: select_options(&filter::status_options(), ListQuery::selected(&query.status)),
    })
}

pub async fn approve(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let result = application::approve_proof(&api, user.token(), path.into_inner()).await;
    finish_mutation(&session, result, "Proof approved. You can now send the payment.", PATH)
}

pub async fn reject(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let result = application::reject_proof(&api, user.token(), path.into_inner()).await;
    finish_mutation(&session, result, "Proof rejected. The freelancer can submit a new one.", PATH)
}

pub async fn confirm_payment(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let result = application::confirm_payment(&api, user.token(), path.into_inner()).await;
    finish_mutation(&session, result, "Payment confirmed. The project is closed.", PATH)
}
