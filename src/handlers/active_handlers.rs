use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::session::{FlashKind, SessionContext};
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::application::{self, filter, ApplicationView, ProofForm};
use crate::models::table_filter::{build_page, ListQuery};
use crate::templates_structs::{select_options, ActiveTemplate, ListControls, PageContext};
use super::{finish_mutation, flash_redirect, load_list};

const PATH: &str = "/active";

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let (mine, load_error) = load_list(application::find_mine(&api, user.token()).await)?;
    let active: Vec<_> = mine.into_iter().filter(filter::is_in_progress).collect();

    let criteria = filter::list_filter(&query);
    let page = build_page(&active, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, filter::SORT_COLUMNS, criteria.is_active(), load_error);
    let items = page
        .items
        .into_iter()
        .map(|a| ApplicationView::new(a, user.user_id()))
        .collect();

    render(ActiveTemplate {
        ctx,
        items,
        list,
        status_options: select_options(&filter::status_options(), ListQuery::selected(&query.status)),
    })
}

pub async fn submit_proof(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<ProofForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(error) = validate::validate_image(&form.proof_image) {
        return Ok(flash_redirect(&session, FlashKind::Error, &error, PATH));
    }
    let result = application::submit_proof(&api, user.token(), path.into_inner(), form.proof_image.trim()).await;
    finish_mutation(&session, result, "Proof submitted. Waiting for the client's approval.", PATH)
}
