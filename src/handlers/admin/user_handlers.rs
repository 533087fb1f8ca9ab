use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::{FlashKind, SessionContext};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::handlers::{finish_mutation, flash_redirect, load_list, CsrfOnly};
use crate::models::table_filter::{build_page, option_pairs, ListQuery};
use crate::models::user::{self, filter, SuspendForm, UserDisplay};
use crate::templates_structs::{select_options, AdminUsersTemplate, ListControls, PageContext};

const PATH: &str = "/admin/users";

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    admin: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    admin.require_admin()?;
    let ctx = PageContext::build(&session, &admin, &config, PATH);
    let (users, load_error) = load_list(user::find_all(&api, admin.token()).await)?;

    let criteria = filter::admin_filter(&query);
    let page = build_page(&users, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, filter::SORT_COLUMNS, criteria.is_active(), load_error);

    render(AdminUsersTemplate {
        ctx,
        items: page.items.into_iter().map(|u| UserDisplay::new(u, admin.user_id())).collect(),
        list,
        role_options: select_options(&option_pairs(filter::ROLE_OPTIONS), ListQuery::selected(&query.role)),
        status_options: select_options(&option_pairs(filter::STATUS_OPTIONS), ListQuery::selected(&query.status)),
    })
}

pub async fn delete(
    api: web::Data<ApiClient>,
    session: Session,
    admin: SessionContext,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    admin.require_admin()?;
    let id = path.into_inner();
    if id == admin.user_id() {
        return Ok(flash_redirect(&session, FlashKind::Error, "You cannot delete your own account.", PATH));
    }
    let result = user::delete(&api, admin.token(), id).await;
    finish_mutation(&session, result, "User deleted.", PATH)
}

pub async fn suspend(
    api: web::Data<ApiClient>,
    session: Session,
    admin: SessionContext,
    path: web::Path<i64>,
    form: web::Form<SuspendForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    admin.require_admin()?;
    let id = path.into_inner();
    let suspend = matches!(form.suspend.as_str(), "true" | "1" | "on");
    if suspend && id == admin.user_id() {
        return Ok(flash_redirect(&session, FlashKind::Error, "You cannot suspend your own account.", PATH));
    }
    let result = user::set_suspended(&api, admin.token(), id, suspend).await;
    let message = if suspend { "User suspended." } else { "User reinstated." };
    finish_mutation(&session, result, message, PATH)
}
