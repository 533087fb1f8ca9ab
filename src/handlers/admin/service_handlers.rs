use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::{FlashKind, SessionContext};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::handlers::{finish_mutation, flash_redirect, load_list};
use crate::models::service::{self, is_valid_status, ServiceDisplay, ServiceStatusForm, CATEGORIES, SERVICE_STATUSES};
use crate::models::table_filter::{build_page, option_pairs, ListFilter, ListQuery};
use crate::templates_structs::{select_options, AdminServicesTemplate, ListControls, PageContext};

const PATH: &str = "/admin/services";
const SORT_COLUMNS: &[(&str, &str)] = &[("title", "Title"), ("price", "Price"), ("created_at", "Posted")];

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    admin: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    admin.require_admin()?;
    let ctx = PageContext::build(&session, &admin, &config, PATH);
    let (services, load_error) = load_list(service::find_all_admin(&api, admin.token()).await)?;

    let criteria = ListFilter::new(query.search())
        .with("category", query.category.as_deref())
        .with("status", query.status.as_deref());
    let page = build_page(&services, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, SORT_COLUMNS, criteria.is_active(), load_error);

    let categories: Vec<(String, String)> = CATEGORIES.iter().map(|c| (c.to_string(), c.to_string())).collect();
    render(AdminServicesTemplate {
        ctx,
        items: page.items.into_iter().map(ServiceDisplay::from).collect(),
        list,
        category_options: select_options(&categories, ListQuery::selected(&query.category)),
        status_options: select_options(&option_pairs(SERVICE_STATUSES), ListQuery::selected(&query.status)),
        status_choices: option_pairs(SERVICE_STATUSES),
    })
}

pub async fn update_status(
    api: web::Data<ApiClient>,
    session: Session,
    admin: SessionContext,
    path: web::Path<i64>,
    form: web::Form<ServiceStatusForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    admin.require_admin()?;
    let status = form.status.trim().to_lowercase();
    if !is_valid_status(&status) {
        return Ok(flash_redirect(&session, FlashKind::Error, "Unknown service status.", PATH));
    }
    let result = service::update_status(&api, admin.token(), path.into_inner(), &status).await;
    finish_mutation(&session, result, "Service status updated.", PATH)
}
