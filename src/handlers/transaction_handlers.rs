use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::csrf;
use crate::auth::session::{FlashKind, SessionContext};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::display::format_amount;
use crate::models::review::{self, validate_review};
use crate::models::table_filter::{build_page, ListFilter, ListQuery};
use crate::models::transaction::{self, ReviewForm, TransactionDisplay};
use crate::templates_structs::{select_options, ListControls, PageContext, TransactionsTemplate};
use super::{finish_mutation, flash_redirect, load_list};

const PATH: &str = "/transactions";
const SORT_COLUMNS: &[(&str, &str)] = &[("title", "Service"), ("amount", "Amount"), ("date", "Date")];

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let (history, load_error) = load_list(transaction::find_history(&api, user.token()).await)?;

    let criteria = ListFilter::new(query.search()).with("status", query.status.as_deref());
    let page = build_page(&history, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, SORT_COLUMNS, criteria.is_active(), load_error);

    let total: f64 = criteria.apply(&history).iter().map(|t| t.amount).sum();
    let statuses: Vec<(String, String)> = transaction::statuses(&history)
        .into_iter()
        .map(|s| (s.clone(), s))
        .collect();

    render(TransactionsTemplate {
        ctx,
        items: page.items.into_iter().map(TransactionDisplay::from).collect(),
        list,
        status_options: select_options(&statuses, ListQuery::selected(&query.status)),
        total_display: format_amount(total),
    })
}

/// `id` is the application the transaction paid for.
pub async fn submit_review(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    path: web::Path<i64>,
    form: web::Form<ReviewForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let errors = validate_review(form.rating, &form.comment);
    if !errors.is_empty() {
        return Ok(flash_redirect(&session, FlashKind::Error, &errors.join(". "), PATH));
    }
    let result = review::submit(&api, user.token(), path.into_inner(), form.rating, &form.comment).await;
    finish_mutation(&session, result, "Thanks for your review!", PATH)
}
