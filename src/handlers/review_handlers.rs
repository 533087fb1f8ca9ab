use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::session::SessionContext;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::review::{self, average_rating, ReviewDisplay, MAX_RATING, MIN_RATING};
use crate::models::table_filter::{build_page, ListFilter, ListQuery};
use crate::templates_structs::{select_options, ListControls, PageContext, ReviewTab, ReviewsTemplate};
use super::load_list;

const PATH: &str = "/reviews";
const SORT_COLUMNS: &[(&str, &str)] = &[("rating", "Rating"), ("date", "Date")];

fn tab(label: &'static str, key: &str, query: &ListQuery, active: bool, count: usize) -> ReviewTab {
    let target = ListQuery {
        tab: Some(key.to_string()),
        page: None,
        ..query.clone()
    };
    ReviewTab { label, href: target.page_link(PATH, 1), active, count }
}

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let showing_received = query.tab.as_deref() != Some("submitted");

    let (received, submitted) = tokio::join!(
        review::find_received(&api, user.token()),
        review::find_submitted(&api, user.token()),
    );
    let (received, received_err) = load_list(received)?;
    let (submitted, submitted_err) = load_list(submitted)?;

    let tabs = vec![
        tab("Received", "received", &query, showing_received, received.len()),
        tab("Written", "submitted", &query, !showing_received, submitted.len()),
    ];
    let average = average_rating(&received).map(|avg| format!("{avg:.1}"));
    let (shown, load_error) = if showing_received {
        (received, received_err)
    } else {
        (submitted, submitted_err)
    };

    let criteria = ListFilter::new(query.search()).with("rating", query.rating.as_deref());
    let page = build_page(&shown, &criteria, &query.sort_spec(), &query);
    let list = ListControls::new(&page, &query, PATH, SORT_COLUMNS, criteria.is_active(), load_error);

    let ratings: Vec<(String, String)> = (MIN_RATING..=MAX_RATING)
        .rev()
        .map(|r| (r.to_string(), format!("{r} star{}", if r == 1 { "" } else { "s" })))
        .collect();

    render(ReviewsTemplate {
        ctx,
        tabs,
        showing_received,
        items: page.items.into_iter().map(ReviewDisplay::from).collect(),
        list,
        rating_options: select_options(&ratings, ListQuery::selected(&query.rating)),
        average,
    })
}
