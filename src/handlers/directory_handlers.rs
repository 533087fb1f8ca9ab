use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::session::SessionContext;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::table_filter::{build_page, ListQuery};
use crate::models::user::{self, filter, UserDisplay};
use crate::templates_structs::{DirectoryTemplate, ListControls, PageContext};
use super::load_list;

const PATH: &str = "/directory";
const SORT_COLUMNS: &[(&str, &str)] = &[("name", "Name"), ("created_at", "Joined")];

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let (users, load_error) = load_list(user::find_all(&api, user.token()).await)?;

    let criteria = filter::directory_filter(&query);
    let page = build_page(&users, &criteria, &query.sort_spec(), &query);
    // The forced status filter is not something the user chose
    let list = ListControls::new(&page, &query, PATH, SORT_COLUMNS, !query.search().is_empty(), load_error);

    render(DirectoryTemplate {
        ctx,
        items: page.items.into_iter().map(|u| UserDisplay::new(u, user.user_id())).collect(),
        list,
    })
}
