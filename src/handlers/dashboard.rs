use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::api::ApiClient;
use crate::auth::session::SessionContext;
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::application::{self, filter::is_in_progress, ApplicationStatus, ApplicationView};
use crate::templates_structs::{DashboardTemplate, PageContext, StatCard};
use super::load_list;

const TODO_PREVIEW_LEN: usize = 5;

fn time_greeting(username: &str, hour: u32) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    if username.is_empty() {
        period.to_string()
    } else {
        format!("{period}, {username}")
    }
}

pub async fn index(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, "/dashboard");
    let greeting = time_greeting(&ctx.username, Local::now().hour());

    let (received, status, mine) = tokio::join!(
        application::find_received(&api, user.token()),
        application::find_for_status(&api, user.token()),
        application::find_mine(&api, user.token()),
    );
    let (received, received_err) = load_list(received)?;
    let (status, status_err) = load_list(status)?;
    let (mine, mine_err) = load_list(mine)?;
    let mut load_errors: Vec<String> = [received_err, status_err, mine_err].into_iter().flatten().collect();
    load_errors.dedup();

    let pending = received.iter().filter(|a| a.status == ApplicationStatus::Pending).count();
    let active = mine.iter().filter(|a| is_in_progress(a)).count();

    let mut todo: Vec<ApplicationView> = Vec::new();
    for app in received.into_iter().chain(status).chain(mine) {
        if todo.iter().any(|v| v.app.id == app.id) {
            continue;
        }
        let view = ApplicationView::new(app, user.user_id());
        if view.has_actions() {
            todo.push(view);
        }
    }
    let awaiting = todo.len();
    todo.truncate(TODO_PREVIEW_LEN);

    let cards = vec![
        StatCard { label: "New applications", value: pending, href: "/confirmations" },
        // Counted across every list, so it points at the combined table below
        StatCard { label: "Need your action", value: awaiting, href: "/dashboard#todo" },
        StatCard { label: "Active projects", value: active, href: "/active" },
    ];

    render(DashboardTemplate { ctx, greeting, cards, todo, load_errors })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_by_hour() {
        assert_eq!(time_greeting("Ana", 8), "Good morning, Ana");
        assert_eq!(time_greeting("Ana", 13), "Good afternoon, Ana");
        assert_eq!(time_greeting("Ana", 23), "Good evening, Ana");
        assert_eq!(time_greeting("", 2), "Good evening");
    }
}
