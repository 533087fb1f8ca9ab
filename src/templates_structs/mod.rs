mod admin;
mod common;
mod history;
mod profile;
mod project;

pub use admin::*;
pub use common::*;
pub use history::*;
pub use profile::*;
pub use project::*;

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{take_flash, Flash, SessionContext};
use crate::config::AppConfig;
use crate::models::display::initials;
use crate::models::table_filter::{ListQuery, Page};

pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

const MAIN_NAV: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/confirmations", "Applications"),
    ("/project-status", "Project Status"),
    ("/active", "Active Projects"),
    ("/transactions", "Transactions"),
    ("/reviews", "Reviews"),
    ("/directory", "Directory"),
];

const ADMIN_NAV: &[(&str, &str)] = &[("/admin/users", "Manage Users"), ("/admin/services", "Manage Services")];

fn nav_links(items: &[(&'static str, &'static str)], current_path: &str) -> Vec<NavLink> {
    items
        .iter()
        .map(|&(href, label)| NavLink { href, label, active: current_path.starts_with(href) })
        .collect()
}

/// Common context shared by all signed-in pages.
/// Templates access these as `ctx.username`, `ctx.nav`, etc.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub is_admin: bool,
    pub flash: Option<Flash>,
    pub nav: Vec<NavLink>,
    pub admin_nav: Vec<NavLink>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, user: &SessionContext, config: &AppConfig, current_path: &str) -> Self {
        let username = user.display_name().to_string();
        Self {
            avatar_initial: initials(&username),
            is_admin: user.is_admin(),
            flash: take_flash(session),
            nav: nav_links(MAIN_NAV, current_path),
            admin_nav: if user.is_admin() { nav_links(ADMIN_NAV, current_path) } else { Vec::new() },
            app_name: config.app_name.clone(),
            csrf_token: csrf::get_or_create_token(session),
            username,
        }
    }
}

pub struct PageLink {
    pub number: usize,
    pub href: String,
    pub current: bool,
}

/// Pagination controls for a list page.
pub struct Pager {
    pub links: Vec<PageLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub summary: String,
}

impl Pager {
    pub fn new<T>(page: &Page<T>, query: &ListQuery, path: &str) -> Self {
        let links = page
            .page_numbers()
            .into_iter()
            .map(|n| PageLink { number: n, href: query.page_link(path, n), current: n == page.page })
            .collect();
        let summary = if page.total_count == 0 {
            "No results".to_string()
        } else {
            format!("Showing {}–{} of {}", page.first_item(), page.last_item(), page.total_count)
        };
        Self {
            links,
            prev_href: page.has_prev().then(|| query.page_link(path, page.page - 1)),
            next_href: page.has_next().then(|| query.page_link(path, page.page + 1)),
            summary,
        }
    }
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

pub fn select_options(pairs: &[(String, String)], selected: &str) -> Vec<SelectOption> {
    pairs
        .iter()
        .map(|(value, label)| SelectOption {
            selected: value.eq_ignore_ascii_case(selected),
            value: value.clone(),
            label: label.clone(),
        })
        .collect()
}

/// Page-size select, always offering the fixed sizes.
pub fn page_size_options(query: &ListQuery) -> Vec<SelectOption> {
    let current = query.page_size().get();
    crate::models::table_filter::PAGE_SIZES
        .iter()
        .map(|n| SelectOption { value: n.to_string(), label: format!("{n} per page"), selected: *n == current })
        .collect()
}

/// A sortable table header.
pub struct SortHeader {
    pub label: &'static str,
    pub href: String,
    pub indicator: &'static str,
}

pub fn sort_headers(columns: &[(&'static str, &'static str)], query: &ListQuery, path: &str) -> Vec<SortHeader> {
    let spec = query.sort_spec();
    columns
        .iter()
        .map(|&(key, label)| SortHeader {
            label,
            href: query.sort_link(path, key),
            indicator: if spec.column == key {
                if spec.dir_str() == "asc" { "▲" } else { "▼" }
            } else {
                ""
            },
        })
        .collect()
}

/// Search box, page-size select, sortable headers and pager shared by every list page.
pub struct ListControls {
    pub path: &'static str,
    pub search: String,
    /// Current sort column and direction, carried through the filter form.
    pub sort: String,
    pub dir: String,
    pub page_sizes: Vec<SelectOption>,
    pub headers: Vec<SortHeader>,
    pub pager: Pager,
    pub filter_active: bool,
    pub load_error: Option<String>,
    /// "Try Again" target: the same list with the same parameters.
    pub retry_href: String,
}

impl ListControls {
    pub fn new<T>(
        page: &Page<T>,
        query: &ListQuery,
        path: &'static str,
        columns: &[(&'static str, &'static str)],
        filter_active: bool,
        load_error: Option<String>,
    ) -> Self {
        let spec = query.sort_spec();
        Self {
            path,
            search: query.search().to_string(),
            sort: spec.column.clone(),
            dir: spec.dir_str().to_string(),
            page_sizes: page_size_options(query),
            headers: sort_headers(columns, query, path),
            pager: Pager::new(page, query, path),
            filter_active,
            load_error,
            retry_href: query.page_link(path, page.page),
        }
    }
}
