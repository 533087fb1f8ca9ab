use askama::Template;

use crate::models::service::ServiceDisplay;
use crate::models::user::UserDisplay;
use super::{ListControls, PageContext, SelectOption};

#[derive(Template)]
#[template(path = "admin/users.html")]
pub struct AdminUsersTemplate {
    pub ctx: PageContext,
    pub items: Vec<UserDisplay>,
    pub list: ListControls,
    pub role_options: Vec<SelectOption>,
    pub status_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "admin/services.html")]
pub struct AdminServicesTemplate {
    pub ctx: PageContext,
    pub items: Vec<ServiceDisplay>,
    pub list: ListControls,
    pub category_options: Vec<SelectOption>,
    pub status_options: Vec<SelectOption>,
    /// Choices for the per-row status change form.
    pub status_choices: Vec<(String, String)>,
}
