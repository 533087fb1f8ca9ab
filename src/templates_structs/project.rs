use askama::Template;

use crate::models::application::ApplicationView;
use super::{ListControls, PageContext, SelectOption};

#[derive(Template)]
#[template(path = "projects/confirmations.html")]
pub struct ConfirmationsTemplate {
    pub ctx: PageContext,
    pub items: Vec<ApplicationView>,
    pub list: ListControls,
    pub status_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "projects/status.html")]
pub struct ProjectStatusTemplate {
    pub ctx: PageContext,
    pub items: Vec<ApplicationView>,
    pub list: ListControls,
    pub status_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "projects/active.html")]
pub struct ActiveTemplate {
    pub ctx: PageContext,
    pub items: Vec<ApplicationView>,
    pub list: ListControls,
    pub status_options: Vec<SelectOption>,
}

#[derive(Template)]
#[template(path = "projects/payment.html")]
pub struct PaymentTemplate {
    pub ctx: PageContext,
    pub item: ApplicationView,
    pub reference_number: String,
    pub errors: Vec<String>,
}
