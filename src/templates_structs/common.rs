use askama::Template;

use crate::models::application::ApplicationView;
use super::PageContext;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub notice: Option<String>,
    pub email: String,
    pub app_name: String,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

/// Header links for the public pages depend only on whether someone is signed in.
pub struct PublicContext {
    pub app_name: String,
    pub signed_in: bool,
}

#[derive(Template)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub public: PublicContext,
}

#[derive(Template)]
#[template(path = "pages/privacy.html")]
pub struct PrivacyTemplate {
    pub public: PublicContext,
}

#[derive(Template)]
#[template(path = "pages/terms.html")]
pub struct TermsTemplate {
    pub public: PublicContext,
}

/// One summary tile on the dashboard.
pub struct StatCard {
    pub label: &'static str,
    pub value: usize,
    pub href: &'static str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub cards: Vec<StatCard>,
    /// Projects where the viewer has something to do right now.
    pub todo: Vec<ApplicationView>,
    pub load_errors: Vec<String>,
}
