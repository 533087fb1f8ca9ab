use askama::Template;

use crate::models::user::UserDisplay;
use super::{ListControls, PageContext};

#[derive(Template)]
#[template(path = "profile/profile.html")]
pub struct ProfileTemplate {
    pub ctx: PageContext,
    pub profile: UserDisplay,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "profile/directory.html")]
pub struct DirectoryTemplate {
    pub ctx: PageContext,
    pub items: Vec<UserDisplay>,
    pub list: ListControls,
}
