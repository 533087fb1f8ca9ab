use askama::Template;

use crate::models::review::ReviewDisplay;
use crate::models::transaction::TransactionDisplay;
use super::{ListControls, PageContext, SelectOption};

#[derive(Template)]
#[template(path = "history/transactions.html")]
pub struct TransactionsTemplate {
    pub ctx: PageContext,
    pub items: Vec<TransactionDisplay>,
    pub list: ListControls,
    pub status_options: Vec<SelectOption>,
    pub total_display: String,
}

/// Submitted / received switch on the reviews page.
pub struct ReviewTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
    pub count: usize,
}

#[derive(Template)]
#[template(path = "history/reviews.html")]
pub struct ReviewsTemplate {
    pub ctx: PageContext,
    pub tabs: Vec<ReviewTab>,
    pub showing_received: bool,
    pub items: Vec<ReviewDisplay>,
    pub list: ListControls,
    pub rating_options: Vec<SelectOption>,
    pub average: Option<String>,
}
