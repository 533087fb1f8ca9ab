use crate::models::table_filter::{ListFilter, ListQuery};
use super::status::ApplicationStatus;
use super::types::Application;

/// Sortable columns on the project tables: (sort key, header label).
pub const SORT_COLUMNS: &[(&str, &str)] = &[("title", "Service"), ("price", "Price"), ("date", "Date")];

/// Search over title, names and message; exact status match.
pub fn list_filter(query: &ListQuery) -> ListFilter {
    ListFilter::new(query.search()).with("status", query.status.as_deref())
}

/// (wire value, label) pairs for the status select.
pub fn status_options() -> Vec<(String, String)> {
    ApplicationStatus::all()
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect()
}

/// Projects past the application stage that still need work or payment.
pub fn is_in_progress(app: &Application) -> bool {
    !app.status.is_terminal() && app.status != ApplicationStatus::Pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_options_cover_lifecycle() {
        let opts = status_options();
        assert_eq!(opts.len(), ApplicationStatus::all().len());
        assert!(opts.iter().any(|(v, l)| v == "Service Started" && l == "In Progress"));
    }

    #[test]
    fn filter_uses_status_select() {
        let q = ListQuery { status: Some("Pending".into()), ..ListQuery::default() };
        assert!(list_filter(&q).is_active());
        assert!(!list_filter(&ListQuery::default()).is_active());
    }
}
