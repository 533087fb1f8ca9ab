use crate::models::table_filter::{ListFilter, ListQuery};

/// (value, label) pairs for the role select.
pub const ROLE_OPTIONS: &[(&str, &str)] = &[("admin", "Admin"), ("student", "Student")];

/// (value, label) pairs for the account status select.
pub const STATUS_OPTIONS: &[(&str, &str)] = &[("active", "Active"), ("suspended", "Suspended")];

/// Sortable columns on the user table: (sort key, header label).
pub const SORT_COLUMNS: &[(&str, &str)] = &[("name", "Name"), ("email", "Email"), ("created_at", "Joined")];

/// Admin user table: search by name/email/course, exact role and status.
pub fn admin_filter(query: &ListQuery) -> ListFilter {
    ListFilter::new(query.search())
        .with("role", query.role.as_deref())
        .with("status", query.status.as_deref())
}

/// Public directory: search only, suspended accounts never listed.
pub fn directory_filter(query: &ListQuery) -> ListFilter {
    ListFilter::new(query.search()).with("status", Some("active"))
}
