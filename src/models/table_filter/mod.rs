use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const PAGE_SIZES: [usize; 3] = [10, 25, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Values that mean "no filter" in a select box.
const ANY: &[&str] = &["", "all", "any"];

/// Implemented by every record shown in a filterable list.
pub trait Searchable {
    /// Text fields matched by the free-text search box.
    fn search_fields(&self) -> Vec<&str>;

    /// Value compared against an exact-match filter (`status`, `role`, ...).
    fn filter_value(&self, key: &str) -> Option<String>;

    fn sort_key(&self, _column: &str) -> Option<SortKey> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    pub fn text(s: &str) -> Self {
        SortKey::Text(s.to_lowercase())
    }
}

/// Query-string parameters shared by the list pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
}

impl ListQuery {
    pub fn search(&self) -> &str {
        self.q.as_deref().map(str::trim).unwrap_or("")
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::from_param(self.per_page)
    }

    pub fn sort_spec(&self) -> SortSpec {
        SortSpec::from_params(self.sort.as_deref(), self.dir.as_deref())
    }

    /// Selected value of a filter select, or "" when unset.
    pub fn selected<'a>(value: &'a Option<String>) -> &'a str {
        value.as_deref().unwrap_or("")
    }

    /// Link to `page` keeping every other parameter.
    pub fn page_link(&self, path: &str, page: usize) -> String {
        let mut next = self.clone();
        next.page = Some(page);
        match serde_urlencoded::to_string(&next) {
            Ok(qs) if !qs.is_empty() => format!("{path}?{qs}"),
            _ => path.to_string(),
        }
    }

    /// Link that sorts by `column`, flipping direction when it is already the sort column.
    pub fn sort_link(&self, path: &str, column: &str) -> String {
        let current = self.sort_spec();
        let mut next = self.clone();
        next.page = None;
        next.dir = Some(if current.column == column { current.toggle_dir() } else { "asc" }.to_string());
        next.sort = Some(column.to_string());
        match serde_urlencoded::to_string(&next) {
            Ok(qs) => format!("{path}?{qs}"),
            Err(_) => path.to_string(),
        }
    }
}

/// Page size restricted to [`PAGE_SIZES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn from_param(value: Option<usize>) -> Self {
        match value {
            Some(n) if PAGE_SIZES.contains(&n) => PageSize(n),
            _ => PageSize(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(DEFAULT_PAGE_SIZE)
    }
}

/// Owned (value, label) pairs for a select box.
pub fn option_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(v, l)| (v.to_string(), l.to_string())).collect()
}

/// Case-insensitive search plus exact-match filters over an in-memory list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    search: String,
    exact: Vec<(String, String)>,
}

impl ListFilter {
    pub fn new(search: &str) -> Self {
        Self {
            search: search.trim().to_lowercase(),
            exact: Vec::new(),
        }
    }

    /// Add an exact-match filter; "all"/empty values are ignored.
    pub fn with(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim) {
            if !ANY.contains(&v.to_ascii_lowercase().as_str()) {
                self.exact.push((key.to_string(), v.to_string()));
            }
        }
        self
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.exact.is_empty()
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let search_ok = self.search.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.search));
        search_ok
            && self.exact.iter().all(|(key, wanted)| {
                item.filter_value(key)
                    .is_some_and(|actual| actual.eq_ignore_ascii_case(wanted))
            })
    }

    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|i| self.matches(*i)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SortDir { #[default] Asc, Desc }

#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    pub column: String,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        SortSpec {
            column: sort.unwrap_or("").to_string(),
            dir: if dir == Some("desc") { SortDir::Desc } else { SortDir::Asc },
        }
    }
    pub fn dir_str(&self) -> &'static str {
        match self.dir { SortDir::Asc => "asc", SortDir::Desc => "desc" }
    }
    pub fn toggle_dir(&self) -> &'static str {
        match self.dir { SortDir::Asc => "desc", SortDir::Desc => "asc" }
    }

    /// Stable sort; records without a key for the column keep their relative order at the end.
    pub fn apply<T: Searchable>(&self, items: &mut [T]) {
        if self.column.is_empty() {
            return;
        }
        items.sort_by(|a, b| {
            let ord = match (a.sort_key(&self.column), b.sort_key(&self.column)) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => return Ordering::Less,
                (None, Some(_)) => return Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match self.dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            }
        });
    }
}

/// One page of an already-filtered list.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first item on this page (0 when empty).
    pub fn first_item(&self) -> usize {
        if self.items.is_empty() { 0 } else { (self.page - 1) * self.per_page + 1 }
    }

    pub fn last_item(&self) -> usize {
        if self.items.is_empty() { 0 } else { self.first_item() + self.items.len() - 1 }
    }

    pub fn page_numbers(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

/// Offset/limit slicing. `page` is 1-based and clamped to the valid range.
pub fn paginate<T>(items: Vec<T>, page: usize, size: PageSize) -> Page<T> {
    let per_page = size.get();
    let total_count = items.len();
    let total_pages = total_count.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));
    let offset = (page - 1) * per_page;

    let items = items.into_iter().skip(offset).take(per_page).collect();
    Page { items, page, per_page, total_count, total_pages }
}

/// Filter, sort and paginate in one go, the way every list page does it.
pub fn build_page<T: Searchable + Clone>(
    items: &[T],
    filter: &ListFilter,
    sort: &SortSpec,
    query: &ListQuery,
) -> Page<T> {
    let mut filtered = filter.apply(items);
    sort.apply(&mut filtered);
    paginate(filtered, query.page.unwrap_or(1), query.page_size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        n: usize,
        name: String,
        status: String,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name]
        }
        fn filter_value(&self, key: &str) -> Option<String> {
            match key {
                "status" => Some(self.status.clone()),
                _ => None,
            }
        }
        fn sort_key(&self, column: &str) -> Option<SortKey> {
            match column {
                "n" => Some(SortKey::Number(self.n as f64)),
                "name" => Some(SortKey::text(&self.name)),
                _ => None,
            }
        }
    }

    fn rows(n: usize) -> Vec<Row> {
        (1..=n)
            .map(|i| Row {
                n: i,
                name: format!("Item {i}"),
                status: if i % 2 == 0 { "active".into() } else { "suspended".into() },
            })
            .collect()
    }

    #[test]
    fn pagination_of_23_items() {
        let p1 = paginate(rows(23), 1, PageSize::from_param(Some(10)));
        assert_eq!(p1.total_pages, 3);
        assert_eq!(p1.items.iter().map(|r| r.n).collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());

        let p3 = paginate(rows(23), 3, PageSize::from_param(Some(10)));
        assert_eq!(p3.items.iter().map(|r| r.n).collect::<Vec<_>>(), vec![21, 22, 23]);
        assert_eq!(p3.first_item(), 21);
        assert_eq!(p3.last_item(), 23);
        assert!(!p3.has_next());
        assert!(p3.has_prev());
    }

    #[test]
    fn page_is_clamped() {
        let p = paginate(rows(23), 9, PageSize::default());
        assert_eq!(p.page, 3);
        let p = paginate(rows(23), 0, PageSize::default());
        assert_eq!(p.page, 1);
        let empty = paginate(Vec::<Row>::new(), 4, PageSize::default());
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.first_item(), 0);
    }

    #[test]
    fn page_size_restricted_to_known_set() {
        assert_eq!(PageSize::from_param(Some(25)).get(), 25);
        assert_eq!(PageSize::from_param(Some(50)).get(), 50);
        assert_eq!(PageSize::from_param(Some(7)).get(), 10);
        assert_eq!(PageSize::from_param(None).get(), 10);
    }

    #[test]
    fn filter_is_case_insensitive_and_idempotent() {
        let source = rows(30);
        let filter = ListFilter::new("ITEM 1").with("status", Some("Active"));
        let once = filter.apply(&source);
        let twice = filter.apply(&once);
        assert_eq!(once, twice);
        assert!(once.iter().all(|r| r.status == "active" && r.name.starts_with("Item 1")));
        assert_eq!(once.len(), 5); // 10, 12, 14, 16, 18
    }

    #[test]
    fn all_means_no_filter() {
        let filter = ListFilter::new("").with("status", Some("all")).with("status", None);
        assert!(!filter.is_active());
        assert_eq!(filter.apply(&rows(4)).len(), 4);
    }

    #[test]
    fn unknown_filter_key_matches_nothing() {
        let filter = ListFilter::new("").with("category", Some("design"));
        assert!(filter.apply(&rows(4)).is_empty());
    }

    #[test]
    fn sort_desc_by_number() {
        let mut items = rows(5);
        SortSpec::from_params(Some("n"), Some("desc")).apply(&mut items);
        assert_eq!(items.iter().map(|r| r.n).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn sort_spec_from_params() {
        let s = SortSpec::from_params(Some("name"), Some("desc"));
        assert_eq!(s.column, "name");
        assert_eq!(s.dir, SortDir::Desc);
        assert_eq!(s.toggle_dir(), "asc");
        let s = SortSpec::from_params(None, None);
        assert_eq!(s.dir_str(), "asc");
    }

    #[test]
    fn page_link_keeps_filters() {
        let q = ListQuery {
            q: Some("logo design".into()),
            status: Some("active".into()),
            page: Some(1),
            ..ListQuery::default()
        };
        let link = q.page_link("/admin/services", 2);
        assert!(link.starts_with("/admin/services?"));
        assert!(link.contains("q=logo+design"));
        assert!(link.contains("page=2"));
        assert!(link.contains("status=active"));
    }

    #[test]
    fn sort_link_toggles_direction() {
        let q = ListQuery { sort: Some("name".into()), dir: Some("asc".into()), ..ListQuery::default() };
        assert!(q.sort_link("/x", "name").contains("dir=desc"));
        assert!(q.sort_link("/x", "price").contains("dir=asc"));
    }
}
