use serde::Deserialize;

use crate::api::ApiError;
use crate::api::wire::Fields;
use crate::models::application::PostType;
use crate::models::display::{format_amount, format_date};
use crate::models::table_filter::{Searchable, SortKey};

/// Moderation states an admin can put a listing in.
pub const SERVICE_STATUSES: &[(&str, &str)] = &[
    ("active", "Active"),
    ("pending", "Pending Review"),
    ("inactive", "Inactive"),
    ("rejected", "Rejected"),
];

pub const CATEGORIES: &[&str] = &[
    "Academic",
    "Creative",
    "Technical",
    "Writing",
    "Errands",
    "Other",
];

pub fn is_valid_status(status: &str) -> bool {
    SERVICE_STATUSES.iter().any(|(v, _)| *v == status)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub post_type: PostType,
    pub status: String,
    pub owner_id: i64,
    pub owner_name: String,
    pub created_at: String,
}

impl ServiceRecord {
    pub fn from_fields(f: &Fields) -> Result<Self, ApiError> {
        let owner_name = f.str(&["OwnerName", "ownerName", "owner_name", "PostedBy", "postedBy"]).unwrap_or_else(|| {
            let first = f.string(&["FirstName", "firstName", "first_name"]);
            let last = f.string(&["LastName", "lastName", "last_name"]);
            format!("{first} {last}").trim().to_string()
        });
        Ok(Self {
            id: f.require_i64(&["ServiceId", "serviceId", "service_id", "id", "Id"])?,
            title: f.string(&["Title", "title", "ServiceTitle", "serviceTitle"]),
            description: f.string(&["Description", "description"]),
            category: f.string(&["Category", "category"]),
            price: f.f64(&["Price", "price", "Rate", "rate"]).unwrap_or(0.0),
            post_type: PostType::parse(&f.string(&["PostType", "postType", "post_type", "type"])),
            status: f
                .str(&["Status", "status"])
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_else(|| "pending".to_string()),
            owner_id: f.i64(&["UserId", "userId", "OwnerId", "ownerId", "owner_id"]).unwrap_or(0),
            owner_name,
            created_at: f.string(&["CreatedAt", "createdAt", "created_at"]),
        })
    }
}

impl Searchable for ServiceRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.owner_name]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "title" => Some(SortKey::text(&self.title)),
            "price" => Some(SortKey::Number(self.price)),
            "created_at" => Some(SortKey::text(&self.created_at)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceDisplay {
    pub service: ServiceRecord,
    pub price_display: String,
    pub posted: String,
    pub status_label: String,
}

impl From<ServiceRecord> for ServiceDisplay {
    fn from(service: ServiceRecord) -> Self {
        let status_label = SERVICE_STATUSES
            .iter()
            .find(|(v, _)| *v == service.status)
            .map(|(_, l)| l.to_string())
            .unwrap_or_else(|| service.status.clone());
        Self {
            price_display: format_amount(service.price),
            posted: format_date(&service.created_at),
            status_label,
            service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServiceStatusForm {
    pub status: String,
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn owner_name_from_parts() {
        let v = json!({"ServiceId": 4, "Title": "Essay editing", "FirstName": "Lea", "LastName": "Cruz",
                       "Status": "Active", "Price": "300", "PostType": "freelancer"});
        let s = ServiceRecord::from_fields(&Fields::new(&v).unwrap()).unwrap();
        assert_eq!(s.owner_name, "Lea Cruz");
        assert_eq!(s.status, "active");
        assert_eq!(s.price, 300.0);
        assert_eq!(s.post_type, PostType::Freelancer);
        assert_eq!(ServiceDisplay::from(s).status_label, "Active");
    }

    #[test]
    fn status_whitelist() {
        assert!(is_valid_status("inactive"));
        assert!(!is_valid_status("deleted"));
    }
}
