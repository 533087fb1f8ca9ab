use serde::Deserialize;

use crate::api::ApiError;
use crate::api::wire::Fields;
use crate::models::display::{format_date, initials};
use crate::models::table_filter::{Searchable, SortKey};

/// Canonical user record as returned by the profile and admin endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub course: String,
    pub bio: String,
    pub profile_photo: Option<String>,
    pub gcash_qr: Option<String>,
    pub gcash_number: String,
    pub created_at: String,
}

impl UserRecord {
    pub fn from_fields(f: &Fields) -> Result<Self, ApiError> {
        let suspended = f.bool(&["IsSuspended", "isSuspended", "is_suspended", "suspended"]);
        let status = f
            .str(&["Status", "status", "AccountStatus", "accountStatus"])
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| if suspended { "suspended".into() } else { "active".into() });

        Ok(Self {
            id: f.require_i64(&["UserId", "userId", "user_id", "id", "Id"])?,
            first_name: f.string(&["FirstName", "firstName", "first_name"]),
            last_name: f.string(&["LastName", "lastName", "last_name"]),
            email: f.string(&["Email", "email"]),
            role: f
                .str(&["Role", "role", "UserType", "userType"])
                .map(|r| r.to_lowercase())
                .unwrap_or_else(|| "student".to_string()),
            status,
            course: f.string(&["Course", "course", "Program", "program"]),
            bio: f.string(&["Bio", "bio", "About", "about"]),
            profile_photo: f.image(&["ProfilePhoto", "profilePhoto", "profile_photo", "Photo", "photo"]),
            gcash_qr: f.image(&["GcashQr", "gcashQr", "GCashQR", "gcash_qr", "GcashQR"]),
            gcash_number: f.string(&["GcashNumber", "gcashNumber", "gcash_number"]),
            created_at: f.string(&["CreatedAt", "createdAt", "created_at"]),
        })
    }

    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() { self.email.clone() } else { name.to_string() }
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_suspended(&self) -> bool {
        self.status == "suspended"
    }
}

impl Searchable for UserRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email, &self.course]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "role" => Some(self.role.clone()),
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "name" => Some(SortKey::text(&self.full_name())),
            "email" => Some(SortKey::text(&self.email)),
            "created_at" => Some(SortKey::text(&self.created_at)),
            _ => None,
        }
    }
}

/// Template-ready row.
#[derive(Debug, Clone)]
pub struct UserDisplay {
    pub user: UserRecord,
    pub full_name: String,
    pub initials: String,
    pub joined: String,
    pub is_self: bool,
}

impl UserDisplay {
    pub fn new(user: UserRecord, my_id: i64) -> Self {
        let full_name = user.full_name();
        Self {
            initials: initials(&full_name),
            joined: format_date(&user.created_at),
            is_self: user.id == my_id,
            full_name,
            user,
        }
    }
}

/// Result of a successful backend login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub user: UserRecord,
}

/// Form data from the login page.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

/// Form data from the profile page.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub bio: String,
    #[serde(default)]
    pub gcash_number: String,
    pub csrf_token: String,
}

/// Photo / QR upload: a pasted image URL, data-URI or raw base64.
#[derive(Debug, Deserialize)]
pub struct ImageForm {
    pub image: String,
    pub csrf_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SuspendForm {
    pub suspend: String,
    pub csrf_token: String,
}
