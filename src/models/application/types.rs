use serde::Deserialize;

use crate::api::ApiError;
use crate::api::wire::Fields;
use crate::models::display::{format_amount, format_date};
use crate::models::table_filter::{Searchable, SortKey};
use super::status::{ApplicationStatus, StatusAction};

/// Whether the listing behind an application was a client request or a freelancer offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostType {
    Client,
    Freelancer,
}

impl PostType {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("freelancer") {
            PostType::Freelancer
        } else {
            if !raw.trim().eq_ignore_ascii_case("client") {
                log::warn!("Unknown post type {raw:?}, treating as client post");
            }
            PostType::Client
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Client => "client",
            PostType::Freelancer => "freelancer",
        }
    }

    /// Where the owner lands after accepting and starting an application.
    pub fn accept_redirect(self) -> &'static str {
        match self {
            PostType::Client => "/project-status",
            PostType::Freelancer => "/active",
        }
    }
}

/// The viewer's part in one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roles {
    pub is_client: bool,
    pub is_freelancer: bool,
    pub is_owner: bool,
}

/// Canonical application record. Only [`Application::from_fields`] builds one from wire data.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: i64,
    pub service_id: Option<i64>,
    pub post_type: PostType,
    pub service_owner_id: i64,
    pub freelancer_id: i64,
    pub status: ApplicationStatus,
    pub proof_image: Option<String>,
    pub service_price: f64,
    pub service_title: String,
    pub message: String,
    pub applicant_name: String,
    pub owner_name: String,
    pub created_at: String,
    /// Payee's GCash details, when the backend includes them.
    pub payee_gcash_qr: Option<String>,
    pub payee_gcash_number: String,
}

impl Application {
    pub fn from_fields(f: &Fields) -> Result<Self, ApiError> {
        Ok(Self {
            id: f.require_i64(&["ApplicationId", "applicationId", "application_id", "id", "Id"])?,
            service_id: f.i64(&["ServiceId", "serviceId", "service_id"]),
            post_type: PostType::parse(&f.string(&["PostType", "postType", "post_type", "type"])),
            service_owner_id: f
                .i64(&["ServiceOwnerId", "serviceOwnerId", "service_owner_id", "OwnerId", "ownerId"])
                .unwrap_or(0),
            freelancer_id: f
                .i64(&["FreelancerId", "freelancerId", "freelancer_id", "ApplicantId", "applicantId", "UserId", "userId"])
                .unwrap_or(0),
            status: ApplicationStatus::parse(&f.string(&["Status", "status"])),
            proof_image: f.image(&["ProofImage", "proofImage", "proof_image", "Proof", "proof"]),
            service_price: f
                .f64(&["ServicePrice", "servicePrice", "service_price", "Price", "price"])
                .unwrap_or(0.0),
            service_title: f.string(&["ServiceTitle", "serviceTitle", "service_title", "Title", "title"]),
            message: f.string(&["Message", "message"]),
            applicant_name: f.string(&["ApplicantName", "applicantName", "applicant_name", "FreelancerName", "freelancerName"]),
            owner_name: f.string(&["OwnerName", "ownerName", "owner_name", "ServiceOwnerName", "serviceOwnerName"]),
            created_at: f.string(&["CreatedAt", "createdAt", "created_at", "AppliedAt", "appliedAt"]),
            payee_gcash_qr: f.image(&["GcashQr", "gcashQr", "GCashQR", "gcash_qr", "FreelancerGcashQr", "freelancerGcashQr"]),
            payee_gcash_number: f.string(&["GcashNumber", "gcashNumber", "gcash_number", "FreelancerGcashNumber", "freelancerGcashNumber"]),
        })
    }

    /// Role resolution. On a freelancer post the owner offers the service,
    /// so the applicant is the paying client.
    pub fn roles_for(&self, my_id: i64) -> Roles {
        let (is_client, is_freelancer) = match self.post_type {
            PostType::Client => (self.service_owner_id == my_id, self.freelancer_id == my_id),
            PostType::Freelancer => (self.freelancer_id == my_id, self.service_owner_id == my_id),
        };
        Roles {
            is_client,
            is_freelancer,
            is_owner: self.service_owner_id == my_id,
        }
    }

    /// Name of the other party, from the viewer's point of view.
    pub fn counterpart_name(&self, my_id: i64) -> &str {
        if self.service_owner_id == my_id { &self.applicant_name } else { &self.owner_name }
    }
}

impl Searchable for Application {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.service_title, &self.applicant_name, &self.owner_name, &self.message]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.as_str().to_string()),
            "post_type" => Some(self.post_type.as_str().to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "title" => Some(SortKey::text(&self.service_title)),
            "price" => Some(SortKey::Number(self.service_price)),
            "date" => Some(SortKey::text(&self.created_at)),
            _ => None,
        }
    }
}

/// One application as rendered for a specific viewer: status table lookups done up front.
#[derive(Debug, Clone)]
pub struct ApplicationView {
    pub app: Application,
    pub roles: Roles,
    pub counterpart: String,
    pub status_label: String,
    pub badge: &'static str,
    pub price_display: String,
    pub date_display: String,
    pub can_accept: bool,
    pub can_reject: bool,
    pub can_start: bool,
    pub can_submit_proof: bool,
    pub can_approve_proof: bool,
    pub can_reject_proof: bool,
    pub can_pay: bool,
    pub can_confirm_payment: bool,
}

impl ApplicationView {
    pub fn new(app: Application, my_id: i64) -> Self {
        let roles = app.roles_for(my_id);
        let actions = app.status.actions_for(&roles);
        let has = |a: StatusAction| actions.contains(&a);
        Self {
            counterpart: app.counterpart_name(my_id).to_string(),
            status_label: app.status.label().to_string(),
            badge: app.status.badge(),
            price_display: format_amount(app.service_price),
            date_display: format_date(&app.created_at),
            can_accept: has(StatusAction::Accept),
            can_reject: has(StatusAction::Reject),
            can_start: has(StatusAction::Start),
            can_submit_proof: has(StatusAction::SubmitProof),
            can_approve_proof: has(StatusAction::ApproveProof),
            can_reject_proof: has(StatusAction::RejectProof),
            can_pay: has(StatusAction::Pay),
            can_confirm_payment: has(StatusAction::ConfirmPayment),
            roles,
            app,
        }
    }

    pub fn has_actions(&self) -> bool {
        self.can_accept
            || self.can_reject
            || self.can_start
            || self.can_submit_proof
            || self.can_approve_proof
            || self.can_reject_proof
            || self.can_pay
            || self.can_confirm_payment
    }
}

/// Proof submission form.
#[derive(Debug, Deserialize)]
pub struct ProofForm {
    pub proof_image: String,
    pub csrf_token: String,
}

/// Payment page form.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub reference_number: String,
    pub csrf_token: String,
}
