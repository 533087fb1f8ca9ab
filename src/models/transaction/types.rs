use serde::Deserialize;

use crate::api::ApiError;
use crate::api::wire::Fields;
use crate::models::application::ApplicationStatus;
use crate::models::display::{format_amount, format_date};
use crate::models::table_filter::{Searchable, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    pub id: i64,
    pub application_id: Option<i64>,
    pub service_title: String,
    pub amount: f64,
    pub counterpart_id: Option<i64>,
    pub counterpart_name: String,
    pub reference_number: String,
    pub status: String,
    pub created_at: String,
    pub reviewed: bool,
}

impl TransactionRecord {
    pub fn from_fields(f: &Fields) -> Result<Self, ApiError> {
        Ok(Self {
            id: f.require_i64(&["TransactionId", "transactionId", "transaction_id", "id", "Id"])?,
            application_id: f.i64(&["ApplicationId", "applicationId", "application_id"]),
            service_title: f.string(&["ServiceTitle", "serviceTitle", "service_title", "Title", "title"]),
            amount: f.f64(&["Amount", "amount", "ServicePrice", "servicePrice", "Price", "price"]).unwrap_or(0.0),
            counterpart_id: f.i64(&["CounterpartId", "counterpartId", "OtherUserId", "otherUserId"]),
            counterpart_name: f.string(&["CounterpartName", "counterpartName", "OtherUserName", "otherUserName", "otherParty"]),
            reference_number: f.string(&["ReferenceNumber", "referenceNumber", "reference_number", "Reference", "reference"]),
            status: f.string(&["Status", "status"]),
            created_at: f.string(&["CreatedAt", "createdAt", "created_at", "Date", "date"]),
            reviewed: f.bool(&["HasReview", "hasReview", "has_review", "Reviewed", "reviewed"]),
        })
    }

    /// Money has reached the freelancer.
    pub fn is_completed(&self) -> bool {
        ApplicationStatus::parse(&self.status) == ApplicationStatus::PaymentReceived
            || self.status.trim().eq_ignore_ascii_case("completed")
    }
}

impl Searchable for TransactionRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.service_title, &self.counterpart_name, &self.reference_number]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "amount" => Some(SortKey::Number(self.amount)),
            "date" => Some(SortKey::text(&self.created_at)),
            "title" => Some(SortKey::text(&self.service_title)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransactionDisplay {
    pub tx: TransactionRecord,
    pub amount_display: String,
    pub date_display: String,
    /// A review can be left once per completed transaction.
    pub can_review: bool,
}

impl From<TransactionRecord> for TransactionDisplay {
    fn from(tx: TransactionRecord) -> Self {
        Self {
            amount_display: format_amount(tx.amount),
            date_display: format_date(&tx.created_at),
            can_review: !tx.reviewed && tx.application_id.is_some() && tx.is_completed(),
            tx,
        }
    }
}

/// Distinct statuses present in a history, for the filter select.
pub fn statuses(records: &[TransactionRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for r in records {
        if !r.status.is_empty() && !seen.iter().any(|s| s.eq_ignore_ascii_case(&r.status)) {
            seen.push(r.status.clone());
        }
    }
    seen.sort();
    seen
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn review_offered_only_when_not_reviewed() {
        let v = json!({"id": 1, "applicationId": 7, "amount": 150, "hasReview": false, "status": "Payment Received"});
        let tx = TransactionRecord::from_fields(&Fields::new(&v).unwrap()).unwrap();
        assert!(TransactionDisplay::from(tx.clone()).can_review);

        let reviewed = TransactionRecord { reviewed: true, ..tx.clone() };
        assert!(!TransactionDisplay::from(reviewed).can_review);

        let orphan = TransactionRecord { application_id: None, ..tx };
        assert!(!TransactionDisplay::from(orphan).can_review);
    }

    #[test]
    fn review_waits_for_completed_payment() {
        let v = json!({"id": 2, "applicationId": 8, "amount": 300, "hasReview": false, "status": "Payment Sent"});
        let tx = TransactionRecord::from_fields(&Fields::new(&v).unwrap()).unwrap();
        assert!(!TransactionDisplay::from(tx.clone()).can_review);

        let done = TransactionRecord { status: "completed".into(), ..tx };
        assert!(TransactionDisplay::from(done).can_review);
    }

    #[test]
    fn distinct_statuses() {
        let mk = |s: &str| TransactionRecord {
            id: 1,
            application_id: None,
            service_title: String::new(),
            amount: 0.0,
            counterpart_id: None,
            counterpart_name: String::new(),
            reference_number: String::new(),
            status: s.into(),
            created_at: String::new(),
            reviewed: false,
        };
        let list = vec![mk("Payment Sent"), mk("payment sent"), mk("Payment Received"), mk("")];
        assert_eq!(statuses(&list), vec!["Payment Received".to_string(), "Payment Sent".to_string()]);
    }
}
