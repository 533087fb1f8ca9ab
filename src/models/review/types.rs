use crate::api::ApiError;
use crate::api::wire::Fields;
use crate::models::display::format_date;
use crate::models::table_filter::{Searchable, SortKey};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;
pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub id: i64,
    pub reviewer_name: String,
    pub reviewee_name: String,
    pub service_title: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: String,
}

impl ReviewRecord {
    pub fn from_fields(f: &Fields) -> Result<Self, ApiError> {
        let rating = f
            .i64(&["Rating", "rating", "Stars", "stars"])
            .unwrap_or(0)
            .clamp(0, MAX_RATING as i64) as u8;
        Ok(Self {
            id: f.require_i64(&["ReviewId", "reviewId", "review_id", "id", "Id"])?,
            reviewer_name: f.string(&["ReviewerName", "reviewerName", "reviewer_name"]),
            reviewee_name: f.string(&["RevieweeName", "revieweeName", "reviewee_name", "ReviewedUserName", "reviewedUserName"]),
            service_title: f.string(&["ServiceTitle", "serviceTitle", "service_title", "Title", "title"]),
            rating,
            comment: f.string(&["Comment", "comment", "Feedback", "feedback"]),
            created_at: f.string(&["CreatedAt", "createdAt", "created_at"]),
        })
    }
}

impl Searchable for ReviewRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.comment, &self.reviewer_name, &self.reviewee_name, &self.service_title]
    }

    fn filter_value(&self, key: &str) -> Option<String> {
        match key {
            "rating" => Some(self.rating.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, column: &str) -> Option<SortKey> {
        match column {
            "rating" => Some(SortKey::Number(f64::from(self.rating))),
            "date" => Some(SortKey::text(&self.created_at)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReviewDisplay {
    pub review: ReviewRecord,
    pub stars: String,
    pub date_display: String,
}

impl From<ReviewRecord> for ReviewDisplay {
    fn from(review: ReviewRecord) -> Self {
        let filled = review.rating as usize;
        Self {
            stars: format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_RATING as usize - filled)),
            date_display: format_date(&review.created_at),
            review,
        }
    }
}

/// Average rating with one decimal, `None` for an empty list.
pub fn average_rating(reviews: &[ReviewRecord]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    let avg = f64::from(total) / reviews.len() as f64;
    Some((avg * 10.0).round() / 10.0)
}

/// Validate a review before it is sent. Returns every problem found.
pub fn validate_review(rating: u8, comment: &str) -> Vec<String> {
    let mut errors = vec![];
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        errors.push(format!("Rating must be between {MIN_RATING} and {MAX_RATING}"));
    }
    if comment.chars().count() > MAX_COMMENT_LEN {
        errors.push(format!("Comment must be at most {MAX_COMMENT_LEN} characters"));
    }
    errors
}
