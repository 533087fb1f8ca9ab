use crate::models::image::is_base64;

/// Largest image payload accepted from a form, in bytes of text.
pub const MAX_IMAGE_LEN: usize = 5 * 1024 * 1024;

/// Validate an email: must contain '@' and '.', max 254 chars.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Some("Email must be a valid address".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    if value.trim().chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Pasted image: an http(s) URL, a data-URI or raw base64.
pub fn validate_image(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some("An image is required".to_string());
    }
    if trimmed.len() > MAX_IMAGE_LEN {
        return Some("Image is too large (max 5 MB)".to_string());
    }
    let ok = trimmed.starts_with("https://")
        || trimmed.starts_with("http://")
        || trimmed.starts_with("data:image/")
        || is_base64(trimmed);
    if !ok {
        return Some("Image must be a URL, a data URI or base64 data".to_string());
    }
    None
}

/// GCash reference numbers: 8 to 20 digits once spaces are removed.
pub fn validate_reference_number(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Some("Reference number is required".to_string());
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) || !(8..=20).contains(&digits.len()) {
        return Some("Reference number must be 8 to 20 digits".to_string());
    }
    None
}
