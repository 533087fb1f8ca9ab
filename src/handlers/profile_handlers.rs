use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::api::ApiClient;
use crate::auth::session::{update_display_name, FlashKind, SessionContext};
use crate::auth::{csrf, validate};
use crate::config::AppConfig;
use crate::errors::{render, AppError};
use crate::models::user::{self, ImageForm, ProfileForm, UserDisplay};
use crate::templates_structs::{PageContext, ProfileTemplate};
use super::{finish_mutation, flash_redirect};

const PATH: &str = "/profile";

fn validate_profile(form: &ProfileForm) -> Vec<String> {
    let mut errors = vec![];
    if let Some(e) = validate::validate_required(&form.first_name, "First name", 50) {
        errors.push(e);
    }
    if let Some(e) = validate::validate_required(&form.last_name, "Last name", 50) {
        errors.push(e);
    }
    if let Some(e) = validate::validate_optional(&form.course, "Course", 100) {
        errors.push(e);
    }
    if let Some(e) = validate::validate_optional(&form.bio, "Bio", 500) {
        errors.push(e);
    }
    let gcash = form.gcash_number.trim();
    if !gcash.is_empty() && (gcash.len() != 11 || !gcash.chars().all(|c| c.is_ascii_digit())) {
        errors.push("GCash number must be 11 digits".to_string());
    }
    errors
}

pub async fn show(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(&session, &user, &config, PATH);
    let profile = user::find_profile(&api, user.token()).await?;
    render(ProfileTemplate {
        ctx,
        profile: UserDisplay::new(profile, user.user_id()),
        errors: vec![],
    })
}

pub async fn update(
    api: web::Data<ApiClient>,
    config: web::Data<AppConfig>,
    session: Session,
    user: SessionContext,
    form: web::Form<ProfileForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    let errors = validate_profile(&form);
    if !errors.is_empty() {
        let ctx = PageContext::build(&session, &user, &config, PATH);
        let mut profile = user::find_profile(&api, user.token()).await?;
        // Keep what the user typed
        profile.first_name = form.first_name.clone();
        profile.last_name = form.last_name.clone();
        profile.course = form.course.clone();
        profile.bio = form.bio.clone();
        profile.gcash_number = form.gcash_number.clone();
        return render(ProfileTemplate {
            ctx,
            profile: UserDisplay::new(profile, user.user_id()),
            errors,
        });
    }

    let result = user::update_profile(&api, user.token(), &form).await;
    if result.is_ok() {
        update_display_name(&session, &format!("{} {}", form.first_name.trim(), form.last_name.trim()));
    }
    finish_mutation(&session, result, "Profile updated.", PATH)
}

pub async fn upload_photo(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    form: web::Form<ImageForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(error) = validate::validate_image(&form.image) {
        return Ok(flash_redirect(&session, FlashKind::Error, &error, PATH));
    }
    let result = user::upload_photo(&api, user.token(), form.image.trim()).await;
    finish_mutation(&session, result, "Profile photo updated.", PATH)
}

pub async fn upload_gcash_qr(
    api: web::Data<ApiClient>,
    session: Session,
    user: SessionContext,
    form: web::Form<ImageForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    if let Some(error) = validate::validate_image(&form.image) {
        return Ok(flash_redirect(&session, FlashKind::Error, &error, PATH));
    }
    let result = user::upload_gcash_qr(&api, user.token(), form.image.trim()).await;
    finish_mutation(&session, result, "GCash QR code updated.", PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(first: &str, gcash: &str) -> ProfileForm {
        ProfileForm {
            first_name: first.into(),
            last_name: "Reyes".into(),
            course: "BSIT".into(),
            bio: String::new(),
            gcash_number: gcash.into(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn profile_validation() {
        assert!(validate_profile(&form("Ana", "09171234567")).is_empty());
        assert!(validate_profile(&form("Ana", "")).is_empty());
        assert_eq!(validate_profile(&form("", "12")).len(), 2);
    }
}
