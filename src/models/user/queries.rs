use serde_json::json;

use crate::api::wire::{map_list, unwrap_object, Fields};
use crate::api::{ApiClient, ApiError};
use super::types::{LoginResult, ProfileForm, UserRecord};

/// Exchange credentials for a bearer token.
pub async fn authenticate(api: &ApiClient, email: &str, password: &str) -> Result<LoginResult, ApiError> {
    let body = api
        .post_public("/auth/login", &json!({ "email": email, "password": password }))
        .await?;
    let fields = Fields::new(unwrap_object(&body, &["data"]))?;
    let token = fields
        .str(&["token", "Token", "accessToken", "access_token"])
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Decode("login response has no token".into()))?;
    let user_fields = fields
        .object(&["user", "User", "userData"])
        .ok_or_else(|| ApiError::Decode("login response has no user".into()))?;
    let user = UserRecord::from_fields(&user_fields)?;
    log::info!("User {} signed in", user.id);
    Ok(LoginResult { token, user })
}

/// Every account (admin only).
pub async fn find_all(api: &ApiClient, token: &str) -> Result<Vec<UserRecord>, ApiError> {
    let body = api.get(token, "/users/all").await?;
    Ok(map_list(&body, "user", UserRecord::from_fields))
}

pub async fn delete(api: &ApiClient, token: &str, id: i64) -> Result<(), ApiError> {
    api.delete(token, &format!("/users/{id}")).await?;
    log::info!("User {id} deleted");
    Ok(())
}

/// Suspend or reinstate an account.
pub async fn set_suspended(api: &ApiClient, token: &str, id: i64, suspend: bool) -> Result<(), ApiError> {
    api.put(token, &format!("/users/{id}/suspend"), &json!({ "suspend": suspend })).await?;
    log::info!("User {id} suspended={suspend}");
    Ok(())
}

pub async fn find_profile(api: &ApiClient, token: &str) -> Result<UserRecord, ApiError> {
    let body = api.get(token, "/users/profile").await?;
    UserRecord::from_fields(&Fields::new(unwrap_object(&body, &["data", "user", "profile"]))?)
}

pub async fn update_profile(api: &ApiClient, token: &str, form: &ProfileForm) -> Result<(), ApiError> {
    let body = json!({
        "firstName": form.first_name.trim(),
        "lastName": form.last_name.trim(),
        "course": form.course.trim(),
        "bio": form.bio.trim(),
        "gcashNumber": form.gcash_number.trim(),
    });
    api.post(token, "/users/profile", &body).await?;
    Ok(())
}

pub async fn upload_photo(api: &ApiClient, token: &str, image: &str) -> Result<(), ApiError> {
    api.post(token, "/users/profile/photo", &json!({ "photo": image })).await?;
    Ok(())
}

pub async fn upload_gcash_qr(api: &ApiClient, token: &str, image: &str) -> Result<(), ApiError> {
    api.post(token, "/users/profile/gcash-qr", &json!({ "gcashQr": image })).await?;
    Ok(())
}
