use std::future::{ready, Ready};

use actix_session::{Session, SessionExt};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::errors::AppError;
use crate::models::user::LoginResult;

const USER_ID: &str = "user_id";
const TOKEN: &str = "token";
const DISPLAY_NAME: &str = "display_name";
const IS_ADMIN: &str = "is_admin";
const FLASH: &str = "flash";
const FLASH_KIND: &str = "flash_kind";

/// The signed-in user, pulled from the cookie session once per request and
/// handed to every view that talks to the backend.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user_id: i64,
    token: String,
    display_name: String,
    is_admin: bool,
}

impl SessionContext {
    pub fn from_session(session: &Session) -> Result<Self, AppError> {
        let user_id = session
            .get::<i64>(USER_ID)
            .map_err(|e| AppError::Session(format!("Session error: {e}")))?
            .ok_or_else(|| AppError::Session("No user in session".to_string()))?;
        let token = session
            .get::<String>(TOKEN)
            .map_err(|e| AppError::Session(format!("Session error: {e}")))?
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Session("No token in session".to_string()))?;
        let display_name = session.get::<String>(DISPLAY_NAME).unwrap_or(None).unwrap_or_default();
        let is_admin = session.get::<bool>(IS_ADMIN).unwrap_or(None).unwrap_or(false);
        Ok(Self { user_id, token, display_name, is_admin })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Bearer token for backend calls.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::PermissionDenied("admin".to_string()))
        }
    }
}

impl FromRequest for SessionContext {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(SessionContext::from_session(&req.get_session()))
    }
}

/// Persist a successful login.
pub fn store_login(session: &Session, login: &LoginResult) -> Result<(), AppError> {
    session.renew();
    let store = |key: &str, res: Result<(), actix_session::SessionInsertError>| {
        res.map_err(|e| AppError::Session(format!("Failed to store {key}: {e}")))
    };
    store(USER_ID, session.insert(USER_ID, login.user.id))?;
    store(TOKEN, session.insert(TOKEN, &login.token))?;
    store(DISPLAY_NAME, session.insert(DISPLAY_NAME, login.user.full_name()))?;
    store(IS_ADMIN, session.insert(IS_ADMIN, login.user.is_admin()))?;
    Ok(())
}

/// Keep the header name in sync after a profile edit.
pub fn update_display_name(session: &Session, name: &str) {
    let _ = session.insert(DISPLAY_NAME, name);
}

pub fn is_signed_in(session: &Session) -> bool {
    session.get::<String>(TOKEN).unwrap_or(None).is_some_and(|t| !t.is_empty())
}

pub fn is_admin(session: &Session) -> bool {
    session.get::<bool>(IS_ADMIN).unwrap_or(None).unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// One-shot banner shown on the next rendered page.
#[derive(Debug, Clone)]
pub struct Flash {
    pub message: String,
    pub kind: String,
}

pub fn set_flash(session: &Session, kind: FlashKind, message: &str) {
    let _ = session.insert(FLASH, message);
    let _ = session.insert(FLASH_KIND, kind.as_str());
}

pub fn take_flash(session: &Session) -> Option<Flash> {
    let message = session.get::<String>(FLASH).unwrap_or(None)?;
    let kind = session
        .get::<String>(FLASH_KIND)
        .unwrap_or(None)
        .unwrap_or_else(|| FlashKind::Success.as_str().to_string());
    session.remove(FLASH);
    session.remove(FLASH_KIND);
    Some(Flash { message, kind })
}
