use std::env;
use std::time::Duration;

use actix_web::cookie::Key;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_APP_NAME: &str = "Campus Gigs";
const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
const MIN_SESSION_KEY_LEN: usize = 64;

/// Runtime settings, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub app_name: String,
    pub api_timeout: Duration,
    pub cookie_secure: bool,
    pub session_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            cookie_secure: false,
            session_key: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // Missing .env is normal in production
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        let api_timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.api_timeout);

        Self {
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            app_name: env::var("APP_NAME").unwrap_or(defaults.app_name),
            api_timeout,
            cookie_secure: env::var("COOKIE_SECURE")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            session_key: env::var("SESSION_KEY").ok(),
        }
    }

    /// Cookie encryption key. Falls back to a random key, which loses sessions on restart.
    pub fn session_key(&self) -> Key {
        match &self.session_key {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => {
                log::info!("Using SESSION_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {MIN_SESSION_KEY_LEN}+), generating random key",
                    val.len()
                );
                Key::generate()
            }
            None => {
                log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}
