//! Shared test infrastructure.
//!
//! - `FakeBackend` - a stub REST backend on an ephemeral port that answers
//!   canned JSON and records every request it receives
//! - `init_app()` - the full web app wired to a backend URL
//! - session cookie and CSRF helpers for driving form posts
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_http::Request;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServerHandle, ServiceResponse};
use actix_web::{test, web, App, Error, HttpRequest, HttpResponse, HttpServer};
use regex::Regex;
use serde_json::Value;

use campus_gigs::api::ApiClient;
use campus_gigs::config::AppConfig;
use campus_gigs::{handlers, routes};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_TOKEN: &str = "test-token-123";
pub const TEST_EMAIL: &str = "ana@school.edu";
pub const TEST_PASSWORD: &str = "secret123";
/// User id the fake backend logs everyone in as.
pub const TEST_USER_ID: i64 = 5;

// ============================================================================
// FAKE BACKEND
// ============================================================================

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
pub struct Stub {
    method: String,
    path: String,
    status: u16,
    body: Value,
}

/// Canned response for `method path`.
pub fn stub(method: &str, path: &str, status: u16, body: Value) -> Stub {
    Stub {
        method: method.to_uppercase(),
        path: path.to_string(),
        status,
        body,
    }
}

struct BackendState {
    stubs: Vec<Stub>,
    log: Arc<Mutex<Vec<Recorded>>>,
}

async fn respond(req: HttpRequest, body: web::Bytes, state: web::Data<BackendState>) -> HttpResponse {
    let method = req.method().as_str().to_string();
    let path = req.path().to_string();
    state.log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        authorization: req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    match state.stubs.iter().find(|s| s.method == method && s.path == path) {
        Some(s) => HttpResponse::build(actix_web::http::StatusCode::from_u16(s.status).unwrap()).json(&s.body),
        None => HttpResponse::NotFound().json(serde_json::json!({ "message": format!("No route {method} {path}") })),
    }
}

pub struct FakeBackend {
    pub base_url: String,
    log: Arc<Mutex<Vec<Recorded>>>,
    handle: ServerHandle,
}

impl FakeBackend {
    /// Start a backend answering `stubs`; unknown routes get a 404 with a message.
    pub async fn start(stubs: Vec<Stub>) -> Self {
        let log = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(BackendState { stubs, log: log.clone() });

        let server = HttpServer::new(move || App::new().app_data(state.clone()).default_service(web::to(respond)))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("Failed to bind fake backend");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_rt::spawn(server);

        Self {
            base_url: format!("http://{addr}/api"),
            log,
            handle,
        }
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    /// "METHOD /path" lines, handy for asserting call order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Duration::from_secs(5)).expect("Failed to build API client")
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Login response for [`TEST_USER_ID`].
pub fn login_stub(role: &str) -> Stub {
    stub(
        "POST",
        "/api/auth/login",
        200,
        serde_json::json!({
            "token": TEST_TOKEN,
            "user": {
                "id": TEST_USER_ID,
                "firstName": "Ana",
                "lastName": "Reyes",
                "email": TEST_EMAIL,
                "role": role
            }
        }),
    )
}

// ============================================================================
// APP SETUP
// ============================================================================

pub fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        api_base_url: base_url.to_string(),
        ..AppConfig::default()
    }
}

/// The full app, same wiring as `main`, pointed at `base_url`.
pub async fn init_app(
    base_url: String,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let config = test_config(&base_url);
    let api = ApiClient::new(&base_url, Duration::from_secs(5)).expect("Failed to build API client");
    test::init_service(
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(api))
            .app_data(web::Data::new(config))
            .configure(routes::configure)
            .default_service(web::to(handlers::not_found)),
    )
    .await
}

// ============================================================================
// SESSION HELPERS
// ============================================================================

/// Latest session cookie set by a response, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response().cookies().find(|c| c.name() == "id").map(|c| c.into_owned())
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn extract_csrf(html: &str) -> String {
    let re = Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html)
        .map(|c| c[1].to_string())
        .expect("No CSRF token in page")
}

/// Sign in through the login form. Returns the session cookie and CSRF token.
pub async fn sign_in<S, B>(app: &S) -> (Cookie<'static>, String)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, test::TestRequest::get().uri("/login").to_request()).await;
    let cookie = session_cookie(&resp).expect("Login page should set a session cookie");
    let html = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    let csrf = extract_csrf(&html);

    let req = test::TestRequest::post()
        .uri("/login")
        .cookie(cookie)
        .set_form([("email", TEST_EMAIL), ("password", TEST_PASSWORD), ("csrf_token", csrf.as_str())])
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 303, "login should redirect");
    assert_eq!(location(&resp), "/dashboard");
    let cookie = session_cookie(&resp).expect("Login should renew the session cookie");
    (cookie, csrf)
}
