use actix_web::{middleware::from_fn, web};

use crate::auth::middleware::{require_admin, require_auth};
use crate::auth::validate::MAX_IMAGE_LEN;
use crate::handlers::{self, admin};

/// Pasted images travel in url-encoded form bodies next to a few small fields.
pub const MAX_FORM_LEN: usize = MAX_IMAGE_LEN + 64 * 1024;

/// All served routes. Public pages first, then everything behind a session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(MAX_FORM_LEN))
        .service(actix_files::Files::new("/static", "./static"))
        .route("/", web::get().to(handlers::page_handlers::root))
        .route("/login", web::get().to(handlers::auth_handlers::login_page))
        .route("/login", web::post().to(handlers::auth_handlers::login_submit))
        .route("/session-expired", web::get().to(handlers::auth_handlers::session_expired))
        .route("/about", web::get().to(handlers::page_handlers::about))
        .route("/privacy", web::get().to(handlers::page_handlers::privacy))
        .route("/terms", web::get().to(handlers::page_handlers::terms))
        // Admin scope registered before the catch-all protected scope
        .service(
            web::scope("/admin")
                .wrap(from_fn(require_admin))
                .wrap(from_fn(require_auth))
                .route("/users", web::get().to(admin::user_handlers::list))
                .route("/users/{id}/delete", web::post().to(admin::user_handlers::delete))
                .route("/users/{id}/suspend", web::post().to(admin::user_handlers::suspend))
                .route("/services", web::get().to(admin::service_handlers::list))
                .route("/services/{id}/status", web::post().to(admin::service_handlers::update_status)),
        )
        .service(
            web::scope("")
                .wrap(from_fn(require_auth))
                .route("/logout", web::post().to(handlers::auth_handlers::logout))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                // Applications received
                .route("/confirmations", web::get().to(handlers::confirmation_handlers::list))
                .route("/confirmations/{id}/accept", web::post().to(handlers::confirmation_handlers::accept))
                .route("/confirmations/{id}/reject", web::post().to(handlers::confirmation_handlers::reject))
                .route("/confirmations/{id}/start", web::post().to(handlers::confirmation_handlers::start))
                // Proof review and payment confirmation
                .route("/project-status", web::get().to(handlers::project_status_handlers::list))
                .route("/project-status/{id}/approve", web::post().to(handlers::project_status_handlers::approve))
                .route("/project-status/{id}/reject", web::post().to(handlers::project_status_handlers::reject))
                .route(
                    "/project-status/{id}/confirm-payment",
                    web::post().to(handlers::project_status_handlers::confirm_payment),
                )
                .route("/active", web::get().to(handlers::active_handlers::list))
                .route("/active/{id}/proof", web::post().to(handlers::active_handlers::submit_proof))
                .route("/payment/{id}", web::get().to(handlers::payment_handlers::show))
                .route("/payment/{id}", web::post().to(handlers::payment_handlers::submit))
                // History
                .route("/transactions", web::get().to(handlers::transaction_handlers::list))
                .route("/transactions/{id}/review", web::post().to(handlers::transaction_handlers::submit_review))
                .route("/reviews", web::get().to(handlers::review_handlers::list))
                // Account
                .route("/profile", web::get().to(handlers::profile_handlers::show))
                .route("/profile", web::post().to(handlers::profile_handlers::update))
                .route("/profile/photo", web::post().to(handlers::profile_handlers::upload_photo))
                .route("/profile/gcash-qr", web::post().to(handlers::profile_handlers::upload_gcash_qr))
                .route("/directory", web::get().to(handlers::directory_handlers::list)),
        );
}
