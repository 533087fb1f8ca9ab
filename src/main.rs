use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{middleware, web, App, HttpServer};

use campus_gigs::api::ApiClient;
use campus_gigs::config::AppConfig;
use campus_gigs::{handlers, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let api = ApiClient::new(&config.api_base_url, config.api_timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    let secret_key = config.session_key();
    let bind_addr = config.bind_addr.clone();

    log::info!("Backend API at {}", config.api_base_url);
    log::info!("Starting server at http://{bind_addr}");

    let api = web::Data::new(api);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
            .cookie_secure(config.cookie_secure)
            .cookie_http_only(true)
            .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(api.clone())
            .app_data(config.clone())
            .configure(routes::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
