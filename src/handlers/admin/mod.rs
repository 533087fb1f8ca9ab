pub mod service_handlers;
pub mod user_handlers;
