pub mod application;
pub mod display;
pub mod image;
pub mod review;
pub mod service;
pub mod table_filter;
pub mod transaction;
pub mod user;
