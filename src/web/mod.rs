// src/web/mod.rs

pub mod current_user;
pub mod handlers;
pub mod notice;
pub mod routes;

pub use routes::configure_app_routes;
