// src/web/routes.rs

//! The application's route table: every (method, path) pair maps to a
//! handler here, resolved once at startup.

use crate::web::handlers;
use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    // Catalog
    .route("/", web::get().to(handlers::catalog::home))
    // Authentication
    .service(
      web::scope("/auth")
        .route("/login", web::get().to(handlers::auth::login_form))
        .route("/login", web::post().to(handlers::auth::login))
        .route("/sign-up", web::get().to(handlers::auth::sign_up_form))
        .route("/sign-up", web::post().to(handlers::auth::sign_up))
        .route("/logout", web::get().to(handlers::auth::logout)),
    )
    // Cart
    .route("/cart", web::get().to(handlers::cart::view_cart))
    .route("/cart/count", web::get().to(handlers::cart::cart_count))
    .route("/add-to-cart/{product_id}", web::post().to(handlers::cart::add_to_cart))
    .route(
      "/remove-from-cart/{item_id}",
      web::post().to(handlers::cart::remove_from_cart),
    )
    .route("/cart/increase/{item_id}", web::post().to(handlers::cart::increase_quantity))
    .route("/cart/decrease/{item_id}", web::post().to(handlers::cart::decrease_quantity))
    // Checkout
    .route("/checkout", web::get().to(handlers::checkout::checkout_summary))
    .route("/checkout", web::post().to(handlers::checkout::place_order))
    // Orders
    .route("/orders", web::get().to(handlers::orders::order_history));
}
