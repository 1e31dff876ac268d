// src/lib.rs

//! Storefront: a small e-commerce demo service.
//!
//! Catalog browsing with filter/sort/pagination, a per-user shopping cart,
//! and an atomic cart-to-order checkout with a simulated payment capture,
//! served as a JSON API over PostgreSQL. Page rendering is left to an
//! external frontend; responses carry the page data plus a transient
//! `notice` (success/info/warning/error) for user feedback.

pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::state::AppState;
