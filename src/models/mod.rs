// src/models/mod.rs

//! Data structures representing database entities.

pub mod cart;
pub mod category;
pub mod order;
pub mod order_item;
pub mod payment;
pub mod product;
pub mod session;
pub mod user;

// Re-export the model structs for convenient access
pub use cart::{Cart, CartItem};
pub use category::Category;
pub use order::Order;
pub use order_item::OrderItem;
pub use payment::Payment;
pub use product::Product;
pub use session::Session;
pub use user::User;
