//! # Items Module
//!
//! Item management through HTML forms:
//! - Form binding and validation of new items
//! - In-memory item storage
//! - List, detail, add and edit pages

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod validators;
pub mod views;

#[cfg(test)]
mod tests;

pub use models::Item;
pub use repository::ItemRepository;
pub use routes::items_routes;
