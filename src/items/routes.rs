// src/items/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the items router with the list, detail, add and edit routes
pub fn items_routes() -> Router {
    Router::new()
        .route("/items", get(handlers::list_items))
        // NOTE: /items/add must stay ahead of the parameterized /items/:id route
        .route(
            "/items/add",
            get(handlers::add_form).post(handlers::add_item),
        )
        .route("/items/:id", get(handlers::get_item))
        .route(
            "/items/:id/edit",
            get(handlers::edit_form).post(handlers::edit_item),
        )
}
