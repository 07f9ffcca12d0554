// src/main.rs
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod common;
mod items;
mod logging_middleware;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::{AppConfig, AppState, MessageSource};
use items::validators::item_validators;
use items::{Item, ItemRepository};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    info!(
        validation_mode = ?config.validation_mode,
        validate_on_edit = config.validate_on_edit,
        "Configuration loaded"
    );

    let state = build_state(config)?;

    if state.config.seed_sample_items {
        seed_sample_items(&state.items).await;
    }

    let addr = state.config.socket_addr();
    let app = build_router(Arc::new(state));

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub fn build_state(config: AppConfig) -> anyhow::Result<AppState> {
    let mut messages = MessageSource::embedded(&config.default_locale)?;
    if let Some(dir) = &config.messages_dir {
        messages = messages.with_overrides_from(dir)?;
    }
    info!(default_locale = %messages.default_locale(), "Message catalogs loaded");

    let item_validators = item_validators(config.validation_mode);
    info!(validators = item_validators.len(), "Item validators registered");

    Ok(AppState {
        items: ItemRepository::new(),
        item_validators: Arc::new(item_validators),
        messages: Arc::new(messages),
        config,
    })
}

pub async fn seed_sample_items(items: &ItemRepository) {
    items.save(Item::new("itemA", 10000, 10)).await;
    items.save(Item::new("itemB", 20000, 20)).await;
    info!("Sample items seeded");
}

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(items::items_routes())
        // Log form bodies and response summaries in debug mode
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
