// Application state shared across all handlers

use std::sync::Arc;

use crate::common::config::AppConfig;
use crate::common::messages::MessageSource;
use crate::common::validation::ValidatorRegistry;
use crate::items::{Item, ItemRepository};

/// Application state: the item store, the validators bound to items, and message catalogs
#[derive(Clone)]
pub struct AppState {
    pub items: ItemRepository,
    pub item_validators: Arc<ValidatorRegistry<Item>>,
    pub messages: Arc<MessageSource>,
    pub config: AppConfig,
}
