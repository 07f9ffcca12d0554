// src/items/repository.rs
//! In-memory item store
//!
//! All reads and writes go through one `RwLock`, so id assignment and updates
//! are atomic even when several requests save items at the same time.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::Item;

#[derive(Debug, Default)]
struct ItemStore {
    sequence: u64,
    items: BTreeMap<u64, Item>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemRepository {
    store: Arc<RwLock<ItemStore>>,
}

impl ItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `item` under the next id and returns the stored copy
    pub async fn save(&self, mut item: Item) -> Item {
        let mut store = self.store.write().await;
        store.sequence += 1;
        let id = store.sequence;
        item.id = Some(id);
        store.items.insert(id, item.clone());

        debug!(item_id = id, "Item stored");
        item
    }

    pub async fn find_by_id(&self, id: u64) -> Option<Item> {
        self.store.read().await.items.get(&id).cloned()
    }

    /// All items in id order
    pub async fn find_all(&self) -> Vec<Item> {
        self.store.read().await.items.values().cloned().collect()
    }

    /// Replaces name, price and quantity of item `id`; `None` if it does not exist
    pub async fn update(&self, id: u64, params: &Item) -> Option<Item> {
        let mut store = self.store.write().await;
        let item = store.items.get_mut(&id)?;
        item.item_name = params.item_name.clone();
        item.price = params.price;
        item.quantity = params.quantity;

        debug!(item_id = id, "Item updated");
        Some(item.clone())
    }

    #[cfg(test)]
    pub async fn clear_store(&self) {
        let mut store = self.store.write().await;
        store.items.clear();
    }
}
