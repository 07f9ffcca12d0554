use serde::{Deserialize, Serialize};

use crate::common::binding::{bind_integer, bind_text};
use crate::common::ValidationResult;

/// Name under which item errors are recorded and message codes are built
pub const ITEM_OBJECT_NAME: &str = "item";

/// A stored item, or a candidate item bound from a form.
///
/// `id` is assigned by the repository on save. Price and quantity may be
/// absent because candidates come straight from user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Option<u64>,
    pub item_name: Option<String>,
    pub price: Option<i32>,
    pub quantity: Option<i32>,
}

impl Item {
    pub fn new(item_name: &str, price: i32, quantity: i32) -> Self {
        Self {
            id: None,
            item_name: Some(item_name.to_string()),
            price: Some(price),
            quantity: Some(quantity),
        }
    }
}

/// Raw `application/x-www-form-urlencoded` fields of the add and edit forms
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFormData {
    pub item_name: Option<String>,
    pub price: Option<String>,
    pub quantity: Option<String>,
}

impl ItemFormData {
    /// Form pre-filled from a stored item
    pub fn from_item(item: &Item) -> Self {
        Self {
            item_name: item.item_name.clone(),
            price: item.price.map(|p| p.to_string()),
            quantity: item.quantity.map(|q| q.to_string()),
        }
    }

    /// Binds the raw fields into a candidate item; conversion failures are
    /// returned as `typeMismatch` errors instead of aborting the request
    pub fn bind(&self) -> (Item, ValidationResult) {
        let mut result = ValidationResult::new(ITEM_OBJECT_NAME);

        let item = Item {
            id: None,
            item_name: bind_text(self.item_name.as_deref()),
            price: bind_integer(&mut result, "price", self.price.as_deref()),
            quantity: bind_integer(&mut result, "quantity", self.quantity.as_deref()),
        };

        (item, result)
    }
}

/// Query string of the detail page; `status=true` follows a successful save
#[derive(Debug, Default, Deserialize)]
pub struct ItemDetailQuery {
    pub status: Option<bool>,
}
