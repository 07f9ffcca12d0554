// src/items/validators.rs

use super::models::{Item, ITEM_OBJECT_NAME};
use crate::common::constraints::{
    Constrained, Constraint, ConstraintValidator, FieldDescriptor, FieldValue,
};
use crate::common::validation::MessageArg;
use crate::common::{ValidationMode, ValidationResult, Validator, ValidatorRegistry};

pub const PRICE_MIN: i32 = 1_000;
pub const PRICE_MAX: i32 = 1_000_000;
/// Quantities must stay below this value
pub const QUANTITY_LIMIT: i32 = 9_999;
pub const TOTAL_PRICE_MIN: i64 = 10_000;

// ============================================================================
// Item Validator
// ============================================================================

/// Field rules and the total price rule, checked independently so that every
/// violation is reported at once
pub struct ItemValidator;

impl Validator<Item> for ItemValidator {
    fn validate(&self, data: &Item) -> ValidationResult {
        let mut result = ValidationResult::new(ITEM_OBJECT_NAME);

        // Validate item name
        let has_name = data
            .item_name
            .as_deref()
            .map_or(false, |name| !name.trim().is_empty());
        if !has_name {
            result.reject_value("itemName", data.item_name.clone(), "required", Vec::new());
        }

        // Validate price range
        if data.price.map_or(true, |p| !(PRICE_MIN..=PRICE_MAX).contains(&p)) {
            result.reject_value(
                "price",
                data.price.map(|p| p.to_string()),
                "range",
                vec![MessageArg::from(PRICE_MIN), MessageArg::from(PRICE_MAX)],
            );
        }

        // Validate quantity
        if data.quantity.map_or(true, |q| q >= QUANTITY_LIMIT) {
            result.reject_value(
                "quantity",
                data.quantity.map(|q| q.to_string()),
                "max",
                vec![MessageArg::from(QUANTITY_LIMIT)],
            );
        }

        check_total_price(data, &mut result);

        result
    }
}

// ============================================================================
// Total Price Validator
// ============================================================================

/// Object-level rule only; pairs with [`ConstraintValidator`] in declarative mode
pub struct TotalPriceValidator;

impl Validator<Item> for TotalPriceValidator {
    fn supports(&self, data: &Item) -> bool {
        data.price.is_some() && data.quantity.is_some()
    }

    fn validate(&self, data: &Item) -> ValidationResult {
        let mut result = ValidationResult::new(ITEM_OBJECT_NAME);
        check_total_price(data, &mut result);
        result
    }
}

fn check_total_price(data: &Item, result: &mut ValidationResult) {
    if let (Some(price), Some(quantity)) = (data.price, data.quantity) {
        let total = i64::from(price) * i64::from(quantity);
        if total < TOTAL_PRICE_MIN {
            result.reject(
                "totalPriceMin",
                vec![MessageArg::Int(TOTAL_PRICE_MIN), MessageArg::Int(total)],
            );
        }
    }
}

// ============================================================================
// Declarative Constraints
// ============================================================================

const ITEM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "itemName",
        constraints: &[Constraint::NotBlank],
    },
    FieldDescriptor {
        name: "price",
        constraints: &[
            Constraint::NotNull,
            Constraint::Range {
                min: PRICE_MIN as i64,
                max: PRICE_MAX as i64,
            },
        ],
    },
    FieldDescriptor {
        name: "quantity",
        constraints: &[Constraint::NotNull, Constraint::Max(QUANTITY_LIMIT as i64 - 1)],
    },
];

impl Constrained for Item {
    const OBJECT_NAME: &'static str = ITEM_OBJECT_NAME;

    fn descriptors() -> &'static [FieldDescriptor] {
        ITEM_FIELDS
    }

    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            "itemName" => FieldValue::Text(self.item_name.as_deref()),
            "price" => FieldValue::Integer(self.price.map(i64::from)),
            "quantity" => FieldValue::Integer(self.quantity.map(i64::from)),
            _ => FieldValue::Text(None),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Validators bound to the item form for the configured mode
pub fn item_validators(mode: ValidationMode) -> ValidatorRegistry<Item> {
    let registry = ValidatorRegistry::new(ITEM_OBJECT_NAME);
    match mode {
        ValidationMode::Validator => registry.with_validator(ItemValidator),
        ValidationMode::Declarative => registry
            .with_validator(ConstraintValidator)
            .with_validator(TotalPriceValidator),
    }
}
