// src/items/tests/validators_tests.rs

use crate::common::validation::{ErrorScope, MessageArg};
use crate::common::{ValidationMode, ValidationResult, Validator};
use crate::items::models::{Item, ItemFormData};
use crate::items::validators::*;

fn item(name: Option<&str>, price: Option<i32>, quantity: Option<i32>) -> Item {
    Item {
        id: None,
        item_name: name.map(str::to_string),
        price,
        quantity,
    }
}

fn codes(result: &ValidationResult) -> Vec<&str> {
    result.errors.iter().map(|e| e.code.as_str()).collect()
}

#[test]
fn test_valid_item_has_no_errors() {
    let result = ItemValidator.validate(&Item::new("book", 10000, 10));
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn test_blank_name_is_required() {
    for name in [None, Some(""), Some("   ")] {
        let result = ItemValidator.validate(&item(name, Some(10000), Some(10)));
        let name_errors: Vec<_> = result.field_errors("itemName").collect();
        assert_eq!(name_errors.len(), 1, "name {:?}", name);
        assert_eq!(name_errors[0].code, "required");
        assert_eq!(result.errors.len(), 1);
    }
}

#[test]
fn test_price_out_of_range() {
    for price in [None, Some(999), Some(0), Some(-5), Some(1_000_001)] {
        let result = ItemValidator.validate(&item(Some("book"), price, Some(100)));
        let price_errors: Vec<_> = result.field_errors("price").collect();
        assert_eq!(price_errors.len(), 1, "price {:?}", price);
        assert_eq!(price_errors[0].code, "range");
        assert_eq!(
            price_errors[0].args,
            vec![MessageArg::Int(1000), MessageArg::Int(1000000)]
        );
    }
}

#[test]
fn test_price_bounds_are_inclusive() {
    for price in [1000, 1_000_000] {
        let result = ItemValidator.validate(&item(Some("book"), Some(price), Some(10)));
        assert!(!result.has_field_errors("price"), "price {}", price);
    }
}

#[test]
fn test_quantity_must_stay_below_limit() {
    for quantity in [None, Some(9999), Some(10000)] {
        let result = ItemValidator.validate(&item(Some("book"), Some(10000), quantity));
        let quantity_errors: Vec<_> = result.field_errors("quantity").collect();
        assert_eq!(quantity_errors.len(), 1, "quantity {:?}", quantity);
        assert_eq!(quantity_errors[0].code, "max");
        assert_eq!(quantity_errors[0].args, vec![MessageArg::Int(9999)]);
    }

    let result = ItemValidator.validate(&item(Some("book"), Some(10000), Some(9998)));
    assert!(!result.has_field_errors("quantity"));
}

#[test]
fn test_total_price_minimum() {
    let result = ItemValidator.validate(&item(Some("book"), Some(1000), Some(9)));
    let global: Vec<_> = result.global_errors().collect();
    assert_eq!(global.len(), 1);
    assert_eq!(global[0].code, "totalPriceMin");
    assert_eq!(global[0].args, vec![MessageArg::Int(10000), MessageArg::Int(9000)]);

    let at_minimum = ItemValidator.validate(&item(Some("book"), Some(1000), Some(10)));
    assert_eq!(at_minimum.global_errors().count(), 0);
}

#[test]
fn test_total_price_skipped_when_value_missing() {
    let result = ItemValidator.validate(&item(Some("book"), None, Some(1)));
    assert_eq!(result.global_errors().count(), 0);

    let result = ItemValidator.validate(&item(Some("book"), Some(1000), None));
    assert_eq!(result.global_errors().count(), 0);
}

#[test]
fn test_checks_do_not_short_circuit() {
    let result = ItemValidator.validate(&item(Some(""), Some(500), Some(10)));
    assert_eq!(codes(&result), vec!["required", "range", "totalPriceMin"]);

    let result = ItemValidator.validate(&item(Some(""), Some(500), Some(10000)));
    assert_eq!(codes(&result), vec!["required", "range", "max"]);

    let result = ItemValidator.validate(&item(Some(""), Some(1), Some(9999)));
    assert_eq!(codes(&result), vec!["required", "range", "max", "totalPriceMin"]);
}

#[test]
fn test_rejected_values_are_recorded() {
    let result = ItemValidator.validate(&item(Some("book"), Some(500), Some(20000)));
    assert_eq!(result.rejected_value("price"), Some("500"));
    assert_eq!(result.rejected_value("quantity"), Some("20000"));
}

#[test]
fn test_large_totals_do_not_overflow() {
    let result = ItemValidator.validate(&item(Some("book"), Some(i32::MAX), Some(i32::MAX)));
    assert_eq!(result.global_errors().count(), 0);
}

#[test]
fn test_registry_in_validator_mode_matches_item_validator() {
    let registry = item_validators(ValidationMode::Validator);
    let candidate = item(None, Some(500), Some(10));

    let direct = ItemValidator.validate(&candidate);
    let via_registry = registry.validate(&candidate);
    assert_eq!(direct.errors, via_registry.errors);
}

#[test]
fn test_declarative_mode_uses_constraint_codes() {
    let registry = item_validators(ValidationMode::Declarative);

    let result = registry.validate(&item(Some(" "), None, None));
    assert_eq!(codes(&result), vec!["NotBlank", "NotNull", "NotNull"]);

    let result = registry.validate(&item(Some("book"), Some(500), Some(10)));
    assert_eq!(codes(&result), vec!["Range", "totalPriceMin"]);
    assert!(matches!(
        result.errors[1].scope,
        ErrorScope::Global
    ));

    let result = registry.validate(&item(Some("book"), Some(10000), Some(10000)));
    assert_eq!(codes(&result), vec!["Max"]);
    assert_eq!(result.errors[0].args, vec![MessageArg::Int(9998)]);

    assert!(!registry.validate(&Item::new("book", 10000, 10)).has_errors());
}

#[test]
fn test_both_modes_agree_on_quantity_limit() {
    let declarative = item_validators(ValidationMode::Declarative);
    let rules = item_validators(ValidationMode::Validator);

    for quantity in [9998, 9999, 10000] {
        let candidate = item(Some("book"), Some(10000), Some(quantity));
        assert_eq!(
            declarative.validate(&candidate).has_field_errors("quantity"),
            rules.validate(&candidate).has_field_errors("quantity"),
            "quantity {}",
            quantity
        );
    }
    assert!(declarative
        .validate(&item(Some("book"), Some(10000), Some(9999)))
        .has_field_errors("quantity"));
}

#[test]
fn test_total_price_validator_supports_complete_items_only() {
    assert!(!TotalPriceValidator.supports(&item(Some("book"), None, Some(1))));
    assert!(TotalPriceValidator.supports(&item(Some("book"), Some(1), Some(1))));
}

#[test]
fn test_binding_failures_combine_with_rule_errors() {
    let form = ItemFormData {
        item_name: Some("book".to_string()),
        price: Some("cheap".to_string()),
        quantity: Some("10".to_string()),
    };

    let (candidate, mut result) = form.bind();
    assert_eq!(candidate.price, None);
    assert_eq!(candidate.quantity, Some(10));

    result.merge(ItemValidator.validate(&candidate));
    assert_eq!(codes(&result), vec!["typeMismatch", "range"]);
    assert_eq!(result.rejected_value("price"), Some("cheap"));
    assert!(result.errors[0].codes().contains(&"typeMismatch.price".to_string()));
}
