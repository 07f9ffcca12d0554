// src/common/constraints.rs
//! Declarative field constraints
//!
//! A type lists its fields together with the constraints attached to them and
//! exposes each field's current value. [`ConstraintValidator`] walks that
//! declaration and records one field error per violated constraint, using the
//! constraint name as the message code.
//!
//! Absent values satisfy every constraint except `NotBlank` and `NotNull`, so
//! a missing number reports only the missing value, not a range violation.

use super::validation::{MessageArg, ValidationResult, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    NotBlank,
    NotNull,
    Range { min: i64, max: i64 },
    Min(i64),
    Max(i64),
}

/// Current value of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Integer(Option<i64>),
}

impl FieldValue<'_> {
    fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Text(None) | FieldValue::Integer(None))
    }

    fn display(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => text.map(str::to_string),
            FieldValue::Integer(n) => n.map(|n| n.to_string()),
        }
    }
}

impl Constraint {
    pub fn code(&self) -> &'static str {
        match self {
            Constraint::NotBlank => "NotBlank",
            Constraint::NotNull => "NotNull",
            Constraint::Range { .. } => "Range",
            Constraint::Min(_) => "Min",
            Constraint::Max(_) => "Max",
        }
    }

    pub fn args(&self) -> Vec<MessageArg> {
        match self {
            Constraint::NotBlank | Constraint::NotNull => Vec::new(),
            Constraint::Range { min, max } => vec![MessageArg::Int(*min), MessageArg::Int(*max)],
            Constraint::Min(value) | Constraint::Max(value) => vec![MessageArg::Int(*value)],
        }
    }

    pub fn is_satisfied_by(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Constraint::NotBlank, FieldValue::Text(text)) => {
                text.map_or(false, |t| !t.trim().is_empty())
            }
            (Constraint::NotBlank, FieldValue::Integer(n)) => n.is_some(),
            (Constraint::NotNull, value) => !value.is_absent(),
            (_, value) if value.is_absent() => true,
            (Constraint::Range { min, max }, FieldValue::Integer(Some(n))) => n >= min && n <= max,
            (Constraint::Min(min), FieldValue::Integer(Some(n))) => n >= min,
            (Constraint::Max(max), FieldValue::Integer(Some(n))) => n <= max,
            // Numeric constraints do not apply to text fields
            (_, FieldValue::Text(_)) => true,
            (_, FieldValue::Integer(None)) => true,
        }
    }
}

#[derive(Debug)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub constraints: &'static [Constraint],
}

/// Types that declare constraints on their fields
pub trait Constrained {
    const OBJECT_NAME: &'static str;

    fn descriptors() -> &'static [FieldDescriptor];

    fn field_value(&self, field: &str) -> FieldValue<'_>;
}

/// Checks every declared constraint of a [`Constrained`] type
pub struct ConstraintValidator;

impl<T: Constrained> Validator<T> for ConstraintValidator {
    fn validate(&self, data: &T) -> ValidationResult {
        let mut result = ValidationResult::new(T::OBJECT_NAME);

        for descriptor in T::descriptors() {
            let value = data.field_value(descriptor.name);
            for constraint in descriptor.constraints {
                if !constraint.is_satisfied_by(&value) {
                    result.reject_value(
                        descriptor.name,
                        value.display(),
                        constraint.code(),
                        constraint.args(),
                    );
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Signup {
        nickname: Option<String>,
        age: Option<i64>,
    }

    const SIGNUP_FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor {
            name: "nickname",
            constraints: &[Constraint::NotBlank],
        },
        FieldDescriptor {
            name: "age",
            constraints: &[Constraint::NotNull, Constraint::Min(18), Constraint::Max(120)],
        },
    ];

    impl Constrained for Signup {
        const OBJECT_NAME: &'static str = "signup";

        fn descriptors() -> &'static [FieldDescriptor] {
            SIGNUP_FIELDS
        }

        fn field_value(&self, field: &str) -> FieldValue<'_> {
            match field {
                "nickname" => FieldValue::Text(self.nickname.as_deref()),
                _ => FieldValue::Integer(self.age),
            }
        }
    }

    #[test]
    fn test_absent_values_only_fail_presence_constraints() {
        let result = ConstraintValidator.validate(&Signup {
            nickname: None,
            age: None,
        });

        let codes: Vec<&str> = result.errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["NotBlank", "NotNull"]);
    }

    #[test]
    fn test_whitespace_is_blank() {
        assert!(!Constraint::NotBlank.is_satisfied_by(&FieldValue::Text(Some("   "))));
        assert!(Constraint::NotBlank.is_satisfied_by(&FieldValue::Text(Some(" a "))));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let range = Constraint::Range { min: 1000, max: 1_000_000 };
        assert!(range.is_satisfied_by(&FieldValue::Integer(Some(1000))));
        assert!(range.is_satisfied_by(&FieldValue::Integer(Some(1_000_000))));
        assert!(!range.is_satisfied_by(&FieldValue::Integer(Some(999))));
        assert!(Constraint::Max(9999).is_satisfied_by(&FieldValue::Integer(Some(9999))));
        assert!(!Constraint::Max(9999).is_satisfied_by(&FieldValue::Integer(Some(10000))));
    }

    #[test]
    fn test_violation_carries_value_and_args() {
        let result = ConstraintValidator.validate(&Signup {
            nickname: Some("neo".to_string()),
            age: Some(150),
        });

        assert_eq!(result.errors.len(), 1);
        let error = &result.errors[0];
        assert_eq!(error.field(), Some("age"));
        assert_eq!(error.code, "Max");
        assert_eq!(error.args, vec![MessageArg::Int(120)]);
        assert_eq!(error.rejected_value(), Some("150"));
    }
}
