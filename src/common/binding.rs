// Conversion of raw form text into typed field values

use super::validation::ValidationResult;

/// Binds a text field as submitted; absent stays absent, blank stays blank
pub fn bind_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::to_string)
}

/// Binds an integer field.
///
/// Empty or whitespace-only input binds to `None`. Text that is not an `i32`
/// records a `typeMismatch` error carrying the raw input and also binds to
/// `None`.
pub fn bind_integer(result: &mut ValidationResult, field: &str, raw: Option<&str>) -> Option<i32> {
    let raw = raw?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<i32>() {
        Ok(value) => Some(value),
        Err(_) => {
            result.reject_binding(field, raw, "integer");
            None
        }
    }
}
