// Common validation types and traits

use std::fmt;

/// Value substituted into a message template placeholder (`{0}`, `{1}`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageArg {
    Int(i64),
    Text(String),
}

impl From<i64> for MessageArg {
    fn from(value: i64) -> Self {
        MessageArg::Int(value)
    }
}

impl From<i32> for MessageArg {
    fn from(value: i32) -> Self {
        MessageArg::Int(i64::from(value))
    }
}

impl From<&str> for MessageArg {
    fn from(value: &str) -> Self {
        MessageArg::Text(value.to_string())
    }
}

impl fmt::Display for MessageArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageArg::Int(n) => write!(f, "{}", n),
            MessageArg::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Whether an error belongs to a single field or to the whole object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorScope {
    Field {
        field: String,
        /// Raw value the user submitted, kept for redisplay
        rejected_value: Option<String>,
        /// Type name used for `code.type` message lookups (binding errors only)
        field_type: Option<String>,
        /// True when the value could not even be converted to the field type
        binding_failure: bool,
    },
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub object_name: String,
    pub scope: ErrorScope,
    pub code: String,
    pub args: Vec<MessageArg>,
}

impl ValidationError {
    pub fn field(&self) -> Option<&str> {
        match &self.scope {
            ErrorScope::Field { field, .. } => Some(field),
            ErrorScope::Global => None,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self.scope, ErrorScope::Global)
    }

    pub fn rejected_value(&self) -> Option<&str> {
        match &self.scope {
            ErrorScope::Field { rejected_value, .. } => rejected_value.as_deref(),
            ErrorScope::Global => None,
        }
    }

    /// Message codes from most to least specific.
    ///
    /// Field errors resolve as `code.object.field`, `code.field`, `code.type`
    /// (when the field type is known) and finally `code`. Global errors
    /// resolve as `code.object` then `code`.
    pub fn codes(&self) -> Vec<String> {
        match &self.scope {
            ErrorScope::Field {
                field, field_type, ..
            } => {
                let mut codes = vec![
                    format!("{}.{}.{}", self.code, self.object_name, field),
                    format!("{}.{}", self.code, field),
                ];
                if let Some(field_type) = field_type {
                    codes.push(format!("{}.{}", self.code, field_type));
                }
                codes.push(self.code.clone());
                codes
            }
            ErrorScope::Global => vec![
                format!("{}.{}", self.code, self.object_name),
                self.code.clone(),
            ],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.args.iter().map(MessageArg::to_string).collect();
        match &self.scope {
            ErrorScope::Field {
                field,
                rejected_value,
                binding_failure,
                ..
            } => write!(
                f,
                "Field error in object '{}' on field '{}': rejected value [{}]; codes [{}]; arguments [{}]; binding failure [{}]",
                self.object_name,
                field,
                rejected_value.as_deref().unwrap_or("null"),
                self.codes().join(","),
                args.join(","),
                binding_failure
            ),
            ErrorScope::Global => write!(
                f,
                "Error in object '{}': codes [{}]; arguments [{}]",
                self.object_name,
                self.codes().join(","),
                args.join(",")
            ),
        }
    }
}

/// Ordered collection of errors gathered for one target object
#[derive(Debug)]
pub struct ValidationResult {
    pub object_name: String,
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new(object_name: &str) -> Self {
        Self {
            object_name: object_name.to_string(),
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Record a semantic violation on `field`
    pub fn reject_value(
        &mut self,
        field: &str,
        rejected_value: Option<String>,
        code: &str,
        args: Vec<MessageArg>,
    ) {
        let error = ValidationError {
            object_name: self.object_name.clone(),
            scope: ErrorScope::Field {
                field: field.to_string(),
                rejected_value,
                field_type: None,
                binding_failure: false,
            },
            code: code.to_string(),
            args,
        };
        self.add_error(error);
    }

    /// Record a value that could not be converted to `field_type`
    pub fn reject_binding(&mut self, field: &str, raw: &str, field_type: &str) {
        let error = ValidationError {
            object_name: self.object_name.clone(),
            scope: ErrorScope::Field {
                field: field.to_string(),
                rejected_value: Some(raw.to_string()),
                field_type: Some(field_type.to_string()),
                binding_failure: true,
            },
            code: "typeMismatch".to_string(),
            args: vec![MessageArg::from(field)],
        };
        self.add_error(error);
    }

    /// Record an object-level violation
    pub fn reject(&mut self, code: &str, args: Vec<MessageArg>) {
        let error = ValidationError {
            object_name: self.object_name.clone(),
            scope: ErrorScope::Global,
            code: code.to_string(),
            args,
        };
        self.add_error(error);
    }

    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
            self.errors.extend(other.errors);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.is_valid
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == Some(field))
    }

    pub fn field_errors<'a, 'b>(&'a self, field: &'b str) -> impl Iterator<Item = &'a ValidationError> + 'b
    where
        'a: 'b,
    {
        self.errors.iter().filter(move |e| e.field() == Some(field))
    }

    pub fn global_errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(|e| e.is_global())
    }

    /// Value to redisplay for `field`: the first rejected value if the field errored
    pub fn rejected_value(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .filter(|e| e.field() == Some(field))
            .find_map(ValidationError::rejected_value)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidationResult for '{}': {} errors",
            self.object_name,
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n{}", error)?;
        }
        Ok(())
    }
}

pub trait Validator<T> {
    /// Whether this validator applies to `data`
    fn supports(&self, _data: &T) -> bool {
        true
    }

    fn validate(&self, data: &T) -> ValidationResult;
}

/// Validators registered for one target type, run in registration order
pub struct ValidatorRegistry<T> {
    object_name: String,
    validators: Vec<Box<dyn Validator<T> + Send + Sync>>,
}

impl<T> ValidatorRegistry<T> {
    pub fn new(object_name: &str) -> Self {
        Self {
            object_name: object_name.to_string(),
            validators: Vec::new(),
        }
    }

    pub fn with_validator<V>(mut self, validator: V) -> Self
    where
        V: Validator<T> + Send + Sync + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn validate(&self, data: &T) -> ValidationResult {
        let mut result = ValidationResult::new(&self.object_name);
        for validator in self.validators.iter().filter(|v| v.supports(data)) {
            result.merge(validator.validate(data));
        }
        result
    }
}
