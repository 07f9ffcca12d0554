// Common module - shared types and utilities across all modules

pub mod binding;
pub mod config;
pub mod constraints;
pub mod error;
pub mod messages;
pub mod state;
pub mod validation;

// Re-export commonly used types for convenience
pub use config::{AppConfig, ValidationMode};
pub use error::ApiError;
pub use messages::MessageSource;
pub use state::AppState;
pub use validation::{ValidationResult, Validator, ValidatorRegistry};
