//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check element and attribute names are usable XML names
//! - Check strict namespace matching has a namespace to match
//! - Check the log level is one tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted

use thiserror::Error;

use crate::config::schema::Settings;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("transform.password_element {0:?} is not a valid element name")]
    InvalidPasswordElement(String),

    #[error("transform.bookkeeping_attributes[{index}] {name:?} is not a valid attribute name")]
    InvalidBookkeepingAttribute { index: usize, name: String },

    #[error("transform.strict_namespace is set but transform.namespace is empty")]
    StrictWithoutNamespace,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error, off")]
    UnknownLogLevel(String),
}

/// Validate settings, collecting every problem found.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let transform = &settings.transform;

    if !is_local_name(&transform.password_element) {
        errors.push(ValidationError::InvalidPasswordElement(
            transform.password_element.clone(),
        ));
    }

    for (index, name) in transform.bookkeeping_attributes.iter().enumerate() {
        if !is_qualified_name(name) {
            errors.push(ValidationError::InvalidBookkeepingAttribute {
                index,
                name: name.clone(),
            });
        }
    }

    if transform.strict_namespace && transform.namespace.trim().is_empty() {
        errors.push(ValidationError::StrictWithoutNamespace);
    }

    let level = settings.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            settings.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_local_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn is_qualified_name(name: &str) -> bool {
    match name.split_once(':') {
        Some((prefix, local)) => is_local_name(prefix) && is_local_name(local),
        None => is_local_name(name),
    }
}
