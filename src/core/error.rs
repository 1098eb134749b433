use thiserror::Error;

/// Errors that can occur while building, configuring or importing offers.
///
/// The pricing engine itself never returns an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AngebotError {
    /// One or more submission validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Offer number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Pricing configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// An API payload could not be turned into typed offer data.
    #[error("parse error: {0}")]
    Parse(String),

    /// JSON generation error.
    #[error("JSON error: {0}")]
    Json(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "items[0].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Offer rule ID if applicable (e.g. "OF-02").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with an offer rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_rule() {
        let err = ValidationError::with_rule("customer", "a customer must be selected", "OF-02");
        assert_eq!(err.to_string(), "[OF-02] customer: a customer must be selected");
    }

    #[test]
    fn display_without_rule() {
        let err = ValidationError::new("items", "empty");
        assert_eq!(err.to_string(), "items: empty");
    }
}
