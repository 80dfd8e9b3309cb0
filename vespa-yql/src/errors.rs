use thiserror::Error;

/// Field name reported when a query has no source.
pub const SOURCES_FIELD: &str = "sources";

/// Field name reported when an input parameter key is malformed.
pub const INPUT_FIELD: &str = "input";

/// Structural problem detected by [`QueryBuilder`](crate::query::QueryBuilder) before rendering.
///
/// Rendering itself never fails; this is the only error the library produces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation error in field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// No source was given to `from`.
    pub fn missing_sources() -> Self {
        Self::new(SOURCES_FIELD, "at least one source must be specified")
    }

    /// An input parameter key does not carry the required prefix.
    pub fn malformed_input_key(key: &str, prefix: &str) -> Self {
        Self::new(
            INPUT_FIELD,
            format!("input parameter key '{key}' should start with '{prefix}'"),
        )
    }
}

/// Convenience alias used by the assembler's terminal operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field_and_message() {
        let err = ValidationError::missing_sources();
        assert_eq!(
            err.to_string(),
            "validation error in field 'sources': at least one source must be specified"
        );
    }

    #[test]
    fn malformed_input_key_mentions_key_and_prefix() {
        let err = ValidationError::malformed_input_key("vector", "input.query(");
        assert_eq!(err.field, INPUT_FIELD);
        assert_eq!(err.message, "input parameter key 'vector' should start with 'input.query('");
    }
}
