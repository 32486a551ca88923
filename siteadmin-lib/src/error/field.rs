//! Typed record field access errors

/// A typed getter on [`Record`](crate::Record) could not produce a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Record has no field '{field}'")]
    Missing { field: String },

    /// Stored value is of another type, e.g. a string where a flag was expected.
    #[error("Field '{field}' holds {actual}, not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl FieldError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}
