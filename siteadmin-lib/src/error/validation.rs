//! Validation error types

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All fields that failed validation, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldValidationError>,
}

impl ValidationErrors {
    /// Creates an empty error list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field error.
    pub fn push(&mut self, error: FieldValidationError) {
        self.errors.push(error);
    }

    /// Drops the error recorded for a field.
    pub fn clear(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    /// Returns `true` if no field failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Returns the first error.
    pub fn first(&self) -> Option<&FieldValidationError> {
        self.errors.first()
    }

    /// Iterates over all errors.
    pub fn iter(&self) -> impl Iterator<Item = &FieldValidationError> {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldValidationError;
    type IntoIter = std::vec::IntoIter<FieldValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}
