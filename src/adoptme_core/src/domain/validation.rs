use thiserror::Error;

/// Input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Incomplete values")]
    IncompleteValues,
    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("Field `{field}` is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field, when there is one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::IncompleteValues => None,
            ValidationError::EmptyField(field)
            | ValidationError::InvalidField { field, .. } => Some(*field),
        }
    }
}

/// A value that must be present on creation. Missing and blank both count as incomplete.
pub fn required_text(value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_owned()),
        _ => Err(ValidationError::IncompleteValues),
    }
}

/// A value that may be omitted from a patch but cannot be blanked.
pub fn non_empty_text(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_owned())
}
