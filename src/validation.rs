use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Required { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must reference an existing record")]
    MissingReference { field: &'static str },
}

/// Write-time shape checks for a payload, run before any database access.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    max_length(field, value, max)
}

pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => max_length(field, value, max),
        None => Ok(()),
    }
}

pub fn required_id(field: &'static str, value: Uuid) -> Result<(), ValidationError> {
    if value.is_nil() {
        return Err(ValidationError::MissingReference { field });
    }
    Ok(())
}

pub fn optional_id(field: &'static str, value: Option<Uuid>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |id| required_id(field, id))
}

// VARCHAR(n) limits count characters, not bytes.
fn max_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
