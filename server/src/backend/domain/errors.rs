/// Errors the domain layer raises on purpose.
///
/// Anything else (I/O, YAML, CSV) travels as a plain `anyhow::Error`; the
/// REST layer downcasts to this type to pick a status code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    pub fn not_found(what: &str, id: impl std::fmt::Display) -> Self {
        DomainError::NotFound(format!("{} not found: {}", what, id))
    }
}
