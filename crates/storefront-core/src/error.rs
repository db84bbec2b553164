use thiserror::Error;

/// Core error type shared across storefront crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A foreign-key, unique, not-null or check constraint rejected a write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// The persistence engine could not be reached or opened.
    #[error("connection failure: {0}")]
    ConnectionFailure(String),
    /// A value failed validation before reaching persistence.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The entity model declaration is internally inconsistent.
    #[error("invalid model: {0}")]
    InvalidModel(String),
    /// Any other engine error.
    #[error("database error: {0}")]
    Db(String),
}

impl Error {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self, Self::MalformedInput(_))
    }
}

/// Convenience alias for results returned by storefront crates.
pub type Result<T> = std::result::Result<T, Error>;
