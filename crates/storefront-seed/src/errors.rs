use thiserror::Error;

/// Errors emitted by the seed generator.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid seed profile: {0}")]
    InvalidProfile(String),
    #[error("store error: {0}")]
    Store(#[from] storefront_core::Error),
}
