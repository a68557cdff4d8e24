//! Error types for the titer_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for titer_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Profile name is not configured
    #[error("unknown profile: {0}")]
    UnknownProfile(String),

    /// Compound key does not resolve in the reference catalog
    #[error("unknown compound: {0}")]
    UnknownCompound(String),

    /// Dose must be a strictly positive amount in milligrams
    #[error("invalid dose: {0} mg")]
    InvalidDose(f64),

    /// Timestamp could not be parsed
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Delete target does not exist in the profile
    #[error("no dose event with id {0}")]
    EventNotFound(Uuid),

    /// Store error
    #[error("store error: {0}")]
    Store(String),
}
