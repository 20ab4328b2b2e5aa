//! Core type definitions for linkstats.
//!
//! This crate defines the identifiers and events shared by the provider
//! framework and its host:
//! - Player identifiers (UUID) and external account identifiers (snowflakes)
//! - External lifecycle events from the account-link service
//!
//! Nothing here talks to the external service; lookups live in
//! `linkstats-extension`.

mod event;
mod ids;

pub use event::{EventKind, EventSource, ExternalEvent};
pub use ids::{AccountId, PlayerId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid account id: {0}")]
    InvalidAccountId(String),
}
