//! Error types for the provider framework.

use linkstats_model::{Scope, Trigger, ValueKind};
use thiserror::Error;

/// Result type for provider operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The external link service is not live yet. Hosts render this as
    /// "no data available", never as a zero or false value.
    #[error("link service is not ready")]
    ServiceNotReady,

    #[error("unknown {scope} provider: {name}")]
    UnknownProvider { scope: Scope, name: String },

    /// A player provider was computed without a player subject.
    #[error("provider '{0}' requires a player subject")]
    MissingSubject(String),

    #[error("trigger {0:?} requires a player")]
    TriggerNeedsPlayer(Trigger),

    #[error("duplicate {scope} provider: {name}")]
    DuplicateProvider { scope: Scope, name: String },

    #[error("provider '{provider}' is conditional on unknown provider '{condition}'")]
    UnknownCondition { provider: String, condition: String },

    #[error("provider '{provider}' is conditional on '{condition}', which is not boolean")]
    ConditionNotBoolean { provider: String, condition: String },

    #[error("provider '{provider}' is conditional on '{condition}' from another scope")]
    ConditionScopeMismatch { provider: String, condition: String },

    #[error("condition cycle through provider '{0}'")]
    ConditionCycle(String),

    #[error("provider '{provider}' declared as {declared} but computes {actual}")]
    KindMismatch {
        provider: String,
        declared: ValueKind,
        actual: ValueKind,
    },

    #[error("only one readiness-exempt provider may be registered, found '{first}' and '{second}'")]
    MultipleNoticeProviders { first: String, second: String },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ExtensionError {
    /// Whether this is the readiness failure, which some callers absorb.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, ExtensionError::ServiceNotReady)
    }
}
