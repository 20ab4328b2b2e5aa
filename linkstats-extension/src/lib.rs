//! Conditional metrics providers for an external account-link service.
//!
//! Exposes live link statistics (identity, group membership, timestamps,
//! aggregate counts) to a host analytics platform as typed data points.
//!
//! - [`ReadinessGate`]: nothing is computed while the service is down, except
//!   the notice provider
//! - [`SubjectResolver`]: player → linked account → primary-group membership
//! - [`ProviderRegistry`]: typed providers with priorities and boolean
//!   conditions, validated once at startup
//! - [`ProviderRegistry::evaluate`]: conditional evaluation for a player or
//!   the server
//! - [`EventNormalizer`]: funnels external lifecycle events into the host's
//!   invalidation channel
//!
//! The service, the host's player directory and its invalidation channel are
//! collaborators behind the traits in [`service`].

mod config;
mod error;
mod evaluator;
mod gate;
pub mod memory;
mod normalizer;
pub mod providers;
mod registry;
mod resolve;
pub mod service;

pub use config::{ExtensionConfig, DEFAULT_NOTICE_TEXT};
pub use error::{ExtensionError, ExtensionResult};
pub use evaluator::{EvalContext, Target};
pub use gate::ReadinessGate;
pub use memory::{InMemoryGroup, InMemoryLinkService, LinkFixture};
pub use normalizer::EventNormalizer;
pub use providers::account_link_registry;
pub use registry::{ComputeFn, ProviderRegistry, RegistryBuilder};
pub use resolve::SubjectResolver;
pub use service::{
    AccountHandle, ChannelInvalidation, Group, Invalidation, LinkService, MemberHandle,
    PlayerChange, PlayerNames,
};
