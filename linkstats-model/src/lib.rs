//! Provider model for linkstats.
//!
//! Defines the types the provider framework and the host analytics platform
//! exchange:
//! - [`ProviderDescriptor`]: what a data point is called, its kind, priority and condition
//! - [`Value`]: a materialized value, tagged with its [`ValueKind`]
//! - [`EvaluationResult`]: the ordered data points that survived evaluation
//! - [`Scope`] and [`Trigger`]: who a query is about and what caused it
//!
//! These types carry no behaviour beyond constructors; evaluation lives in
//! `linkstats-extension`. They serialize to JSON so the host (or the CLI) can
//! render them without linking the framework.

mod descriptor;
mod result;
mod value;

pub use descriptor::{NumberFormat, ProviderDescriptor, Scope, Trigger};
pub use result::{DataPoint, EvaluationResult};
pub use value::{Value, ValueKind};
