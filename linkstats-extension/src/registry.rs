//! Provider registry.
//!
//! Providers are registered once at startup through [`RegistryBuilder`] and
//! the resulting [`ProviderRegistry`] is immutable. `build()` rejects tables
//! the evaluator could not walk: duplicate names, dangling or non-boolean
//! conditions, conditions across scopes, and condition cycles.

use crate::error::{ExtensionError, ExtensionResult};
use crate::evaluator::EvalContext;
use linkstats_model::{ProviderDescriptor, Scope, Value, ValueKind};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// A kind-specific compute function.
pub type ComputeFn<T> = Box<dyn Fn(&EvalContext<'_>) -> ExtensionResult<T> + Send + Sync>;

pub(crate) enum Compute {
    Boolean(ComputeFn<bool>),
    String(ComputeFn<String>),
    Integer(ComputeFn<i64>),
    Percentage(ComputeFn<f64>),
}

impl Compute {
    fn kind(&self) -> ValueKind {
        match self {
            Compute::Boolean(_) => ValueKind::Boolean,
            Compute::String(_) => ValueKind::String,
            Compute::Integer(_) => ValueKind::Integer,
            Compute::Percentage(_) => ValueKind::Percentage,
        }
    }

    pub(crate) fn run(&self, ctx: &EvalContext<'_>) -> ExtensionResult<Value> {
        Ok(match self {
            Compute::Boolean(f) => Value::Boolean(f(ctx)?),
            Compute::String(f) => Value::String(f(ctx)?),
            Compute::Integer(f) => Value::Integer(f(ctx)?),
            Compute::Percentage(f) => Value::Percentage(f(ctx)?),
        })
    }
}

pub(crate) struct Entry {
    pub(crate) descriptor: ProviderDescriptor,
    pub(crate) compute: Compute,
    /// Referenced as a condition by some other provider.
    pub(crate) is_condition: bool,
}

/// The providers of one scope, in evaluation order.
pub(crate) struct ScopeTable {
    pub(crate) entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ScopeTable {
    pub(crate) fn get(&self, name: &str) -> Option<&Entry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }
}

/// Immutable table of registered providers, split by scope.
pub struct ProviderRegistry {
    player: ScopeTable,
    server: ScopeTable,
}

impl ProviderRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub(crate) fn table(&self, scope: Scope) -> &ScopeTable {
        match scope {
            Scope::Player => &self.player,
            Scope::Server => &self.server,
        }
    }

    /// Registration surface for the host, in evaluation order.
    pub fn descriptors(&self, scope: Scope) -> impl Iterator<Item = &ProviderDescriptor> + '_ {
        self.table(scope).entries.iter().map(|e| &e.descriptor)
    }

    pub fn descriptor(&self, scope: Scope, name: &str) -> Option<&ProviderDescriptor> {
        self.table(scope).get(name).map(|e| &e.descriptor)
    }

    /// Number of providers in `scope`.
    pub fn len(&self, scope: Scope) -> usize {
        self.table(scope).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player.entries.is_empty() && self.server.entries.is_empty()
    }
}

/// Collects provider registrations; see [`RegistryBuilder::build`].
#[derive(Default)]
pub struct RegistryBuilder {
    pending: Vec<(ProviderDescriptor, Compute)>,
}

impl RegistryBuilder {
    pub fn boolean<F>(mut self, descriptor: ProviderDescriptor, f: F) -> Self
    where
        F: Fn(&EvalContext<'_>) -> ExtensionResult<bool> + Send + Sync + 'static,
    {
        self.pending.push((descriptor, Compute::Boolean(Box::new(f))));
        self
    }

    pub fn string<F>(mut self, descriptor: ProviderDescriptor, f: F) -> Self
    where
        F: Fn(&EvalContext<'_>) -> ExtensionResult<String> + Send + Sync + 'static,
    {
        self.pending.push((descriptor, Compute::String(Box::new(f))));
        self
    }

    pub fn integer<F>(mut self, descriptor: ProviderDescriptor, f: F) -> Self
    where
        F: Fn(&EvalContext<'_>) -> ExtensionResult<i64> + Send + Sync + 'static,
    {
        self.pending.push((descriptor, Compute::Integer(Box::new(f))));
        self
    }

    pub fn percentage<F>(mut self, descriptor: ProviderDescriptor, f: F) -> Self
    where
        F: Fn(&EvalContext<'_>) -> ExtensionResult<f64> + Send + Sync + 'static,
    {
        self.pending.push((descriptor, Compute::Percentage(Box::new(f))));
        self
    }

    /// Registers the display-only notice: a string provider that returns
    /// `text` regardless of service readiness.
    pub fn notice(self, descriptor: ProviderDescriptor, text: impl Into<String>) -> Self {
        let text = text.into();
        self.string(descriptor.readiness_exempt(), move |_| Ok(text.clone()))
    }

    /// Validates the registrations and freezes them into a registry.
    pub fn build(self) -> ExtensionResult<ProviderRegistry> {
        let mut exempt: Option<String> = None;
        let mut player = Vec::new();
        let mut server = Vec::new();

        for (descriptor, compute) in self.pending {
            if descriptor.kind != compute.kind() {
                return Err(ExtensionError::KindMismatch {
                    provider: descriptor.name,
                    declared: descriptor.kind,
                    actual: compute.kind(),
                });
            }
            if descriptor.readiness_exempt {
                if let Some(first) = exempt.take() {
                    return Err(ExtensionError::MultipleNoticeProviders {
                        first,
                        second: descriptor.name,
                    });
                }
                exempt = Some(descriptor.name.clone());
            }
            let entry = Entry {
                descriptor,
                compute,
                is_condition: false,
            };
            match entry.descriptor.scope {
                Scope::Player => player.push(entry),
                Scope::Server => server.push(entry),
            }
        }

        let player_names = names_of(Scope::Player, &player)?;
        let server_names = names_of(Scope::Server, &server)?;
        link_conditions(&mut player, &server_names)?;
        link_conditions(&mut server, &player_names)?;

        let registry = ProviderRegistry {
            player: freeze(player),
            server: freeze(server),
        };
        info!(
            player = registry.len(Scope::Player),
            server = registry.len(Scope::Server),
            "Provider registry built"
        );
        Ok(registry)
    }
}

fn names_of(scope: Scope, entries: &[Entry]) -> ExtensionResult<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in entries {
        if !names.insert(entry.descriptor.name.clone()) {
            return Err(ExtensionError::DuplicateProvider {
                scope,
                name: entry.descriptor.name.clone(),
            });
        }
    }
    Ok(names)
}

/// Checks every condition edge within one scope and marks condition providers.
fn link_conditions(entries: &mut [Entry], other_scope: &HashSet<String>) -> ExtensionResult<()> {
    let kinds: HashMap<&str, ValueKind> = entries
        .iter()
        .map(|e| (e.descriptor.name.as_str(), e.descriptor.kind))
        .collect();
    let edges: HashMap<&str, &str> = entries
        .iter()
        .filter_map(|e| {
            e.descriptor
                .condition
                .as_deref()
                .map(|c| (e.descriptor.name.as_str(), c))
        })
        .collect();

    for (&provider, &condition) in &edges {
        match kinds.get(condition) {
            Some(ValueKind::Boolean) => {}
            Some(_) => {
                return Err(ExtensionError::ConditionNotBoolean {
                    provider: provider.to_string(),
                    condition: condition.to_string(),
                });
            }
            None if other_scope.contains(condition) => {
                return Err(ExtensionError::ConditionScopeMismatch {
                    provider: provider.to_string(),
                    condition: condition.to_string(),
                });
            }
            None => {
                return Err(ExtensionError::UnknownCondition {
                    provider: provider.to_string(),
                    condition: condition.to_string(),
                });
            }
        }
    }

    // Each provider has at most one condition, so a cycle is a chain that
    // revisits a name.
    for &start in edges.keys() {
        let mut seen = HashSet::from([start]);
        let mut current = start;
        while let Some(&next) = edges.get(current) {
            if !seen.insert(next) {
                return Err(ExtensionError::ConditionCycle(next.to_string()));
            }
            current = next;
        }
    }

    let referenced: HashSet<String> = edges.values().map(|c| c.to_string()).collect();
    for entry in entries.iter_mut() {
        entry.is_condition = referenced.contains(&entry.descriptor.name);
    }
    Ok(())
}

/// Sorts by priority, highest first. The sort is stable, so ties keep
/// registration order.
fn freeze(mut entries: Vec<Entry>) -> ScopeTable {
    entries.sort_by_key(|e| Reverse(e.descriptor.priority));
    let index = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.descriptor.name.clone(), i))
        .collect();
    ScopeTable { entries, index }
}
