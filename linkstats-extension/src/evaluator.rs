//! Conditional evaluation of a registry against the live service.
//!
//! A player evaluation checks the readiness gate before any provider runs and
//! fails as a whole when the service is down. A server evaluation never fails
//! on readiness: providers that cannot be computed are listed in
//! [`EvaluationResult::unavailable`] and the readiness-exempt notice is still
//! returned.
//!
//! Within one call each condition provider is computed at most once. A
//! condition that fails on readiness counts as false, which hides every
//! provider depending on it.

use crate::config::ExtensionConfig;
use crate::error::{ExtensionError, ExtensionResult};
use crate::gate::ReadinessGate;
use crate::registry::{Entry, ProviderRegistry, ScopeTable};
use crate::resolve::SubjectResolver;
use crate::service::LinkService;
use linkstats_model::{DataPoint, EvaluationResult, Scope, Trigger, Value};
use linkstats_types::PlayerId;
use std::collections::HashMap;
use tracing::debug;

/// What an evaluation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Player(PlayerId),
    Server,
}

impl Target {
    pub const fn scope(&self) -> Scope {
        match self {
            Target::Player(_) => Scope::Player,
            Target::Server => Scope::Server,
        }
    }

    pub const fn player(&self) -> Option<PlayerId> {
        match self {
            Target::Player(player) => Some(*player),
            Target::Server => None,
        }
    }
}

/// Handed to every compute function.
pub struct EvalContext<'a> {
    service: &'a dyn LinkService,
    target: Target,
    provider: &'a str,
}

impl<'a> EvalContext<'a> {
    pub fn resolver(&self) -> SubjectResolver<'a> {
        SubjectResolver::new(self.service)
    }

    /// The player subject; fails when computed for the server.
    pub fn player(&self) -> ExtensionResult<PlayerId> {
        self.target
            .player()
            .ok_or_else(|| ExtensionError::MissingSubject(self.provider.to_string()))
    }
}

impl ProviderRegistry {
    /// Evaluates every provider of the target's scope.
    pub fn evaluate(
        &self,
        service: &dyn LinkService,
        target: Target,
    ) -> ExtensionResult<EvaluationResult> {
        if let Target::Player(player) = target {
            if !ReadinessGate::new(service).is_ready() {
                debug!(%player, "Player evaluation aborted, service not ready");
                return Err(ExtensionError::ServiceNotReady);
            }
        }

        let mut evaluation = Evaluation {
            table: self.table(target.scope()),
            service,
            target,
            conditions: HashMap::new(),
        };
        evaluation.run()
    }

    pub fn evaluate_player(
        &self,
        service: &dyn LinkService,
        player: PlayerId,
    ) -> ExtensionResult<EvaluationResult> {
        self.evaluate(service, Target::Player(player))
    }

    pub fn evaluate_server(&self, service: &dyn LinkService) -> ExtensionResult<EvaluationResult> {
        self.evaluate(service, Target::Server)
    }

    /// Evaluates the scope the host requests on `trigger`.
    ///
    /// Returns `Ok(None)` when the trigger is switched off in `config`.
    /// Player triggers need a `player`.
    pub fn evaluate_trigger(
        &self,
        service: &dyn LinkService,
        config: &ExtensionConfig,
        trigger: Trigger,
        player: Option<PlayerId>,
    ) -> ExtensionResult<Option<EvaluationResult>> {
        let Some(scope) = config.scope_for(trigger) else {
            debug!(?trigger, "Trigger disabled, skipping evaluation");
            return Ok(None);
        };
        let target = match (scope, player) {
            (Scope::Server, _) => Target::Server,
            (Scope::Player, Some(player)) => Target::Player(player),
            (Scope::Player, None) => return Err(ExtensionError::TriggerNeedsPlayer(trigger)),
        };
        self.evaluate(service, target).map(Some)
    }

    /// Computes a single provider, ignoring its condition.
    ///
    /// The readiness gate applies unless the provider is the exempt notice.
    pub fn invoke(
        &self,
        service: &dyn LinkService,
        target: Target,
        name: &str,
    ) -> ExtensionResult<Value> {
        let scope = target.scope();
        let entry = self
            .table(scope)
            .get(name)
            .ok_or_else(|| ExtensionError::UnknownProvider {
                scope,
                name: name.to_string(),
            })?;
        materialize(entry, service, target)
    }
}

fn materialize(entry: &Entry, service: &dyn LinkService, target: Target) -> ExtensionResult<Value> {
    if !entry.descriptor.readiness_exempt {
        ReadinessGate::new(service).ensure_ready()?;
    }
    let ctx = EvalContext {
        service,
        target,
        provider: &entry.descriptor.name,
    };
    entry.compute.run(&ctx)
}

/// State of one `evaluate` call.
struct Evaluation<'a> {
    table: &'a ScopeTable,
    service: &'a dyn LinkService,
    target: Target,
    /// Condition values; `None` when the condition failed on readiness.
    conditions: HashMap<&'a str, Option<bool>>,
}

impl<'a> Evaluation<'a> {
    fn run(&mut self) -> ExtensionResult<EvaluationResult> {
        let scope = self.target.scope();
        let mut result = EvaluationResult::new(scope);
        let table = self.table;

        for entry in &table.entries {
            if !self.offered(entry)? {
                continue;
            }
            let value = if entry.is_condition {
                self.condition_value(entry)
            } else {
                materialize(entry, self.service, self.target)
            };
            match value {
                Ok(value) => result.points.push(DataPoint::new(&entry.descriptor, value)),
                Err(ExtensionError::ServiceNotReady) if scope == Scope::Server => {
                    debug!(provider = %entry.descriptor.name, "Server provider unavailable");
                    result.unavailable.push(entry.descriptor.name.clone());
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            scope = %scope,
            points = result.points.len(),
            unavailable = result.unavailable.len(),
            "Evaluation finished"
        );
        Ok(result)
    }

    /// Whether the provider's condition chain holds.
    fn offered(&mut self, entry: &'a Entry) -> ExtensionResult<bool> {
        match entry.descriptor.condition.as_deref() {
            None => Ok(true),
            Some(condition) => self.condition_holds(condition),
        }
    }

    fn condition_holds(&mut self, name: &'a str) -> ExtensionResult<bool> {
        Ok(self.condition_state(name)?.unwrap_or(false))
    }

    fn condition_state(&mut self, name: &'a str) -> ExtensionResult<Option<bool>> {
        if let Some(&state) = self.conditions.get(name) {
            return Ok(state);
        }
        // Registry validation guarantees the condition exists in this scope.
        let table = self.table;
        let Some(entry) = table.get(name) else {
            return Ok(Some(false));
        };
        let state = if self.offered(entry)? {
            match materialize(entry, self.service, self.target) {
                Ok(value) => Some(value.as_bool().unwrap_or(false)),
                Err(ExtensionError::ServiceNotReady) => {
                    debug!(condition = name, "Condition failed on readiness, treated as false");
                    None
                }
                Err(err) => return Err(err),
            }
        } else {
            Some(false)
        };
        self.conditions.insert(name, state);
        Ok(state)
    }

    fn condition_value(&mut self, entry: &'a Entry) -> ExtensionResult<Value> {
        match self.condition_state(entry.descriptor.name.as_str())? {
            Some(held) => Ok(Value::Boolean(held)),
            None => Err(ExtensionError::ServiceNotReady),
        }
    }
}
