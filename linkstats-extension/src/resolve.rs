//! Subject resolvers: player → linked account → primary-group membership.
//!
//! "Not linked" and "not a member" are `None`, never errors. The only error
//! these return is the readiness failure. Nothing is cached; each call goes
//! back to the service.

use crate::error::ExtensionResult;
use crate::gate::ReadinessGate;
use crate::service::{AccountHandle, LinkService, MemberHandle};
use linkstats_types::PlayerId;

#[derive(Clone, Copy)]
pub struct SubjectResolver<'a> {
    service: &'a dyn LinkService,
    gate: ReadinessGate<'a>,
}

impl<'a> SubjectResolver<'a> {
    pub fn new(service: &'a dyn LinkService) -> Self {
        Self {
            service,
            gate: ReadinessGate::new(service),
        }
    }

    /// The external account linked to `player`, if any.
    pub fn resolve_account(&self, player: PlayerId) -> ExtensionResult<Option<AccountHandle>> {
        self.gate.ensure_ready()?;
        Ok(self
            .service
            .linked_account_id(player)
            .and_then(|id| self.service.account(id)))
    }

    /// The linked account's membership in the primary group, if any.
    pub fn resolve_membership(&self, player: PlayerId) -> ExtensionResult<Option<MemberHandle>> {
        let Some(account) = self.resolve_account(player)? else {
            return Ok(None);
        };
        Ok(self
            .service
            .primary_group()
            .and_then(|group| group.member(account.id)))
    }

    pub fn linked_account_count(&self) -> ExtensionResult<usize> {
        self.gate.ensure_ready()?;
        Ok(self.service.linked_account_count())
    }

    /// Member count of the primary group; `None` when there is no group.
    pub fn group_member_count(&self) -> ExtensionResult<Option<usize>> {
        self.gate.ensure_ready()?;
        Ok(self.service.primary_group().map(|group| group.member_count()))
    }
}
