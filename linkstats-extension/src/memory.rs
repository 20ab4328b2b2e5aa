//! In-memory link service.
//!
//! Backs the CLI's fixture files and the test suites. Readiness can be flipped
//! at runtime; everything else is fixed once built.

use crate::service::{AccountHandle, Group, LinkService, MemberHandle, PlayerNames};
use linkstats_types::{AccountId, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// A primary group held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroup {
    members: HashMap<AccountId, MemberHandle>,
}

impl InMemoryGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_member(&mut self, member: MemberHandle) {
        self.members.insert(member.account, member);
    }
}

impl Group for InMemoryGroup {
    fn member(&self, account: AccountId) -> Option<MemberHandle> {
        self.members.get(&account).cloned()
    }

    fn member_count(&self) -> usize {
        self.members.len()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLinkService {
    ready: AtomicBool,
    links: HashMap<PlayerId, AccountId>,
    reverse: HashMap<AccountId, PlayerId>,
    names: HashMap<PlayerId, String>,
    accounts: HashMap<AccountId, AccountHandle>,
    group: Option<InMemoryGroup>,
}

impl InMemoryLinkService {
    /// Creates a ready service with no links and no primary group.
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(true),
            ..Self::default()
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Registers a player name without linking an account.
    pub fn add_player(&mut self, player: PlayerId, name: impl Into<String>) {
        self.names.insert(player, name.into());
    }

    pub fn add_account(&mut self, account: AccountHandle) {
        self.accounts.insert(account.id, account);
    }

    /// Links `player` to `account`, replacing any previous link of either side.
    pub fn link(&mut self, player: PlayerId, account: AccountId) {
        if let Some(old) = self.links.insert(player, account) {
            self.reverse.remove(&old);
        }
        if let Some(old) = self.reverse.insert(account, player) {
            if old != player {
                self.links.remove(&old);
            }
        }
    }

    pub fn unlink(&mut self, player: PlayerId) {
        if let Some(account) = self.links.remove(&player) {
            self.reverse.remove(&account);
        }
    }

    /// Configures the primary group, replacing any existing one.
    pub fn set_group(&mut self, group: InMemoryGroup) {
        self.group = Some(group);
    }

    /// Adds a member to the primary group, creating the group if needed.
    pub fn add_member(&mut self, member: MemberHandle) {
        self.group.get_or_insert_with(InMemoryGroup::new).add_member(member);
    }
}

impl LinkService for InMemoryLinkService {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn linked_account_id(&self, player: PlayerId) -> Option<AccountId> {
        self.links.get(&player).copied()
    }

    fn linked_player(&self, account: AccountId) -> Option<PlayerId> {
        self.reverse.get(&account).copied()
    }

    fn account(&self, id: AccountId) -> Option<AccountHandle> {
        self.accounts.get(&id).cloned()
    }

    fn primary_group(&self) -> Option<&dyn Group> {
        self.group.as_ref().map(|g| g as &dyn Group)
    }

    fn linked_account_count(&self) -> usize {
        self.links.len()
    }
}

impl PlayerNames for InMemoryLinkService {
    fn display_name(&self, player: PlayerId) -> Option<String> {
        self.names.get(&player).cloned()
    }
}

/// Serialized form of an [`InMemoryLinkService`].
///
/// ```toml
/// ready = true
///
/// [[players]]
/// id = "069a79f4-44e9-4726-a5be-fca90e38aaf5"
/// name = "Bob"
/// account = 80351110224678912
///
/// [[accounts]]
/// id = 80351110224678912
/// tag = "bob"
/// created_at_millis = 1451606400000
///
/// [group]
/// [[group.members]]
/// account = 80351110224678912
/// nickname = "Bobby"
/// joined_at_millis = 1483228800000
/// role_names = ["Admin", "Builder"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkFixture {
    #[serde(default = "default_ready")]
    pub ready: bool,
    #[serde(default)]
    pub players: Vec<FixturePlayer>,
    #[serde(default)]
    pub accounts: Vec<AccountHandle>,
    #[serde(default)]
    pub group: Option<FixtureGroup>,
}

fn default_ready() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturePlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub account: Option<AccountId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureGroup {
    #[serde(default)]
    pub members: Vec<MemberHandle>,
}

impl LinkFixture {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn into_service(self) -> InMemoryLinkService {
        let mut service = InMemoryLinkService::new();
        service.set_ready(self.ready);
        for account in self.accounts {
            service.add_account(account);
        }
        for player in self.players {
            service.add_player(player.id, player.name);
            if let Some(account) = player.account {
                service.link(player.id, account);
            }
        }
        if let Some(group) = self.group {
            let mut primary = InMemoryGroup::new();
            for member in group.members {
                primary.add_member(member);
            }
            service.set_group(primary);
        }
        service
    }
}
