//! Shared fixtures for extension tests.

#![allow(dead_code)]

use linkstats_extension::{
    AccountHandle, ExtensionConfig, InMemoryLinkService, MemberHandle, ProviderRegistry,
    account_link_registry,
};
use linkstats_types::{AccountId, PlayerId};

pub const BOB_ACCOUNT: AccountId = AccountId::new(1001);
pub const ALICE_ACCOUNT: AccountId = AccountId::new(1002);
pub const STRANGER_ACCOUNT: AccountId = AccountId::new(1003);

/// Players of [`sample_service`].
pub struct Players {
    /// Linked and a member of the primary group, two roles.
    pub bob: PlayerId,
    /// Linked, not a member.
    pub alice: PlayerId,
    /// Never linked.
    pub carol: PlayerId,
}

pub fn account(id: AccountId, tag: &str, created_at_millis: i64) -> AccountHandle {
    AccountHandle {
        id,
        tag: tag.to_string(),
        created_at_millis,
    }
}

pub fn member(account: AccountId, nickname: Option<&str>, roles: &[&str]) -> MemberHandle {
    MemberHandle {
        account,
        nickname: nickname.map(str::to_string),
        joined_at_millis: 1_483_228_800_000,
        role_names: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// Bob (member), Alice (linked only), Carol (unlinked), plus an unlinked
/// stranger in the group. Two linked accounts, two group members.
pub fn sample_service() -> (InMemoryLinkService, Players) {
    let players = Players {
        bob: PlayerId::new(),
        alice: PlayerId::new(),
        carol: PlayerId::new(),
    };

    let mut service = InMemoryLinkService::new();
    service.add_player(players.bob, "Bob");
    service.add_player(players.alice, "Alice");
    service.add_player(players.carol, "Carol");

    service.add_account(account(BOB_ACCOUNT, "bob", 1_451_606_400_000));
    service.add_account(account(ALICE_ACCOUNT, "alice#0420", 1_420_070_400_000));
    service.add_account(account(STRANGER_ACCOUNT, "stranger", 1_400_000_000_000));
    service.link(players.bob, BOB_ACCOUNT);
    service.link(players.alice, ALICE_ACCOUNT);

    service.add_member(member(BOB_ACCOUNT, Some("Bobby"), &["Admin", "Builder"]));
    service.add_member(member(STRANGER_ACCOUNT, None, &[]));

    (service, players)
}

pub fn registry() -> ProviderRegistry {
    account_link_registry(&ExtensionConfig::default()).unwrap()
}
