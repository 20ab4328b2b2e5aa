//! Lifecycle events delivered by the external account-link service.
//!
//! The service emits many near-identical notifications (role changes, name
//! changes, guild joins...). They are modelled as one tagged union so the
//! normalizer can reduce them with a single match instead of one handler per
//! event class.
//!
//! Link and unlink events already carry the player. Every other event carries
//! the external account it concerns, which has to be mapped back to a player
//! through the link table before anything can be invalidated.

use crate::{AccountId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of an [`ExternalEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    AccountLinked,
    AccountUnlinked,
    RoleAdded,
    RoleRemoved,
    NicknameChanged,
    NameChanged,
    DiscriminatorChanged,
    MemberJoined,
    MemberLeft,
}

impl EventKind {
    /// All event kinds, link events first.
    pub const ALL: [EventKind; 9] = [
        EventKind::AccountLinked,
        EventKind::AccountUnlinked,
        EventKind::RoleAdded,
        EventKind::RoleRemoved,
        EventKind::NicknameChanged,
        EventKind::NameChanged,
        EventKind::DiscriminatorChanged,
        EventKind::MemberJoined,
        EventKind::MemberLeft,
    ];

    /// Whether events of this kind carry the player directly.
    #[must_use]
    pub const fn carries_player(&self) -> bool {
        matches!(self, EventKind::AccountLinked | EventKind::AccountUnlinked)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EventKind::AccountLinked => "account_linked",
            EventKind::AccountUnlinked => "account_unlinked",
            EventKind::RoleAdded => "role_added",
            EventKind::RoleRemoved => "role_removed",
            EventKind::NicknameChanged => "nickname_changed",
            EventKind::NameChanged => "name_changed",
            EventKind::DiscriminatorChanged => "discriminator_changed",
            EventKind::MemberJoined => "member_joined",
            EventKind::MemberLeft => "member_left",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event emitted by the external account-link service.
///
/// `account` is `None` when the service delivered the event without a user
/// attached; such events cannot be attributed and are dropped downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ExternalEvent {
    /// A player linked their external account.
    AccountLinked {
        player: PlayerId,
        #[serde(default)]
        display_name: Option<String>,
    },

    /// A player removed their account link.
    AccountUnlinked {
        player: PlayerId,
        #[serde(default)]
        display_name: Option<String>,
    },

    RoleAdded {
        #[serde(default)]
        account: Option<AccountId>,
    },

    RoleRemoved {
        #[serde(default)]
        account: Option<AccountId>,
    },

    NicknameChanged {
        #[serde(default)]
        account: Option<AccountId>,
    },

    NameChanged {
        #[serde(default)]
        account: Option<AccountId>,
    },

    DiscriminatorChanged {
        #[serde(default)]
        account: Option<AccountId>,
    },

    /// The account joined the primary group.
    MemberJoined {
        #[serde(default)]
        account: Option<AccountId>,
    },

    /// The account left (or was removed from) the primary group.
    MemberLeft {
        #[serde(default)]
        account: Option<AccountId>,
    },
}

/// What an event identifies, before any lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource<'a> {
    /// The event names the player directly.
    Player {
        player: PlayerId,
        display_name: Option<&'a str>,
    },
    /// The event names an external account, possibly none.
    Account(Option<AccountId>),
}

impl ExternalEvent {
    /// Creates an account-linked event.
    #[must_use]
    pub fn linked(player: PlayerId, display_name: impl Into<String>) -> Self {
        Self::AccountLinked {
            player,
            display_name: Some(display_name.into()),
        }
    }

    /// Creates an account-unlinked event.
    #[must_use]
    pub fn unlinked(player: PlayerId, display_name: impl Into<String>) -> Self {
        Self::AccountUnlinked {
            player,
            display_name: Some(display_name.into()),
        }
    }

    /// Creates an account-scoped event of the given kind.
    ///
    /// Returns `None` for link/unlink kinds, which need a player instead.
    #[must_use]
    pub fn for_account(kind: EventKind, account: AccountId) -> Option<Self> {
        let account = Some(account);
        let event = match kind {
            EventKind::AccountLinked | EventKind::AccountUnlinked => return None,
            EventKind::RoleAdded => Self::RoleAdded { account },
            EventKind::RoleRemoved => Self::RoleRemoved { account },
            EventKind::NicknameChanged => Self::NicknameChanged { account },
            EventKind::NameChanged => Self::NameChanged { account },
            EventKind::DiscriminatorChanged => Self::DiscriminatorChanged { account },
            EventKind::MemberJoined => Self::MemberJoined { account },
            EventKind::MemberLeft => Self::MemberLeft { account },
        };
        Some(event)
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::AccountLinked { .. } => EventKind::AccountLinked,
            Self::AccountUnlinked { .. } => EventKind::AccountUnlinked,
            Self::RoleAdded { .. } => EventKind::RoleAdded,
            Self::RoleRemoved { .. } => EventKind::RoleRemoved,
            Self::NicknameChanged { .. } => EventKind::NicknameChanged,
            Self::NameChanged { .. } => EventKind::NameChanged,
            Self::DiscriminatorChanged { .. } => EventKind::DiscriminatorChanged,
            Self::MemberJoined { .. } => EventKind::MemberJoined,
            Self::MemberLeft { .. } => EventKind::MemberLeft,
        }
    }

    /// Returns the identity this event carries.
    #[must_use]
    pub fn source(&self) -> EventSource<'_> {
        match self {
            Self::AccountLinked {
                player,
                display_name,
            }
            | Self::AccountUnlinked {
                player,
                display_name,
            } => EventSource::Player {
                player: *player,
                display_name: display_name.as_deref(),
            },
            Self::RoleAdded { account }
            | Self::RoleRemoved { account }
            | Self::NicknameChanged { account }
            | Self::NameChanged { account }
            | Self::DiscriminatorChanged { account }
            | Self::MemberJoined { account }
            | Self::MemberLeft { account } => EventSource::Account(*account),
        }
    }

    /// Parses a JSON array of events, as written by the host's event log.
    pub fn parse_batch(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}
