//! Interfaces to the collaborators around the framework.
//!
//! The external link service, the host's player directory and the host's
//! invalidation channel are all owned by surrounding code. The framework only
//! sees them through these traits.

use linkstats_types::{AccountId, PlayerId};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// An account on the external service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHandle {
    pub id: AccountId,
    /// Display tag, e.g. `name` or legacy `name#1234`.
    pub tag: String,
    pub created_at_millis: i64,
}

/// An account's membership in the primary group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberHandle {
    pub account: AccountId,
    /// Group-specific nickname, if one is set.
    #[serde(default)]
    pub nickname: Option<String>,
    pub joined_at_millis: i64,
    /// Role names in the service's own order.
    #[serde(default)]
    pub role_names: Vec<String>,
}

/// The primary group configured on the external service.
pub trait Group: Send + Sync {
    fn member(&self, account: AccountId) -> Option<MemberHandle>;

    fn member_count(&self) -> usize;
}

/// The external account-link service.
///
/// All lookups are expected to be in-memory and synchronous. Implementations
/// must tolerate concurrent calls from several query threads.
pub trait LinkService: Send + Sync {
    /// Whether the service is live. Nothing else is meaningful until it is.
    fn is_ready(&self) -> bool;

    fn linked_account_id(&self, player: PlayerId) -> Option<AccountId>;

    /// Reverse lookup through the link table.
    fn linked_player(&self, account: AccountId) -> Option<PlayerId>;

    fn account(&self, id: AccountId) -> Option<AccountHandle>;

    /// `None` when no primary group is configured or it is unreachable.
    fn primary_group(&self) -> Option<&dyn Group>;

    fn linked_account_count(&self) -> usize;
}

/// The host's player-identity layer.
pub trait PlayerNames: Send + Sync {
    fn display_name(&self, player: PlayerId) -> Option<String>;
}

/// The host's invalidation channel.
///
/// Called at most once per normalized event. Implementations must not block.
pub trait Invalidation: Send + Sync {
    fn notify_changed(&self, player: PlayerId, display_name: Option<&str>);
}

/// A "player data changed" notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerChange {
    pub player: PlayerId,
    pub display_name: Option<String>,
}

/// Invalidation sink that forwards to an unbounded channel, so the host can
/// drain notifications on its own task.
#[derive(Debug, Clone)]
pub struct ChannelInvalidation {
    tx: UnboundedSender<PlayerChange>,
}

impl ChannelInvalidation {
    pub fn new() -> (Self, UnboundedReceiver<PlayerChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Invalidation for ChannelInvalidation {
    fn notify_changed(&self, player: PlayerId, display_name: Option<&str>) {
        let change = PlayerChange {
            player,
            display_name: display_name.map(str::to_owned),
        };
        if self.tx.send(change).is_err() {
            debug!(%player, "Invalidation receiver dropped, notification discarded");
        }
    }
}
