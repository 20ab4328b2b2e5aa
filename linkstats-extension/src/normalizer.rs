//! Reduces external lifecycle events to "player data changed" notifications.
//!
//! Stateless: every event is resolved to a player on its own and forwarded to
//! the host's invalidation sink. Nothing is deduplicated, and nothing here is
//! shared with the query path.

use crate::service::{Invalidation, LinkService, PlayerNames};
use linkstats_types::{EventSource, ExternalEvent, PlayerId};
use std::sync::Arc;
use tracing::{debug, trace};

pub struct EventNormalizer {
    service: Arc<dyn LinkService>,
    names: Arc<dyn PlayerNames>,
    sink: Arc<dyn Invalidation>,
}

impl EventNormalizer {
    pub fn new(
        service: Arc<dyn LinkService>,
        names: Arc<dyn PlayerNames>,
        sink: Arc<dyn Invalidation>,
    ) -> Self {
        Self {
            service,
            names,
            sink,
        }
    }

    /// Handles one event. Returns the player that was notified, or `None` when
    /// the event could not be attributed to a linked player and was dropped.
    pub fn handle(&self, event: &ExternalEvent) -> Option<PlayerId> {
        let kind = event.kind();
        let (player, display_name) = match event.source() {
            EventSource::Player {
                player,
                display_name,
            } => {
                let name = match display_name {
                    Some(name) => Some(name.to_owned()),
                    None => self.names.display_name(player),
                };
                (player, name)
            }
            EventSource::Account(None) => {
                trace!(%kind, "Event without an account, dropped");
                return None;
            }
            EventSource::Account(Some(account)) => {
                let Some(player) = self.service.linked_player(account) else {
                    debug!(%kind, %account, "Event for unlinked account, dropped");
                    return None;
                };
                (player, self.names.display_name(player))
            }
        };

        trace!(%kind, %player, "Forwarding player change");
        self.sink.notify_changed(player, display_name.as_deref());
        Some(player)
    }

    /// Handles a batch in delivery order; returns how many notifications went out.
    pub fn handle_all<'e>(&self, events: impl IntoIterator<Item = &'e ExternalEvent>) -> usize {
        events
            .into_iter()
            .filter_map(|event| self.handle(event))
            .count()
    }
}
