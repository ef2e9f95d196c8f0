//! Cross-thread delivery of staged configuration.
//!
//! A [`ConfigSender`] may live on any thread. The engine drains its
//! [`ConfigMailbox`] with non-blocking pops at the top of each sample and
//! merges what it finds into its own pending update.

use std::sync::Arc;

use pointeraccel_atomic::{EngineCounters, Mailbox};

use crate::pending::PendingUpdate;

/// Producer half of the configuration channel.
#[derive(Debug, Clone)]
pub struct ConfigSender {
    mailbox: Arc<Mailbox<PendingUpdate>>,
    counters: Arc<EngineCounters>,
}

impl ConfigSender {
    /// Queue `update` without blocking.
    ///
    /// # Errors
    ///
    /// Returns the update if the mailbox is full; the drop is counted.
    pub fn send(&self, update: PendingUpdate) -> Result<(), PendingUpdate> {
        self.mailbox.post(update).inspect_err(|_| {
            self.counters.inc_mailbox_drop();
        })
    }

    /// Number of updates waiting to be drained.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.mailbox.len()
    }
}

/// Consumer half of the configuration channel, owned by the engine.
#[derive(Debug)]
pub struct ConfigMailbox {
    mailbox: Arc<Mailbox<PendingUpdate>>,
}

impl ConfigMailbox {
    /// Merge every queued update into `pending`, oldest first.
    ///
    /// # RT Safety
    ///
    /// At most `capacity` non-blocking pops.
    #[inline]
    pub fn drain_into(&self, pending: &mut PendingUpdate) -> usize {
        self.mailbox.drain(|update| pending.merge(update))
    }
}

/// Create a connected sender/mailbox pair holding up to `capacity` updates.
#[must_use]
pub fn config_channel(
    capacity: usize,
    counters: Arc<EngineCounters>,
) -> (ConfigSender, ConfigMailbox) {
    let mailbox = Arc::new(Mailbox::with_capacity(capacity));
    (
        ConfigSender {
            mailbox: Arc::clone(&mailbox),
            counters,
        },
        ConfigMailbox { mailbox },
    )
}
