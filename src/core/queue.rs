//! Named queue store.
//!
//! Maps queue names to [`Rendezvous`] points. Queues are created on the
//! first insert and never removed, so the registry grows with every distinct
//! name for the lifetime of the process. Integrators exposing the service to
//! untrusted callers should plan capacity around that.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, RwLock};
use tokio::time::Instant;

use super::message::{Message, WaitBudget};
use super::rendezvous::Rendezvous;

/// Upper bound on any single wait; larger budgets are clamped to it.
const MAX_WAIT: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Concurrent registry of named rendezvous queues.
#[derive(Debug, Default)]
pub struct QueueStore {
    queues: RwLock<HashMap<String, Arc<Rendezvous>>>,
    /// Signalled whenever a new name is registered.
    created: Notify,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a queue exists for `name`, creating it if needed.
    ///
    /// An existing queue is returned untouched, pending hand-offs included.
    pub async fn ensure_queue(&self, name: &str) -> Arc<Rendezvous> {
        if let Some(queue) = self.queues.read().await.get(name) {
            return queue.clone();
        }

        let mut queues = self.queues.write().await;
        let (queue, created) = match queues.entry(name.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => (entry.insert(Arc::new(Rendezvous::new(name))).clone(), true),
        };
        let total = queues.len();
        drop(queues);

        if created {
            tracing::debug!(queue = %name, total, "Created queue");
            self.created.notify_waiters();
        }
        queue
    }

    /// Accept a message for delivery on `name`.
    ///
    /// Returns once the queue exists. The hand-off itself runs on a detached
    /// task that nobody awaits; it completes when a consumer claims the
    /// message, or never.
    pub async fn enqueue(&self, name: &str, message: Message) {
        let queue = self.ensure_queue(name).await;
        tracing::trace!(queue = %name, bytes = message.as_str().len(), "Scheduling hand-off");

        tokio::spawn(async move {
            if queue.offer(message).await {
                tracing::trace!(queue = %queue.name(), "Producer released");
            }
        });
    }

    /// Retrieve one message from `name` within the wait budget.
    ///
    /// Names that were never inserted into behave exactly like queues with
    /// nothing pending: `None` immediately, or `None` once the budget runs out.
    pub async fn dequeue(&self, name: &str, budget: WaitBudget) -> Option<Message> {
        let deadline = match budget {
            WaitBudget::Immediate => return self.get(name).await?.try_take(),
            WaitBudget::Bounded(wait) => Instant::now() + wait.min(MAX_WAIT),
        };

        let queue = match tokio::time::timeout_at(deadline, self.wait_for_queue(name)).await {
            Ok(queue) => queue,
            Err(_) => {
                tracing::debug!(queue = %name, "Wait budget elapsed before queue existed");
                return None;
            }
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        let message = queue.take(WaitBudget::from(remaining)).await;
        if message.is_none() {
            tracing::debug!(queue = %name, "Wait budget elapsed with no hand-off");
        }
        message
    }

    /// Look up a queue without creating it.
    pub async fn get(&self, name: &str) -> Option<Arc<Rendezvous>> {
        self.queues.read().await.get(name).cloned()
    }

    pub async fn contains(&self, name: &str) -> bool {
        self.queues.read().await.contains_key(name)
    }

    /// Number of distinct names ever inserted into.
    pub async fn queue_count(&self) -> usize {
        self.queues.read().await.len()
    }

    async fn wait_for_queue(&self, name: &str) -> Arc<Rendezvous> {
        loop {
            let created = self.created.notified();
            tokio::pin!(created);
            // Register before looking so a creation in between is not missed.
            created.as_mut().enable();

            if let Some(queue) = self.get(name).await {
                return queue;
            }
            created.await;
        }
    }
}
