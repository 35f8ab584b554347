//! Zero-capacity hand-off between producers and consumers.
//!
//! A `Rendezvous` never holds a message on its own behalf. Each pending
//! message belongs to a producer that is suspended in [`Rendezvous::offer`]
//! until some consumer claims it. Consumers either claim a pending offer
//! right away or park on a [`Notify`] until one shows up.
//!
//! Offers are claimed in no guaranteed order. Producers are usually
//! detached tasks whose scheduling order is itself arbitrary, so two
//! inserts to the same queue may be delivered in either order.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::{oneshot, Notify};

use super::message::{Message, WaitBudget};

/// A message waiting for a consumer, plus the signal that releases its producer.
struct Offer {
    message: Message,
    claimed: oneshot::Sender<()>,
}

/// Per-queue rendezvous point. Safe for many producers and many consumers.
pub struct Rendezvous {
    name: String,
    offers: Mutex<VecDeque<Offer>>,
    ready: Notify,
}

impl Rendezvous {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offers: Mutex::new(VecDeque::new()),
            ready: Notify::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of producers currently suspended waiting for a consumer.
    pub fn pending(&self) -> usize {
        self.offers().len()
    }

    /// Offer a message and suspend until a consumer claims it.
    ///
    /// There is no timeout: a producer with no consumer waits forever.
    /// Returns `false` only if the offer was discarded without being claimed.
    pub async fn offer(&self, message: Message) -> bool {
        let (claimed, released) = oneshot::channel();
        self.offers().push_back(Offer { message, claimed });
        self.ready.notify_one();
        tracing::trace!(queue = %self.name, "Producer waiting for consumer");

        released.await.is_ok()
    }

    /// Claim a pending offer without suspending.
    pub fn try_take(&self) -> Option<Message> {
        let offer = self.offers().pop_front()?;
        // The producer may already be gone; the message is delivered regardless.
        let _ = offer.claimed.send(());
        tracing::trace!(queue = %self.name, "Hand-off completed");
        Some(offer.message)
    }

    /// Claim an offer within the wait budget.
    ///
    /// An immediate budget makes exactly one non-blocking attempt. A bounded
    /// budget resolves to whichever comes first: an offer, or the deadline.
    pub async fn take(&self, budget: WaitBudget) -> Option<Message> {
        match budget {
            WaitBudget::Immediate => self.try_take(),
            WaitBudget::Bounded(wait) => tokio::time::timeout(wait, self.claim()).await.ok(),
        }
    }

    async fn claim(&self) -> Message {
        let notified = self.ready.notified();
        tokio::pin!(notified);

        loop {
            // Register as a waiter before looking, so every `notify_one` from
            // an offer pushed after the check reaches a parked consumer.
            notified.as_mut().enable();

            if let Some(message) = self.try_take() {
                return message;
            }
            // Woken either by a new offer or by one someone else already
            // claimed; both cases just retry.
            notified.as_mut().await;
            notified.set(self.ready.notified());
        }
    }

    fn offers(&self) -> MutexGuard<'_, VecDeque<Offer>> {
        self.offers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Rendezvous {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rendezvous")
            .field("name", &self.name)
            .field("pending", &self.pending())
            .finish()
    }
}
