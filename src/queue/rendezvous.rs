use std::time::Duration;

use crossbeam::queue::SegQueue;
use thiserror::Error;
use tokio::sync::{oneshot, Notify};

use super::message::Message;

/// Why a [`RendezvousQueue::receive`] came back without a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecvError {
    /// Poll found nothing to claim.
    #[error("no value is ready to be handed off")]
    WouldBlock,
    /// The receive timeout elapsed before a producer arrived.
    #[error("timed out waiting for a value")]
    TimedOut,
}

/// Final state of an offered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// A receiver claimed the value.
    Delivered,
    /// The pending-send lifetime ran out and the value was withdrawn.
    Expired,
    /// The queue itself was dropped before anyone claimed the value.
    Abandoned,
}

/// An offered value waiting for its receiver.
struct Offer {
    message: Message,
    claim: oneshot::Sender<()>,
}

/// Zero-capacity hand-off point for a single queue name.
///
/// Producers never buffer into the queue: every offer stays owned by its
/// [`PendingSend`] until a receiver claims it, and the claim succeeds only
/// while that handle is still waiting. A claimed value is removed from the
/// queue under the same pop, so it can reach one receiver at most.
pub struct RendezvousQueue {
    name: String,
    offers: SegQueue<Offer>,
    notify: Notify,
}

impl RendezvousQueue {
    pub fn new(name: String) -> Self {
        Self {
            name,
            offers: SegQueue::new(),
            notify: Notify::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of offers nobody has claimed or discarded yet.
    pub fn pending_offers(&self) -> usize {
        self.offers.len()
    }

    /// Place `payload` into the queue and return the handle that waits for
    /// its hand-off. The value is claimable as soon as this returns.
    pub fn offer(&self, payload: String) -> PendingSend {
        let (claim, claimed) = oneshot::channel();
        self.offers.push(Offer {
            message: Message::new(payload),
            claim,
        });
        // notify_one keeps a permit when nobody is waiting yet
        self.notify.notify_one();

        PendingSend {
            queue: self.name.clone(),
            claimed,
        }
    }

    /// Offer `payload` and wait, without bound, until a receiver claims it.
    pub async fn send(&self, payload: String) -> SendOutcome {
        self.offer(payload).delivered(None).await
    }

    /// Claim the next offered value.
    ///
    /// Without a timeout this is a poll: it never waits and returns
    /// [`RecvError::WouldBlock`] when no producer is pending. With a timeout
    /// it waits until a value is claimed or the timeout elapses.
    pub async fn receive(&self, timeout: Option<Duration>) -> Result<Message, RecvError> {
        if let Some(message) = self.try_claim() {
            return Ok(message);
        }

        let timeout = match timeout {
            Some(timeout) => timeout,
            None => return Err(RecvError::WouldBlock),
        };

        if timeout.is_zero() {
            return Err(RecvError::TimedOut);
        }

        let waited = tokio::time::timeout(timeout, async {
            loop {
                self.notify.notified().await;

                if let Some(message) = self.try_claim() {
                    // Permits coalesce, so pass one on if offers are left.
                    if !self.offers.is_empty() {
                        self.notify.notify_one();
                    }
                    return message;
                }
                // Another receiver won the race; wait for the next offer.
            }
        })
        .await;

        match waited {
            Ok(message) => Ok(message),
            // An offer may have landed right as the timer fired.
            Err(_) => self.try_claim().ok_or(RecvError::TimedOut),
        }
    }

    fn try_claim(&self) -> Option<Message> {
        while let Some(Offer { message, claim }) = self.offers.pop() {
            if claim.send(()).is_ok() {
                tracing::debug!(
                    queue = %self.name,
                    waited_us = message.age_micros(),
                    "hand-off completed"
                );
                return Some(message);
            }
            tracing::trace!(queue = %self.name, "discarding withdrawn offer");
        }
        None
    }
}

/// Handle for one offered value. Dropping it withdraws the value.
#[must_use = "dropping a PendingSend withdraws its value"]
pub struct PendingSend {
    queue: String,
    claimed: oneshot::Receiver<()>,
}

impl PendingSend {
    /// Wait for a receiver to claim the value.
    ///
    /// `ttl` bounds how long the value stays claimable; `None` waits for
    /// the life of the process. A claim that races with expiry wins.
    pub async fn delivered(mut self, ttl: Option<Duration>) -> SendOutcome {
        let outcome = match ttl {
            None => match (&mut self.claimed).await {
                Ok(()) => SendOutcome::Delivered,
                Err(_) => SendOutcome::Abandoned,
            },
            Some(ttl) => match tokio::time::timeout(ttl, &mut self.claimed).await {
                Ok(Ok(())) => SendOutcome::Delivered,
                Ok(Err(_)) => SendOutcome::Abandoned,
                Err(_) => {
                    // Closing first makes any later claim attempt fail.
                    self.claimed.close();
                    match self.claimed.try_recv() {
                        Ok(()) => SendOutcome::Delivered,
                        Err(_) => SendOutcome::Expired,
                    }
                }
            },
        };

        tracing::debug!(queue = %self.queue, ?outcome, "pending send finished");
        outcome
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }
}
