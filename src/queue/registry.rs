use std::sync::Arc;

use dashmap::DashMap;

use super::rendezvous::RendezvousQueue;

/// Process-wide map from queue name to its rendezvous queue.
///
/// Queues are created lazily by [`QueueRegistry::get_or_create`] and live
/// as long as the registry does.
#[derive(Default)]
pub struct QueueRegistry {
    queues: DashMap<String, Arc<RendezvousQueue>>,
}

impl QueueRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the queue for `name`, creating it on first reference.
    ///
    /// The shard lock is held for the check-and-insert only, so concurrent
    /// first references all get the same instance and nobody blocks on a
    /// hand-off while holding it.
    pub fn get_or_create(&self, name: &str) -> Arc<RendezvousQueue> {
        if let Some(queue) = self.queues.get(name) {
            return queue.clone();
        }

        self.queues
            .entry(name.to_string())
            .or_insert_with(|| {
                tracing::debug!(queue = %name, "creating queue");
                Arc::new(RendezvousQueue::new(name.to_string()))
            })
            .clone()
    }

    /// Return the queue for `name` if a producer has ever referenced it.
    pub fn lookup(&self, name: &str) -> Option<Arc<RendezvousQueue>> {
        self.queues.get(name).map(|queue| queue.clone())
    }

    pub fn queue_count(&self) -> usize {
        self.queues.len()
    }

    pub fn list_queues(&self) -> Vec<String> {
        self.queues.iter().map(|entry| entry.key().clone()).collect()
    }
}
