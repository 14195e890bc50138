use std::time::{SystemTime, UNIX_EPOCH};

/// A value travelling through a rendezvous queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub payload: String,
    /// Microseconds since the Unix epoch at the moment the producer offered it.
    pub offered_at: u64,
}

impl Message {
    pub fn new(payload: String) -> Self {
        Self {
            payload,
            offered_at: now_micros(),
        }
    }

    /// Microseconds elapsed since the message was offered.
    pub fn age_micros(&self) -> u64 {
        now_micros().saturating_sub(self.offered_at)
    }
}

fn now_micros() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
