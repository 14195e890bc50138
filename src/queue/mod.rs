// Queue module exports

pub mod message;
pub mod registry;
pub mod rendezvous;

pub use message::Message;
pub use registry::QueueRegistry;
pub use rendezvous::{PendingSend, RecvError, RendezvousQueue, SendOutcome};
