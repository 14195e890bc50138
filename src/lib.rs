// relayq - HTTP rendezvous message broker
//
// This library provides the queue registry, the rendezvous hand-off and the
// HTTP boundary. Binary entry point is in src/main.rs

pub mod http;
pub mod queue;

pub use http::{Server, ServerConfig};
pub use queue::{Message, PendingSend, QueueRegistry, RecvError, RendezvousQueue, SendOutcome};
