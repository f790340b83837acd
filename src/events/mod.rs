//! Push-notification client for backend change events.
//!
//! [`StreamEventClient`] keeps one `GET /api/events` stream open, turns
//! blank-line-delimited frames into [`EventKind`] notifications, and retries
//! with doubling delays when the stream fails or ends.

mod backoff;
mod client;
mod frame;
mod registry;

pub use backoff::{Backoff, DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_BACKOFF};
pub use client::{ConnectionState, StreamEventClient, DEFAULT_SERVER_URL, EVENTS_PATH};
pub use registry::{EventKind, Listener, Subscription};
