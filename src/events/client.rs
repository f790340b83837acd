//! Long-lived event-stream connection with backoff reconnects.

use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::StatusCode;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::StreamError;

use super::backoff::Backoff;
use super::frame::FrameParser;
use super::registry::{EventKind, Registry, Subscription};

/// Path of the push endpoint, relative to the server base URL.
pub const EVENTS_PATH: &str = "/api/events";
/// Base URL used when nothing is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3456";

/// Connection lifecycle of a [`StreamEventClient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Streaming,
    Reconnecting,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Streaming => "streaming",
            Self::Reconnecting => "reconnecting",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Shared {
    http: reqwest::Client,
    registry: Arc<Registry>,
    state: watch::Sender<ConnectionState>,
    base_url: Mutex<String>,
    backoff: Mutex<Backoff>,
    disposed: AtomicBool,
    /// Bumped by every forced reconnect; drivers from older generations go quiet.
    generation: AtomicU64,
}

impl Shared {
    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Publish a state unless the client has been disposed or `generation`
    /// has been superseded.
    fn set_state(&self, generation: u64, next: ConnectionState) {
        self.state.send_if_modified(|state| {
            if self.is_disposed() || !self.is_current(generation) || *state == next {
                return false;
            }
            tracing::debug!(from = %state, to = %next, "event stream state");
            *state = next;
            true
        });
    }

    fn events_url(&self) -> String {
        let base = self
            .base_url
            .lock()
            .map(|url| url.clone())
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        format!("{}{EVENTS_PATH}", base.trim_end_matches('/'))
    }

    fn reset_backoff(&self) {
        if let Ok(mut backoff) = self.backoff.lock() {
            backoff.reset();
        }
    }

    /// Take the next retry delay, or `None` for a superseded driver.
    fn next_delay(&self, generation: u64) -> Option<std::time::Duration> {
        let mut backoff = match self.backoff.lock() {
            Ok(backoff) => backoff,
            Err(_) => return Some(super::backoff::DEFAULT_MAX_BACKOFF),
        };
        if !self.is_current(generation) {
            return None;
        }
        Some(backoff.next_delay())
    }
}

/// Owns the push connection and fans frames out to listeners by kind.
///
/// Connecting starts on construction, so it must be created inside a tokio
/// runtime. The connection is kept alive until [`dispose`](Self::dispose).
pub struct StreamEventClient {
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl StreamEventClient {
    /// Connect to `base_url` with the default 3s..30s backoff.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_backoff(base_url, Backoff::default())
    }

    pub fn with_backoff(base_url: impl Into<String>, backoff: Backoff) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        let client = Self {
            shared: Arc::new(Shared {
                http: reqwest::Client::new(),
                registry: Arc::new(Registry::default()),
                state,
                base_url: Mutex::new(base_url.into()),
                backoff: Mutex::new(backoff),
                disposed: AtomicBool::new(false),
                generation: AtomicU64::new(0),
            }),
            task: Mutex::new(None),
        };
        client.spawn_driver();
        client
    }

    /// Register a listener for one event kind.
    pub fn on<F>(&self, kind: EventKind, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.shared.registry.add(kind, Arc::new(listener))
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.shared.registry.len(kind)
    }

    pub fn state(&self) -> ConnectionState {
        *self.shared.state.borrow()
    }

    /// Receiver that observes every state change.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.shared.state.subscribe()
    }

    pub fn base_url(&self) -> String {
        self.shared
            .base_url
            .lock()
            .map(|url| url.clone())
            .unwrap_or_default()
    }

    /// Point the client at a new server. An unchanged URL is a no-op.
    pub fn set_base_url(&self, url: impl Into<String>) {
        let url = url.into();
        let changed = match self.shared.base_url.lock() {
            Ok(mut current) if *current != url => {
                *current = url.clone();
                true
            }
            _ => false,
        };
        if changed {
            tracing::info!(%url, "event server changed, reconnecting");
            self.reconnect();
        }
    }

    /// Drop the current connection and start over with a fresh backoff.
    pub fn reconnect(&self) {
        if self.shared.is_disposed() {
            return;
        }
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_driver();
        self.shared.reset_backoff();
        self.shared.set_state(generation, ConnectionState::Disconnected);
        self.spawn_driver();
    }

    /// Stop for good: abort the connection and any pending retry, drop listeners.
    pub fn dispose(&self) {
        if self.shared.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.abort_driver();
        self.shared.registry.clear();
        self.shared.state.send_replace(ConnectionState::Disconnected);
        tracing::debug!("event stream disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.is_disposed()
    }

    fn spawn_driver(&self) {
        let generation = self.shared.generation();
        let handle = tokio::spawn(drive(Arc::clone(&self.shared), generation));
        if let Ok(mut task) = self.task.lock() {
            *task = Some(handle);
        }
    }

    fn abort_driver(&self) {
        if let Ok(mut task) = self.task.lock() {
            if let Some(handle) = task.take() {
                handle.abort();
            }
        }
    }
}

impl Drop for StreamEventClient {
    fn drop(&mut self) {
        self.abort_driver();
    }
}

/// Connect, stream, and back off until disposed, aborted, or superseded.
///
/// `abort` only takes effect at the next await, so a driver replaced by
/// `reconnect` checks its generation before touching state or backoff.
async fn drive(shared: Arc<Shared>, generation: u64) {
    loop {
        if shared.is_disposed() || !shared.is_current(generation) {
            return;
        }
        shared.set_state(generation, ConnectionState::Connecting);

        match stream_once(&shared, generation).await {
            Err(StreamError::Closed) => tracing::info!("event stream closed by server"),
            Err(err) => tracing::warn!(error = %err, "event stream failed"),
            Ok(()) => {}
        }

        if shared.is_disposed() || !shared.is_current(generation) {
            return;
        }
        shared.set_state(generation, ConnectionState::Reconnecting);
        let Some(delay) = shared.next_delay(generation) else {
            return;
        };
        tracing::debug!(delay_ms = delay.as_millis() as u64, "scheduling reconnect");
        tokio::time::sleep(delay).await;
    }
}

async fn stream_once(shared: &Shared, generation: u64) -> Result<(), StreamError> {
    let url = shared.events_url();
    tracing::debug!(%url, "connecting to event stream");
    let mut response = shared
        .http
        .get(&url)
        .header(ACCEPT, "text/event-stream")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?;
    if response.status() != StatusCode::OK {
        return Err(StreamError::Status(response.status().as_u16()));
    }

    if !shared.is_current(generation) {
        return Ok(());
    }
    shared.reset_backoff();
    shared.set_state(generation, ConnectionState::Streaming);

    let mut parser = FrameParser::default();
    while let Some(chunk) = response.chunk().await? {
        for name in parser.push(&chunk) {
            if shared.is_disposed() || !shared.is_current(generation) {
                return Ok(());
            }
            match EventKind::from_name(&name) {
                Some(kind) => {
                    let delivered = shared.registry.dispatch(kind);
                    tracing::debug!(%kind, delivered, "event dispatched");
                }
                None => tracing::debug!(event = %name, "ignoring unknown event"),
            }
        }
    }
    Err(StreamError::Closed)
}
