use std::sync::Arc;
use std::sync::mpsc::Sender;

use parking_lot::RwLock;

/// Observer of the load pipeline. All methods default to no-ops so a
/// listener only implements what it cares about.
pub trait Listener: Send + Sync {
    /// A progress message, e.g. "Loading bank@account.1234".
    fn on_message(&self, _message: &str) {}

    /// The user requested an abort; partial state is being discarded.
    fn on_abort(&self) {}

    /// A load finished and results can be re-queried.
    fn on_refresh(&self) {}

    /// A load is starting and previous results are stale.
    fn on_clear(&self) {}
}

/// Broadcast registry for [`Listener`]s. Multiple independent observers may
/// be registered; registration order is delivery order.
#[derive(Default)]
pub struct Messaging {
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
}

impl Messaging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&self, listener: Arc<dyn Listener>) {
        self.listeners.write().push(listener);
    }

    pub fn broadcast(&self, message: &str) {
        for listener in self.listeners.read().iter() {
            listener.on_message(message);
        }
    }

    pub fn abort(&self) {
        for listener in self.listeners.read().iter() {
            listener.on_abort();
        }
    }

    pub fn refresh(&self) {
        for listener in self.listeners.read().iter() {
            listener.on_refresh();
        }
    }

    pub fn clear(&self) {
        for listener in self.listeners.read().iter() {
            listener.on_clear();
        }
    }
}

/// Forwards progress messages to the tracing log.
pub struct LogListener;

impl Listener for LogListener {
    fn on_message(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn on_abort(&self) {
        tracing::info!("load aborted");
    }
}

/// Forwards progress messages into a channel, for a frontend that drains
/// them from its own thread.
pub struct ChannelListener {
    tx: Sender<String>,
}

impl ChannelListener {
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl Listener for ChannelListener {
    fn on_message(&self, message: &str) {
        let _ = self.tx.send(message.to_string());
    }
}
