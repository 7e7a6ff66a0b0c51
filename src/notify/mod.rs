use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::sync::Arc;

/// Trait for transaction event listeners.
///
/// A listener is any value that can receive a textual event description.
/// Listeners are notified synchronously, in attachment order, and cannot
/// signal failure back to the publisher.
pub trait Listener: Send + Sync + Debug {
    /// Receive a transaction event message.
    fn notify(&self, message: &str);
}

/// Ordered set of listeners owned by one account.
///
/// Attachment order is delivery order. There is no upper bound and no
/// de-duplication: attaching the same listener twice delivers twice.
#[derive(Debug, Default)]
pub struct NotificationChannel {
    listeners: SmallVec<[Arc<dyn Listener>; 2]>,
}

impl NotificationChannel {
    /// Create an empty channel.
    pub fn new() -> Self {
        NotificationChannel {
            listeners: SmallVec::new(),
        }
    }

    /// Append a listener to the delivery order.
    pub fn attach(&mut self, listener: Arc<dyn Listener>) {
        self.listeners.push(listener);
    }

    /// Deliver `message` to every attached listener, in attachment order.
    ///
    /// Delivery is synchronous and blocking. A panicking listener unwinds
    /// through this call and aborts the remaining deliveries.
    pub fn publish(&self, message: &str) {
        for listener in &self.listeners {
            listener.notify(message);
        }
    }

    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Recorded notification with the time it was received.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub received_at: DateTime<Utc>,
    pub message: String,
}

/// Listener that records every transaction message and emits it as a log line.
///
/// Clone-able handle: clones share the same underlying record, so one handle
/// can be attached to an account while another inspects what was delivered.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TransactionLog {
    pub fn new() -> Self {
        TransactionLog {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Recorded messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    /// Recorded entries with receipt timestamps, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Listener for TransactionLog {
    fn notify(&self, message: &str) {
        tracing::info!(target: "bankr::transaction", "{message}");
        self.entries.lock().push(LogEntry {
            received_at: Utc::now(),
            message: message.to_string(),
        });
    }
}
