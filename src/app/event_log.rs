//! Operator-facing event log
//!
//! Components receive an [`EventLog`] at construction and report one-line
//! messages through it: skipped rows, per-file results, relocation failures
//! and lock contention. Internal diagnostics go straight to `tracing`.

use std::sync::Mutex;
use tracing::info;

use crate::constants::EVENT_LOG_TARGET;

/// Sink for one-line, human-readable processing messages
pub trait EventLog: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards messages to `tracing` under the `event_loader::events` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn log(&self, message: &str) {
        info!(target: EVENT_LOG_TARGET, "{}", message);
    }
}

/// Keeps every message in memory, in the order received
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    messages: Mutex<Vec<String>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the messages logged so far
    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether any logged message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages().iter().any(|message| message.contains(needle))
    }
}

impl EventLog for MemoryEventLog {
    fn log(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}
