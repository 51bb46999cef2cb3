//! Change notification — the hook external realtime transports attach to.
//!
//! RULE: notification is fire-and-forget, published after a successful
//! commit and never inside the mutation's transaction. The payload names
//! only the changed relation; consumers re-fetch full state.

use crate::types::GameId;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangedTable {
    Games,
    Rounds,
    PendingOrders,
    Players,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: ChangedTable,
    pub game_id: GameId,
}

/// Sink for change events. Implementations must not block or fail the
/// mutation that produced the event.
pub trait ChangeNotifier: Send {
    fn publish(&self, event: &ChangeEvent);
}

/// Discards everything. The default when no transport is attached.
pub struct NullNotifier;

impl ChangeNotifier for NullNotifier {
    fn publish(&self, _event: &ChangeEvent) {}
}

/// Buffers events in memory. Used by tests and the runner's verbose mode.
#[derive(Default)]
pub struct BufferingNotifier {
    events: Mutex<Vec<ChangeEvent>>,
}

impl BufferingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all buffered events and clears the buffer.
    pub fn drain(&self) -> Vec<ChangeEvent> {
        let mut events = self.events.lock().expect("notifier lock poisoned");
        std::mem::take(&mut *events)
    }
}

impl ChangeNotifier for BufferingNotifier {
    fn publish(&self, event: &ChangeEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
