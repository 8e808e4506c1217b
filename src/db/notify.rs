//! In-process broadcast of data changes, so open views know to reload.

use std::sync::{
    mpsc::{self, Receiver, Sender},
    Arc, Mutex, PoisonError,
};

use crate::domain::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    Initialized,
    Added,
    Updated,
    Deleted,
}

/// A single change notification. `kind` is `None` for database-wide events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: Option<EntityKind>,
    pub action: ChangeAction,
}

impl ChangeEvent {
    pub fn initialized() -> Self {
        Self {
            kind: None,
            action: ChangeAction::Initialized,
        }
    }

    pub fn entity(kind: EntityKind, action: ChangeAction) -> Self {
        Self {
            kind: Some(kind),
            action,
        }
    }
}

/// Fans change events out to every live subscriber, in order.
#[derive(Debug, Clone, Default)]
pub struct ChangeNotifier {
    subscribers: Arc<Mutex<Vec<Sender<ChangeEvent>>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Dropped receivers are pruned here.
    pub fn notify(&self, event: ChangeEvent) {
        tracing::debug!(?event, "data changed");
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
