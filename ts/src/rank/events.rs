//! Top-task change notifications
//!
//! A broadcast channel owned by the ranker delivers ranking outcomes to
//! subscribers without the ranker knowing who they are. This replaces a
//! process-wide event bus: observers subscribe to the one component whose
//! events they want.

use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::RankedTask;

/// Default channel capacity (events)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Discrete outcome of one ranking pass
#[derive(Debug, Clone)]
pub enum RankEvent {
    /// A top task was selected
    TopChanged { task: RankedTask },

    /// No tier matched; any previous top task no longer applies
    TopCleared,
}

impl RankEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TopChanged { .. } => "top_changed",
            Self::TopCleared => "top_cleared",
        }
    }
}

/// Subscription channel owned by the ranker
///
/// Emission is fire-and-forget: with no subscribers the event is dropped,
/// and a lagging subscriber loses the oldest events.
pub struct RankEvents {
    tx: broadcast::Sender<RankEvent>,
}

impl RankEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn emit(&self, event: RankEvent) {
        debug!(event_type = event.event_type(), "RankEvents::emit");
        // No subscribers is OK
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RankEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for RankEvents {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
