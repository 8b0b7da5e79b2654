//! Event sink port
//!
//! The presentation collaborator receives ordered [`DeliveryEvent`]s:
//! content fragments as they arrive, then exactly one terminal event.

use stepwise_domain::DeliveryEvent;

/// Sink for delivery events.
///
/// Implementations must be cheap: delivery happens between fragment
/// arrivals on the request's hot path.
pub trait EventSink: Send + Sync {
    fn deliver(&self, event: &DeliveryEvent);
}

/// Sink that discards everything (for tests and fire-and-forget callers).
pub struct NoSink;

impl EventSink for NoSink {
    fn deliver(&self, _event: &DeliveryEvent) {}
}

/// Sink that records events for inspection (test helper).
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<DeliveryEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DeliveryEvent> {
        self.events.lock().expect("sink lock").clone()
    }
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn deliver(&self, event: &DeliveryEvent) {
        self.events.lock().expect("sink lock").push(event.clone());
    }
}
