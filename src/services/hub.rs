//! Service Hub
//!
//! Multiplexes events from every page controller into one channel that the
//! notice state drains.

use crate::services::ServiceEvent;
use crossbeam_channel::{Receiver, Sender};

/// Central event channel shared by all controllers
#[derive(Clone)]
pub struct ServiceHub {
    tx: Sender<ServiceEvent>,
    rx: Receiver<ServiceEvent>,
}

impl ServiceHub {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Get the event receiver for the state layer
    pub fn events(&self) -> Receiver<ServiceEvent> {
        self.rx.clone()
    }

    /// Sender handed to controllers
    pub fn sender(&self) -> Sender<ServiceEvent> {
        self.tx.clone()
    }

    /// Emit an event. The hub owns a receiver, so sending never fails.
    pub fn emit(&self, event: ServiceEvent) {
        let _ = self.tx.send(event);
    }

    /// Take every event queued so far
    pub fn drain(&self) -> Vec<ServiceEvent> {
        self.rx.try_iter().collect()
    }
}

impl Default for ServiceHub {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceHub")
            .field("pending", &self.rx.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_events_in_order() {
        let hub = ServiceHub::new();
        let tx = hub.sender();
        tx.send(ServiceEvent::Loaded { entity: "Product", count: 3 }).unwrap();
        hub.emit(ServiceEvent::SessionChanged { email: None });

        let events = hub.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ServiceEvent::Loaded { count: 3, .. }));
        assert!(hub.drain().is_empty());
    }
}
