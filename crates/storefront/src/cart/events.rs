//! Cart change notifications.
//!
//! A process-wide publish/subscribe channel for cart signals. Observers
//! (header badge, cart page, SSE subscribers) treat every notification the
//! same way: re-read the persisted snapshot. Duplicate or dropped
//! notifications are therefore harmless.

use tokio::sync::broadcast;

/// Channel capacity. Observers re-read the store on every event, so a
/// lagged receiver loses nothing.
const CHANNEL_CAPACITY: usize = 16;

/// A cart signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// The persisted cart snapshot changed; observers should re-read it.
    Changed,
    /// A surface requested the cart panel to open.
    OpenPanel,
}

impl CartEvent {
    /// Event name used on the wire (SSE event field).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Changed => "cart-changed",
            Self::OpenPanel => "open-cart",
        }
    }
}

/// Broadcast channel for cart signals.
///
/// Cheap to clone; all clones share the same underlying channel.
#[derive(Debug, Clone)]
pub struct CartEvents {
    tx: broadcast::Sender<CartEvent>,
}

impl CartEvents {
    /// Create a new event channel.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Announce that the persisted cart snapshot changed.
    pub fn notify_changed(&self) {
        // send only fails when there are no subscribers, which is fine
        let _ = self.tx.send(CartEvent::Changed);
    }

    /// Announce a request to open the cart panel.
    pub fn notify_open_panel(&self) {
        let _ = self.tx.send(CartEvent::OpenPanel);
    }

    /// Subscribe to cart signals.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.tx.subscribe()
    }
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let events = CartEvents::new();
        let mut rx = events.subscribe();

        events.notify_changed();
        events.notify_open_panel();

        assert_eq!(rx.recv().await.unwrap(), CartEvent::Changed);
        assert_eq!(rx.recv().await.unwrap(), CartEvent::OpenPanel);
    }

    #[test]
    fn test_notify_without_subscribers_is_harmless() {
        let events = CartEvents::new();
        events.notify_changed();
        events.notify_open_panel();
    }

    #[test]
    fn test_event_names() {
        assert_eq!(CartEvent::Changed.as_str(), "cart-changed");
        assert_eq!(CartEvent::OpenPanel.as_str(), "open-cart");
    }
}
