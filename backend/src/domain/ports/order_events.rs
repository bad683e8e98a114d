//! Event channel port for order announcements.

use futures_util::stream::BoxStream;

use crate::domain::events::PendingOrderEvent;

/// In-process publish/subscribe channel for pending-order announcements.
///
/// Delivery is best-effort and at-most-once per currently connected
/// subscriber: nothing is persisted, missed events are not replayed, and a
/// slow subscriber must never block a publisher.
#[cfg_attr(test, mockall::automock)]
pub trait OrderEventChannel: Send + Sync {
    /// Announce a newly created pending order. Never blocks.
    fn publish_pending(&self, event: PendingOrderEvent);

    /// Stream of pending-order events observed from now on.
    ///
    /// The stream carries every published event; ownership filtering happens
    /// at delivery time in the subscriber.
    fn subscribe_pending(&self) -> BoxStream<'static, PendingOrderEvent>;
}
