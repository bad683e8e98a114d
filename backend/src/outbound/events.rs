//! In-process broadcast channel for order announcements.
//!
//! Backed by `tokio::sync::broadcast`: publishers never block, delivery is
//! best-effort, and a subscriber that falls more than the channel capacity
//! behind loses the oldest events rather than stalling the publisher.

use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tokio::sync::broadcast;

use crate::domain::events::PendingOrderEvent;
use crate::domain::ports::OrderEventChannel;

const CHANNEL_CAPACITY: usize = 64;

/// Broadcast-backed implementation of the `OrderEventChannel` port.
#[derive(Clone)]
pub struct BroadcastOrderChannel {
    sender: broadcast::Sender<PendingOrderEvent>,
}

impl BroadcastOrderChannel {
    /// Create a channel with the default capacity.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl Default for BroadcastOrderChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderEventChannel for BroadcastOrderChannel {
    fn publish_pending(&self, event: PendingOrderEvent) {
        // Send only fails when no subscriber is connected; announcements are
        // best-effort so that is not an error.
        let _ = self.sender.send(event);
    }

    fn subscribe_pending(&self) -> BoxStream<'static, PendingOrderEvent> {
        let receiver = self.sender.subscribe();
        futures_util::stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((event, receiver)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "slow subscriber dropped pending order events");
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::OrderSnapshot;
    use crate::domain::order::OrderStatus;

    fn sample_event(owner_id: i32, order_id: i32) -> PendingOrderEvent {
        PendingOrderEvent {
            owner_id,
            order: OrderSnapshot {
                id: order_id,
                customer_id: 4,
                restaurant_id: 2,
                status: OrderStatus::Pending,
                total_price: Some(15),
            },
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let channel = BroadcastOrderChannel::new();
        let mut stream = channel.subscribe_pending();

        channel.publish_pending(sample_event(77, 1));

        let event = stream.next().await.expect("event delivered");
        assert_eq!(event.owner_id, 77);
        assert_eq!(event.order.id, 1);
    }

    #[tokio::test]
    async fn every_subscriber_sees_every_event() {
        let channel = BroadcastOrderChannel::new();
        let mut first = channel.subscribe_pending();
        let mut second = channel.subscribe_pending();

        channel.publish_pending(sample_event(77, 1));

        assert_eq!(first.next().await.expect("delivered").order.id, 1);
        assert_eq!(second.next().await.expect("delivered").order.id, 1);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_harmless() {
        let channel = BroadcastOrderChannel::new();
        channel.publish_pending(sample_event(77, 1));

        // A later subscriber starts from now and only sees new events.
        let mut stream = channel.subscribe_pending();
        channel.publish_pending(sample_event(77, 2));
        assert_eq!(stream.next().await.expect("delivered").order.id, 2);
    }
}
