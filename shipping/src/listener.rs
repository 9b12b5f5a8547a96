//! The anti-corruption listener.
//!
//! A long-lived background task bridging the two contexts: it takes events
//! from the order-placed channel, ignores the kinds shipping does not care
//! about, translates each `OrderPlaced` into shipping vocabulary and runs
//! the ship-order workflow. One event is fully processed before the next is
//! taken, so cooperative shutdown never abandons an in-flight shipment:
//! closing the channel lets the current event finish and then ends the loop.

use crate::translate::ShipOrderCommand;
use crate::workflow::ShipOrder;
use eventbus::EventSubscriber;
use ordertaking::events::PlaceOrderEvent;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The shipping context's subscription to the order-placed channel.
pub struct ShippingListener {
    order_events: EventSubscriber<PlaceOrderEvent>,
    workflow: ShipOrder,
}

impl ShippingListener {
    /// Wires the listener to its input channel and workflow.
    pub fn new(order_events: EventSubscriber<PlaceOrderEvent>, workflow: ShipOrder) -> Self {
        Self {
            order_events,
            workflow,
        }
    }

    /// Runs the listener on a background task.
    ///
    /// The task ends when every order-side publisher has been dropped and
    /// the channel is drained.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// The listener loop. Most callers want [`spawn`](Self::spawn); running
    /// it inline is useful in tests.
    pub async fn run(mut self) {
        info!("shipping context: listening for OrderPlaced events");

        while let Some(event) = self.order_events.take().await {
            match event {
                PlaceOrderEvent::OrderPlaced(order_placed) => {
                    debug!(order_id = %order_placed.order_id, "received OrderPlaced event");
                    let command = ShipOrderCommand::from_order_placed(&order_placed);
                    // A bad event must not kill the listener; log and move on.
                    if let Err(error) = self.workflow.ship_order(command).await {
                        warn!(%error, "ship-order workflow failed, event discarded");
                    }
                }
                other => {
                    debug!(kind = other.kind(), "ignoring event not relevant to shipping");
                }
            }
        }

        info!("shipping context: order event channel closed, listener stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::OrderShipped;
    use ordertaking::events::{AcknowledgmentSent, OrderPlaced};
    use ordertaking::testing::sample_priced_order;

    struct Harness {
        orders: eventbus::EventPublisher<PlaceOrderEvent>,
        shipped: eventbus::EventSubscriber<OrderShipped>,
        listener: JoinHandle<()>,
    }

    fn harness() -> Harness {
        let (orders, order_events) = eventbus::channel(eventbus::DEFAULT_CAPACITY);
        let (shipped_publisher, shipped) = eventbus::channel(eventbus::DEFAULT_CAPACITY);
        let listener =
            ShippingListener::new(order_events, ShipOrder::new(shipped_publisher)).spawn();
        Harness {
            orders,
            shipped,
            listener,
        }
    }

    fn order_placed() -> PlaceOrderEvent {
        PlaceOrderEvent::OrderPlaced(OrderPlaced::from(sample_priced_order()))
    }

    #[tokio::test]
    async fn an_order_placed_event_becomes_an_order_shipped_event() {
        let mut harness = harness();

        harness.orders.publish(order_placed()).await.unwrap();

        let shipped = harness.shipped.take().await.unwrap();
        assert_eq!(shipped.order_id.as_ref(), "order-1");
        assert!(shipped.tracking_number.as_ref().starts_with("TRK-"));

        drop(harness.orders);
        harness.listener.await.unwrap();
    }

    #[tokio::test]
    async fn unrelated_event_kinds_on_the_shared_channel_are_ignored() {
        let mut harness = harness();
        let order = sample_priced_order();

        harness
            .orders
            .publish(PlaceOrderEvent::AcknowledgmentSent(AcknowledgmentSent {
                order_id: order.id.clone(),
                email_address: order.customer_info.email_address.clone(),
            }))
            .await
            .unwrap();
        harness.orders.publish(order_placed()).await.unwrap();

        // Only the OrderPlaced event produced a shipment.
        let shipped = harness.shipped.take().await.unwrap();
        assert_eq!(shipped.order_id.as_ref(), "order-1");

        drop(harness.orders);
        harness.listener.await.unwrap();
        assert!(harness.shipped.try_take().is_err());
    }

    #[tokio::test]
    async fn the_listener_stops_when_the_channel_closes() {
        let harness = harness();

        drop(harness.orders);
        harness.listener.await.unwrap();
    }

    #[tokio::test]
    async fn shipped_events_preserve_the_order_of_placements() {
        let mut harness = harness();

        let mut first = sample_priced_order();
        first.id = ordertaking::types::OrderId::try_new("order-1").unwrap();
        let mut second = sample_priced_order();
        second.id = ordertaking::types::OrderId::try_new("order-2").unwrap();

        harness
            .orders
            .publish(PlaceOrderEvent::OrderPlaced(OrderPlaced::from(first)))
            .await
            .unwrap();
        harness
            .orders
            .publish(PlaceOrderEvent::OrderPlaced(OrderPlaced::from(second)))
            .await
            .unwrap();
        drop(harness.orders);
        harness.listener.await.unwrap();

        let first_shipped = harness.shipped.take().await.unwrap();
        let second_shipped = harness.shipped.take().await.unwrap();
        assert_eq!(first_shipped.order_id.as_ref(), "order-1");
        assert_eq!(second_shipped.order_id.as_ref(), "order-2");
    }
}
