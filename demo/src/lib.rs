//! Wiring for the two bounded contexts.
//!
//! Builds the channels, injects the demo collaborators into the PlaceOrder
//! workflow, and supervises the shipping listener as a background task.
//! Used by the demo binary and by the cross-context integration tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use eventbus::EventSubscriber;
use ordertaking::testing::{
    AcceptAllAddresses, InMemoryProductCatalog, PlainTextLetters, RecordingAcknowledgmentSender,
};
use ordertaking::workflow::PlaceOrder;
use shipping::events::OrderShipped;
use shipping::listener::ShippingListener;
use shipping::workflow::ShipOrder;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The catalog the demo runs against.
pub fn standard_catalog() -> InMemoryProductCatalog {
    InMemoryProductCatalog::new()
        .with_price("W1234", 3000)
        .with_price("G123", 4500)
        .with_price("W5678", 5000)
}

/// Both contexts, wired and running.
pub struct BoundedContexts {
    /// The order-taking entry point.
    pub place_order: PlaceOrder,
    /// The catalog behind the workflow, for assertions.
    pub catalog: Arc<InMemoryProductCatalog>,
    shipped_events: EventSubscriber<OrderShipped>,
    listener: JoinHandle<()>,
}

impl BoundedContexts {
    /// Wires the system: one order-placed channel, one order-shipped
    /// channel, the PlaceOrder workflow with demo collaborators, and the
    /// shipping listener running in the background.
    pub fn start(catalog: InMemoryProductCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let (order_publisher, order_events) = eventbus::channel(eventbus::DEFAULT_CAPACITY);
        let (shipped_publisher, shipped_events) = eventbus::channel(eventbus::DEFAULT_CAPACITY);

        let place_order = PlaceOrder::new(
            Arc::new(AcceptAllAddresses),
            catalog.clone(),
            catalog.clone(),
            Arc::new(PlainTextLetters),
            Arc::new(RecordingAcknowledgmentSender::confirming()),
            order_publisher,
        );
        let listener =
            ShippingListener::new(order_events, ShipOrder::new(shipped_publisher)).spawn();

        Self {
            place_order,
            catalog,
            shipped_events,
            listener,
        }
    }

    /// Shuts the system down cooperatively and hands back the shipped-event
    /// channel.
    ///
    /// Dropping the workflow drops the last order-side publisher, which lets
    /// the listener finish whatever is queued and stop; every placed order
    /// has its shipped event in the returned channel.
    pub async fn shutdown(self) -> EventSubscriber<OrderShipped> {
        drop(self.place_order);
        self.listener.await.expect("shipping listener panicked");
        self.shipped_events
    }
}
