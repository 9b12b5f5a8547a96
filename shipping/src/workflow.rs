//! The ShipOrder workflow.
//!
//! Validate the translated command into a pending shipment, mark it as
//! shipped, and publish the order-shipped event before returning.

use crate::errors::ShipOrderError;
use crate::events::OrderShipped;
use crate::shipment::ShippedShipment;
use crate::translate::ShipOrderCommand;
use eventbus::EventPublisher;
use tracing::{info, instrument};

/// What a completed ship-order run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipOrderResult {
    /// The shipment, now shipped.
    pub shipment: ShippedShipment,
    /// The events that were published, in publish order.
    pub events: Vec<OrderShipped>,
}

/// The ShipOrder workflow with its outbound channel.
pub struct ShipOrder {
    shipped_events: EventPublisher<OrderShipped>,
}

impl ShipOrder {
    /// Wires the workflow to the order-shipped channel.
    pub fn new(shipped_events: EventPublisher<OrderShipped>) -> Self {
        Self { shipped_events }
    }

    /// Ships one order and publishes the resulting event.
    #[instrument(skip(self, command), fields(order_reference = %command.order_reference))]
    pub async fn ship_order(
        &self,
        command: ShipOrderCommand,
    ) -> Result<ShipOrderResult, ShipOrderError> {
        let pending = command.into_pending()?;
        let shipment = pending.mark_as_shipped();

        let event = OrderShipped {
            order_id: shipment.order_reference.clone(),
            shipment_id: shipment.shipment_id.clone(),
            shipped_at: shipment.shipped_at,
            tracking_number: shipment.tracking_number.clone(),
        };
        self.shipped_events.publish(event.clone()).await?;

        info!(
            order_reference = %shipment.order_reference,
            tracking_number = %shipment.tracking_number,
            "order shipped"
        );

        Ok(ShipOrderResult {
            shipment,
            events: vec![event],
        })
    }
}
