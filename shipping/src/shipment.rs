//! The shipment state machine.
//!
//! A shipment moves `Pending → Shipped → Delivered`. Each state is its own
//! type, so a transition is a function that consumes one state and returns
//! the next; re-shipping a shipped shipment is unrepresentable. Only the
//! `Pending → Shipped` transition belongs to this core; delivery is a later
//! concern and no transition here reaches it.

use crate::types::{
    OrderReference, RecipientName, ShipmentId, ShipmentItem, ShippingAddress, TrackingNumber,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shipment waiting to leave the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingShipment {
    /// This shipment's identifier.
    pub shipment_id: ShipmentId,
    /// The order it fulfills.
    pub order_reference: OrderReference,
    /// Who it goes to.
    pub recipient: RecipientName,
    /// Where it goes.
    pub address: ShippingAddress,
    /// What it contains.
    pub items: Vec<ShipmentItem>,
}

impl PendingShipment {
    /// Ships this shipment: stamps a generated tracking number and the
    /// current time and moves to the `Shipped` state.
    pub fn mark_as_shipped(self) -> ShippedShipment {
        ShippedShipment {
            shipment_id: self.shipment_id,
            order_reference: self.order_reference,
            recipient: self.recipient,
            address: self.address,
            items: self.items,
            tracking_number: TrackingNumber::generate(),
            shipped_at: Utc::now(),
        }
    }
}

/// A shipment that has left the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippedShipment {
    /// This shipment's identifier.
    pub shipment_id: ShipmentId,
    /// The order it fulfills.
    pub order_reference: OrderReference,
    /// Who it goes to.
    pub recipient: RecipientName,
    /// Where it goes.
    pub address: ShippingAddress,
    /// What it contains.
    pub items: Vec<ShipmentItem>,
    /// The carrier's tracking number.
    pub tracking_number: TrackingNumber,
    /// When it shipped.
    pub shipped_at: DateTime<Utc>,
}

/// A shipment confirmed at its destination.
///
/// Reachable only through the out-of-scope delivery step; modeled so the
/// state sum is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveredShipment {
    /// This shipment's identifier.
    pub shipment_id: ShipmentId,
    /// The order it fulfills.
    pub order_reference: OrderReference,
    /// Who it went to.
    pub recipient: RecipientName,
    /// Where it went.
    pub address: ShippingAddress,
    /// What it contained.
    pub items: Vec<ShipmentItem>,
    /// The carrier's tracking number.
    pub tracking_number: TrackingNumber,
    /// When it shipped.
    pub shipped_at: DateTime<Utc>,
}

/// Any shipment, in whichever state it is in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Shipment {
    /// Waiting to leave the warehouse.
    Pending(PendingShipment),
    /// On its way.
    Shipped(ShippedShipment),
    /// Arrived.
    Delivered(DeliveredShipment),
}

impl Shipment {
    /// The state tag as a stable name.
    pub const fn status(&self) -> &'static str {
        match self {
            Self::Pending(_) => "pending",
            Self::Shipped(_) => "shipped",
            Self::Delivered(_) => "delivered",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{City, ItemQuantity, PostalCode, ProductRef, Street};

    fn pending() -> PendingShipment {
        PendingShipment {
            shipment_id: ShipmentId::generate(),
            order_reference: OrderReference::try_new("order-1").unwrap(),
            recipient: RecipientName::try_new("Hanako Yamada").unwrap(),
            address: ShippingAddress {
                street: Street::try_new("1-2-3 Shibuya").unwrap(),
                city: City::try_new("Shibuya").unwrap(),
                postal_code: PostalCode::try_new("150-0001").unwrap(),
            },
            items: vec![ShipmentItem {
                product: ProductRef::try_new("W1234").unwrap(),
                quantity: ItemQuantity::try_new(2.0).unwrap(),
            }],
        }
    }

    #[test]
    fn shipping_stamps_a_tracking_number_and_timestamp() {
        let before = Utc::now();
        let shipment = pending();
        let order_reference = shipment.order_reference.clone();

        let shipped = shipment.mark_as_shipped();

        assert_eq!(shipped.order_reference, order_reference);
        assert!(shipped.tracking_number.as_ref().starts_with("TRK-"));
        assert!(shipped.shipped_at >= before);
        assert!(shipped.shipped_at <= Utc::now());
    }

    #[test]
    fn shipping_keeps_the_cargo_intact() {
        let shipment = pending();
        let items = shipment.items.clone();
        let recipient = shipment.recipient.clone();

        let shipped = shipment.mark_as_shipped();

        assert_eq!(shipped.items, items);
        assert_eq!(shipped.recipient, recipient);
    }

    #[test]
    fn the_state_tag_follows_the_transition() {
        let shipment = pending();
        assert_eq!(Shipment::Pending(shipment.clone()).status(), "pending");

        let shipped = shipment.mark_as_shipped();
        assert_eq!(Shipment::Shipped(shipped).status(), "shipped");
    }

    #[test]
    fn shipments_serialize_with_a_status_tag() {
        let shipment = Shipment::Pending(pending());
        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["status"], "pending");
    }
}
