//! Events published by the PlaceOrder workflow, and their composition.
//!
//! These are the wire contract of the order-taking context: everything a
//! downstream consumer learns about an order comes through one of these
//! shapes on the order-event channel.

use crate::order::{Address, CustomerInfo, PricedOrder, PricedOrderLine};
use crate::types::{BillingAmount, EmailAddress, OrderId};
use serde::{Deserialize, Serialize};

/// An order was placed: the full priced-order projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    /// The order's identifier.
    pub order_id: OrderId,
    /// Who placed it.
    pub customer_info: CustomerInfo,
    /// Where it ships to.
    pub shipping_address: Address,
    /// Where it bills to.
    pub billing_address: Address,
    /// The priced lines.
    pub lines: Vec<PricedOrderLine>,
    /// The order total.
    pub amount_to_bill: BillingAmount,
}

impl From<PricedOrder> for OrderPlaced {
    fn from(order: PricedOrder) -> Self {
        Self {
            order_id: order.id,
            customer_info: order.customer_info,
            shipping_address: order.shipping_address,
            billing_address: order.billing_address,
            lines: order.lines,
            amount_to_bill: order.amount_to_bill,
        }
    }
}

/// There is something to bill for a placed order.
///
/// Produced only when the billing amount is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillableOrderPlaced {
    /// The order's identifier.
    pub order_id: OrderId,
    /// Where the bill goes.
    pub billing_address: Address,
    /// How much to bill.
    pub amount_to_bill: BillingAmount,
}

/// The customer was notified that their order was placed.
///
/// Produced only when the send collaborator confirmed delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcknowledgmentSent {
    /// The order's identifier.
    pub order_id: OrderId,
    /// Where the acknowledgment went.
    pub email_address: EmailAddress,
}

/// Every event the PlaceOrder workflow can publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlaceOrderEvent {
    /// The customer was notified.
    AcknowledgmentSent(AcknowledgmentSent),
    /// The order was placed.
    OrderPlaced(OrderPlaced),
    /// The order has a positive amount to bill.
    BillableOrderPlaced(BillableOrderPlaced),
}

impl PlaceOrderEvent {
    /// The event's kind as a stable name.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AcknowledgmentSent(_) => "AcknowledgmentSent",
            Self::OrderPlaced(_) => "OrderPlaced",
            Self::BillableOrderPlaced(_) => "BillableOrderPlaced",
        }
    }
}

/// Assembles the event list for a successfully priced order.
///
/// List order is part of the contract: the acknowledgment event (if any)
/// first, then the always-present `OrderPlaced`, then `BillableOrderPlaced`
/// when there is anything to bill.
pub fn compose_events(
    order: PricedOrder,
    acknowledgment: Option<AcknowledgmentSent>,
) -> Vec<PlaceOrderEvent> {
    let billing_event = create_billing_event(&order);
    let mut events = Vec::with_capacity(3);

    if let Some(sent) = acknowledgment {
        events.push(PlaceOrderEvent::AcknowledgmentSent(sent));
    }
    events.push(PlaceOrderEvent::OrderPlaced(OrderPlaced::from(order)));
    if let Some(billable) = billing_event {
        events.push(PlaceOrderEvent::BillableOrderPlaced(billable));
    }

    events
}

fn create_billing_event(order: &PricedOrder) -> Option<BillableOrderPlaced> {
    if order.amount_to_bill.is_zero() {
        return None;
    }
    Some(BillableOrderPlaced {
        order_id: order.id.clone(),
        billing_address: order.billing_address.clone(),
        amount_to_bill: order.amount_to_bill,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_priced_order, zero_priced_order};

    fn acknowledgment_for(order: &PricedOrder) -> AcknowledgmentSent {
        AcknowledgmentSent {
            order_id: order.id.clone(),
            email_address: order.customer_info.email_address.clone(),
        }
    }

    #[test]
    fn a_billable_acknowledged_order_produces_all_three_events_in_order() {
        let order = sample_priced_order();
        let acknowledgment = acknowledgment_for(&order);

        let events = compose_events(order, Some(acknowledgment));

        let kinds: Vec<_> = events.iter().map(PlaceOrderEvent::kind).collect();
        assert_eq!(
            kinds,
            vec!["AcknowledgmentSent", "OrderPlaced", "BillableOrderPlaced"]
        );
    }

    #[test]
    fn exactly_one_order_placed_event_is_always_present() {
        let order = sample_priced_order();
        let events = compose_events(order.clone(), None);

        let placed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, PlaceOrderEvent::OrderPlaced(_)))
            .collect();
        assert_eq!(placed.len(), 1);

        let PlaceOrderEvent::OrderPlaced(placed) = placed[0] else {
            unreachable!()
        };
        assert_eq!(placed.order_id, order.id);
        assert_eq!(placed.amount_to_bill, order.amount_to_bill);
    }

    #[test]
    fn a_zero_amount_order_produces_no_billing_event() {
        let order = zero_priced_order();
        let events = compose_events(order, None);

        assert!(events
            .iter()
            .all(|e| !matches!(e, PlaceOrderEvent::BillableOrderPlaced(_))));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn a_positive_amount_order_produces_exactly_one_billing_event() {
        let order = sample_priced_order();
        let billing_address = order.billing_address.clone();
        let amount = order.amount_to_bill;

        let events = compose_events(order, None);
        let billing: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                PlaceOrderEvent::BillableOrderPlaced(b) => Some(b),
                _ => None,
            })
            .collect();

        assert_eq!(billing.len(), 1);
        assert_eq!(billing[0].billing_address, billing_address);
        assert_eq!(billing[0].amount_to_bill, amount);
    }

    #[test]
    fn events_serialize_with_a_type_tag() {
        let order = sample_priced_order();
        let events = compose_events(order, None);

        let json = serde_json::to_value(&events[0]).unwrap();
        assert_eq!(json["type"], "OrderPlaced");
    }
}
