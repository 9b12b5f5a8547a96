//! Cross-context integration tests.
//!
//! Drive the whole pipeline: place an order in the order-taking context and
//! observe the shipping context consume the published event, translate it,
//! and publish a shipped event of its own.

use demo::{standard_catalog, BoundedContexts};
use ordertaking::command::Command;
use ordertaking::dto::PlaceOrderErrorDto;
use ordertaking::events::PlaceOrderEvent;
use ordertaking::testing::sample_unvalidated_order;
use rust_decimal_macros::dec;

#[tokio::test]
async fn a_placed_order_is_priced_acknowledged_and_shipped() {
    let contexts = BoundedContexts::start(standard_catalog());

    let events = contexts
        .place_order
        .place_order(Command::new(sample_unvalidated_order(), "test-user"))
        .await
        .unwrap();

    // Acknowledgment first, then the always-present OrderPlaced, then the
    // billing event for the positive amount.
    let kinds: Vec<_> = events.iter().map(PlaceOrderEvent::kind).collect();
    assert_eq!(
        kinds,
        vec!["AcknowledgmentSent", "OrderPlaced", "BillableOrderPlaced"]
    );

    let placed = events
        .iter()
        .find_map(|e| match e {
            PlaceOrderEvent::OrderPlaced(placed) => Some(placed),
            _ => None,
        })
        .expect("an OrderPlaced event is always produced");
    assert_eq!(placed.lines[0].price.amount(), dec!(6000));
    assert_eq!(placed.lines[1].price.amount(), dec!(4500));
    assert_eq!(placed.amount_to_bill.amount(), dec!(10500));

    let mut shipped = contexts.shutdown().await;
    let shipment = shipped.try_take().unwrap();
    assert_eq!(shipment.order_id.as_ref(), "order-1");
    assert!(shipment.tracking_number.as_ref().starts_with("TRK-"));
    assert!(shipped.try_take().is_err());
}

#[tokio::test]
async fn two_orders_placed_back_to_back_ship_in_placement_order() {
    let contexts = BoundedContexts::start(standard_catalog());

    for order_id in ["order-1", "order-2"] {
        let mut order = sample_unvalidated_order();
        order.order_id = order_id.to_string();
        contexts
            .place_order
            .place_order(Command::new(order, "test-user"))
            .await
            .unwrap();
    }

    let mut shipped = contexts.shutdown().await;

    let first = shipped.try_take().unwrap();
    let second = shipped.try_take().unwrap();
    assert_eq!(first.order_id.as_ref(), "order-1");
    assert_eq!(second.order_id.as_ref(), "order-2");
    assert!(!first.tracking_number.as_ref().is_empty());
    assert!(!second.tracking_number.as_ref().is_empty());
    assert_ne!(first.shipment_id, second.shipment_id);

    // Exactly two shipments: one per order.
    assert!(shipped.try_take().is_err());
}

#[tokio::test]
async fn a_rejected_order_never_reaches_the_shipping_context() {
    let contexts = BoundedContexts::start(standard_catalog());

    let mut order = sample_unvalidated_order();
    order.shipping_address.zip_code = "ABCDE".to_string();

    let error = contexts
        .place_order
        .place_order(Command::new(order, "test-user"))
        .await
        .unwrap_err();

    let dto = PlaceOrderErrorDto::from(&error);
    assert_eq!(dto.code, "ValidationError");
    assert!(dto.message.contains("shippingAddress.zipCode"));

    let mut shipped = contexts.shutdown().await;
    assert!(shipped.try_take().is_err());
}

#[tokio::test]
async fn pricing_runs_once_per_line_per_successful_order() {
    let contexts = BoundedContexts::start(standard_catalog());

    contexts
        .place_order
        .place_order(Command::new(sample_unvalidated_order(), "test-user"))
        .await
        .unwrap();

    // Two lines, one lookup each.
    assert_eq!(contexts.catalog.price_lookups(), 2);
    contexts.shutdown().await;
}
