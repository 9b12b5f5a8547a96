//! Bounded-context demo.
//!
//! Places two orders in the order-taking context and watches the shipping
//! context pick them up over the event channel: place → publish → listen →
//! translate → ship → publish.

use anyhow::Result;
use demo::{standard_catalog, BoundedContexts};
use ordertaking::command::Command;
use ordertaking::dto::PlaceOrderEventDto;
use ordertaking::order::{
    UnvalidatedAddress, UnvalidatedCustomerInfo, UnvalidatedOrder, UnvalidatedOrderLine,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("starting bounded-context demo");
    let contexts = BoundedContexts::start(standard_catalog());

    info!("placing order order-1001");
    let events = contexts
        .place_order
        .place_order(Command::new(tokyo_order(), "demo-user"))
        .await?;
    print_events(&events)?;

    info!("placing order order-1002");
    let events = contexts
        .place_order
        .place_order(Command::new(osaka_order(), "demo-user"))
        .await?;
    print_events(&events)?;

    let mut shipped = contexts.shutdown().await;
    info!("shipping context drained, listing shipments");
    while let Ok(event) = shipped.try_take() {
        info!(
            order_id = %event.order_id,
            tracking_number = %event.tracking_number,
            "shipment on its way"
        );
    }

    Ok(())
}

fn print_events(events: &[ordertaking::events::PlaceOrderEvent]) -> Result<()> {
    let dtos: Vec<PlaceOrderEventDto> = events.iter().map(PlaceOrderEventDto::from).collect();
    println!("{}", serde_json::to_string_pretty(&dtos)?);
    Ok(())
}

fn tokyo_order() -> UnvalidatedOrder {
    UnvalidatedOrder {
        order_id: "order-1001".to_string(),
        customer_info: UnvalidatedCustomerInfo {
            first_name: "Taro".to_string(),
            last_name: "Tanaka".to_string(),
            email_address: "taro@example.com".to_string(),
        },
        shipping_address: UnvalidatedAddress {
            street: "1-2-3 Shibuya".to_string(),
            city: "Shibuya".to_string(),
            zip_code: "150-0001".to_string(),
        },
        billing_address: UnvalidatedAddress {
            street: "1-2-3 Shibuya".to_string(),
            city: "Shibuya".to_string(),
            zip_code: "150-0001".to_string(),
        },
        lines: vec![
            UnvalidatedOrderLine {
                id: "line-1".to_string(),
                product_code: "W1234".to_string(),
                quantity: 2.0,
            },
            UnvalidatedOrderLine {
                id: "line-2".to_string(),
                product_code: "G123".to_string(),
                quantity: 1.0,
            },
        ],
    }
}

fn osaka_order() -> UnvalidatedOrder {
    UnvalidatedOrder {
        order_id: "order-1002".to_string(),
        customer_info: UnvalidatedCustomerInfo {
            first_name: "Hanako".to_string(),
            last_name: "Sato".to_string(),
            email_address: "hanako@example.com".to_string(),
        },
        shipping_address: UnvalidatedAddress {
            street: "4-5-6 Kita".to_string(),
            city: "Osaka".to_string(),
            zip_code: "530-0001".to_string(),
        },
        billing_address: UnvalidatedAddress {
            street: "4-5-6 Kita".to_string(),
            city: "Osaka".to_string(),
            zip_code: "530-0001".to_string(),
        },
        lines: vec![UnvalidatedOrderLine {
            id: "line-1".to_string(),
            product_code: "W5678".to_string(),
            quantity: 1.0,
        }],
    }
}
