//! The pricing stage: `ValidatedOrder` → `PricedOrder`.
//!
//! Each line's unit price comes from the price collaborator; the line price
//! is unit price times quantity, and the order bills for the sum of its
//! line prices. The first failed lookup fails the whole stage: an order is
//! priced completely or not at all.

use crate::errors::PricingError;
use crate::order::{PricedOrder, PricedOrderLine, ValidatedOrder};
use crate::services::GetProductPrice;
use crate::types::BillingAmount;

/// Prices a validated order.
pub fn price_order(
    pricing: &dyn GetProductPrice,
    order: &ValidatedOrder,
) -> Result<PricedOrder, PricingError> {
    let mut lines = Vec::with_capacity(order.lines.len());
    for line in &order.lines {
        let unit_price = pricing.product_price(&line.product_code)?;
        let price = unit_price
            .multiply_by(&line.quantity)
            .map_err(|source| PricingError::LinePrice {
                product_code: line.product_code.to_string(),
                source,
            })?;
        lines.push(PricedOrderLine {
            id: line.id.clone(),
            product_code: line.product_code.clone(),
            quantity: line.quantity,
            price,
        });
    }

    let amount_to_bill = BillingAmount::sum(lines.iter().map(|line| &line.price));

    Ok(PricedOrder {
        id: order.id.clone(),
        customer_info: order.customer_info.clone(),
        shipping_address: order.shipping_address.clone(),
        billing_address: order.billing_address.clone(),
        lines,
        amount_to_bill,
    })
}
