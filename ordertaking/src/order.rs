//! Order shapes at each stage of the pipeline.
//!
//! The pipeline is a sequence of data refinements: an [`UnvalidatedOrder`]
//! made of primitives comes in, the validation stage turns it into a
//! [`ValidatedOrder`], and the pricing stage turns that into a
//! [`PricedOrder`]. Each shape is only produced by its stage, so holding a
//! value of a later shape proves the earlier stages ran.

use crate::types::{
    BillingAmount, City, CustomerName, EmailAddress, OrderId, OrderLineId, OrderQuantity, Price,
    ProductCode, Street, ZipCode,
};
use serde::{Deserialize, Serialize};

/// A raw address as received from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnvalidatedAddress {
    /// Street line, unchecked.
    pub street: String,
    /// City, unchecked.
    pub city: String,
    /// Zip code, unchecked.
    pub zip_code: String,
}

/// Raw customer details as received from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnvalidatedCustomerInfo {
    /// First name, unchecked.
    pub first_name: String,
    /// Last name, unchecked.
    pub last_name: String,
    /// Email address, unchecked.
    pub email_address: String,
}

/// A raw order line as received from the outside world.
#[derive(Debug, Clone, PartialEq)]
pub struct UnvalidatedOrderLine {
    /// Line identifier, unchecked.
    pub id: String,
    /// Product code, unchecked.
    pub product_code: String,
    /// Quantity as a plain number; its meaning depends on the product.
    pub quantity: f64,
}

/// A whole order in primitive form, the input to the PlaceOrder workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct UnvalidatedOrder {
    /// Order identifier, unchecked.
    pub order_id: String,
    /// Customer details, unchecked.
    pub customer_info: UnvalidatedCustomerInfo,
    /// Where to ship, unchecked.
    pub shipping_address: UnvalidatedAddress,
    /// Where to bill, unchecked.
    pub billing_address: UnvalidatedAddress,
    /// The order lines, unchecked. May be empty here; validation rejects that.
    pub lines: Vec<UnvalidatedOrderLine>,
}

/// A validated postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    pub street: Street,
    /// City.
    pub city: City,
    /// Zip code.
    pub zip_code: ZipCode,
}

/// A customer's validated name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalName {
    /// First name.
    pub first_name: CustomerName,
    /// Last name.
    pub last_name: CustomerName,
}

/// Validated customer details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// The customer's name.
    pub name: PersonalName,
    /// Where acknowledgments are sent.
    pub email_address: EmailAddress,
}

/// A validated order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Line identifier.
    pub id: OrderLineId,
    /// The product ordered.
    pub product_code: ProductCode,
    /// How much of it, in the variant the product dictates.
    pub quantity: OrderQuantity,
}

/// A structurally valid order, produced only by the validation stage.
///
/// Invariant: `lines` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedOrder {
    /// Order identifier.
    pub id: OrderId,
    /// Validated customer details.
    pub customer_info: CustomerInfo,
    /// Where to ship.
    pub shipping_address: Address,
    /// Where to bill.
    pub billing_address: Address,
    /// The validated lines, at least one.
    pub lines: Vec<OrderLine>,
}

/// An order line with its computed line price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOrderLine {
    /// Line identifier.
    pub id: OrderLineId,
    /// The product ordered.
    pub product_code: ProductCode,
    /// How much of it.
    pub quantity: OrderQuantity,
    /// The line total: unit price times quantity.
    pub price: Price,
}

/// A priced order, produced only by the pricing stage.
///
/// Invariant: `amount_to_bill` equals the sum of the line prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedOrder {
    /// Order identifier.
    pub id: OrderId,
    /// Validated customer details.
    pub customer_info: CustomerInfo,
    /// Where to ship.
    pub shipping_address: Address,
    /// Where to bill.
    pub billing_address: Address,
    /// The priced lines, at least one.
    pub lines: Vec<PricedOrderLine>,
    /// The order total.
    pub amount_to_bill: BillingAmount,
}
