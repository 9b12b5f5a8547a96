//! Reusable fake collaborators and order fixtures.
//!
//! Available to this crate's own tests and, behind the `testing` feature,
//! to downstream crates' tests and demos. The fakes implement the same
//! traits the real clients would; nothing here touches the network.

use crate::errors::{PricingError, RemoteServiceError};
use crate::order::{
    Address, CustomerInfo, OrderLine, PersonalName, PricedOrder, PricedOrderLine,
    UnvalidatedAddress, UnvalidatedCustomerInfo, UnvalidatedOrder, UnvalidatedOrderLine,
    ValidatedOrder,
};
use crate::services::{
    AddressCheckError, CheckAddressExists, CheckProductCodeExists, CheckedAddress,
    CreateAcknowledgmentLetter, GetProductPrice, LetterContent, OrderAcknowledgment,
    SendAcknowledgment, SendOutcome,
};
use crate::types::{
    BillingAmount, City, CustomerName, EmailAddress, OrderId, OrderLineId, OrderQuantity, Price,
    ProductCode, Street, ZipCode,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// An address checker that accepts every address.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllAddresses;

#[async_trait]
impl CheckAddressExists for AcceptAllAddresses {
    async fn check_address_exists(
        &self,
        address: &UnvalidatedAddress,
    ) -> Result<CheckedAddress, AddressCheckError> {
        Ok(CheckedAddress::new(address.clone()))
    }
}

/// An address checker that reports every address as unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAllAddresses;

#[async_trait]
impl CheckAddressExists for RejectAllAddresses {
    async fn check_address_exists(
        &self,
        _address: &UnvalidatedAddress,
    ) -> Result<CheckedAddress, AddressCheckError> {
        Err(AddressCheckError::UnknownAddress)
    }
}

/// An address checker whose transport always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingAddressChecker;

#[async_trait]
impl CheckAddressExists for FailingAddressChecker {
    async fn check_address_exists(
        &self,
        _address: &UnvalidatedAddress,
    ) -> Result<CheckedAddress, AddressCheckError> {
        Err(AddressCheckError::Remote(RemoteServiceError::new(
            "address-service",
            "connection refused",
        )))
    }
}

/// A product catalog held in memory.
///
/// A code exists iff it has a price. Price lookups are counted so tests can
/// assert that validation failures short-circuit before pricing runs.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    prices: HashMap<String, Price>,
    lookups: AtomicUsize,
}

impl InMemoryProductCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product with a whole-number unit price.
    pub fn with_price(mut self, product_code: &str, amount: i64) -> Self {
        let price = Price::new(Decimal::from(amount)).expect("catalog prices are non-negative");
        self.prices.insert(product_code.to_string(), price);
        self
    }

    /// How many price lookups have been made.
    pub fn price_lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl CheckProductCodeExists for InMemoryProductCatalog {
    fn product_code_exists(&self, product_code: &ProductCode) -> bool {
        self.prices.contains_key(product_code.as_str())
    }
}

impl GetProductPrice for InMemoryProductCatalog {
    fn product_price(&self, product_code: &ProductCode) -> Result<Price, PricingError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.prices
            .get(product_code.as_str())
            .copied()
            .ok_or_else(|| PricingError::PriceLookup {
                product_code: product_code.to_string(),
                message: "not in catalog".to_string(),
            })
    }
}

/// A letter writer producing a plain-text rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextLetters;

impl CreateAcknowledgmentLetter for PlainTextLetters {
    fn create_letter(&self, order: &PricedOrder) -> LetterContent {
        LetterContent::new(format!(
            "Thank you for your order {}. We will bill {}.",
            order.id, order.amount_to_bill
        ))
    }
}

/// An acknowledgment sender that records every attempt and answers with a
/// fixed outcome.
#[derive(Debug)]
pub struct RecordingAcknowledgmentSender {
    outcome: SendOutcome,
    sent: Mutex<Vec<EmailAddress>>,
}

impl RecordingAcknowledgmentSender {
    /// A sender that confirms every delivery.
    pub fn confirming() -> Self {
        Self {
            outcome: SendOutcome::Sent,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A sender that declines every delivery.
    pub fn declining() -> Self {
        Self {
            outcome: SendOutcome::NotSent,
            sent: Mutex::new(Vec::new()),
        }
    }

    /// The addresses send attempts were made to, in order.
    pub fn sent_to(&self) -> Vec<EmailAddress> {
        self.sent.lock().expect("sender mutex poisoned").clone()
    }
}

#[async_trait]
impl SendAcknowledgment for RecordingAcknowledgmentSender {
    async fn send_acknowledgment(&self, acknowledgment: &OrderAcknowledgment) -> SendOutcome {
        self.sent
            .lock()
            .expect("sender mutex poisoned")
            .push(acknowledgment.email_address.clone());
        self.outcome
    }
}

/// The raw order most tests start from: one widget line (W1234 x2) and one
/// gizmo line (G123 x1).
pub fn sample_unvalidated_order() -> UnvalidatedOrder {
    UnvalidatedOrder {
        order_id: "order-1".to_string(),
        customer_info: UnvalidatedCustomerInfo {
            first_name: "Hanako".to_string(),
            last_name: "Yamada".to_string(),
            email_address: "hanako@example.com".to_string(),
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

fn sample_address() -> Address {
    Address {
        street: Street::try_new("1-2-3 Shibuya").expect("fixture street is valid"),
        city: City::try_new("Shibuya").expect("fixture city is valid"),
        zip_code: ZipCode::try_new("150-0001").expect("fixture zip is valid"),
    }
}

fn sample_customer_info() -> CustomerInfo {
    CustomerInfo {
        name: PersonalName {
            first_name: CustomerName::try_new("Hanako").expect("fixture name is valid"),
            last_name: CustomerName::try_new("Yamada").expect("fixture name is valid"),
        },
        email_address: EmailAddress::try_new("hanako@example.com").expect("fixture email is valid"),
    }
}

fn sample_lines() -> Vec<OrderLine> {
    let widget = ProductCode::parse("W1234").expect("fixture code is valid");
    let gizmo = ProductCode::parse("G123").expect("fixture code is valid");
    vec![
        OrderLine {
            id: OrderLineId::try_new("line-1").expect("fixture line id is valid"),
            quantity: OrderQuantity::for_product(&widget, 2.0).expect("fixture quantity is valid"),
            product_code: widget,
        },
        OrderLine {
            id: OrderLineId::try_new("line-2").expect("fixture line id is valid"),
            quantity: OrderQuantity::for_product(&gizmo, 1.0).expect("fixture quantity is valid"),
            product_code: gizmo,
        },
    ]
}

/// The validated counterpart of [`sample_unvalidated_order`].
pub fn sample_validated_order() -> ValidatedOrder {
    ValidatedOrder {
        id: OrderId::try_new("order-1").expect("fixture order id is valid"),
        customer_info: sample_customer_info(),
        shipping_address: sample_address(),
        billing_address: sample_address(),
        lines: sample_lines(),
    }
}

/// The sample order priced at 3000 per widget and 4500 per gizmo kilogram:
/// line totals 6000 and 4500, billing amount 10500.
pub fn sample_priced_order() -> PricedOrder {
    let order = sample_validated_order();
    let prices = [Decimal::from(6000), Decimal::from(4500)];
    let lines: Vec<PricedOrderLine> = order
        .lines
        .into_iter()
        .zip(prices)
        .map(|(line, amount)| PricedOrderLine {
            id: line.id,
            product_code: line.product_code,
            quantity: line.quantity,
            price: Price::new(amount).expect("fixture price is valid"),
        })
        .collect();
    let amount_to_bill = BillingAmount::sum(lines.iter().map(|line| &line.price));

    PricedOrder {
        id: order.id,
        customer_info: order.customer_info,
        shipping_address: order.shipping_address,
        billing_address: order.billing_address,
        lines,
        amount_to_bill,
    }
}

/// The sample order with every line free of charge.
pub fn zero_priced_order() -> PricedOrder {
    let mut order = sample_priced_order();
    for line in &mut order.lines {
        line.price = Price::zero();
    }
    order.amount_to_bill = BillingAmount::sum(order.lines.iter().map(|line| &line.price));
    order
}
