//! Wire DTOs for the workflow's boundary.
//!
//! These are the JSON shapes a transport layer (HTTP or otherwise) would
//! exchange: camelCase field names, primitives only on the way in, and a
//! flat `{code, message}` shape for errors. Converting an input DTO into an
//! [`UnvalidatedOrder`] never fails and never validates; that is the
//! pipeline's job.

use crate::errors::PlaceOrderError;
use crate::events::{AcknowledgmentSent, BillableOrderPlaced, OrderPlaced, PlaceOrderEvent};
use crate::order::{
    Address, CustomerInfo, PricedOrderLine, UnvalidatedAddress, UnvalidatedCustomerInfo,
    UnvalidatedOrder, UnvalidatedOrderLine,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer details as they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfoDto {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email_address: String,
}

/// An address as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// Zip code.
    pub zip_code: String,
}

/// One line of the order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormLineDto {
    /// Line identifier.
    pub order_line_id: String,
    /// Product code.
    pub product_code: String,
    /// Quantity as a plain number.
    pub quantity: f64,
}

/// The order form: the input DTO of the PlaceOrder boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormDto {
    /// Order identifier.
    pub order_id: String,
    /// Customer details.
    pub customer_info: CustomerInfoDto,
    /// Where to ship.
    pub shipping_address: AddressDto,
    /// Where to bill.
    pub billing_address: AddressDto,
    /// The order lines.
    pub lines: Vec<OrderFormLineDto>,
}

impl From<OrderFormDto> for UnvalidatedOrder {
    fn from(dto: OrderFormDto) -> Self {
        Self {
            order_id: dto.order_id,
            customer_info: UnvalidatedCustomerInfo {
                first_name: dto.customer_info.first_name,
                last_name: dto.customer_info.last_name,
                email_address: dto.customer_info.email_address,
            },
            shipping_address: dto.shipping_address.into(),
            billing_address: dto.billing_address.into(),
            lines: dto
                .lines
                .into_iter()
                .map(|line| UnvalidatedOrderLine {
                    id: line.order_line_id,
                    product_code: line.product_code,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

impl From<AddressDto> for UnvalidatedAddress {
    fn from(dto: AddressDto) -> Self {
        Self {
            street: dto.street,
            city: dto.city,
            zip_code: dto.zip_code,
        }
    }
}

impl From<&Address> for AddressDto {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.to_string(),
            city: address.city.to_string(),
            zip_code: address.zip_code.to_string(),
        }
    }
}

impl From<&CustomerInfo> for CustomerInfoDto {
    fn from(customer: &CustomerInfo) -> Self {
        Self {
            first_name: customer.name.first_name.to_string(),
            last_name: customer.name.last_name.to_string(),
            email_address: customer.email_address.to_string(),
        }
    }
}

/// A priced line as it appears in an event DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedOrderLineDto {
    /// Line identifier.
    pub order_line_id: String,
    /// Product code.
    pub product_code: String,
    /// Quantity as a plain number.
    pub quantity: f64,
    /// The line total.
    pub line_price: Decimal,
}

impl From<&PricedOrderLine> for PricedOrderLineDto {
    fn from(line: &PricedOrderLine) -> Self {
        Self {
            order_line_id: line.id.to_string(),
            product_code: line.product_code.to_string(),
            quantity: line.quantity.amount(),
            line_price: line.price.amount(),
        }
    }
}

/// A published workflow event as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlaceOrderEventDto {
    /// The customer was notified.
    #[serde(rename_all = "camelCase")]
    AcknowledgmentSent {
        /// Order identifier.
        order_id: String,
        /// Where the acknowledgment went.
        email_address: String,
    },
    /// The order was placed.
    #[serde(rename_all = "camelCase")]
    OrderPlaced {
        /// Order identifier.
        order_id: String,
        /// Customer details.
        customer_info: CustomerInfoDto,
        /// Where it ships to.
        shipping_address: AddressDto,
        /// Where it bills to.
        billing_address: AddressDto,
        /// The priced lines.
        lines: Vec<PricedOrderLineDto>,
        /// The order total.
        amount_to_bill: Decimal,
    },
    /// The order has a positive amount to bill.
    #[serde(rename_all = "camelCase")]
    BillableOrderPlaced {
        /// Order identifier.
        order_id: String,
        /// Where the bill goes.
        billing_address: AddressDto,
        /// How much to bill.
        amount_to_bill: Decimal,
    },
}

impl From<&PlaceOrderEvent> for PlaceOrderEventDto {
    fn from(event: &PlaceOrderEvent) -> Self {
        match event {
            PlaceOrderEvent::AcknowledgmentSent(AcknowledgmentSent {
                order_id,
                email_address,
            }) => Self::AcknowledgmentSent {
                order_id: order_id.to_string(),
                email_address: email_address.to_string(),
            },
            PlaceOrderEvent::OrderPlaced(OrderPlaced {
                order_id,
                customer_info,
                shipping_address,
                billing_address,
                lines,
                amount_to_bill,
            }) => Self::OrderPlaced {
                order_id: order_id.to_string(),
                customer_info: customer_info.into(),
                shipping_address: shipping_address.into(),
                billing_address: billing_address.into(),
                lines: lines.iter().map(PricedOrderLineDto::from).collect(),
                amount_to_bill: amount_to_bill.amount(),
            },
            PlaceOrderEvent::BillableOrderPlaced(BillableOrderPlaced {
                order_id,
                billing_address,
                amount_to_bill,
            }) => Self::BillableOrderPlaced {
                order_id: order_id.to_string(),
                billing_address: billing_address.into(),
                amount_to_bill: amount_to_bill.amount(),
            },
        }
    }
}

/// The error shape a boundary renders for a failed workflow (HTTP 400).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderErrorDto {
    /// One of `ValidationError`, `PricingError`, `RemoteServiceError`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl From<&PlaceOrderError> for PlaceOrderErrorDto {
    fn from(error: &PlaceOrderError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{FieldViolation, ValidationError};
    use crate::testing::sample_priced_order;
    use serde_json::json;

    #[test]
    fn an_order_form_parses_from_json_and_converts_losslessly() {
        let json = json!({
            "orderId": "order-1",
            "customerInfo": {
                "firstName": "Hanako",
                "lastName": "Yamada",
                "emailAddress": "hanako@example.com"
            },
            "shippingAddress": {
                "street": "1-2-3 Shibuya",
                "city": "Shibuya",
                "zipCode": "150-0001"
            },
            "billingAddress": {
                "street": "1-2-3 Shibuya",
                "city": "Shibuya",
                "zipCode": "150-0001"
            },
            "lines": [
                { "orderLineId": "line-1", "productCode": "W1234", "quantity": 2.0 }
            ]
        });

        let form: OrderFormDto = serde_json::from_value(json).unwrap();
        let order = UnvalidatedOrder::from(form);

        assert_eq!(order.order_id, "order-1");
        assert_eq!(order.customer_info.first_name, "Hanako");
        assert_eq!(order.lines.len(), 1);
        assert_eq!(order.lines[0].product_code, "W1234");
    }

    #[test]
    fn event_dtos_keep_the_type_tag_and_camel_case_fields() {
        let order = sample_priced_order();
        let event = PlaceOrderEvent::OrderPlaced(OrderPlaced::from(order));

        let dto = PlaceOrderEventDto::from(&event);
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["type"], "OrderPlaced");
        assert!(json["amountToBill"].is_string() || json["amountToBill"].is_number());
        assert_eq!(json["lines"][0]["productCode"], "W1234");
    }

    #[test]
    fn error_dtos_carry_the_stable_code() {
        let error = PlaceOrderError::Validation(ValidationError::new(vec![FieldViolation::new(
            "shippingAddress.zipCode",
            "must match the zip format",
        )]));

        let dto = PlaceOrderErrorDto::from(&error);
        assert_eq!(dto.code, "ValidationError");
        assert!(dto.message.contains("shippingAddress.zipCode"));
    }
}
