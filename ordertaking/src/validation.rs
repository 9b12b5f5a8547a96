//! The validation stage: `UnvalidatedOrder` → `ValidatedOrder`.
//!
//! Every field is parsed through its smart constructor, the addresses are
//! confirmed with the address collaborator, and every product code is
//! confirmed with the catalog collaborator. Violations across independent
//! fields, addresses and lines are accumulated and reported together; only
//! a transport failure from a collaborator aborts immediately, because
//! nothing useful can be said about the rest of the order once a service is
//! unreachable.

use crate::errors::{FieldViolation, RemoteServiceError, ValidateOrderError, ValidationError};
use crate::order::{
    Address, CustomerInfo, OrderLine, PersonalName, UnvalidatedAddress, UnvalidatedCustomerInfo,
    UnvalidatedOrder, UnvalidatedOrderLine, ValidatedOrder,
};
use crate::services::{AddressCheckError, CheckAddressExists, CheckProductCodeExists};
use crate::types::{
    City, CustomerName, EmailAddress, OrderId, OrderLineId, OrderQuantity, ProductCode, Street,
    ZipCode,
};
use std::fmt::Display;

/// Validates a raw order into a [`ValidatedOrder`].
///
/// All violations found are returned together in one [`ValidationError`];
/// a remote failure of the address service aborts with
/// [`ValidateOrderError::Remote`].
pub async fn validate_order(
    address_checker: &dyn CheckAddressExists,
    product_catalog: &dyn CheckProductCodeExists,
    order: &UnvalidatedOrder,
) -> Result<ValidatedOrder, ValidateOrderError> {
    let mut violations = Vec::new();

    let id = collect(
        &mut violations,
        "orderId",
        OrderId::try_new(order.order_id.clone()),
    );
    let customer_info = validate_customer_info(&mut violations, &order.customer_info);
    let shipping_address = validate_address(
        address_checker,
        &mut violations,
        "shippingAddress",
        &order.shipping_address,
    )
    .await?;
    let billing_address = validate_address(
        address_checker,
        &mut violations,
        "billingAddress",
        &order.billing_address,
    )
    .await?;
    let lines = validate_lines(product_catalog, &mut violations, &order.lines);

    match (id, customer_info, shipping_address, billing_address) {
        (Some(id), Some(customer_info), Some(shipping_address), Some(billing_address))
            if violations.is_empty() =>
        {
            Ok(ValidatedOrder {
                id,
                customer_info,
                shipping_address,
                billing_address,
                lines,
            })
        }
        // A missing value always recorded a violation, so this arm never
        // sees an empty list.
        _ => Err(ValidationError::new(violations).into()),
    }
}

/// Records the error of a failed parse under the given field path.
fn collect<T, E: Display>(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    parsed: Result<T, E>,
) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(error) => {
            violations.push(FieldViolation::new(field, error.to_string()));
            None
        }
    }
}

fn validate_customer_info(
    violations: &mut Vec<FieldViolation>,
    customer: &UnvalidatedCustomerInfo,
) -> Option<CustomerInfo> {
    let first_name = collect(
        violations,
        "customerInfo.firstName",
        CustomerName::try_new(customer.first_name.clone()),
    );
    let last_name = collect(
        violations,
        "customerInfo.lastName",
        CustomerName::try_new(customer.last_name.clone()),
    );
    let email_address = collect(
        violations,
        "customerInfo.emailAddress",
        EmailAddress::try_new(customer.email_address.clone()),
    );

    match (first_name, last_name, email_address) {
        (Some(first_name), Some(last_name), Some(email_address)) => Some(CustomerInfo {
            name: PersonalName {
                first_name,
                last_name,
            },
            email_address,
        }),
        _ => None,
    }
}

/// Parses the primitive shape, then asks the address service whether the
/// address exists. An unknown address is a violation on the whole address
/// field; a transport failure aborts validation.
async fn validate_address(
    address_checker: &dyn CheckAddressExists,
    violations: &mut Vec<FieldViolation>,
    field: &str,
    address: &UnvalidatedAddress,
) -> Result<Option<Address>, RemoteServiceError> {
    let street = collect(
        violations,
        &format!("{field}.street"),
        Street::try_new(address.street.clone()),
    );
    let city = collect(
        violations,
        &format!("{field}.city"),
        City::try_new(address.city.clone()),
    );
    let zip_code = collect(
        violations,
        &format!("{field}.zipCode"),
        ZipCode::try_new(address.zip_code.clone()),
    );

    let (Some(street), Some(city), Some(zip_code)) = (street, city, zip_code) else {
        return Ok(None);
    };

    match address_checker.check_address_exists(address).await {
        Ok(_checked) => Ok(Some(Address {
            street,
            city,
            zip_code,
        })),
        Err(AddressCheckError::UnknownAddress) => {
            violations.push(FieldViolation::new(
                field,
                "address is not known to the address service",
            ));
            Ok(None)
        }
        Err(AddressCheckError::Remote(error)) => Err(error),
    }
}

fn validate_lines(
    product_catalog: &dyn CheckProductCodeExists,
    violations: &mut Vec<FieldViolation>,
    lines: &[UnvalidatedOrderLine],
) -> Vec<OrderLine> {
    if lines.is_empty() {
        violations.push(FieldViolation::new(
            "lines",
            "an order must contain at least one line",
        ));
        return Vec::new();
    }

    let mut validated = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let id = collect(
            violations,
            &format!("lines[{index}].orderLineId"),
            OrderLineId::try_new(line.id.clone()),
        );
        let product_code = validate_product_code(product_catalog, violations, index, line);
        let quantity = product_code.as_ref().and_then(|code| {
            collect(
                violations,
                &format!("lines[{index}].quantity"),
                OrderQuantity::for_product(code, line.quantity),
            )
        });

        if let (Some(id), Some(product_code), Some(quantity)) = (id, product_code, quantity) {
            validated.push(OrderLine {
                id,
                product_code,
                quantity,
            });
        }
    }
    validated
}

fn validate_product_code(
    product_catalog: &dyn CheckProductCodeExists,
    violations: &mut Vec<FieldViolation>,
    index: usize,
    line: &UnvalidatedOrderLine,
) -> Option<ProductCode> {
    let field = format!("lines[{index}].productCode");
    let product_code = collect(violations, &field, ProductCode::parse(&line.product_code))?;

    if product_catalog.product_code_exists(&product_code) {
        Some(product_code)
    } else {
        violations.push(FieldViolation::new(
            field,
            format!("unknown product code {product_code}"),
        ));
        None
    }
}
