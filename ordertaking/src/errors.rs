//! Error types for the PlaceOrder workflow.
//!
//! The taxonomy the caller sees is a closed sum of three kinds:
//!
//! - [`ValidationError`] — a field was malformed or rejected; carries the
//!   field name and a description, never a generic message.
//! - [`PricingError`] — a price lookup or line-price computation failed.
//! - [`RemoteServiceError`] — a collaborator call failed transportally,
//!   distinct from "the collaborator checked and rejected the value".
//!
//! Each stage surfaces only its own kind; the orchestrator re-tags stage
//! errors into [`PlaceOrderError`] so callers match on exactly one sum.
//!
//! Reporting policy: validation accumulates every field violation across
//! independent fields, addresses and lines, and reports them together. Only
//! a remote-transport failure aborts validation early.

use crate::types::PriceError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// One field that violated one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Wire-style dotted path of the offending field, e.g.
    /// `shippingAddress.zipCode` or `lines[1].productCode`.
    pub field: String,
    /// What rule the value violated.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for a named field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The order was malformed or rejected; every violation found is listed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("order validation failed: {}", describe(.violations))]
pub struct ValidationError {
    /// All field violations found, in field order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Wraps the collected violations.
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Whether any violation names the given field path.
    pub fn mentions_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pricing failed for some line; there is no partial pricing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// The price collaborator had no price for a product.
    #[error("no price available for product {product_code}: {message}")]
    PriceLookup {
        /// The product whose lookup failed.
        product_code: String,
        /// The collaborator's explanation.
        message: String,
    },
    /// The line price could not be computed from the unit price.
    #[error("could not compute line price for product {product_code}")]
    LinePrice {
        /// The product whose line failed.
        product_code: String,
        /// The underlying arithmetic failure.
        #[source]
        source: PriceError,
    },
}

/// A collaborator call failed at the transport level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote service {service} failed: {message}")]
pub struct RemoteServiceError {
    /// Which collaborator failed.
    pub service: String,
    /// What went wrong.
    pub message: String,
}

impl RemoteServiceError {
    /// Creates a transport failure for a named collaborator.
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            message: message.into(),
        }
    }
}

/// Everything the validation stage can fail with.
///
/// The orchestrator splits this back into the caller-facing taxonomy:
/// `Invalid` becomes [`PlaceOrderError::Validation`], `Remote` becomes
/// [`PlaceOrderError::RemoteService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateOrderError {
    /// The order was malformed or rejected.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// An address or product collaborator failed transportally.
    #[error(transparent)]
    Remote(#[from] RemoteServiceError),
}

/// The single error sum a PlaceOrder caller sees.
///
/// Exactly one variant is populated per failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceOrderError {
    /// A field was malformed or rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A price lookup failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),
    /// A collaborator call failed transportally.
    #[error(transparent)]
    RemoteService(#[from] RemoteServiceError),
}

impl PlaceOrderError {
    /// The stable error code used at the wire boundary.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Pricing(_) => "PricingError",
            Self::RemoteService(_) => "RemoteServiceError",
        }
    }
}

impl From<ValidateOrderError> for PlaceOrderError {
    fn from(error: ValidateOrderError) -> Self {
        match error {
            ValidateOrderError::Invalid(e) => Self::Validation(e),
            ValidateOrderError::Remote(e) => Self::RemoteService(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let error = ValidationError::new(vec![
            FieldViolation::new("orderId", "must not be empty"),
            FieldViolation::new("shippingAddress.zipCode", "must match the zip format"),
        ]);

        let rendered = error.to_string();
        assert!(rendered.contains("orderId: must not be empty"));
        assert!(rendered.contains("shippingAddress.zipCode"));
        assert!(error.mentions_field("shippingAddress.zipCode"));
        assert!(!error.mentions_field("billingAddress.zipCode"));
    }

    #[test]
    fn stage_errors_re_tag_into_exactly_one_variant() {
        let invalid: PlaceOrderError =
            ValidateOrderError::from(ValidationError::new(vec![])).into();
        assert_eq!(invalid.code(), "ValidationError");

        let remote: PlaceOrderError =
            ValidateOrderError::from(RemoteServiceError::new("address", "timeout")).into();
        assert_eq!(remote.code(), "RemoteServiceError");

        let pricing: PlaceOrderError = PricingError::PriceLookup {
            product_code: "W1234".to_string(),
            message: "not in catalog".to_string(),
        }
        .into();
        assert_eq!(pricing.code(), "PricingError");
    }
}
