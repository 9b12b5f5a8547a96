//! Error types for the ship-order workflow.

use thiserror::Error;

/// How shipping an order can fail.
///
/// Shape validation here is fail-fast: the input is a translation of an
/// order the upstream context already validated, so the first inconsistency
/// indicates a translation bug rather than bad user input, and one precise
/// error is worth more than a list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShipOrderError {
    /// A translated field does not fit the shipping vocabulary.
    #[error("invalid shipment field {field}: {message}")]
    InvalidShipment {
        /// Which field is inconsistent.
        field: String,
        /// What rule it violated.
        message: String,
    },
    /// A shipment cannot ship nothing.
    #[error("shipment has no items")]
    NoItems,
    /// The order-shipped channel is gone; nothing downstream can hear us.
    #[error(transparent)]
    Publish(#[from] eventbus::PublishError),
}

impl ShipOrderError {
    /// Creates a field-level shipment error.
    pub fn invalid(field: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidShipment {
            field: field.into(),
            message: message.to_string(),
        }
    }
}
