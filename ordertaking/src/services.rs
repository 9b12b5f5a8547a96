//! Injected collaborator interfaces.
//!
//! The workflow never talks to the outside world directly; every external
//! dependency is a trait injected at construction time, so tests substitute
//! fakes and deployments substitute real clients. The address check and the
//! acknowledgment send do I/O and are async; the product-existence check and
//! the price lookup run against a local catalog snapshot and stay
//! synchronous, the latter fallible, the former not.

use crate::errors::{PricingError, RemoteServiceError};
use crate::order::{PricedOrder, UnvalidatedAddress};
use crate::types::{EmailAddress, Price, ProductCode};
use async_trait::async_trait;
use thiserror::Error;

/// An address the address service has confirmed to exist.
///
/// Holding one proves the collaborator accepted the raw address; it carries
/// the accepted content so callers can parse it into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedAddress(UnvalidatedAddress);

impl CheckedAddress {
    /// Certifies a raw address. Only address-check implementations should
    /// call this.
    pub fn new(address: UnvalidatedAddress) -> Self {
        Self(address)
    }

    /// The accepted address content.
    pub fn as_unvalidated(&self) -> &UnvalidatedAddress {
        &self.0
    }
}

/// How an address check can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressCheckError {
    /// The service answered: this address does not exist.
    #[error("address is not known to the address service")]
    UnknownAddress,
    /// The service could not be reached or misbehaved.
    #[error(transparent)]
    Remote(#[from] RemoteServiceError),
}

/// Collaborator answering whether an address exists.
#[async_trait]
pub trait CheckAddressExists: Send + Sync {
    /// Checks a raw address against the address service.
    async fn check_address_exists(
        &self,
        address: &UnvalidatedAddress,
    ) -> Result<CheckedAddress, AddressCheckError>;
}

/// Collaborator answering whether a product code is in the catalog.
///
/// Runs against a local catalog snapshot and cannot fail.
pub trait CheckProductCodeExists: Send + Sync {
    /// Whether the catalog knows this product code.
    fn product_code_exists(&self, product_code: &ProductCode) -> bool;
}

/// Collaborator resolving a product code to its current unit price.
pub trait GetProductPrice: Send + Sync {
    /// Looks up the unit price for a product.
    fn product_price(&self, product_code: &ProductCode) -> Result<Price, PricingError>;
}

/// The rendered body of an acknowledgment letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterContent(String);

impl LetterContent {
    /// Wraps rendered letter content.
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// The rendered text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An acknowledgment ready to send: the letter plus its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAcknowledgment {
    /// Where to send it.
    pub email_address: EmailAddress,
    /// What to send.
    pub letter: LetterContent,
}

/// The outcome of an acknowledgment send attempt.
///
/// An outcome, not an error: a declined or failed send is business-as-usual
/// for the workflow, which treats it as "customer not notified".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The letter was delivered.
    Sent,
    /// The letter was not delivered.
    NotSent,
}

/// Collaborator rendering an acknowledgment letter for a priced order.
///
/// Pure and infallible: rendering consults nothing outside the order.
pub trait CreateAcknowledgmentLetter: Send + Sync {
    /// Renders the letter for an order.
    fn create_letter(&self, order: &PricedOrder) -> LetterContent;
}

/// Collaborator sending an acknowledgment letter.
#[async_trait]
pub trait SendAcknowledgment: Send + Sync {
    /// Attempts to deliver the acknowledgment.
    async fn send_acknowledgment(&self, acknowledgment: &OrderAcknowledgment) -> SendOutcome;
}
