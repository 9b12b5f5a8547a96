//! Value types of the shipping context.
//!
//! Shipping deliberately owns its whole vocabulary instead of importing the
//! order-taking types: the anti-corruption layer translates into these, so
//! a change of vocabulary upstream stays a translation concern. Everything
//! here is obtained through a validating constructor.

use nutype::nutype;
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shipment identifier.
///
/// Format: `SHP-{UPPERCASE_ALPHANUMERIC}`.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50, regex = r"^SHP-[A-Z0-9]+$"),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct ShipmentId(String);

impl ShipmentId {
    /// Generates a fresh shipment identifier.
    pub fn generate() -> Self {
        let uuid = Uuid::new_v4().simple().to_string().to_uppercase();
        Self::try_new(format!("SHP-{}", &uuid[..8])).expect("generated ShipmentId should be valid")
    }
}

/// The order this shipment fulfills, as referenced by the order context.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct OrderReference(String);

/// A carrier tracking number.
///
/// Format: `TRK-` followed by eight uppercase alphanumerics.
#[nutype(
    sanitize(trim),
    validate(not_empty, regex = r"^TRK-[A-Z0-9]{8}$"),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Generates a fresh tracking number.
    pub fn generate() -> Self {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(8)
            .map(|byte| char::from(byte).to_ascii_uppercase())
            .collect();
        Self::try_new(format!("TRK-{suffix}")).expect("generated TrackingNumber should be valid")
    }
}

/// The person a shipment is addressed to.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 100),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct RecipientName(String);

/// A reference to the product being shipped.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct ProductRef(String);

/// How much of a product a shipment item carries.
///
/// Shipping does not care about the order context's unit-versus-kilogram
/// distinction; a positive amount is enough to pack a box.
#[nutype(
    validate(finite, greater = 0.0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        PartialOrd,
        Display,
        Into,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct ItemQuantity(f64);

/// A street line in the shipping context.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct Street(String);

/// A city in the shipping context.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct City(String);

/// A postal code: three digits, optional hyphen, four digits.
#[nutype(
    sanitize(trim),
    validate(not_empty, regex = r"^\d{3}-?\d{4}$"),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct PostalCode(String);

/// Where a shipment goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Street line.
    pub street: Street,
    /// City.
    pub city: City,
    /// Postal code.
    pub postal_code: PostalCode,
}

/// One item in a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// What is being shipped.
    pub product: ProductRef,
    /// How much of it.
    pub quantity: ItemQuantity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_shipment_ids_are_valid_and_distinct() {
        let first = ShipmentId::generate();
        let second = ShipmentId::generate();

        assert!(first.as_ref().starts_with("SHP-"));
        assert_ne!(first, second);
    }

    #[test]
    fn generated_tracking_numbers_match_the_carrier_format() {
        for _ in 0..16 {
            let tracking = TrackingNumber::generate();
            assert_eq!(tracking.as_ref().len(), "TRK-".len() + 8);
            assert!(tracking.as_ref().starts_with("TRK-"));
        }
    }

    #[test]
    fn item_quantity_must_be_positive_and_finite() {
        assert!(ItemQuantity::try_new(0.5).is_ok());
        assert!(ItemQuantity::try_new(0.0).is_err());
        assert!(ItemQuantity::try_new(-1.0).is_err());
        assert!(ItemQuantity::try_new(f64::INFINITY).is_err());
    }

    #[test]
    fn postal_code_allows_an_optional_hyphen() {
        assert!(PostalCode::try_new("530-0001").is_ok());
        assert!(PostalCode::try_new("5300001").is_ok());
        assert!(PostalCode::try_new("ABCDE").is_err());
    }
}
