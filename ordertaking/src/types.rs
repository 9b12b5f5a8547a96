//! Value types for the order-taking context.
//!
//! Every constrained value is obtained through a smart constructor, following
//! the "parse, don't validate" principle: once a value exists it is valid,
//! and no consumer re-checks business rules. The string and number wrappers
//! are defined with `nutype`; the monetary types are hand-rolled over
//! [`Decimal`] because money needs arithmetic that preserves the invariants.

use nutype::nutype;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// An order identifier supplied by the caller.
///
/// Non-empty, trimmed, at most 50 characters.
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
pub struct OrderId(String);

/// An identifier for a single line within an order.
#[nutype(
    sanitize(trim),
    validate(not_empty),
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
pub struct OrderLineId(String);

/// A customer's first or last name, 1 to 50 characters.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 50),
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
pub struct CustomerName(String);

/// A customer email address.
///
/// The pattern is deliberately loose: one `@` with something on both sides.
/// Deliverability is the acknowledgment sender's problem, not the type's.
#[nutype(
    sanitize(trim),
    validate(not_empty, regex = r"^[^@]+@[^@]+$"),
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
pub struct EmailAddress(String);

/// A street line of an address.
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

/// A city name.
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

/// A Japanese-style zip code: three digits, optional hyphen, four digits.
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
pub struct ZipCode(String);

/// A widget product code: `W` followed by four digits.
#[nutype(
    sanitize(trim),
    validate(regex = r"^W\d{4}$"),
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
pub struct WidgetCode(String);

/// A gizmo product code: `G` followed by three digits.
#[nutype(
    sanitize(trim),
    validate(regex = r"^G\d{3}$"),
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
pub struct GizmoCode(String);

/// A product code, one of the two catalog families.
///
/// The variant tag decides which [`OrderQuantity`] variant a line may carry:
/// widgets are counted in units, gizmos are weighed in kilograms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductCode {
    /// A widget, counted in whole units.
    Widget(WidgetCode),
    /// A gizmo, weighed in kilograms.
    Gizmo(GizmoCode),
}

impl ProductCode {
    /// Parses a raw code against the widget and gizmo patterns.
    pub fn parse(raw: &str) -> Result<Self, ProductCodeError> {
        if let Ok(widget) = WidgetCode::try_new(raw) {
            return Ok(Self::Widget(widget));
        }
        if let Ok(gizmo) = GizmoCode::try_new(raw) {
            return Ok(Self::Gizmo(gizmo));
        }
        Err(ProductCodeError::Unrecognized(raw.trim().to_string()))
    }

    /// The raw code as text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Widget(code) => code.as_ref(),
            Self::Gizmo(code) => code.as_ref(),
        }
    }
}

impl Display for ProductCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced when a raw product code matches neither family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductCodeError {
    /// The code matches neither `W\d{4}` nor `G\d{3}`.
    #[error("product code {0:?} matches neither the widget nor the gizmo format")]
    Unrecognized(String),
}

/// A whole-unit quantity, 1 to 1000.
#[nutype(
    validate(greater_or_equal = 1, less_or_equal = 1000),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize,
        TryFrom
    )
)]
pub struct UnitQuantity(u32);

/// A weight in kilograms, 0.05 to 100.0.
#[nutype(
    validate(finite, greater_or_equal = 0.05, less_or_equal = 100.0),
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
pub struct KilogramQuantity(f64);

/// The quantity on an order line.
///
/// Which variant is allowed is dictated by the product code's tag; use
/// [`OrderQuantity::for_product`] so the dispatch cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderQuantity {
    /// Whole units, for widgets.
    Unit(UnitQuantity),
    /// Kilograms, for gizmos.
    Kilogram(KilogramQuantity),
}

impl OrderQuantity {
    /// Constructs the quantity variant dictated by the product code's tag.
    ///
    /// Widget lines take a whole-unit quantity, so a fractional raw amount
    /// is rejected before the range check. Gizmo lines take kilograms.
    pub fn for_product(product_code: &ProductCode, amount: f64) -> Result<Self, OrderQuantityError> {
        match product_code {
            ProductCode::Widget(_) => {
                if amount.fract() != 0.0 {
                    return Err(OrderQuantityError::FractionalUnits(amount));
                }
                let units = UnitQuantity::try_new(amount as u32)?;
                Ok(Self::Unit(units))
            }
            ProductCode::Gizmo(_) => {
                let kilograms = KilogramQuantity::try_new(amount)?;
                Ok(Self::Kilogram(kilograms))
            }
        }
    }

    /// The quantity as a plain number, losing the unit tag.
    pub fn amount(&self) -> f64 {
        match self {
            Self::Unit(units) => f64::from(u32::from(*units)),
            Self::Kilogram(kilograms) => f64::from(*kilograms),
        }
    }
}

impl Display for OrderQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit(units) => write!(f, "{units}"),
            Self::Kilogram(kilograms) => write!(f, "{kilograms}kg"),
        }
    }
}

/// Error produced when a raw quantity does not fit its product's variant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderQuantityError {
    /// Widget quantities are whole units.
    #[error("widget quantities are whole units, got {0}")]
    FractionalUnits(f64),
    /// The unit count is outside 1..=1000.
    #[error(transparent)]
    Unit(#[from] UnitQuantityError),
    /// The weight is outside 0.05..=100.0 kilograms.
    #[error(transparent)]
    Kilogram(#[from] KilogramQuantityError),
}

/// A non-negative price.
///
/// Covers both a unit price from the catalog and a computed line price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Creates a price from a decimal amount.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// The zero price.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal amount.
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Computes a line price: this unit price multiplied by a quantity.
    ///
    /// Kilogram quantities are converted to decimal before multiplying;
    /// the conversion only fails for non-finite values, which the quantity
    /// type already excludes, but the error is surfaced rather than assumed
    /// away.
    pub fn multiply_by(&self, quantity: &OrderQuantity) -> Result<Self, PriceError> {
        let factor = match quantity {
            OrderQuantity::Unit(units) => Decimal::from(u32::from(*units)),
            OrderQuantity::Kilogram(kilograms) => {
                let raw = f64::from(*kilograms);
                Decimal::try_from(raw).map_err(|_| PriceError::UnrepresentableQuantity(raw))?
            }
        };
        Self::new(self.0 * factor)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error produced by [`Price`] construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    /// Prices cannot be negative.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The quantity has no decimal representation.
    #[error("quantity {0} is not representable as a decimal")]
    UnrepresentableQuantity(f64),
}

/// The non-negative total an order bills for: the sum of its line prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillingAmount(Decimal);

impl BillingAmount {
    /// Creates a billing amount from a decimal.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Totals a set of line prices.
    ///
    /// A sum of non-negative prices is non-negative, so this cannot fail.
    pub fn sum<'a>(prices: impl IntoIterator<Item = &'a Price>) -> Self {
        Self(prices.into_iter().map(Price::amount).sum())
    }

    /// The underlying decimal amount.
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether there is anything to bill at all.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Display for BillingAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_id_is_trimmed_and_bounded() {
        let id = OrderId::try_new("  order-1  ").unwrap();
        assert_eq!(id.as_ref(), "order-1");

        assert!(OrderId::try_new("").is_err());
        assert!(OrderId::try_new("   ").is_err());
        assert!(OrderId::try_new("x".repeat(51)).is_err());
        assert!(OrderId::try_new("x".repeat(50)).is_ok());
    }

    #[test]
    fn constructing_the_same_valid_value_twice_yields_equal_results() {
        let first = OrderId::try_new("order-1").unwrap();
        let second = OrderId::try_new("order-1").unwrap();
        assert_eq!(first, second);

        let re_parsed = OrderId::try_new(first.as_ref()).unwrap();
        assert_eq!(first, re_parsed);
    }

    #[test]
    fn email_needs_one_at_sign_with_both_sides() {
        assert!(EmailAddress::try_new("test@example.com").is_ok());
        assert!(EmailAddress::try_new("a@b").is_ok());
        assert!(EmailAddress::try_new("invalid").is_err());
        assert!(EmailAddress::try_new("@example.com").is_err());
        assert!(EmailAddress::try_new("test@").is_err());
    }

    #[test]
    fn zip_code_allows_an_optional_hyphen() {
        assert!(ZipCode::try_new("150-0001").is_ok());
        assert!(ZipCode::try_new("1500001").is_ok());
        assert!(ZipCode::try_new("ABCDE").is_err());
        assert!(ZipCode::try_new("15-00001").is_err());
        assert!(ZipCode::try_new("150-001").is_err());
    }

    #[test]
    fn product_code_parses_both_families() {
        assert!(matches!(
            ProductCode::parse("W1234"),
            Ok(ProductCode::Widget(_))
        ));
        assert!(matches!(ProductCode::parse("G123"), Ok(ProductCode::Gizmo(_))));
    }

    #[test]
    fn product_code_rejects_everything_else() {
        for raw in ["X9999", "W123", "W12345", "G1234", "G12", "w1234", ""] {
            assert!(ProductCode::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn widget_lines_take_whole_units_in_range() {
        let widget = ProductCode::parse("W1234").unwrap();

        assert!(matches!(
            OrderQuantity::for_product(&widget, 1.0),
            Ok(OrderQuantity::Unit(_))
        ));
        assert!(matches!(
            OrderQuantity::for_product(&widget, 1000.0),
            Ok(OrderQuantity::Unit(_))
        ));
        assert!(OrderQuantity::for_product(&widget, 0.0).is_err());
        assert!(OrderQuantity::for_product(&widget, 1001.0).is_err());
        assert!(matches!(
            OrderQuantity::for_product(&widget, 2.5),
            Err(OrderQuantityError::FractionalUnits(_))
        ));
    }

    #[test]
    fn gizmo_lines_take_kilograms_in_range() {
        let gizmo = ProductCode::parse("G123").unwrap();

        assert!(matches!(
            OrderQuantity::for_product(&gizmo, 0.05),
            Ok(OrderQuantity::Kilogram(_))
        ));
        assert!(matches!(
            OrderQuantity::for_product(&gizmo, 100.0),
            Ok(OrderQuantity::Kilogram(_))
        ));
        assert!(OrderQuantity::for_product(&gizmo, 0.04).is_err());
        assert!(OrderQuantity::for_product(&gizmo, 100.5).is_err());
        assert!(OrderQuantity::for_product(&gizmo, f64::NAN).is_err());
    }

    #[test]
    fn price_rejects_negative_amounts() {
        assert!(Price::new(dec!(0)).is_ok());
        assert!(Price::new(dec!(3000)).is_ok());
        assert!(Price::new(dec!(-1)).is_err());
    }

    #[test]
    fn line_price_is_unit_price_times_quantity() {
        let widget = ProductCode::parse("W1234").unwrap();
        let unit_price = Price::new(dec!(3000)).unwrap();
        let quantity = OrderQuantity::for_product(&widget, 2.0).unwrap();

        let line_price = unit_price.multiply_by(&quantity).unwrap();
        assert_eq!(line_price.amount(), dec!(6000));

        let gizmo = ProductCode::parse("G123").unwrap();
        let kilo_price = Price::new(dec!(100)).unwrap();
        let weight = OrderQuantity::for_product(&gizmo, 2.5).unwrap();

        let line_price = kilo_price.multiply_by(&weight).unwrap();
        assert_eq!(line_price.amount(), dec!(250));
    }

    #[test]
    fn billing_amount_totals_prices() {
        let prices = [
            Price::new(dec!(6000)).unwrap(),
            Price::new(dec!(4500)).unwrap(),
        ];
        let total = BillingAmount::sum(prices.iter());
        assert_eq!(total.amount(), dec!(10500));
        assert!(!total.is_zero());

        assert!(BillingAmount::sum(std::iter::empty::<&Price>()).is_zero());
    }

    proptest! {
        #[test]
        fn prop_widget_quantities_accept_exactly_1_to_1000(raw in 1u32..=1000) {
            let widget = ProductCode::parse("W0001").unwrap();
            let quantity = OrderQuantity::for_product(&widget, f64::from(raw)).unwrap();
            prop_assert!(matches!(quantity, OrderQuantity::Unit(_)));
            prop_assert_eq!(quantity.amount(), f64::from(raw));
        }

        #[test]
        fn prop_gizmo_quantities_accept_exactly_range(raw in 0.05f64..=100.0) {
            let gizmo = ProductCode::parse("G001").unwrap();
            let quantity = OrderQuantity::for_product(&gizmo, raw).unwrap();
            prop_assert!(matches!(quantity, OrderQuantity::Kilogram(_)));
        }

        #[test]
        fn prop_out_of_range_unit_quantities_fail(raw in 1001u32..100_000) {
            let widget = ProductCode::parse("W0001").unwrap();
            prop_assert!(OrderQuantity::for_product(&widget, f64::from(raw)).is_err());
        }

        #[test]
        fn prop_price_construction_is_idempotent(cents in 0i64..10_000_000) {
            let amount = Decimal::new(cents, 2);
            let first = Price::new(amount).unwrap();
            let second = Price::new(first.amount()).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
