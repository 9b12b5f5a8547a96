//! The anti-corruption layer: order-context events into shipping vocabulary.
//!
//! Translation happens in two steps. First the published `OrderPlaced`
//! event is flattened into a primitive-shaped [`ShipOrderCommand`] — this is
//! where the order context's vocabulary ends: ids become references, the
//! split name becomes one recipient line, and line prices are dropped
//! because shipping does not bill anyone. Then the command is parsed into a
//! [`PendingShipment`] through shipping's own smart constructors.

use crate::errors::ShipOrderError;
use crate::shipment::PendingShipment;
use crate::types::{
    City, ItemQuantity, OrderReference, PostalCode, ProductRef, RecipientName, ShipmentId,
    ShipmentItem, ShippingAddress, Street,
};
use ordertaking::events::OrderPlaced;

/// A destination address in primitive form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAddress {
    /// Street line, untranslated.
    pub street: String,
    /// City, untranslated.
    pub city: String,
    /// Postal code, untranslated.
    pub postal_code: String,
}

/// One item to ship, in primitive form.
#[derive(Debug, Clone, PartialEq)]
pub struct RawShipmentItem {
    /// The product reference.
    pub product: String,
    /// The amount, unit-less.
    pub quantity: f64,
}

/// The shipping context's input: what it takes to ship one order.
#[derive(Debug, Clone, PartialEq)]
pub struct ShipOrderCommand {
    /// The order to fulfill.
    pub order_reference: String,
    /// Who receives the shipment.
    pub recipient_name: String,
    /// Where it goes.
    pub address: RawAddress,
    /// What goes in the box.
    pub items: Vec<RawShipmentItem>,
}

impl ShipOrderCommand {
    /// Translates a published order event into shipping vocabulary.
    pub fn from_order_placed(event: &OrderPlaced) -> Self {
        let name = &event.customer_info.name;
        Self {
            order_reference: event.order_id.to_string(),
            recipient_name: format!("{} {}", name.first_name, name.last_name),
            address: RawAddress {
                street: event.shipping_address.street.to_string(),
                city: event.shipping_address.city.to_string(),
                postal_code: event.shipping_address.zip_code.to_string(),
            },
            items: event
                .lines
                .iter()
                .map(|line| RawShipmentItem {
                    product: line.product_code.to_string(),
                    quantity: line.quantity.amount(),
                })
                .collect(),
        }
    }

    /// Parses the command into a pending shipment, generating its id.
    ///
    /// Fails fast on the first inconsistent field; see
    /// [`ShipOrderError`] for why.
    pub fn into_pending(self) -> Result<PendingShipment, ShipOrderError> {
        if self.items.is_empty() {
            return Err(ShipOrderError::NoItems);
        }

        let order_reference = OrderReference::try_new(self.order_reference)
            .map_err(|e| ShipOrderError::invalid("orderReference", e))?;
        let recipient = RecipientName::try_new(self.recipient_name)
            .map_err(|e| ShipOrderError::invalid("recipientName", e))?;
        let address = ShippingAddress {
            street: Street::try_new(self.address.street)
                .map_err(|e| ShipOrderError::invalid("address.street", e))?,
            city: City::try_new(self.address.city)
                .map_err(|e| ShipOrderError::invalid("address.city", e))?,
            postal_code: PostalCode::try_new(self.address.postal_code)
                .map_err(|e| ShipOrderError::invalid("address.postalCode", e))?,
        };

        let mut items = Vec::with_capacity(self.items.len());
        for (index, item) in self.items.into_iter().enumerate() {
            items.push(ShipmentItem {
                product: ProductRef::try_new(item.product)
                    .map_err(|e| ShipOrderError::invalid(format!("items[{index}].product"), e))?,
                quantity: ItemQuantity::try_new(item.quantity)
                    .map_err(|e| ShipOrderError::invalid(format!("items[{index}].quantity"), e))?,
            });
        }

        Ok(PendingShipment {
            shipment_id: ShipmentId::generate(),
            order_reference,
            recipient,
            address,
            items,
        })
    }
}
