//! Events published by the shipping context.

use crate::types::{OrderReference, ShipmentId, TrackingNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order left the warehouse.
///
/// This is the shipping context's wire contract towards whoever consumes
/// the order-shipped channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderShipped {
    /// The order that shipped, in the order context's reference form.
    pub order_id: OrderReference,
    /// The shipment that fulfills it.
    pub shipment_id: ShipmentId,
    /// When it shipped.
    pub shipped_at: DateTime<Utc>,
    /// The carrier's tracking number.
    pub tracking_number: TrackingNumber,
}
