//! The PlaceOrder orchestrator.
//!
//! Sequences validate → price → acknowledge → compose as a short-circuiting
//! result chain: any validation or pricing failure is re-tagged into
//! [`PlaceOrderError`] and no later stage runs. On success every composed
//! event is published onto the order-event channel before the call returns;
//! on failure nothing is published.

use crate::acknowledgment::acknowledge_order;
use crate::command::PlaceOrderCommand;
use crate::errors::PlaceOrderError;
use crate::events::{compose_events, PlaceOrderEvent};
use crate::pricing::price_order;
use crate::services::{
    CheckAddressExists, CheckProductCodeExists, CreateAcknowledgmentLetter, GetProductPrice,
    SendAcknowledgment,
};
use crate::validation::validate_order;
use eventbus::EventPublisher;
use std::sync::Arc;
use tracing::{info, instrument};

/// The PlaceOrder workflow with its injected collaborators.
///
/// Construct one per process (or per test) and call
/// [`place_order`](Self::place_order) once per command. The workflow owns no
/// order state; everything in flight lives on the call stack of a single
/// invocation.
pub struct PlaceOrder {
    address_checker: Arc<dyn CheckAddressExists>,
    product_catalog: Arc<dyn CheckProductCodeExists>,
    pricing: Arc<dyn GetProductPrice>,
    letter_writer: Arc<dyn CreateAcknowledgmentLetter>,
    acknowledgment_sender: Arc<dyn SendAcknowledgment>,
    order_events: EventPublisher<PlaceOrderEvent>,
}

impl PlaceOrder {
    /// Wires the workflow to its collaborators and the order-event channel.
    pub fn new(
        address_checker: Arc<dyn CheckAddressExists>,
        product_catalog: Arc<dyn CheckProductCodeExists>,
        pricing: Arc<dyn GetProductPrice>,
        letter_writer: Arc<dyn CreateAcknowledgmentLetter>,
        acknowledgment_sender: Arc<dyn SendAcknowledgment>,
        order_events: EventPublisher<PlaceOrderEvent>,
    ) -> Self {
        Self {
            address_checker,
            product_catalog,
            pricing,
            letter_writer,
            acknowledgment_sender,
            order_events,
        }
    }

    /// Runs the pipeline for one command and publishes the produced events.
    #[instrument(
        skip(self, command),
        fields(order_id = %command.data.order_id, user_id = %command.user_id)
    )]
    pub async fn place_order(
        &self,
        command: PlaceOrderCommand,
    ) -> Result<Vec<PlaceOrderEvent>, PlaceOrderError> {
        let unvalidated = &command.data;

        let validated = validate_order(
            self.address_checker.as_ref(),
            self.product_catalog.as_ref(),
            unvalidated,
        )
        .await
        .map_err(PlaceOrderError::from)?;

        let priced = price_order(self.pricing.as_ref(), &validated)?;

        let acknowledgment = acknowledge_order(
            self.letter_writer.as_ref(),
            self.acknowledgment_sender.as_ref(),
            &priced,
        )
        .await;

        let events = compose_events(priced, acknowledgment);

        for event in &events {
            // The order channel lives for the whole process; losing it is an
            // unrecoverable infrastructure fault, not a workflow error.
            self.order_events
                .publish(event.clone())
                .await
                .expect("order event channel closed while placing an order");
        }

        info!(
            order_id = %unvalidated.order_id,
            user_id = %command.user_id,
            events = events.len(),
            "order placed"
        );

        Ok(events)
    }
}
