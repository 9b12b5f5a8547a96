//! The acknowledgment stage: notify the customer, best effort.
//!
//! This stage never fails the workflow. The letter is rendered locally and
//! handed to the send collaborator; if the send is declined or lost, the
//! customer simply is not notified and no event is produced. An order must
//! not fail over a notification issue.

use crate::events::AcknowledgmentSent;
use crate::order::PricedOrder;
use crate::services::{
    CreateAcknowledgmentLetter, OrderAcknowledgment, SendAcknowledgment, SendOutcome,
};
use tracing::warn;

/// Attempts to acknowledge a priced order to its customer.
///
/// Returns the event to publish when the send collaborator confirmed
/// delivery, `None` otherwise.
pub async fn acknowledge_order(
    letter_writer: &dyn CreateAcknowledgmentLetter,
    sender: &dyn SendAcknowledgment,
    order: &PricedOrder,
) -> Option<AcknowledgmentSent> {
    let letter = letter_writer.create_letter(order);
    let acknowledgment = OrderAcknowledgment {
        email_address: order.customer_info.email_address.clone(),
        letter,
    };

    match sender.send_acknowledgment(&acknowledgment).await {
        SendOutcome::Sent => Some(AcknowledgmentSent {
            order_id: order.id.clone(),
            email_address: acknowledgment.email_address,
        }),
        SendOutcome::NotSent => {
            warn!(order_id = %order.id, "acknowledgment was not delivered");
            None
        }
    }
}
