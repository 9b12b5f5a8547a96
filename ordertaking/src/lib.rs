//! Order-taking bounded context.
//!
//! This crate implements the PlaceOrder workflow as a pipeline of data
//! refinements with short-circuiting error propagation:
//!
//! 1. **Validation** — [`UnvalidatedOrder`](order::UnvalidatedOrder) into a
//!    [`ValidatedOrder`](order::ValidatedOrder), consulting the address and
//!    product-existence collaborators.
//! 2. **Pricing** — into a [`PricedOrder`](order::PricedOrder), consulting
//!    the price collaborator.
//! 3. **Acknowledgment** — best-effort customer notification; never fails
//!    the workflow.
//! 4. **Event composition** — the event list published onto the order-event
//!    channel and returned to the caller.
//!
//! Collaborators are injected through the traits in [`services`]; the only
//! output path is the event channel from the `eventbus` crate. The shipping
//! context consumes those events without sharing any state with this crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod acknowledgment;
pub mod command;
pub mod dto;
pub mod errors;
pub mod events;
pub mod order;
pub mod pricing;
pub mod services;
pub mod types;
pub mod validation;
pub mod workflow;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::{Command, PlaceOrderCommand};
pub use errors::PlaceOrderError;
pub use events::PlaceOrderEvent;
pub use workflow::PlaceOrder;
