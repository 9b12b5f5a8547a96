//! The command envelope wrapping every workflow input.

use crate::order::UnvalidatedOrder;
use chrono::{DateTime, Utc};

/// A command envelope: the workflow's real input.
///
/// `timestamp` and `user_id` are audit metadata, not business data; no
/// stage of the pipeline branches on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Command<T> {
    /// The command-specific payload.
    pub data: T,
    /// When the command was issued.
    pub timestamp: DateTime<Utc>,
    /// Who issued it.
    pub user_id: String,
}

impl<T> Command<T> {
    /// Wraps a payload, stamping the current time.
    pub fn new(data: T, user_id: impl Into<String>) -> Self {
        Self {
            data,
            timestamp: Utc::now(),
            user_id: user_id.into(),
        }
    }
}

/// The command that starts the PlaceOrder workflow.
pub type PlaceOrderCommand = Command<UnvalidatedOrder>;
