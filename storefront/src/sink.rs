//! Hand-off of placed orders to whatever keeps them outside the store.

use crate::orders::Order;
use futures::future::BoxFuture;
use thiserror::Error;

/// Why an order sink did not take an order
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink refused the order
    #[error("order sink rejected the order: {0}")]
    Rejected(String),

    /// The order could not be encoded
    #[error("order could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Receives every order after checkout
///
/// Called from an effect, after the transition has already appended the
/// order to the history. A failure is reported back to the store as
/// [`StorefrontAction::OrderRecordFailed`](crate::StorefrontAction::OrderRecordFailed).
pub trait OrderSink: Send + Sync {
    /// Take ownership of a placed order
    fn record(&self, order: Order) -> BoxFuture<'static, Result<(), SinkError>>;
}

/// Writes each order to the log as JSON
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingOrderSink;

impl OrderSink for TracingOrderSink {
    fn record(&self, order: Order) -> BoxFuture<'static, Result<(), SinkError>> {
        let result = serde_json::to_string(&order)
            .map(|json| {
                tracing::info!(order_id = %order.id, order = %json, "Order recorded");
            })
            .map_err(SinkError::from);
        Box::pin(async move { result })
    }
}
