//! Errors recorded by the storefront reducers.

use crate::types::{OrderId, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A command the storefront refused, or a hand-off that failed
///
/// Reducers never return these; the root reducer stores the most recent one
/// in [`StorefrontState::last_error`](crate::StorefrontState::last_error).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorefrontError {
    /// Malformed product or product draft
    #[error("invalid product: {0}")]
    InvalidProduct(String),

    /// No catalog product with this id
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// Adding this product would push a quantity or amount past its bounds
    #[error("adding {0} would overflow the cart")]
    CartOverflow(ProductId),

    /// The order was placed but the order sink did not accept it
    #[error("order {order_id} was not recorded: {reason}")]
    SinkFailed {
        /// The order that was placed
        order_id: OrderId,
        /// Sink failure message
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_subject() {
        assert_eq!(
            StorefrontError::ProductNotFound(ProductId::new("p7")).to_string(),
            "product p7 not found"
        );
        assert_eq!(
            StorefrontError::CartOverflow(ProductId::new("p7")).to_string(),
            "adding p7 would overflow the cart"
        );
        assert_eq!(
            StorefrontError::SinkFailed {
                order_id: OrderId::new("o-1-1"),
                reason: "disk full".to_string(),
            }
            .to_string(),
            "order o-1-1 was not recorded: disk full"
        );
    }
}
