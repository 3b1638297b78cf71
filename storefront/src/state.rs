//! The storefront's complete state value.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::StorefrontError;
use crate::orders::{Order, OrderHistory};
use serde::Serialize;

/// Catalog, cart and order history, plus the most recent refusal
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StorefrontState {
    /// Products on offer
    pub catalog: Catalog,
    /// Current cart
    pub cart: Cart,
    /// Placed orders, oldest first
    pub orders: OrderHistory,
    /// Last refused command or failed hand-off
    ///
    /// Cleared by the next command that changes the state.
    pub last_error: Option<StorefrontError>,
}

impl StorefrontState {
    /// A state with an empty cart and no orders
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Placed orders in storage order (oldest first)
    #[must_use]
    pub fn list_orders(&self) -> &[Order] {
        self.orders.orders()
    }
}
