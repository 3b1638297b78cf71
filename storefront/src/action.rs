//! Actions accepted by the storefront reducers.

use crate::types::{OrderId, OwnerId, Product, ProductDraft, ProductId};
use serde::{Deserialize, Serialize};

/// Every input the storefront understands
///
/// Commands come from the user. Feedback actions are produced by effects
/// after a checkout has handed its order to the order sink.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StorefrontAction {
    // Cart commands
    /// Put one unit of `product` into the cart
    AddToCart {
        /// Product snapshot to add
        product: Product,
    },

    /// Take one unit of a product out of the cart
    RemoveFromCart {
        /// Product to remove
        product_id: ProductId,
    },

    /// Turn the cart into an order
    Checkout,

    // Catalog commands
    /// List a new product
    CreateProduct {
        /// Listing user
        owner_id: OwnerId,
        /// Submitted fields
        draft: ProductDraft,
    },

    /// Edit a listed product's title, description and image
    UpdateProduct {
        /// Product to edit
        product_id: ProductId,
        /// New title
        title: String,
        /// New description
        description: String,
        /// New image reference
        image_url: String,
    },

    /// Remove a product from the catalog and the cart
    DeleteProduct {
        /// Product to delete
        product_id: ProductId,
    },

    // Feedback
    /// The order sink accepted an order
    OrderRecorded {
        /// Recorded order
        order_id: OrderId,
    },

    /// The order sink rejected an order
    OrderRecordFailed {
        /// Rejected order
        order_id: OrderId,
        /// Sink failure message
        reason: String,
    },
}

impl StorefrontAction {
    /// `true` for user commands, `false` for effect feedback
    #[must_use]
    pub const fn is_command(&self) -> bool {
        !matches!(
            self,
            Self::OrderRecorded { .. } | Self::OrderRecordFailed { .. }
        )
    }

    /// Stable name for logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart { .. } => "add_to_cart",
            Self::RemoveFromCart { .. } => "remove_from_cart",
            Self::Checkout => "checkout",
            Self::CreateProduct { .. } => "create_product",
            Self::UpdateProduct { .. } => "update_product",
            Self::DeleteProduct { .. } => "delete_product",
            Self::OrderRecorded { .. } => "order_recorded",
            Self::OrderRecordFailed { .. } => "order_record_failed",
        }
    }
}
