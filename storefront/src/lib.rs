//! Storefront catalog, cart and order history as a reducer-driven state store.
//!
//! The whole storefront is one [`StorefrontState`] value. Every change goes
//! through [`StorefrontReducer`] as a [`StorefrontAction`]:
//!
//! - Cart: add a product, remove one unit, check out into an order
//! - Catalog: create, update and delete user-listed products
//! - Order hand-off: an optional [`OrderSink`] receives every placed order
//!
//! Invariants kept by every transition:
//!
//! - The cart total equals the sum of its item subtotals
//! - No cart item has a quantity of zero
//! - Placed orders are never modified or removed
//! - Cart items and orders keep the title and price they were created with
//!
//! # Quick Start
//!
//! ```no_run
//! use storefront::{
//!     Catalog, StorefrontAction, StorefrontEnvironment, StorefrontReducer, StorefrontState,
//! };
//! use storefront_core::environment::SystemClock;
//! use storefront_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_json_str(&std::fs::read_to_string("data/catalog.json")?)?;
//! let env = StorefrontEnvironment::new(Arc::new(SystemClock));
//! let store = Store::new(StorefrontState::with_catalog(catalog), StorefrontReducer::new(), env);
//!
//! let product = store.state(|s| s.catalog.products()[0].clone()).await;
//! store.send(StorefrontAction::AddToCart { product }).await?;
//! store.send(StorefrontAction::Checkout).await?;
//!
//! let orders = store.state(|s| s.list_orders().len()).await;
//! println!("Orders placed: {orders}");
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod reducer;
pub mod sink;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use action::StorefrontAction;
pub use cart::{Cart, CartItem, CartReducer};
pub use catalog::{Catalog, CatalogReducer};
pub use config::{ConfigError, StorefrontConfig};
pub use error::StorefrontError;
pub use orders::{CheckoutReducer, Order, OrderHistory};
pub use reducer::{StorefrontEnvironment, StorefrontReducer};
pub use sink::{OrderSink, SinkError, TracingOrderSink};
pub use state::StorefrontState;
pub use types::{Money, OrderId, OwnerId, Product, ProductDraft, ProductId};
