//! Placed orders and the checkout transition.

use crate::action::StorefrontAction;
use crate::cart::CartItem;
use crate::reducer::StorefrontEnvironment;
use crate::state::StorefrontState;
use crate::types::{Money, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};

/// A checked-out cart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: OrderId,
    /// Cart lines at checkout, in cart order
    pub items: Vec<CartItem>,
    /// Cart total at checkout
    pub total_amount: Money,
    /// When the order was placed
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total units across all lines
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Append-only list of placed orders, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    /// An empty history
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Orders in placement order (oldest first)
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders for display (newest first)
    pub fn newest_first(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter().rev()
    }

    /// The most recently placed order
    #[must_use]
    pub fn last(&self) -> Option<&Order> {
        self.orders.last()
    }

    /// Number of placed orders
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// `true` before the first checkout
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn append(&mut self, order: Order) {
        self.orders.push(order);
    }
}

/// Reducer for checkout
///
/// Works on the whole state: it empties the cart and appends to the history
/// in one step.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckoutReducer;

impl Reducer for CheckoutReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if !matches!(action, StorefrontAction::Checkout) || state.cart.is_empty() {
            return SmallVec::new();
        }

        let (items, total_amount) = state.cart.take();
        let created_at = env.clock.now();
        let order = Order {
            id: OrderId::generate(created_at, state.orders.len() + 1),
            items,
            total_amount,
            created_at,
        };

        tracing::info!(
            order_id = %order.id,
            total = %order.total_amount,
            items = order.item_count(),
            "Order placed"
        );
        state.orders.append(order.clone());

        let Some(sink) = env.order_sink.clone() else {
            return SmallVec::new();
        };

        smallvec![Effect::future(async move {
            let order_id = order.id.clone();
            match sink.record(order).await {
                Ok(()) => Some(StorefrontAction::OrderRecorded { order_id }),
                Err(error) => Some(StorefrontAction::OrderRecordFailed {
                    order_id,
                    reason: error.to_string(),
                }),
            }
        })]
    }
}
