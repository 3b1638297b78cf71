//! The root storefront reducer and its environment.
//!
//! [`StorefrontReducer`] applies effect feedback directly and checks every
//! command against the current state first. Refused commands are recorded in
//! [`StorefrontState::last_error`] and change nothing else; commands that
//! would do nothing return early so the state stays identical. Everything
//! else runs through the slice reducers: catalog, then cart, then checkout.

use crate::action::StorefrontAction;
use crate::cart::CartReducer;
use crate::catalog::CatalogReducer;
use crate::error::StorefrontError;
use crate::orders::CheckoutReducer;
use crate::sink::OrderSink;
use crate::state::StorefrontState;
use crate::types::validate_details;
use std::sync::Arc;
use storefront_core::composition::{BoxedReducer, CombinedReducer, combine_reducers, scope_reducer};
use storefront_core::environment::Clock;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Dependencies injected into the storefront reducers
#[derive(Clone)]
pub struct StorefrontEnvironment {
    /// Time source for order and product ids
    pub clock: Arc<dyn Clock>,
    /// Where placed orders are handed after checkout, if anywhere
    pub order_sink: Option<Arc<dyn OrderSink>>,
}

impl StorefrontEnvironment {
    /// Environment without an order sink
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            order_sink: None,
        }
    }

    /// Hand every placed order to `sink`
    #[must_use]
    pub fn with_order_sink(mut self, sink: Arc<dyn OrderSink>) -> Self {
        self.order_sink = Some(sink);
        self
    }
}

impl std::fmt::Debug for StorefrontEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontEnvironment")
            .field("has_order_sink", &self.order_sink.is_some())
            .finish_non_exhaustive()
    }
}

/// Root reducer for [`StorefrontState`]
#[derive(Clone, Debug)]
pub struct StorefrontReducer {
    slices: CombinedReducer<StorefrontState, StorefrontAction, StorefrontEnvironment>,
}

impl StorefrontReducer {
    /// Build the reducer from its slices
    #[must_use]
    pub fn new() -> Self {
        let slices: Vec<BoxedReducer<StorefrontState, StorefrontAction, StorefrontEnvironment>> = vec![
            Box::new(scope_reducer(
                CatalogReducer,
                |state: &StorefrontState| &state.catalog,
                |state: &mut StorefrontState, catalog| state.catalog = catalog,
            )),
            Box::new(scope_reducer(
                CartReducer,
                |state: &StorefrontState| &state.cart,
                |state: &mut StorefrontState, cart| state.cart = cart,
            )),
            Box::new(CheckoutReducer),
        ];

        Self {
            slices: combine_reducers(slices),
        }
    }

    /// Check a command against the current state
    fn validate(state: &StorefrontState, action: &StorefrontAction) -> Result<(), StorefrontError> {
        match action {
            StorefrontAction::AddToCart { product } => product
                .validate()
                .and_then(|()| state.cart.check_add(product)),
            StorefrontAction::CreateProduct { draft, .. } => draft.validate(),
            StorefrontAction::UpdateProduct {
                product_id,
                title,
                description,
                image_url,
            } => {
                if !state.catalog.contains(product_id) {
                    return Err(StorefrontError::ProductNotFound(product_id.clone()));
                }
                validate_details(title, description, image_url)
            },
            StorefrontAction::DeleteProduct { product_id } => {
                if state.catalog.contains(product_id) {
                    Ok(())
                } else {
                    Err(StorefrontError::ProductNotFound(product_id.clone()))
                }
            },
            _ => Ok(()),
        }
    }

    /// Effect feedback never touches the cart, catalog or history
    fn apply_feedback(state: &mut StorefrontState, action: StorefrontAction) {
        match action {
            StorefrontAction::OrderRecorded { order_id } => {
                tracing::debug!(order_id = %order_id, "Order sink confirmed order");
            },
            StorefrontAction::OrderRecordFailed { order_id, reason } => {
                tracing::warn!(order_id = %order_id, reason = %reason, "Order sink failed");
                state.last_error = Some(StorefrontError::SinkFailed { order_id, reason });
            },
            command => {
                tracing::error!(action = command.name(), "Command routed as feedback");
            },
        }
    }

    /// Commands that are accepted but leave the state as it is
    fn is_no_op(state: &StorefrontState, action: &StorefrontAction) -> bool {
        match action {
            StorefrontAction::RemoveFromCart { product_id } => !state.cart.contains(product_id),
            StorefrontAction::Checkout => state.cart.is_empty(),
            _ => false,
        }
    }
}

impl Default for StorefrontReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for StorefrontReducer {
    type State = StorefrontState;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if !action.is_command() {
            Self::apply_feedback(state, action);
            return SmallVec::new();
        }

        if let Err(error) = Self::validate(state, &action) {
            tracing::warn!(action = action.name(), error = %error, "Command rejected");
            state.last_error = Some(error);
            return SmallVec::new();
        }

        if Self::is_no_op(state, &action) {
            tracing::debug!(action = action.name(), "Command has nothing to do");
            return SmallVec::new();
        }

        state.last_error = None;
        self.slices.reduce(state, action, env)
    }
}
