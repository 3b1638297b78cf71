//! The shopping cart slice.
//!
//! A [`Cart`] keeps one [`CartItem`] per product in the order products were
//! first added. Its total always equals the sum of the line subtotals, and an
//! item whose quantity would reach zero is removed instead. An add whose
//! quantity, subtotal or total would not fit is refused with the cart left
//! untouched.

use crate::action::StorefrontAction;
use crate::error::StorefrontError;
use crate::reducer::StorefrontEnvironment;
use crate::types::{Money, Product, ProductId};
use serde::{Deserialize, Serialize};
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer};

/// One product line in the cart (or in a placed order)
///
/// Title and price are copied from the product when it is first added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product this line refers to
    pub product_id: ProductId,
    /// Product title at add time
    pub title: String,
    /// Unit price at add time
    pub price: Money,
    /// Units in the cart, always at least one
    pub quantity: u32,
    /// `price * quantity`
    pub subtotal: Money,
}

impl CartItem {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
            subtotal: product.price,
        }
    }

    /// This line with one more unit, `None` on overflow
    fn incremented(&self) -> Option<Self> {
        let quantity = self.quantity.checked_add(1)?;
        let subtotal = self.price.checked_times(quantity)?;
        Some(Self {
            quantity,
            subtotal,
            ..self.clone()
        })
    }
}

/// Current cart contents
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
    total_amount: Money,
}

impl Cart {
    /// An empty cart
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            total_amount: Money::ZERO,
        }
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for a product
    #[must_use]
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Units of a product in the cart, zero when absent
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.item(product_id).map_or(0, |item| item.quantity)
    }

    /// Sum of all subtotals
    #[must_use]
    pub const fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// Number of distinct products
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing is in the cart
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the cart holds this product
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.item(product_id).is_some()
    }

    /// Add one unit of `product`
    ///
    /// An existing line keeps its original title and price; only its quantity
    /// grows.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::CartOverflow`] when the new quantity,
    /// subtotal or cart total would overflow. The cart is unchanged then.
    pub fn add(&mut self, product: &Product) -> Result<(), StorefrontError> {
        let (index, line, total) = self.plan_add(product)?;
        match index {
            Some(index) => self.items[index] = line,
            None => self.items.push(line),
        }
        self.total_amount = total;
        Ok(())
    }

    /// Check that [`Cart::add`] would succeed, without changing the cart
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::CartOverflow`] exactly when `add` would.
    pub fn check_add(&self, product: &Product) -> Result<(), StorefrontError> {
        self.plan_add(product).map(|_| ())
    }

    /// Remove one unit of a product
    ///
    /// Returns `false` when the product was not in the cart.
    pub fn remove_one(&mut self, product_id: &ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        let item = &mut self.items[index];
        let price = item.price;
        if item.quantity > 1 {
            item.quantity -= 1;
            item.subtotal = item.subtotal.saturating_sub(price);
        } else {
            self.items.remove(index);
        }
        self.total_amount = self.total_amount.saturating_sub(price);
        true
    }

    /// Remove a product's line whatever its quantity
    ///
    /// Returns `false` when the product was not in the cart.
    pub fn remove_all(&mut self, product_id: &ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        let item = self.items.remove(index);
        self.total_amount = self.total_amount.saturating_sub(item.subtotal);
        true
    }

    /// Empty the cart, returning its lines and total
    pub fn take(&mut self) -> (Vec<CartItem>, Money) {
        let total = self.total_amount;
        self.total_amount = Money::ZERO;
        (std::mem::take(&mut self.items), total)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| &item.product_id == product_id)
    }

    /// Where the added line goes, the line itself and the new total
    fn plan_add(
        &self,
        product: &Product,
    ) -> Result<(Option<usize>, CartItem, Money), StorefrontError> {
        let overflow = || StorefrontError::CartOverflow(product.id.clone());
        let index = self.position(&product.id);

        let line = match index {
            Some(index) => self.items[index].incremented().ok_or_else(overflow)?,
            None => CartItem::from_product(product),
        };

        let others = self
            .items
            .iter()
            .enumerate()
            .filter(|(position, _)| Some(*position) != index)
            .map(|(_, item)| item.subtotal);
        let total = Money::checked_sum(others)
            .and_then(|rest| rest.checked_add(line.subtotal))
            .ok_or_else(overflow)?;

        Ok((index, line, total))
    }
}

/// Reducer for the cart slice
///
/// Runs after input validation, so every product it sees is well formed and
/// fits in the cart.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl Reducer for CartReducer {
    type State = Cart;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        cart: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::AddToCart { product } => {
                if let Err(error) = cart.add(&product) {
                    tracing::warn!(%error, "Add to cart refused");
                    return SmallVec::new();
                }
                tracing::debug!(
                    product_id = %product.id,
                    quantity = cart.quantity_of(&product.id),
                    total = %cart.total_amount(),
                    "Added to cart"
                );
            },
            StorefrontAction::RemoveFromCart { product_id } => {
                if cart.remove_one(&product_id) {
                    tracing::debug!(
                        product_id = %product_id,
                        quantity = cart.quantity_of(&product_id),
                        total = %cart.total_amount(),
                        "Removed from cart"
                    );
                }
            },
            StorefrontAction::DeleteProduct { product_id } => {
                if cart.remove_all(&product_id) {
                    tracing::info!(product_id = %product_id, "Deleted product dropped from cart");
                }
            },
            _ => {},
        }

        SmallVec::new()
    }
}
