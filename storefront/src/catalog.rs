//! The product catalog slice.

use crate::action::StorefrontAction;
use crate::reducer::StorefrontEnvironment;
use crate::types::{OwnerId, Product, ProductId};
use serde::Serialize;
use storefront_core::{SmallVec, effect::Effect, reducer::Reducer};

/// Products available in the storefront, in listing order
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
    next_sequence: u64,
}

impl Catalog {
    /// An empty catalog
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Seed a catalog from a product list
    ///
    /// Products with a blank id or a negative price are skipped. When an id
    /// appears more than once the first occurrence wins.
    #[must_use]
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::new();
        for product in products {
            if let Err(error) = product.validate() {
                tracing::warn!(product_id = %product.id, %error, "Invalid product in seed, skipping");
                continue;
            }
            if catalog.contains(&product.id) {
                tracing::warn!(product_id = %product.id, "Duplicate product id in seed, skipping");
                continue;
            }
            catalog.products.push(product);
        }
        catalog
    }

    /// Parse a JSON array of products
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the input is not a product array.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::from_products(products))
    }

    /// All products
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products listed by one user
    pub fn user_products<'a>(&'a self, owner_id: &'a OwnerId) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| &product.owner_id == owner_id)
    }

    /// Look up a product
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    /// Whether a product is listed
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of products
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// `true` when no products are listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }

    fn get_mut(&mut self, product_id: &ProductId) -> Option<&mut Product> {
        self.products
            .iter_mut()
            .find(|product| &product.id == product_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Reducer for the catalog slice
///
/// Runs after input validation: drafts are valid and updated or deleted ids
/// exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = Catalog;
    type Action = StorefrontAction;
    type Environment = StorefrontEnvironment;

    fn reduce(
        &self,
        catalog: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StorefrontAction::CreateProduct { owner_id, draft } => {
                let id = ProductId::generate(env.clock.now(), catalog.next_sequence());
                tracing::info!(product_id = %id, owner_id = %owner_id, "Product created");
                catalog.products.push(draft.into_product(id, owner_id));
            },
            StorefrontAction::UpdateProduct {
                product_id,
                title,
                description,
                image_url,
            } => {
                if let Some(product) = catalog.get_mut(&product_id) {
                    product.title = title.trim().to_string();
                    product.description = description.trim().to_string();
                    product.image_url = image_url.trim().to_string();
                    tracing::info!(product_id = %product_id, "Product updated");
                }
            },
            StorefrontAction::DeleteProduct { product_id } => {
                catalog.products.retain(|product| product.id != product_id);
                tracing::info!(product_id = %product_id, "Product deleted");
            },
            _ => {},
        }

        SmallVec::new()
    }
}
