//! Core domain types for the storefront.
//!
//! Products are the catalog's unit; cart lines and orders copy the product's
//! title and price at the moment they are taken, so later catalog edits never
//! reach back into them.

use crate::error::StorefrontError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest accepted product description, counted after trimming
pub const MIN_DESCRIPTION_CHARS: usize = 5;

/// Lowest price a user-created product may carry (ten cents)
pub const MIN_LISTED_PRICE: Money = Money::from_cents(10);

/// Unique identifier for a product
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new `ProductId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint an identifier for a user-created product
    #[must_use]
    pub fn generate(now: DateTime<Utc>, sequence: u64) -> Self {
        Self(format!("p-{}-{sequence}", now.timestamp_millis()))
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the identifier is empty or whitespace only
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the user who listed a product
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates a new `OwnerId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a placed order
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new `OrderId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint the identifier for the order at 1-based history position `sequence`
    ///
    /// The position makes ids unique within one history even when two
    /// checkouts read the same clock value.
    #[must_use]
    pub fn generate(now: DateTime<Utc>, sequence: usize) -> Self {
        Self(format!("o-{}-{sequence}", now.timestamp_millis()))
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new money amount from whole dollars
    #[must_use]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// `true` for amounts below zero
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity with overflow checking
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(quantity)).map(Self)
    }

    /// Subtracts, clamping at the `i64` bounds
    ///
    /// Only used where the result is known to shrink toward zero, e.g. taking
    /// a line out of a cart total that already includes it.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Sum of `amounts`, or `None` if it does not fit in an `i64`
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Option<Self> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", cents / 100, cents % 100)
    }
}

/// A product offered in the storefront
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,
    /// User who listed the product
    pub owner_id: OwnerId,
    /// Display title
    pub title: String,
    /// Image reference (URI)
    pub image_url: String,
    /// Free-form description
    pub description: String,
    /// Unit price
    pub price: Money,
}

impl Product {
    /// Creates a new product
    #[must_use]
    pub fn new(
        id: ProductId,
        owner_id: OwnerId,
        title: impl Into<String>,
        image_url: impl Into<String>,
        description: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id,
            owner_id,
            title: title.into(),
            image_url: image_url.into(),
            description: description.into(),
            price,
        }
    }

    /// Check the fields a cart depends on
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::InvalidProduct`] for a blank id or a
    /// negative price.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.id.is_blank() {
            return Err(StorefrontError::InvalidProduct(
                "product id must not be empty".to_string(),
            ));
        }
        if self.price.is_negative() {
            return Err(StorefrontError::InvalidProduct(format!(
                "price of {} must not be negative",
                self.id
            )));
        }
        Ok(())
    }
}

/// The user-editable fields of a product, as submitted from a listing form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Display title
    pub title: String,
    /// Image reference (URI)
    pub image_url: String,
    /// Free-form description
    pub description: String,
    /// Unit price
    pub price: Money,
}

impl ProductDraft {
    /// Validate every field of the draft
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::InvalidProduct`] naming the first field
    /// that fails.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        validate_details(&self.title, &self.description, &self.image_url)?;
        if self.price < MIN_LISTED_PRICE {
            return Err(StorefrontError::InvalidProduct(format!(
                "price must be at least {MIN_LISTED_PRICE}"
            )));
        }
        Ok(())
    }

    /// Turn the draft into a catalog product
    #[must_use]
    pub fn into_product(self, id: ProductId, owner_id: OwnerId) -> Product {
        Product {
            id,
            owner_id,
            title: self.title.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
        }
    }
}

/// Validate the fields shared by product creation and update
///
/// # Errors
///
/// Returns [`StorefrontError::InvalidProduct`] naming the first field that
/// fails.
pub fn validate_details(
    title: &str,
    description: &str,
    image_url: &str,
) -> Result<(), StorefrontError> {
    if title.trim().is_empty() {
        return Err(StorefrontError::InvalidProduct(
            "title is required".to_string(),
        ));
    }
    if image_url.trim().is_empty() {
        return Err(StorefrontError::InvalidProduct(
            "image url is required".to_string(),
        ));
    }
    if description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(StorefrontError::InvalidProduct(format!(
            "description needs at least {MIN_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "Desk Lamp".to_string(),
            image_url: "https://example.com/lamp.png".to_string(),
            description: "Warm light for late evenings".to_string(),
            price: Money::from_cents(2_499),
        }
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(1_234).to_string(), "$12.34");
        assert_eq!(Money::from_dollars(25).to_string(), "$25.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-150).to_string(), "-$1.50");
    }

    #[test]
    fn money_arithmetic() {
        let total = Money::checked_sum([Money::from_cents(1_000), Money::from_cents(500)]);
        assert_eq!(total, Some(Money::from_cents(1_500)));
        assert_eq!(
            Money::from_cents(1_999).checked_times(3),
            Some(Money::from_cents(5_997))
        );
        assert_eq!(Money::from_cents(1_999).checked_times(0), Some(Money::ZERO));
        assert_eq!(
            Money::from_cents(1_000).saturating_sub(Money::from_cents(250)),
            Money::from_cents(750)
        );
    }

    #[test]
    fn money_overflow_is_reported_not_wrapped() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(half.checked_add(half), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(half.checked_times(2), None);
        assert_eq!(Money::checked_sum([half, Money::ZERO, half]), None);
        assert_eq!(Money::from_dollars(i64::MAX).cents(), i64::MAX);
    }

    #[test]
    fn generated_ids_embed_time_and_sequence() {
        let now = DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap();
        assert_eq!(OrderId::generate(now, 3).as_str(), "o-1735689600000-3");
        assert_eq!(ProductId::generate(now, 7).as_str(), "p-1735689600000-7");
    }

    #[test]
    fn product_validation_rejects_blank_id_and_negative_price() {
        let mut product = Product::new(
            ProductId::new("p1"),
            OwnerId::new("u1"),
            "Red Shirt",
            "https://example.com/shirt.png",
            "A red t-shirt",
            Money::from_cents(2_999),
        );
        assert!(product.validate().is_ok());

        product.price = Money::from_cents(-1);
        assert!(matches!(
            product.validate(),
            Err(StorefrontError::InvalidProduct(_))
        ));

        product.price = Money::ZERO;
        product.id = ProductId::new("  ");
        assert!(matches!(
            product.validate(),
            Err(StorefrontError::InvalidProduct(_))
        ));
    }

    #[test]
    fn free_product_is_valid_for_the_cart() {
        let product = Product::new(
            ProductId::new("sample"),
            OwnerId::new("u1"),
            "Sample",
            "https://example.com/sample.png",
            "Free sample",
            Money::ZERO,
        );
        assert!(product.validate().is_ok());
    }

    #[test]
    fn draft_validation() {
        assert!(draft().validate().is_ok());

        let mut short = draft();
        short.description = " abcd ".to_string();
        assert!(short.validate().is_err());

        let mut untitled = draft();
        untitled.title = "   ".to_string();
        assert!(untitled.validate().is_err());

        let mut no_image = draft();
        no_image.image_url = String::new();
        assert!(no_image.validate().is_err());

        let mut cheap = draft();
        cheap.price = Money::from_cents(9);
        assert!(cheap.validate().is_err());

        let mut floor = draft();
        floor.price = MIN_LISTED_PRICE;
        assert!(floor.validate().is_ok());
    }

    #[test]
    fn draft_into_product_trims_text() {
        let mut padded = draft();
        padded.title = "  Desk Lamp ".to_string();
        let product = padded.into_product(ProductId::new("p9"), OwnerId::new("u1"));
        assert_eq!(product.title, "Desk Lamp");
        assert_eq!(product.id, ProductId::new("p9"));
        assert_eq!(product.price, Money::from_cents(2_499));
    }

    #[test]
    fn money_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1_999)).unwrap();
        assert_eq!(json, "1999");
    }
}
