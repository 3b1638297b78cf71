//! Storefront demo binary
//!
//! Loads a catalog, fills a cart, lists a product and checks out, printing
//! the state after each step.

use anyhow::Context;
use std::sync::Arc;
use storefront::{
    Catalog, Money, ProductDraft, StorefrontAction, StorefrontConfig, StorefrontEnvironment,
    StorefrontReducer, StorefrontState, TracingOrderSink,
};
use storefront_core::environment::SystemClock;
use storefront_runtime::{Store, StoreConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

type StorefrontStore =
    Store<StorefrontState, StorefrontAction, StorefrontEnvironment, StorefrontReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    let config = StorefrontConfig::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = load_catalog(&config)?;
    tracing::info!(products = catalog.len(), "Catalog loaded");

    let env = StorefrontEnvironment::new(Arc::new(SystemClock))
        .with_order_sink(Arc::new(TracingOrderSink));
    let store = Store::with_config(
        StorefrontState::with_catalog(catalog),
        StorefrontReducer::new(),
        env,
        StoreConfig::new(config.broadcast_capacity, config.shutdown_timeout),
    );

    println!("=== Storefront ===\n");
    print_catalog(&store).await;

    let products = store.state(|s| s.catalog.products().to_vec()).await;
    let mut picks = products.iter().take(2);

    if let Some(first) = picks.next() {
        println!("\n>>> Add to cart: {} (twice)", first.title);
        store
            .send(StorefrontAction::AddToCart { product: first.clone() })
            .await?;
        store
            .send(StorefrontAction::AddToCart { product: first.clone() })
            .await?;
    }
    if let Some(second) = picks.next() {
        println!(">>> Add to cart: {}", second.title);
        store
            .send(StorefrontAction::AddToCart { product: second.clone() })
            .await?;
        print_cart(&store).await;

        println!("\n>>> Remove from cart: {}", second.title);
        store
            .send(StorefrontAction::RemoveFromCart {
                product_id: second.id.clone(),
            })
            .await?;
    }
    print_cart(&store).await;

    println!("\n>>> List a product as {}", config.owner_id);
    store
        .send(StorefrontAction::CreateProduct {
            owner_id: config.owner_id.clone(),
            draft: ProductDraft {
                title: "Desk Lamp".to_string(),
                image_url: "https://images.example.com/desk-lamp.jpg".to_string(),
                description: "Warm light for late evenings.".to_string(),
                price: Money::from_cents(2_499),
            },
        })
        .await?;
    let owned = store
        .state(|s| s.catalog.user_products(&config.owner_id).count())
        .await;
    println!("Products listed by {}: {owned}", config.owner_id);

    println!("\n>>> Checkout");
    let mut handle = store.send(StorefrontAction::Checkout).await?;
    handle
        .wait_with_timeout(config.shutdown_timeout)
        .await
        .context("order hand-off did not finish")?;
    print_cart(&store).await;
    print_orders(&store).await;

    if let Some(error) = store.state(|s| s.last_error.clone()).await {
        println!("\nLast error: {error}");
    }

    store.shutdown_default().await?;
    Ok(())
}

fn load_catalog(config: &StorefrontConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            Catalog::from_json_str(&json)
                .with_context(|| format!("parsing catalog {}", path.display()))
        },
        None => Catalog::from_json_str(BUILTIN_CATALOG).context("parsing built-in catalog"),
    }
}

async fn print_catalog(store: &StorefrontStore) {
    store
        .state(|s| {
            println!("Catalog:");
            for product in s.catalog.products() {
                println!("  {:<28} {:>10}  [{}]", product.title, product.price.to_string(), product.id);
            }
        })
        .await;
}

async fn print_cart(store: &StorefrontStore) {
    store
        .state(|s| {
            println!("Cart ({} items, total {}):", s.cart.len(), s.cart.total_amount());
            for item in s.cart.items() {
                println!("  {} x{} = {}", item.title, item.quantity, item.subtotal);
            }
        })
        .await;
}

async fn print_orders(store: &StorefrontStore) {
    store
        .state(|s| {
            println!("Orders (newest first):");
            for order in s.orders.newest_first() {
                println!(
                    "  {} {} {} ({} units)",
                    order.id,
                    order.created_at.format("%Y-%m-%d %H:%M"),
                    order.total_amount,
                    order.item_count()
                );
            }
        })
        .await;
}
