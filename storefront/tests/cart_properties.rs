//! Property tests for the cart and order invariants
//!
//! Random command sequences run through the root reducer; after every step
//! the cart total must match its lines and no line may be empty.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use std::sync::Arc;
use storefront::{
    Money, OwnerId, Product, ProductId, StorefrontAction, StorefrontEnvironment,
    StorefrontReducer, StorefrontState,
};
use storefront_core::reducer::Reducer;
use storefront_testing::test_clock;

const PRICES: [i64; 4] = [0, 199, 1_000, 12_345];

fn product(index: usize) -> Product {
    Product::new(
        ProductId::new(format!("p{index}")),
        OwnerId::new("u1"),
        format!("Product {index}"),
        format!("https://example.com/{index}.png"),
        "Property product",
        Money::from_cents(PRICES[index % PRICES.len()]),
    )
}

fn env() -> StorefrontEnvironment {
    StorefrontEnvironment::new(Arc::new(test_clock()))
}

#[derive(Debug, Clone)]
enum Step {
    Add(usize),
    Remove(usize),
    Checkout,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..6usize).prop_map(Step::Add),
        3 => (0..6usize).prop_map(Step::Remove),
        1 => Just(Step::Checkout),
    ]
}

fn action(step: &Step) -> StorefrontAction {
    match step {
        Step::Add(i) => StorefrontAction::AddToCart { product: product(*i) },
        Step::Remove(i) => StorefrontAction::RemoveFromCart {
            product_id: ProductId::new(format!("p{i}")),
        },
        Step::Checkout => StorefrontAction::Checkout,
    }
}

fn assert_cart_consistent(state: &StorefrontState) {
    let sum = Money::checked_sum(state.cart.items().iter().map(|item| item.subtotal));
    assert_eq!(Some(state.cart.total_amount()), sum);

    for item in state.cart.items() {
        assert!(item.quantity > 0);
        assert_eq!(Some(item.subtotal), item.price.checked_times(item.quantity));
    }
}

proptest! {
    #[test]
    fn cart_total_always_matches_lines(steps in prop::collection::vec(step(), 0..60)) {
        let reducer = StorefrontReducer::new();
        let env = env();
        let mut state = StorefrontState::default();

        for step in &steps {
            let _ = reducer.reduce(&mut state, action(step), &env);
            assert_cart_consistent(&state);
        }
    }

    #[test]
    fn n_adds_give_quantity_n(n in 1u32..40, index in 0usize..4) {
        let reducer = StorefrontReducer::new();
        let env = env();
        let mut state = StorefrontState::default();
        let product = product(index);

        for _ in 0..n {
            let _ = reducer.reduce(
                &mut state,
                StorefrontAction::AddToCart { product: product.clone() },
                &env,
            );
        }

        let item = state.cart.item(&product.id).unwrap();
        prop_assert_eq!(item.quantity, n);
        prop_assert_eq!(Some(item.subtotal), product.price.checked_times(n));
        prop_assert_eq!(Some(state.cart.total_amount()), product.price.checked_times(n));
    }

    #[test]
    fn checkout_count_matches_history(steps in prop::collection::vec(step(), 0..60)) {
        let reducer = StorefrontReducer::new();
        let env = env();
        let mut state = StorefrontState::default();
        let mut placed = Vec::new();

        for step in &steps {
            let before_total = state.cart.total_amount();
            let had_items = !state.cart.is_empty();
            let _ = reducer.reduce(&mut state, action(step), &env);

            if matches!(step, Step::Checkout) && had_items {
                let order = state.orders.last().unwrap().clone();
                prop_assert_eq!(order.total_amount, before_total);
                prop_assert!(state.cart.is_empty());
                placed.push(order);
            }
        }

        // Earlier orders are untouched by everything that happened after them
        prop_assert_eq!(state.orders.orders(), placed.as_slice());
    }

    #[test]
    fn refused_adds_leave_the_cart_unchanged(
        steps in prop::collection::vec(step(), 0..20),
        cents in (i64::MAX / 4)..=i64::MAX,
    ) {
        let reducer = StorefrontReducer::new();
        let env = env();
        let mut state = StorefrontState::default();
        for step in &steps {
            let _ = reducer.reduce(&mut state, action(step), &env);
        }

        let mut big = product(99);
        big.price = Money::from_cents(cents);
        for _ in 0..5 {
            let before = state.cart.clone();
            let _ = reducer.reduce(&mut state, StorefrontAction::AddToCart { product: big.clone() }, &env);
            assert_cart_consistent(&state);
            if state.last_error.is_some() {
                prop_assert_eq!(&state.cart, &before);
            }
        }
    }
}
