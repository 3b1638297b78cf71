//! # Storefront Core
//!
//! Core traits and types for the storefront state store.
//!
//! Every piece of storefront state (catalog, cart, order history) changes only
//! through a [`Reducer`](reducer::Reducer): a function
//! `(State, Action, Environment) → (State, Effects)`. Reducers never perform
//! I/O themselves; anything that has to happen after a transition is returned
//! as an [`Effect`](effect::Effect) description and executed by the runtime.
//!
//! ## Core Concepts
//!
//! - **State**: Owned, cloneable domain data
//! - **Action**: Closed enum of everything that can happen to the state
//! - **Reducer**: Pure transition function over state and action
//! - **Effect**: Description of follow-up work (not its execution)
//! - **Environment**: Injected dependencies (clock, sinks)
//!
//! ## Example
//!
//! ```
//! use storefront_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct BasketState {
//!     units: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum BasketAction {
//!     Add,
//!     Clear,
//! }
//!
//! struct BasketReducer;
//!
//! impl Reducer for BasketReducer {
//!     type State = BasketState;
//!     type Action = BasketAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut BasketState,
//!         action: BasketAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<BasketAction>; 4]> {
//!         match action {
//!             BasketAction::Add => state.units += 1,
//!             BasketAction::Clear => state.units = 0,
//!         }
//!         SmallVec::new()
//!     }
//! }
//!
//! let before = BasketState::default();
//! let (after, _effects) = BasketReducer.transition(&before, BasketAction::Add, &());
//! assert_eq!(before.units, 0);
//! assert_eq!(after.units, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer composition utilities
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for CartReducer {
    ///     type State = Cart;
    ///     type Action = StorefrontAction;
    ///     type Environment = StorefrontEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut Cart,
    ///         action: StorefrontAction,
    ///         env: &StorefrontEnvironment,
    ///     ) -> SmallVec<[Effect<StorefrontAction>; 4]> {
    ///         match action {
    ///             StorefrontAction::AddToCart { product } => {
    ///                 state.add(&product);
    ///                 SmallVec::new()
    ///             }
    ///             _ => SmallVec::new(),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// The `Store` is the only caller holding the authoritative state, and it
        /// calls this under a write lock so transitions never interleave.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;

        /// Produce the next state as a new value, leaving `state` untouched
        ///
        /// Equivalent to cloning the state and calling [`Reducer::reduce`] on the
        /// clone. Use this when the caller owns state as plain values rather than
        /// through a `Store`.
        fn transition(
            &self,
            state: &Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> (Self::State, SmallVec<[Effect<Self::Action>; 4]>)
        where
            Self::State: Clone,
        {
            let mut next = state.clone();
            let effects = self.reduce(&mut next, action, env);
            (next, effects)
        }
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values (not execution) and are composable.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what should happen,
    /// returned from reducers and executed by the Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap an async computation whose optional result is fed back as an action
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Whether this effect does nothing when executed
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{DateTime, Utc};
    /// use storefront_core::environment::Clock;
    ///
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
