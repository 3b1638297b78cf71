//! # Storefront Testing
//!
//! Testing utilities and helpers for the storefront state store.
//!
//! This crate provides:
//! - Deterministic [`Clock`] implementations
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Effect assertion helpers
//! - A tracing subscriber that writes through the test harness
//!
//! ## Example
//!
//! ```ignore
//! use storefront_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(StorefrontReducer::new())
//!     .with_env(StorefrontEnvironment::new(Arc::new(test_clock())))
//!     .given_state(StorefrontState::default())
//!     .when_action(StorefrontAction::Checkout)
//!     .then_state(|state| assert!(state.orders.is_empty()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use storefront_core::environment::Clock;

/// Fluent reducer test harness
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use storefront_testing::mocks::FixedClock;
    /// use storefront_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step on every reading
    ///
    /// The first reading returns the start time.
    ///
    /// ```
    /// use chrono::Duration;
    /// use storefront_core::environment::Clock;
    /// use storefront_testing::mocks::SteppingClock;
    /// use storefront_testing::test_time;
    ///
    /// let clock = SteppingClock::new(test_time(), Duration::seconds(1));
    /// let first = clock.now();
    /// assert_eq!(clock.now() - first, Duration::seconds(1));
    /// ```
    #[derive(Debug)]
    pub struct SteppingClock {
        start: DateTime<Utc>,
        step_millis: i64,
        ticks: AtomicI64,
    }

    impl SteppingClock {
        /// Create a clock starting at `start` and advancing by `step` per reading
        #[must_use]
        pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                start,
                step_millis: step.num_milliseconds(),
                ticks: AtomicI64::new(0),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            self.start + Duration::milliseconds(tick * self.step_millis)
        }
    }

    /// The fixed instant used by [`test_clock`]: 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_time() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_time())
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `fmt` subscriber that writes through the test harness
    ///
    /// Honours `RUST_LOG`; defaults to `warn`. Safe to call from every test:
    /// only the first call installs the subscriber.
    pub fn init_test_tracing() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedClock, SteppingClock, test_clock, test_time};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_stepping_clock_advances() {
        let clock = SteppingClock::new(test_time(), Duration::milliseconds(250));
        let readings: Vec<_> = (0..3).map(|_| clock.now()).collect();
        assert_eq!(readings[0], test_time());
        assert_eq!(readings[2] - readings[0], Duration::milliseconds(500));
    }

    #[test]
    fn test_tracing_init_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
    }
}
