//! # Bookflow Testing
//!
//! Testing utilities and helpers for the Bookflow architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - The [`ReducerTest`] given/when/then harness
//! - Assertion helpers for reducers and stores
//!
//! ## Example
//!
//! ```ignore
//! use bookflow_testing::test_clock;
//! use bookflow_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_booking_flow() {
//!     let env = test_environment();
//!     let store = Store::new(FlowState::default(), BookingReducer, env);
//!
//!     store.send(BookingAction::SelectSlot {
//!         date: "2026-03-14".to_string(),
//!         time: "10:00 AM".to_string(),
//!     }).await?;
//!
//!     let state = store.state(|s| s.clone()).await;
//!     assert_eq!(state.booking.date.as_deref(), Some("2026-03-14"));
//! }
//! ```

use chrono::{DateTime, Utc};
use bookflow_core::environment::Clock;

/// Ergonomic reducer test harness
pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use bookflow_testing::mocks::FixedClock;
    /// use bookflow_core::environment::Clock;
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

    /// Create a default fixed clock for tests (2026-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
