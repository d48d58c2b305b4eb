//! # Composable Glue Testing
//!
//! Testing utilities and helpers for Composable Glue.
//!
//! This crate provides:
//! - Law checkers for descriptors ([`laws`])
//! - A Given-When-Then harness for glued updates ([`GlueTest`])
//! - Assertion helpers for commands and subscriptions ([`assertions`])
//! - A fixed clock for deterministic subscription ticks ([`mocks`])
//! - proptest strategies ([`properties`])
//!
//! ## Example
//!
//! ```
//! use composable_glue::{Cmd, Glue};
//! use composable_glue_testing::{assertions, GlueTest};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Model {
//!     count: i64,
//! }
//!
//! #[derive(Debug, PartialEq)]
//! enum Msg {
//!     Count(()),
//! }
//!
//! let count: Glue<Model, i64, Msg, ()> =
//!     Glue::new(Msg::Count, |m: &Model| &m.count, |count, _| Model { count });
//!
//! GlueTest::new()
//!     .given_model(Model { count: 0 })
//!     .when(move |pair| count.update_with(|c| (c + 1, Cmd::<()>::none()), pair))
//!     .then_model(|model| assert_eq!(model.count, 1))
//!     .then_cmd(|cmd: &Cmd<Msg>| assertions::assert_no_cmd(cmd))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use composable_glue::environment::Clock;

pub mod glue_test;
pub mod laws;

pub use glue_test::{assertions, GlueTest};
pub use laws::LawViolation;

/// Mock implementations of host-supplied capabilities
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making subscription ticks reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_glue_testing::mocks::FixedClock;
    /// use composable_glue::environment::Clock;
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

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
pub mod helpers {
    use tracing_subscriber::EnvFilter;

    /// Install a test-friendly tracing subscriber.
    ///
    /// Output goes through the test harness capture, filtered by `RUST_LOG`
    /// (default `composable_glue=trace`). Safe to call from every test: only
    /// the first call installs the subscriber.
    pub fn init_test_tracing() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("composable_glue=trace"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use composable_glue::Cmd;
    use proptest::prelude::*;

    /// Commands that dispatch a flat list of generated messages
    pub fn cmd_of<S>(msg: S) -> impl Strategy<Value = Cmd<S::Value>>
    where
        S: Strategy,
    {
        prop::collection::vec(msg, 0..8)
            .prop_map(|msgs| msgs.into_iter().map(Cmd::msg).collect::<Cmd<_>>())
    }

    /// Commands built from arbitrarily grouped batches, paired with the
    /// messages they must dispatch, in order
    pub fn grouped_cmd<S>(msg: S) -> impl Strategy<Value = (Cmd<S::Value>, Vec<S::Value>)>
    where
        S: Strategy,
        S::Value: Clone,
    {
        prop::collection::vec(prop::collection::vec(msg, 0..4), 0..4).prop_map(|groups| {
            let expected = groups.concat();
            let cmd: Cmd<S::Value> = groups
                .into_iter()
                .map(|group| group.into_iter().map(Cmd::msg).collect::<Cmd<_>>())
                .collect();
            (cmd, expected)
        })
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
