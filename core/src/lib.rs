//! # Composable Glue
//!
//! Parent/child composition for applications built on the
//! Model-Update-View-Subscriptions architecture.
//!
//! A parent that embeds an independently written child component has to
//! route the child's messages, merge the child's commands into its own, fold
//! the child's subscriptions into its own and project the child's view into
//! its message type. This crate captures that plumbing once, in a small
//! descriptor value, and provides pure combinators parametrized by it.
//!
//! ## Core Concepts
//!
//! - **Glue**: the `embed` / `get` / `set` triple linking a parent and a child
//!   ([`Glue`], [`SimpleGlue`] for message-less children, [`LazyGlue`] for
//!   children that are created on demand)
//! - **Cmd**: inert description of pending work ([`Cmd`])
//! - **Sub**: inert description of standing message sources ([`Sub`])
//! - **Html**: a view fragment whose handlers produce messages ([`Html`])
//! - **Batch / Retag**: the two capabilities every combinator needs from a
//!   command, subscription or view type. Host runtimes can plug in their own
//!   types by implementing them.
//!
//! Nothing here executes an effect, renders a view or runs a loop. Every
//! combinator consumes values and returns new ones.
//!
//! ## Example
//!
//! ```
//! use composable_glue::{Cmd, Glue};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CounterMsg {
//!     Increment,
//! }
//!
//! #[derive(Debug)]
//! enum Msg {
//!     Counter(CounterMsg),
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Model {
//!     counter: i64,
//!     title: String,
//! }
//!
//! fn counter_update(msg: CounterMsg, count: i64) -> (i64, Cmd<CounterMsg>) {
//!     match msg {
//!         CounterMsg::Increment => (count + 1, Cmd::none()),
//!     }
//! }
//!
//! let counter: Glue<Model, i64, Msg, CounterMsg> = Glue::new(
//!     Msg::Counter,
//!     |model: &Model| &model.counter,
//!     |counter, model| Model { counter, ..model },
//! );
//!
//! let model = Model { counter: 0, title: "glue".to_string() };
//! let (model, cmd) = counter.update(counter_update, CounterMsg::Increment, (model, Cmd::none()));
//!
//! assert_eq!(model.counter, 1);
//! assert_eq!(model.title, "glue");
//! assert!(cmd.is_none());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod cmd_macros;
pub mod effect;
pub mod glue;
pub mod lazy;
pub mod subscription;
pub mod view;

pub use description::{Batch, Retag};
pub use effect::Cmd;
pub use glue::{Glue, SimpleGlue};
pub use lazy::LazyGlue;
pub use subscription::Sub;
pub use view::{Attribute, Html};

/// Description module - the capabilities combinators need from host types
///
/// Commands and subscriptions are monoids ([`Batch`]): they can be merged,
/// and merging with the empty value changes nothing. Commands,
/// subscriptions and views are all tagged with a message type and can be
/// re-tagged into a parent's message type ([`Retag`]).
pub mod description {
    /// An order-preserving, mergeable description with an identity value.
    ///
    /// Implementations must satisfy:
    /// - `none().batch(x)` and `x.batch(none())` are equivalent to `x`
    /// - `a.batch(b).batch(c)` is equivalent to `a.batch(b.batch(c))`
    /// - the items of `a` are ordered before the items of `b` in `a.batch(b)`
    pub trait Batch: Sized {
        /// The identity value
        fn none() -> Self;

        /// Merge `other` after `self`
        #[must_use]
        fn batch(self, other: Self) -> Self;
    }

    /// A value tagged with messages of type `SubMsg` that can be re-tagged to
    /// produce messages of type `Msg`.
    ///
    /// # Example
    ///
    /// ```
    /// use composable_glue::{Cmd, Retag};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum Parent {
    ///     Child(u8),
    /// }
    ///
    /// let cmd: Cmd<Parent> = Cmd::msg(7_u8).retag(Parent::Child);
    /// assert_eq!(cmd.messages(), vec![&Parent::Child(7)]);
    /// ```
    pub trait Retag<SubMsg, Msg> {
        /// The re-tagged value
        type Output;

        /// Map every message this value can produce through `embed`
        fn retag(self, embed: fn(SubMsg) -> Msg) -> Self::Output;
    }

    impl<T, SubMsg, Msg> Retag<SubMsg, Msg> for Option<T>
    where
        T: Retag<SubMsg, Msg>,
    {
        type Output = Option<T::Output>;

        fn retag(self, embed: fn(SubMsg) -> Msg) -> Self::Output {
            self.map(|value| value.retag(embed))
        }
    }
}

/// Environment module - host-supplied capabilities
///
/// The combinators never read the clock. Host runtimes (and tests) use a
/// [`environment::Clock`] to decide which instant to hand to a
/// [`Sub::Every`] subscription when it fires.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_glue::environment::Clock;
    /// use composable_glue::{DateTime, Utc};
    ///
    /// struct SystemClock;
    ///
    /// impl Clock for SystemClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         Utc::now()
    ///     }
    /// }
    ///
    /// let _ = SystemClock.now();
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Parent {
        Child(u8),
    }

    #[test]
    fn test_option_retag_maps_present_value() {
        let cmd = Some(Cmd::msg(3_u8)).retag(Parent::Child);
        let cmd = cmd.unwrap_or_default();
        assert_eq!(cmd.messages(), vec![&Parent::Child(3)]);
    }

    #[test]
    fn test_option_retag_keeps_absent_value() {
        let cmd: Option<Cmd<Parent>> = None::<Cmd<u8>>.retag(Parent::Child);
        assert!(cmd.is_none());
    }
}
