//! Subscription descriptions
//!
//! A [`Sub`] describes a standing source of messages: a timer, or a named
//! stream of host events. Like [`crate::Cmd`] it is an inert, mergeable value.
//! The host runtime diffs subscriptions by key between update cycles and
//! owns the actual timers and listeners.

use crate::description::{Batch, Retag};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Tagger invoked on every timer tick
pub type TickTagger<Msg> = Arc<dyn Fn(DateTime<Utc>) -> Msg + Send + Sync>;

/// Tagger invoked with the payload of a host event
pub type EventTagger<Msg> = Arc<dyn Fn(&str) -> Option<Msg> + Send + Sync>;

/// Subscription type - describes standing message sources
pub enum Sub<Msg> {
    /// No subscription, the identity of [`Sub::batch`]
    None,

    /// Fire `on_tick` every `interval`
    Every {
        /// Identity of the timer, used by hosts to diff subscriptions
        key: String,
        /// Tick interval
        interval: Duration,
        /// Message produced at each tick
        on_tick: TickTagger<Msg>,
    },

    /// Listen to the host event stream named `key`
    Event {
        /// Name of the host event stream
        key: String,
        /// Message produced for a payload, if any
        on_event: EventTagger<Msg>,
    },

    /// Ordered batch of subscriptions
    Batch(Vec<Sub<Msg>>),
}

impl<Msg> std::fmt::Debug for Sub<Msg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sub::None => write!(f, "Sub::None"),
            Sub::Every { key, interval, .. } => f
                .debug_struct("Sub::Every")
                .field("key", key)
                .field("interval", interval)
                .finish_non_exhaustive(),
            Sub::Event { key, .. } => f
                .debug_struct("Sub::Event")
                .field("key", key)
                .finish_non_exhaustive(),
            Sub::Batch(subs) => f.debug_tuple("Sub::Batch").field(subs).finish(),
        }
    }
}

impl<Msg> Default for Sub<Msg> {
    fn default() -> Self {
        Self::None
    }
}

impl<Msg> Sub<Msg> {
    /// The empty subscription
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Timer subscription
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_glue::{Sub, Utc};
    /// use std::time::Duration;
    ///
    /// let sub = Sub::every("clock", Duration::from_secs(1), |_now| "tick");
    /// assert_eq!(sub.tick("clock", Utc::now()), vec!["tick"]);
    /// ```
    #[must_use]
    pub fn every<F>(key: impl Into<String>, interval: Duration, on_tick: F) -> Self
    where
        F: Fn(DateTime<Utc>) -> Msg + Send + Sync + 'static,
    {
        Self::Every {
            key: key.into(),
            interval,
            on_tick: Arc::new(on_tick),
        }
    }

    /// Host event subscription
    #[must_use]
    pub fn on_event<F>(key: impl Into<String>, on_event: F) -> Self
    where
        F: Fn(&str) -> Option<Msg> + Send + Sync + 'static,
    {
        Self::Event {
            key: key.into(),
            on_event: Arc::new(on_event),
        }
    }

    /// Merge `other` after `self`
    #[must_use]
    pub fn batch(self, other: Self) -> Self {
        match (self, other) {
            (Self::None, other) => other,
            (this, Self::None) => this,
            (Self::Batch(mut left), Self::Batch(right)) => {
                left.extend(right);
                Self::Batch(left)
            },
            (Self::Batch(mut left), right) => {
                left.push(right);
                Self::Batch(left)
            },
            (left, Self::Batch(mut right)) => {
                right.insert(0, left);
                Self::Batch(right)
            },
            (left, right) => Self::Batch(vec![left, right]),
        }
    }

    /// Returns true if this subscription listens to nothing
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Batch(subs) => subs.iter().all(Self::is_none),
            Self::Every { .. } | Self::Event { .. } => false,
        }
    }

    /// Keys of every timer and event source, in order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::None => Vec::new(),
            Self::Every { key, .. } | Self::Event { key, .. } => vec![key.as_str()],
            Self::Batch(subs) => subs.iter().flat_map(Self::keys).collect(),
        }
    }

    /// Messages produced if every timer named `key` fired at `now`
    #[must_use]
    pub fn tick(&self, key: &str, now: DateTime<Utc>) -> Vec<Msg> {
        match self {
            Self::Every {
                key: own, on_tick, ..
            } if own == key => vec![on_tick(now)],
            Self::Batch(subs) => subs.iter().flat_map(|sub| sub.tick(key, now)).collect(),
            Self::None | Self::Every { .. } | Self::Event { .. } => Vec::new(),
        }
    }

    /// Messages produced if the host delivered `payload` on event stream `key`
    #[must_use]
    pub fn event(&self, key: &str, payload: &str) -> Vec<Msg> {
        match self {
            Self::Event { key: own, on_event } if own == key => {
                on_event(payload).into_iter().collect()
            },
            Self::Batch(subs) => subs
                .iter()
                .flat_map(|sub| sub.event(key, payload))
                .collect(),
            Self::None | Self::Every { .. } | Self::Event { .. } => Vec::new(),
        }
    }

    /// Transform every message this subscription can produce
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Sub<B>
    where
        Msg: 'static,
        B: 'static,
        F: Fn(Msg) -> B + Clone + Send + Sync + 'static,
    {
        match self {
            Self::None => Sub::None,
            Self::Every {
                key,
                interval,
                on_tick,
            } => Sub::Every {
                key,
                interval,
                on_tick: Arc::new(move |now| f(on_tick(now))),
            },
            Self::Event { key, on_event } => Sub::Event {
                key,
                on_event: Arc::new(move |payload: &str| on_event(payload).map(&f)),
            },
            Self::Batch(subs) => Sub::Batch(subs.into_iter().map(|sub| sub.map(f.clone())).collect()),
        }
    }
}

impl<Msg> Batch for Sub<Msg> {
    fn none() -> Self {
        Self::None
    }

    fn batch(self, other: Self) -> Self {
        Sub::batch(self, other)
    }
}

impl<SubMsg, Msg> Retag<SubMsg, Msg> for Sub<SubMsg>
where
    SubMsg: 'static,
    Msg: 'static,
{
    type Output = Sub<Msg>;

    fn retag(self, embed: fn(SubMsg) -> Msg) -> Sub<Msg> {
        self.map(embed)
    }
}

impl<Msg> FromIterator<Sub<Msg>> for Sub<Msg> {
    fn from_iter<I: IntoIterator<Item = Sub<Msg>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::None, Self::batch)
    }
}
