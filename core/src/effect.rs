//! Command descriptions
//!
//! A [`Cmd`] describes work the host runtime should perform on behalf of a
//! component: dispatch a message now, dispatch it later, or run an async
//! computation whose result is fed back as a message. Commands are values.
//! They are merged and re-tagged by the combinators, never executed here.
//!
//! Merging is order-preserving. In `a.batch(b)` every leaf of `a` comes
//! before every leaf of `b`, and nested batches are flattened, so the leaf
//! order never depends on how merges were grouped.

use crate::description::{Batch, Retag};
use futures::FutureExt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed future producing an optional message
pub type CmdFuture<Msg> = Pin<Box<dyn Future<Output = Option<Msg>> + Send>>;

/// Command type - describes pending work that produces messages
///
/// # Type Parameters
///
/// - `Msg`: The message type fed back to the update function
pub enum Cmd<Msg> {
    /// No-op command, the identity of [`Cmd::batch`]
    None,

    /// Dispatch a message immediately
    Msg(Msg),

    /// Dispatch a message after a delay
    Delay {
        /// How long to wait
        duration: Duration,
        /// Message to dispatch after the delay
        msg: Box<Msg>,
    },

    /// Arbitrary async computation
    ///
    /// If it resolves to `Some`, the message is fed back into the update function
    Future(CmdFuture<Msg>),

    /// Ordered batch of commands
    Batch(Vec<Cmd<Msg>>),
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Msg> std::fmt::Debug for Cmd<Msg>
where
    Msg: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cmd::None => write!(f, "Cmd::None"),
            Cmd::Msg(msg) => f.debug_tuple("Cmd::Msg").field(msg).finish(),
            Cmd::Delay { duration, msg } => f
                .debug_struct("Cmd::Delay")
                .field("duration", duration)
                .field("msg", msg)
                .finish(),
            Cmd::Future(_) => write!(f, "Cmd::Future(<future>)"),
            Cmd::Batch(cmds) => f.debug_tuple("Cmd::Batch").field(cmds).finish(),
        }
    }
}

impl<Msg> Default for Cmd<Msg> {
    fn default() -> Self {
        Self::None
    }
}

impl<Msg> Cmd<Msg> {
    /// The empty command
    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    /// Dispatch `msg` immediately
    #[must_use]
    pub const fn msg(msg: Msg) -> Self {
        Self::Msg(msg)
    }

    /// Dispatch `msg` after `duration`
    #[must_use]
    pub fn delay(duration: Duration, msg: Msg) -> Self {
        Self::Delay {
            duration,
            msg: Box::new(msg),
        }
    }

    /// Run `future` and dispatch its result, if any
    #[must_use]
    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Option<Msg>> + Send + 'static,
    {
        Self::Future(Box::pin(future))
    }

    /// Merge `other` after `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_glue::Cmd;
    ///
    /// let cmd = Cmd::msg(1).batch(Cmd::none()).batch(Cmd::msg(2));
    /// assert_eq!(cmd.messages(), vec![&1, &2]);
    /// ```
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

    /// Returns true if executing this command would do nothing
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Batch(cmds) => cmds.iter().all(Self::is_none),
            Self::Msg(_) | Self::Delay { .. } | Self::Future(_) => false,
        }
    }

    /// Flatten into leaf commands in execution order, dropping no-ops
    #[must_use]
    pub fn into_leaves(self) -> Vec<Self> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(self, leaves: &mut Vec<Self>) {
        match self {
            Self::None => {},
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect_leaves(leaves);
                }
            },
            leaf => leaves.push(leaf),
        }
    }

    /// Messages this command dispatches without running a future, in order.
    ///
    /// Both immediate and delayed messages are included.
    #[must_use]
    pub fn messages(&self) -> Vec<&Msg> {
        match self {
            Self::None | Self::Future(_) => Vec::new(),
            Self::Msg(msg) => vec![msg],
            Self::Delay { msg, .. } => vec![msg.as_ref()],
            Self::Batch(cmds) => cmds.iter().flat_map(Self::messages).collect(),
        }
    }

    /// Transform every message this command can produce.
    ///
    /// Futures are wrapped so their eventual output is transformed too.
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Cmd<B>
    where
        Msg: Send + 'static,
        B: Send + 'static,
        F: Fn(Msg) -> B + Clone + Send + 'static,
    {
        match self {
            Self::None => Cmd::None,
            Self::Msg(msg) => Cmd::Msg(f(msg)),
            Self::Delay { duration, msg } => Cmd::Delay {
                duration,
                msg: Box::new(f(*msg)),
            },
            Self::Future(future) => Cmd::Future(Box::pin(future.map(move |out| out.map(f)))),
            Self::Batch(cmds) => Cmd::Batch(cmds.into_iter().map(|cmd| cmd.map(f.clone())).collect()),
        }
    }
}

impl<Msg> Batch for Cmd<Msg> {
    fn none() -> Self {
        Self::None
    }

    fn batch(self, other: Self) -> Self {
        Cmd::batch(self, other)
    }
}

impl<SubMsg, Msg> Retag<SubMsg, Msg> for Cmd<SubMsg>
where
    SubMsg: Send + 'static,
    Msg: Send + 'static,
{
    type Output = Cmd<Msg>;

    fn retag(self, embed: fn(SubMsg) -> Msg) -> Cmd<Msg> {
        self.map(embed)
    }
}

impl<Msg> FromIterator<Cmd<Msg>> for Cmd<Msg> {
    fn from_iter<I: IntoIterator<Item = Cmd<Msg>>>(iter: I) -> Self {
        iter.into_iter().fold(Self::None, Self::batch)
    }
}
