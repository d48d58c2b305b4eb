//! Parent/child composition descriptors
//!
//! This module provides the descriptor types and the combinators built on
//! them:
//! - **[`Glue`]**: links a child that has messages to its parent
//! - **[`SimpleGlue`]**: links a message-less child to its parent
//!
//! A descriptor holds three plain functions:
//! - `embed`: wraps a child message into a parent message
//! - `get`: projects the child model out of the parent model
//! - `set`: returns a new parent model with the child model replaced
//!
//! `get` and `set` must obey two laws, which are not checked:
//! - round trip: `get(&set(s, m)) == s`
//! - non-interference: `set` leaves every other part of the parent untouched
//!
//! Whenever two commands or subscriptions are merged, the one the parent
//! already had comes first and the child's contribution is appended.
//!
//! # Examples
//!
//! ## Folding child initializations
//!
//! ```
//! use composable_glue::{Cmd, Glue};
//!
//! #[derive(Debug, PartialEq)]
//! enum Msg {
//!     Left(u8),
//!     Right(u8),
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Model {
//!     left: u8,
//!     right: u8,
//! }
//!
//! let left: Glue<Model, u8, Msg, u8> =
//!     Glue::new(Msg::Left, |m: &Model| &m.left, |left, m| Model { left, ..m });
//! let right: Glue<Model, u8, Msg, u8> =
//!     Glue::new(Msg::Right, |m: &Model| &m.right, |right, m| Model { right, ..m });
//!
//! let build = |left| move |right| Model { left, right };
//! let (build, cmd) = left.init((1, Cmd::msg(10)), (build, Cmd::none()));
//! let (model, cmd) = right.init((2, Cmd::msg(20)), (build, cmd));
//!
//! assert_eq!(model, Model { left: 1, right: 2 });
//! assert_eq!(cmd.messages(), vec![&Msg::Left(10), &Msg::Right(20)]);
//! ```

use crate::description::{Batch, Retag};

/// Descriptor for a message-less child.
///
/// Only the model-level combinators exist on this type: without an `embed`
/// there is no way to route commands, subscriptions or view messages, and
/// [`SimpleGlue::view_simple`] asks for the embedding at the call site.
///
/// # Examples
///
/// ```
/// use composable_glue::SimpleGlue;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Model {
///     label: String,
///     clicks: u32,
/// }
///
/// let label: SimpleGlue<Model, String> =
///     SimpleGlue::new(|m: &Model| &m.label, |label, m| Model { label, ..m });
///
/// let model = Model { label: "a".to_string(), clicks: 3 };
/// let model = label.update_model_with(|label| label + "b", model);
/// assert_eq!(model, Model { label: "ab".to_string(), clicks: 3 });
/// ```
pub struct SimpleGlue<Model, SubModel> {
    get: fn(&Model) -> &SubModel,
    set: fn(SubModel, Model) -> Model,
}

impl<Model, SubModel> Clone for SimpleGlue<Model, SubModel> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Model, SubModel> Copy for SimpleGlue<Model, SubModel> {}

impl<Model, SubModel> std::fmt::Debug for SimpleGlue<Model, SubModel> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleGlue").finish_non_exhaustive()
    }
}

impl<Model, SubModel> SimpleGlue<Model, SubModel> {
    /// Create a message-less descriptor
    #[must_use]
    pub const fn new(get: fn(&Model) -> &SubModel, set: fn(SubModel, Model) -> Model) -> Self {
        Self { get, set }
    }

    /// Project the child model out of `model`
    pub fn get<'a>(&self, model: &'a Model) -> &'a SubModel {
        (self.get)(model)
    }

    /// Replace the child model inside `model`
    #[must_use]
    pub fn set(&self, sub: SubModel, model: Model) -> Model {
        (self.set)(sub, model)
    }

    /// Feed an initialized child model to a (possibly curried) parent builder
    pub fn init_model<R, B>(&self, sub: SubModel, build: B) -> R
    where
        B: FnOnce(SubModel) -> R,
    {
        build(sub)
    }

    /// Route `msg` through an effect-free child update
    #[must_use]
    pub fn update_model<A, F>(&self, update: F, msg: A, model: Model) -> Model
    where
        SubModel: Clone,
        F: FnOnce(A, SubModel) -> SubModel,
    {
        let sub = update(msg, self.get(&model).clone());
        self.set(sub, model)
    }

    /// Apply an effect-free child operation directly
    #[must_use]
    pub fn update_model_with<F>(&self, update: F, model: Model) -> Model
    where
        SubModel: Clone,
        F: FnOnce(SubModel) -> SubModel,
    {
        let sub = update(self.get(&model).clone());
        self.set(sub, model)
    }

    /// Render the child and re-tag its fragment with a caller-supplied embedding
    pub fn view_simple<V, F, SubMsg, Msg>(
        &self,
        embed: fn(SubMsg) -> Msg,
        view: F,
        model: &Model,
    ) -> V::Output
    where
        F: FnOnce(&SubModel) -> V,
        V: Retag<SubMsg, Msg>,
    {
        view(self.get(model)).retag(embed)
    }
}

/// Descriptor linking a child component to its parent.
///
/// # Type Parameters
///
/// - `Model`: The parent model
/// - `SubModel`: The child model stored inside `Model`
/// - `Msg`: The parent message type
/// - `SubMsg`: The child message type
pub struct Glue<Model, SubModel, Msg, SubMsg> {
    embed: fn(SubMsg) -> Msg,
    simple: SimpleGlue<Model, SubModel>,
}

impl<Model, SubModel, Msg, SubMsg> Clone for Glue<Model, SubModel, Msg, SubMsg> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Model, SubModel, Msg, SubMsg> Copy for Glue<Model, SubModel, Msg, SubMsg> {}

impl<Model, SubModel, Msg, SubMsg> std::fmt::Debug for Glue<Model, SubModel, Msg, SubMsg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Glue").finish_non_exhaustive()
    }
}

impl<Model, SubModel, Msg> Glue<Model, SubModel, Msg, Msg> {
    /// Create a descriptor whose `embed` is the identity.
    ///
    /// Use it when the child already speaks the parent's message type, for
    /// example when it bubbles selected messages straight up to the parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_glue::{Cmd, Glue};
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum Msg {
    ///     Saved,
    /// }
    ///
    /// struct Model {
    ///     draft: String,
    /// }
    ///
    /// let draft: Glue<Model, String, Msg, Msg> =
    ///     Glue::poly(|m: &Model| &m.draft, |draft, _| Model { draft });
    ///
    /// let model = Model { draft: String::new() };
    /// let (_, cmd) = draft.trigger(|_draft| Cmd::msg(Msg::Saved), (model, Cmd::none()));
    /// assert_eq!(cmd.messages(), vec![&Msg::Saved]);
    /// ```
    #[must_use]
    pub const fn poly(get: fn(&Model) -> &SubModel, set: fn(SubModel, Model) -> Model) -> Self {
        Self::new(std::convert::identity, get, set)
    }
}

impl<Model, SubModel, Msg, SubMsg> Glue<Model, SubModel, Msg, SubMsg> {
    /// Create a descriptor from an embedding, a projection and a setter
    #[must_use]
    pub const fn new(
        embed: fn(SubMsg) -> Msg,
        get: fn(&Model) -> &SubModel,
        set: fn(SubModel, Model) -> Model,
    ) -> Self {
        Self {
            embed,
            simple: SimpleGlue::new(get, set),
        }
    }

    /// The child-to-parent message embedding
    #[must_use]
    pub const fn embed(&self) -> fn(SubMsg) -> Msg {
        self.embed
    }

    /// Forget the embedding
    #[must_use]
    pub const fn as_simple(&self) -> SimpleGlue<Model, SubModel> {
        self.simple
    }

    /// Project the child model out of `model`
    pub fn get<'a>(&self, model: &'a Model) -> &'a SubModel {
        self.simple.get(model)
    }

    /// Replace the child model inside `model`
    #[must_use]
    pub fn set(&self, sub: SubModel, model: Model) -> Model {
        self.simple.set(sub, model)
    }

    /// Re-tag the effect of a `(state, effect)` pair into the parent's vocabulary
    pub fn map<S, C>(&self, pair: (S, C)) -> (S, C::Output)
    where
        C: Retag<SubMsg, Msg>,
    {
        map(self.embed, pair)
    }

    /// Fold a child's `(model, cmd)` initialization into a parent builder.
    ///
    /// `build` receives the child model; its result is returned alongside
    /// `cmd` merged with the re-tagged child command. With a curried builder
    /// the calls chain, one per child, and the merged command follows call
    /// order.
    pub fn init<B, R, C, P>(&self, (sub, sub_cmd): (SubModel, C), (build, cmd): (B, P)) -> (R, P)
    where
        B: FnOnce(SubModel) -> R,
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        (build(sub), cmd.batch(sub_cmd.retag(self.embed)))
    }

    /// [`Glue::init`] for a child whose initialization has no command
    pub fn init_model<R, B>(&self, sub: SubModel, build: B) -> R
    where
        B: FnOnce(SubModel) -> R,
    {
        self.simple.init_model(sub, build)
    }

    /// Route `msg` to the child update and merge its command after `cmd`
    pub fn update<A, F, C, P>(&self, update: F, msg: A, (model, cmd): (Model, P)) -> (Model, P)
    where
        SubModel: Clone,
        F: FnOnce(A, SubModel) -> (SubModel, C),
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        self.update_with(|sub| update(msg, sub), (model, cmd))
    }

    /// Route `msg` to an effect-free child update
    #[must_use]
    pub fn update_model<A, F>(&self, update: F, msg: A, model: Model) -> Model
    where
        SubModel: Clone,
        F: FnOnce(A, SubModel) -> SubModel,
    {
        self.simple.update_model(update, msg, model)
    }

    /// Apply a child operation directly and merge its command after `cmd`
    pub fn update_with<F, C, P>(&self, update: F, (model, cmd): (Model, P)) -> (Model, P)
    where
        SubModel: Clone,
        F: FnOnce(SubModel) -> (SubModel, C),
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        let (sub, sub_cmd) = update(self.get(&model).clone());
        (self.set(sub, model), cmd.batch(sub_cmd.retag(self.embed)))
    }

    /// Apply an effect-free child operation directly
    #[must_use]
    pub fn update_model_with<F>(&self, update: F, model: Model) -> Model
    where
        SubModel: Clone,
        F: FnOnce(SubModel) -> SubModel,
    {
        self.simple.update_model_with(update, model)
    }

    /// Derive a command from the current child model without changing it.
    ///
    /// The command is re-tagged and merged after `cmd`. Its result reaches the
    /// parent later, as a message.
    pub fn trigger<F, C, P>(&self, trigger: F, (model, cmd): (Model, P)) -> (Model, P)
    where
        F: FnOnce(&SubModel) -> C,
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        let sub_cmd = trigger(self.get(&model)).retag(self.embed);
        (model, cmd.batch(sub_cmd))
    }

    /// Extend a parent subscription function with the child's.
    ///
    /// The returned function merges `parent(model)` with the re-tagged
    /// `child(get(model))`, in that order.
    pub fn subscriptions<FC, FP, C, P>(self, child: FC, parent: FP) -> impl Fn(&Model) -> P
    where
        FC: Fn(&SubModel) -> C,
        FP: Fn(&Model) -> P,
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        move |model| parent(model).batch(child(self.get(model)).retag(self.embed))
    }

    /// [`Glue::subscriptions`] where the child only contributes while `when(model)` holds
    pub fn subscriptions_when<W, FC, FP, C, P>(
        self,
        when: W,
        child: FC,
        parent: FP,
    ) -> impl Fn(&Model) -> P
    where
        W: Fn(&Model) -> bool,
        FC: Fn(&SubModel) -> C,
        FP: Fn(&Model) -> P,
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        move |model| {
            if when(model) {
                parent(model).batch(child(self.get(model)).retag(self.embed))
            } else {
                parent(model)
            }
        }
    }

    /// Render the child and re-tag every message its fragment can emit
    pub fn view<V, F>(&self, view: F, model: &Model) -> V::Output
    where
        F: FnOnce(&SubModel) -> V,
        V: Retag<SubMsg, Msg>,
    {
        self.simple.view_simple(self.embed, view, model)
    }
}

/// Re-tag the effect of a `(state, effect)` pair with `embed`.
///
/// Handy inside a child's own `init`/`update` when it delegates to a
/// grandchild.
///
/// # Examples
///
/// ```
/// use composable_glue::{Cmd, glue};
///
/// let (state, cmd) = glue::map(Some, (5, Cmd::msg('x')));
/// assert_eq!(state, 5);
/// assert_eq!(cmd.messages(), vec![&Some('x')]);
/// ```
pub fn map<S, C, SubMsg, Msg>(embed: fn(SubMsg) -> Msg, (state, cmd): (S, C)) -> (S, C::Output)
where
    C: Retag<SubMsg, Msg>,
{
    (state, cmd.retag(embed))
}
