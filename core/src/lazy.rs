//! Children that are created on demand
//!
//! A [`LazyGlue`] links a parent to a child stored as `Option<SubModel>`. The
//! child starts absent and is created by [`LazyGlue::force_init`]. Every other
//! combinator behaves like its [`Glue`] counterpart while the child is
//! present and is a pass-through while it is absent: the model is returned
//! unchanged and the empty command or subscription is contributed.
//!
//! `force_init` does not guard against forcing twice. Forcing a present child
//! replaces it; callers that need "initialize once" semantics check
//! [`LazyGlue::is_initialized`] first.
//!
//! # Examples
//!
//! ```
//! use composable_glue::{Cmd, LazyGlue};
//!
//! #[derive(Debug, PartialEq)]
//! enum Msg {
//!     Editor(u32),
//! }
//!
//! struct Model {
//!     editor: Option<u32>,
//! }
//!
//! let editor: LazyGlue<Model, u32, Msg, u32> =
//!     LazyGlue::new(Msg::Editor, |m: &Model| &m.editor, |editor, _| Model { editor });
//!
//! let bump = |n: u32, value: u32| (value + n, Cmd::<u32>::none());
//!
//! let (model, _) = editor.update(bump, 1, (Model { editor: None }, Cmd::none()));
//! assert_eq!(model.editor, None);
//!
//! let (model, cmd) = editor.force_init((10, Cmd::msg(0)), (model, Cmd::none()));
//! let (model, _) = editor.update(bump, 1, (model, cmd));
//! assert_eq!(model.editor, Some(11));
//! ```

use crate::description::{Batch, Retag};
use crate::glue::Glue;

/// Descriptor for a child that may not exist yet
pub struct LazyGlue<Model, SubModel, Msg, SubMsg> {
    glue: Glue<Model, Option<SubModel>, Msg, SubMsg>,
}

impl<Model, SubModel, Msg, SubMsg> Clone for LazyGlue<Model, SubModel, Msg, SubMsg> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Model, SubModel, Msg, SubMsg> Copy for LazyGlue<Model, SubModel, Msg, SubMsg> {}

impl<Model, SubModel, Msg, SubMsg> std::fmt::Debug for LazyGlue<Model, SubModel, Msg, SubMsg> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyGlue").finish_non_exhaustive()
    }
}

impl<Model, SubModel, Msg, SubMsg> Glue<Model, Option<SubModel>, Msg, SubMsg> {
    /// Treat this optional child as lazily created
    #[must_use]
    pub const fn lazy(self) -> LazyGlue<Model, SubModel, Msg, SubMsg> {
        LazyGlue { glue: self }
    }
}

impl<Model, SubModel, Msg> LazyGlue<Model, SubModel, Msg, Msg> {
    /// Lazy descriptor whose `embed` is the identity
    #[must_use]
    pub const fn poly(
        get: fn(&Model) -> &Option<SubModel>,
        set: fn(Option<SubModel>, Model) -> Model,
    ) -> Self {
        Glue::poly(get, set).lazy()
    }
}

impl<Model, SubModel, Msg, SubMsg> LazyGlue<Model, SubModel, Msg, SubMsg> {
    /// Create a lazy descriptor
    #[must_use]
    pub const fn new(
        embed: fn(SubMsg) -> Msg,
        get: fn(&Model) -> &Option<SubModel>,
        set: fn(Option<SubModel>, Model) -> Model,
    ) -> Self {
        Glue::new(embed, get, set).lazy()
    }

    /// The underlying descriptor over `Option<SubModel>`
    #[must_use]
    pub const fn glue(&self) -> Glue<Model, Option<SubModel>, Msg, SubMsg> {
        self.glue
    }

    /// Returns true once the child has been forced
    #[must_use]
    pub fn is_initialized(&self, model: &Model) -> bool {
        self.glue.get(model).is_some()
    }

    /// Create the child from its `(model, cmd)` initialization.
    ///
    /// Unconditional: a present child is replaced.
    pub fn force_init<C, P>(&self, (sub, sub_cmd): (SubModel, C), (model, cmd): (Model, P)) -> (Model, P)
    where
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        let model = self.force_init_model(sub, model);
        (model, cmd.batch(sub_cmd.retag(self.glue.embed())))
    }

    /// [`LazyGlue::force_init`] for a child whose initialization has no command
    #[must_use]
    pub fn force_init_model(&self, sub: SubModel, model: Model) -> Model {
        if self.is_initialized(&model) {
            tracing::debug!("force_init replacing an initialized child");
        } else {
            tracing::trace!("force_init creating child");
        }
        self.glue.set(Some(sub), model)
    }

    /// Run `step` on the child if present and write the new child back
    fn lift<R, F>(&self, model: Model, step: F) -> (Model, Option<R>)
    where
        SubModel: Clone,
        F: FnOnce(SubModel) -> (SubModel, R),
    {
        let current = self.glue.get(&model).clone();
        let Some(sub) = current else {
            tracing::trace!("lazy child absent, passing through");
            return (model, None);
        };
        let (sub, out) = step(sub);
        (self.glue.set(Some(sub), model), Some(out))
    }

    fn merge<C, P>(&self, cmd: P, sub_cmd: Option<C>) -> P
    where
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        cmd.batch(sub_cmd.retag(self.glue.embed()).unwrap_or_else(P::none))
    }

    /// [`Glue::update`] when present, pass-through when absent
    pub fn update<A, F, C, P>(&self, update: F, msg: A, (model, cmd): (Model, P)) -> (Model, P)
    where
        SubModel: Clone,
        F: FnOnce(A, SubModel) -> (SubModel, C),
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        self.update_with(|sub| update(msg, sub), (model, cmd))
    }

    /// [`Glue::update_model`] when present, pass-through when absent
    #[must_use]
    pub fn update_model<A, F>(&self, update: F, msg: A, model: Model) -> Model
    where
        SubModel: Clone,
        F: FnOnce(A, SubModel) -> SubModel,
    {
        self.update_model_with(|sub| update(msg, sub), model)
    }

    /// [`Glue::update_with`] when present, pass-through when absent
    pub fn update_with<F, C, P>(&self, update: F, (model, cmd): (Model, P)) -> (Model, P)
    where
        SubModel: Clone,
        F: FnOnce(SubModel) -> (SubModel, C),
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        let (model, sub_cmd) = self.lift(model, update);
        (model, self.merge(cmd, sub_cmd))
    }

    /// [`Glue::update_model_with`] when present, pass-through when absent
    #[must_use]
    pub fn update_model_with<F>(&self, update: F, model: Model) -> Model
    where
        SubModel: Clone,
        F: FnOnce(SubModel) -> SubModel,
    {
        self.lift(model, |sub| (update(sub), ())).0
    }

    /// [`Glue::trigger`] when present, pass-through when absent
    pub fn trigger<F, C, P>(&self, trigger: F, (model, cmd): (Model, P)) -> (Model, P)
    where
        F: FnOnce(&SubModel) -> C,
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        let sub_cmd = self.glue.get(&model).as_ref().map(trigger);
        let cmd = self.merge(cmd, sub_cmd);
        (model, cmd)
    }

    /// [`Glue::subscriptions`] contributing nothing while the child is absent
    pub fn subscriptions<FC, FP, C, P>(self, child: FC, parent: FP) -> impl Fn(&Model) -> P
    where
        FC: Fn(&SubModel) -> C,
        FP: Fn(&Model) -> P,
        C: Retag<SubMsg, Msg, Output = P>,
        P: Batch,
    {
        self.subscriptions_when(|_: &Model| true, child, parent)
    }

    /// [`Glue::subscriptions_when`] contributing nothing while the child is absent
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
            let sub = if when(model) {
                self.glue.get(model).as_ref().map(&child)
            } else {
                None
            };
            self.merge(parent(model), sub)
        }
    }

    /// Render the child if present
    pub fn view<V, F>(&self, view: F, model: &Model) -> Option<V::Output>
    where
        F: FnOnce(&SubModel) -> V,
        V: Retag<SubMsg, Msg>,
    {
        self.glue.view(|sub: &Option<SubModel>| sub.as_ref().map(view), model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cmd, Html, Sub};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum EditorMsg {
        Type(char),
        Saved,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Msg {
        Editor(EditorMsg),
        Opened,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Editor {
        text: String,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Model {
        editor: Option<Editor>,
        focused: bool,
    }

    fn editor() -> LazyGlue<Model, Editor, Msg, EditorMsg> {
        LazyGlue::new(
            Msg::Editor,
            |model: &Model| &model.editor,
            |editor, model| Model { editor, ..model },
        )
    }

    fn editor_update(msg: EditorMsg, mut editor: Editor) -> (Editor, Cmd<EditorMsg>) {
        match msg {
            EditorMsg::Type(c) => {
                editor.text.push(c);
                (editor, Cmd::msg(EditorMsg::Saved))
            },
            EditorMsg::Saved => (editor, Cmd::none()),
        }
    }

    fn editor_subscriptions(_editor: &Editor) -> Sub<EditorMsg> {
        Sub::every("autosave", Duration::from_secs(5), |_| EditorMsg::Saved)
    }

    fn forced() -> Model {
        editor().force_init_model(Editor::default(), Model::default())
    }

    #[test]
    fn test_absent_child_passes_through() {
        let glue = editor();
        let model = Model::default();

        let (after, cmd) = glue.update(editor_update, EditorMsg::Type('a'), (model.clone(), Cmd::msg(Msg::Opened)));
        assert_eq!(after, model);
        assert_eq!(cmd.messages(), vec![&Msg::Opened]);

        let after = glue.update_model_with(|e| e, model.clone());
        assert_eq!(after, model);

        let (_, cmd) = glue.trigger(|_| Cmd::msg(EditorMsg::Saved), (model.clone(), Cmd::none()));
        assert!(cmd.is_none());

        assert!(glue.view(|_| Html::<EditorMsg>::text("editor"), &model).is_none());
    }

    #[test]
    fn test_force_init_makes_child_present() {
        let glue = editor();
        let (model, cmd) = glue.force_init(
            (Editor { text: "hi".to_string() }, Cmd::msg(EditorMsg::Saved)),
            (Model::default(), Cmd::msg(Msg::Opened)),
        );

        assert!(glue.is_initialized(&model));
        assert_eq!(model.editor, Some(Editor { text: "hi".to_string() }));
        assert_eq!(
            cmd.messages(),
            vec![&Msg::Opened, &Msg::Editor(EditorMsg::Saved)]
        );
    }

    #[test]
    fn test_present_child_updates_like_glue() {
        let (model, cmd) = editor().update(editor_update, EditorMsg::Type('x'), (forced(), Cmd::none()));

        assert_eq!(model.editor.map(|e| e.text), Some("x".to_string()));
        assert_eq!(cmd.messages(), vec![&Msg::Editor(EditorMsg::Saved)]);
    }

    #[test]
    fn test_update_model_only_touches_present_child() {
        let push = |c: char, mut e: Editor| {
            e.text.push(c);
            e
        };

        let absent = editor().update_model(push, 'a', Model::default());
        assert_eq!(absent.editor, None);

        let present = editor().update_model(push, 'a', forced());
        assert_eq!(present.editor.map(|e| e.text), Some("a".to_string()));
    }

    #[test]
    fn test_force_init_twice_overwrites() {
        let glue = editor();
        let model = glue.force_init_model(Editor { text: "first".to_string() }, Model::default());
        let model = glue.force_init_model(Editor { text: "second".to_string() }, model);

        assert_eq!(model.editor, Some(Editor { text: "second".to_string() }));
    }

    #[test]
    fn test_subscriptions_follow_presence() {
        let subs = editor().subscriptions(editor_subscriptions, |_: &Model| Sub::none());

        assert!(subs(&Model::default()).is_none());
        assert_eq!(subs(&forced()).keys(), vec!["autosave"]);
    }

    #[test]
    fn test_subscriptions_when_needs_presence_and_predicate() {
        let subs = editor().subscriptions_when(
            |model: &Model| model.focused,
            editor_subscriptions,
            |_: &Model| Sub::none(),
        );

        let mut focused_absent = Model::default();
        focused_absent.focused = true;
        let mut focused_present = forced();
        focused_present.focused = true;

        assert!(subs(&focused_absent).is_none());
        assert!(subs(&forced()).is_none());
        assert_eq!(subs(&focused_present).keys(), vec!["autosave"]);
    }

    #[test]
    fn test_view_when_present() {
        let html = editor()
            .view(|e: &Editor| Html::button(e.text.clone(), EditorMsg::Saved), &forced())
            .unwrap_or_else(|| Html::text("missing"));

        assert_eq!(html.dispatch("click", ""), vec![Msg::Editor(EditorMsg::Saved)]);
    }

    #[test]
    fn test_glue_lazy_conversion() {
        let glue: Glue<Model, Option<Editor>, Msg, EditorMsg> = editor().glue();
        let lazy = glue.lazy();
        assert!(!lazy.is_initialized(&Model::default()));
    }
}
