//! A message-less title
//!
//! The label has state but never emits anything, so its parent links it with
//! a `SimpleGlue` and its view is typed over [`Infallible`].

use composable_glue::{Attribute, Html};
use std::convert::Infallible;

/// Label model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Displayed text
    pub text: String,
}

/// Create a label
#[must_use]
pub fn init(text: impl Into<String>) -> Label {
    Label { text: text.into() }
}

/// Replace the text
#[must_use]
pub fn rename(text: String, _label: Label) -> Label {
    Label { text }
}

/// Label view; it has no handlers
#[must_use]
pub fn view(label: &Label) -> Html<Infallible> {
    Html::element(
        "h1",
        vec![Attribute::property("class", "title")],
        vec![Html::text(&label.text)],
    )
}

/// Embedding for fragments that cannot emit messages
pub fn absurd<Msg>(never: Infallible) -> Msg {
    match never {}
}
