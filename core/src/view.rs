//! View fragments
//!
//! [`Html`] is a small, renderer-agnostic view tree. Event handlers live on
//! elements as [`Attribute::On`] entries. Re-tagging a fragment walks the
//! whole tree and wraps each handler individually, so a child's fragment can
//! be placed anywhere in a parent's tree and still emit parent messages.

use crate::description::Retag;
use std::fmt;
use std::sync::Arc;

/// Event handler producing a message from an event payload
pub type Handler<Msg> = Arc<dyn Fn(&str) -> Msg + Send + Sync>;

/// Element attribute
pub enum Attribute<Msg> {
    /// Plain `name="value"` property
    Property(String, String),
    /// Handler for the named event
    On(String, Handler<Msg>),
}

impl<Msg> Attribute<Msg> {
    /// Plain property
    #[must_use]
    pub fn property(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Property(name.into(), value.into())
    }

    /// Handler for `event`, receiving the event payload
    #[must_use]
    pub fn on<F>(event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&str) -> Msg + Send + Sync + 'static,
    {
        Self::On(event.into(), Arc::new(handler))
    }

    /// Click handler emitting a fixed message
    #[must_use]
    pub fn on_click(msg: Msg) -> Self
    where
        Msg: Clone + Send + Sync + 'static,
    {
        Self::on("click", move |_| msg.clone())
    }

    fn map<B, F>(self, f: F) -> Attribute<B>
    where
        Msg: 'static,
        B: 'static,
        F: Fn(Msg) -> B + Send + Sync + 'static,
    {
        match self {
            Self::Property(name, value) => Attribute::Property(name, value),
            Self::On(event, handler) => {
                Attribute::On(event, Arc::new(move |payload: &str| f(handler(payload))))
            },
        }
    }
}

impl<Msg> fmt::Debug for Attribute<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name, value) => f.debug_tuple("Property").field(name).field(value).finish(),
            Self::On(event, _) => f.debug_tuple("On").field(event).finish_non_exhaustive(),
        }
    }
}

/// View fragment emitting messages of type `Msg`
pub enum Html<Msg> {
    /// Text node
    Text(String),
    /// Element node
    Element {
        /// Tag name
        tag: String,
        /// Properties and event handlers
        attributes: Vec<Attribute<Msg>>,
        /// Child nodes
        children: Vec<Html<Msg>>,
    },
}

impl<Msg> fmt::Debug for Html<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Element {
                tag,
                attributes,
                children,
            } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attributes", attributes)
                .field("children", children)
                .finish(),
        }
    }
}

impl<Msg> Html<Msg> {
    /// Text node
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Element node
    #[must_use]
    pub fn element(
        tag: impl Into<String>,
        attributes: Vec<Attribute<Msg>>,
        children: Vec<Self>,
    ) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes,
            children,
        }
    }

    /// `<div>` without attributes
    #[must_use]
    pub fn div(children: Vec<Self>) -> Self {
        Self::element("div", Vec::new(), children)
    }

    /// `<button>` emitting `msg` when clicked
    #[must_use]
    pub fn button(label: impl Into<String>, msg: Msg) -> Self
    where
        Msg: Clone + Send + Sync + 'static,
    {
        Self::element("button", vec![Attribute::on_click(msg)], vec![Self::text(label)])
    }

    /// Fire every handler registered for `event`, depth-first, in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use composable_glue::Html;
    ///
    /// let html = Html::div(vec![Html::button("+", 1), Html::button("-", -1)]);
    /// assert_eq!(html.dispatch("click", ""), vec![1, -1]);
    /// ```
    #[must_use]
    pub fn dispatch(&self, event: &str, payload: &str) -> Vec<Msg> {
        let mut messages = Vec::new();
        self.collect_dispatch(event, payload, &mut messages);
        messages
    }

    fn collect_dispatch(&self, event: &str, payload: &str, messages: &mut Vec<Msg>) {
        if let Self::Element {
            attributes,
            children,
            ..
        } = self
        {
            for attribute in attributes {
                match attribute {
                    Attribute::On(name, handler) if name == event => messages.push(handler(payload)),
                    Attribute::On(..) | Attribute::Property(..) => {},
                }
            }
            for child in children {
                child.collect_dispatch(event, payload, messages);
            }
        }
    }

    /// Render as markup; handlers appear as bare `on:<event>` markers
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Transform every message any handler in the tree can produce
    #[must_use]
    pub fn map<B, F>(self, f: F) -> Html<B>
    where
        Msg: 'static,
        B: 'static,
        F: Fn(Msg) -> B + Clone + Send + Sync + 'static,
    {
        match self {
            Self::Text(text) => Html::Text(text),
            Self::Element {
                tag,
                attributes,
                children,
            } => Html::Element {
                tag,
                attributes: attributes
                    .into_iter()
                    .map(|attribute| attribute.map(f.clone()))
                    .collect(),
                children: children.into_iter().map(|child| child.map(f.clone())).collect(),
            },
        }
    }
}

impl<Msg> fmt::Display for Html<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Element {
                tag,
                attributes,
                children,
            } => {
                write!(f, "<{tag}")?;
                for attribute in attributes {
                    match attribute {
                        Attribute::Property(name, value) => write!(f, " {name}=\"{value}\"")?,
                        Attribute::On(event, _) => write!(f, " on:{event}")?,
                    }
                }
                write!(f, ">")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{tag}>")
            },
        }
    }
}

impl<SubMsg, Msg> Retag<SubMsg, Msg> for Html<SubMsg>
where
    SubMsg: 'static,
    Msg: 'static,
{
    type Output = Html<Msg>;

    fn retag(self, embed: fn(SubMsg) -> Msg) -> Html<Msg> {
        self.map(embed)
    }
}

impl<SubMsg, Msg> Retag<SubMsg, Msg> for Vec<Html<SubMsg>>
where
    SubMsg: 'static,
    Msg: 'static,
{
    type Output = Vec<Html<Msg>>;

    fn retag(self, embed: fn(SubMsg) -> Msg) -> Vec<Html<Msg>> {
        self.into_iter().map(|html| html.map(embed)).collect()
    }
}
