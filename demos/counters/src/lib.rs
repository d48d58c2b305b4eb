//! # Counters
//!
//! A parent application composed from independent children with Composable
//! Glue.
//!
//! This example showcases:
//! - Two instances of the same [`counter`] component, each linked through
//!   its own descriptor and message constructor
//! - A message-less [`label`] linked with a `SimpleGlue`
//! - A [`goal`] that reports in the parent's message type (poly descriptor)
//! - A [`stats`] panel created on demand (lazy descriptor)
//! - Descriptors generated by `#[derive(Glue)]`
//! - A [`host`] that runs the commands on tokio
//!
//! ## Example
//!
//! ```
//! use counters::{update, CounterMsg, Counters, Msg};
//! use counters::host::App;
//!
//! let (model, _) = Counters::init();
//! let (model, _) = update(Msg::Left(CounterMsg::Increment), model);
//! assert_eq!(model.left.count, 1);
//! assert_eq!(model.right.count, 0);
//! ```

use chrono::{DateTime, Utc};
use composable_glue::{Cmd, Html, Sub};
use composable_glue_macros::Glue;

pub mod counter;
pub mod goal;
pub mod host;
pub mod label;
pub mod stats;

pub use counter::{Counter, CounterMsg};
pub use goal::Goal;
pub use label::Label;
pub use stats::{Stats, StatsMsg};

/// Initial title
pub const TITLE: &str = "Counters";

/// Count either counter has to reach
pub const GOAL: i64 = 3;

/// Title shown once the goal is reached
pub const GOAL_TITLE: &str = "Goal reached!";

/// Parent model
#[derive(Glue, Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Left counter
    #[glue(embed = Msg::Left, msg = Msg, sub_msg = CounterMsg)]
    pub left: Counter,

    /// Right counter
    #[glue(embed = Msg::Right, msg = Msg, sub_msg = CounterMsg)]
    pub right: Counter,

    /// Title
    #[glue(simple)]
    pub title: Label,

    /// Shared goal
    #[glue(poly, msg = Msg)]
    pub goal: Goal,

    /// Stats panel, absent until opened
    #[glue(lazy, embed = Msg::Stats, msg = Msg, sub_msg = StatsMsg)]
    pub stats: Option<Stats>,

    /// Suspends the counters' own tickers
    pub paused: bool,
}

/// Parent messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Message for the left counter
    Left(CounterMsg),
    /// Message for the right counter
    Right(CounterMsg),
    /// Message for the stats panel
    Stats(StatsMsg),
    /// Open the stats panel at the given time
    OpenStats(DateTime<Utc>),
    /// Replace the title
    Rename(String),
    /// A counter reached the goal
    GoalReached,
    /// Pause or resume the counters' tickers
    TogglePause,
}

/// Build the parent from its children's initializations
#[must_use]
pub fn init() -> (Model, Cmd<Msg>) {
    let build = |left: Counter| {
        move |right: Counter| {
            move |title: Label| Model {
                left,
                right,
                title,
                goal: goal::init(GOAL),
                stats: None,
                paused: false,
            }
        }
    };

    let pair = Model::left_glue().init(counter::init("left"), (build, Cmd::none()));
    let (build, cmd) = Model::right_glue().init(counter::init("right"), pair);
    let model = Model::title_glue().init_model(label::init(TITLE), build);

    (model, cmd)
}

/// Parent update
#[must_use]
pub fn update(msg: Msg, model: Model) -> (Model, Cmd<Msg>) {
    let pair = (model, Cmd::none());

    match msg {
        Msg::Left(msg) => check_goal(Model::left_glue().update(counter::update, msg, pair)),
        Msg::Right(msg) => check_goal(Model::right_glue().update(counter::update, msg, pair)),
        Msg::Stats(msg) => Model::stats_glue().update(stats::update, msg, pair),
        Msg::OpenStats(now) => {
            let panel = Model::stats_glue();
            if panel.is_initialized(&pair.0) {
                tracing::debug!("Stats panel already open");
                pair
            } else {
                panel.force_init(stats::init(now), pair)
            }
        },
        Msg::Rename(text) => {
            let (model, cmd) = pair;
            (Model::title_glue().update_model(label::rename, text, model), cmd)
        },
        Msg::GoalReached => {
            let (model, cmd) = pair;
            let model = Model::goal_glue().update_model_with(goal::reach, model);
            let model =
                Model::title_glue().update_model(label::rename, GOAL_TITLE.to_string(), model);
            tracing::info!(goal = model.goal.target, "Goal reached");
            (model, cmd)
        },
        Msg::TogglePause => {
            let (model, cmd) = pair;
            (
                Model {
                    paused: !model.paused,
                    ..model
                },
                cmd,
            )
        },
    }
}

fn check_goal(pair: (Model, Cmd<Msg>)) -> (Model, Cmd<Msg>) {
    let best = pair.0.left.count.max(pair.0.right.count);
    Model::goal_glue().trigger(|goal: &Goal| goal::check(goal, best, Msg::GoalReached), pair)
}

/// Parent subscriptions: both counters while not paused, plus the stats panel
/// once open
#[must_use]
pub fn subscriptions(model: &Model) -> Sub<Msg> {
    let running = |model: &Model| !model.paused;

    let left = Model::left_glue().subscriptions_when(
        running,
        counter::subscriptions,
        |_: &Model| Sub::none(),
    );
    let right = Model::right_glue().subscriptions_when(running, counter::subscriptions, left);
    let all = Model::stats_glue().subscriptions(stats::subscriptions, right);

    all(model)
}

/// Parent view
#[must_use]
pub fn view(model: &Model) -> Html<Msg> {
    let mut children = vec![
        Model::title_glue().view_simple(label::absurd::<Msg>, label::view, model),
        Model::left_glue().view(counter::view, model),
        Model::right_glue().view(counter::view, model),
    ];
    children.extend(Model::stats_glue().view(stats::view, model));
    children.push(Html::button(
        if model.paused { "resume" } else { "pause" },
        Msg::TogglePause,
    ));

    Html::div(children)
}

/// The application as seen by the [`host`]
#[derive(Debug, Clone, Copy)]
pub struct Counters;

impl host::App for Counters {
    type Model = Model;
    type Msg = Msg;

    fn init() -> (Model, Cmd<Msg>) {
        init()
    }

    fn update(msg: Msg, model: Model) -> (Model, Cmd<Msg>) {
        update(msg, model)
    }

    fn view(model: &Model) -> Html<Msg> {
        view(model)
    }

    fn subscriptions(model: &Model) -> Sub<Msg> {
        subscriptions(model)
    }
}
