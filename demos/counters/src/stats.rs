//! A statistics panel created on demand
//!
//! The parent holds it as `Option<Stats>` and links it with a `LazyGlue`.
//! Creating it kicks off a future that loads the previous session's total.

use chrono::{DateTime, Utc};
use composable_glue::{Cmd, Html, Sub};

/// Total reported by the simulated history lookup
pub const HISTORY_TOTAL: u64 = 42;

/// Key of the keyboard subscription
pub const KEYS: &str = "stats/keys";

/// Stats model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// When the panel was opened
    pub opened_at: DateTime<Utc>,
    /// Recorded clicks
    pub recorded: u32,
    /// Previous session's total, once loaded
    pub history: Option<u64>,
}

/// Stats messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsMsg {
    /// Record one click
    Record,
    /// History lookup finished
    Loaded(u64),
}

/// Open the panel and start loading history
#[must_use]
pub fn init(opened_at: DateTime<Utc>) -> (Stats, Cmd<StatsMsg>) {
    let stats = Stats {
        opened_at,
        recorded: 0,
        history: None,
    };
    let load = Cmd::future(async {
        tokio::task::yield_now().await;
        Some(StatsMsg::Loaded(HISTORY_TOTAL))
    });
    (stats, load)
}

/// Stats update
#[must_use]
pub fn update(msg: StatsMsg, stats: Stats) -> (Stats, Cmd<StatsMsg>) {
    match msg {
        StatsMsg::Record => (
            Stats {
                recorded: stats.recorded + 1,
                ..stats
            },
            Cmd::none(),
        ),
        StatsMsg::Loaded(total) => (
            Stats {
                history: Some(total),
                ..stats
            },
            Cmd::none(),
        ),
    }
}

/// Record on every `r` key press
#[must_use]
pub fn subscriptions(_stats: &Stats) -> Sub<StatsMsg> {
    Sub::on_event(KEYS, |key| (key == "r").then_some(StatsMsg::Record))
}

/// Stats view
#[must_use]
pub fn view(stats: &Stats) -> Html<StatsMsg> {
    let history = stats
        .history
        .map_or_else(|| "loading".to_string(), |total| total.to_string());

    Html::div(vec![
        Html::text(format!("opened {}", stats.opened_at.format("%H:%M:%S"))),
        Html::text(format!(" recorded {} history {history}", stats.recorded)),
        Html::button("record", StatsMsg::Record),
    ])
}
