//! A reusable counter component
//!
//! The counter knows nothing about where it is embedded. Its parent links it
//! in through a descriptor and re-tags everything it returns.

use composable_glue::{Attribute, Cmd, Html, Sub};
use std::time::Duration;

/// Delay used by [`CounterMsg::IncrementLater`]
pub const LATER: Duration = Duration::from_millis(20);

/// Counter model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    /// Identifies this counter's subscriptions
    pub id: String,
    /// Current count value
    pub count: i64,
    /// Whether the counter ticks by itself
    pub auto: bool,
}

/// Counter messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterMsg {
    /// Increment by 1
    Increment,
    /// Decrement by 1
    Decrement,
    /// Reset to 0
    Reset,
    /// Increment by 1 after [`LATER`]
    IncrementLater,
    /// Toggle self-ticking
    ToggleAuto,
    /// Subscription tick
    Tick,
}

/// Create a counter at 0
#[must_use]
pub fn init(id: impl Into<String>) -> (Counter, Cmd<CounterMsg>) {
    let counter = Counter {
        id: id.into(),
        count: 0,
        auto: false,
    };
    (counter, Cmd::none())
}

/// Counter update
#[must_use]
pub fn update(msg: CounterMsg, counter: Counter) -> (Counter, Cmd<CounterMsg>) {
    match msg {
        CounterMsg::Increment | CounterMsg::Tick => (
            Counter {
                count: counter.count + 1,
                ..counter
            },
            Cmd::none(),
        ),
        CounterMsg::Decrement => (
            Counter {
                count: counter.count - 1,
                ..counter
            },
            Cmd::none(),
        ),
        CounterMsg::Reset => (Counter { count: 0, ..counter }, Cmd::none()),
        CounterMsg::IncrementLater => (counter, Cmd::delay(LATER, CounterMsg::Increment)),
        CounterMsg::ToggleAuto => (
            Counter {
                auto: !counter.auto,
                ..counter
            },
            Cmd::none(),
        ),
    }
}

/// Subscription key of a counter's ticker
#[must_use]
pub fn tick_key(counter: &Counter) -> String {
    format!("{}/tick", counter.id)
}

/// Tick once per second while `auto` is on
#[must_use]
pub fn subscriptions(counter: &Counter) -> Sub<CounterMsg> {
    if counter.auto {
        Sub::every(tick_key(counter), Duration::from_secs(1), |_| CounterMsg::Tick)
    } else {
        Sub::none()
    }
}

/// Counter view
#[must_use]
pub fn view(counter: &Counter) -> Html<CounterMsg> {
    Html::element(
        "div",
        vec![Attribute::property("id", counter.id.clone())],
        vec![
            Html::button("-", CounterMsg::Decrement),
            Html::text(counter.count.to_string()),
            Html::button("+", CounterMsg::Increment),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(count: i64) -> Counter {
        Counter {
            id: "c".to_string(),
            count,
            auto: false,
        }
    }

    #[test]
    fn test_increment() {
        let (counter, cmd) = update(CounterMsg::Increment, counter(0));

        assert_eq!(counter.count, 1);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_decrement() {
        let (counter, _) = update(CounterMsg::Decrement, counter(5));
        assert_eq!(counter.count, 4);
    }

    #[test]
    fn test_reset() {
        let (counter, _) = update(CounterMsg::Reset, counter(42));
        assert_eq!(counter.count, 0);
    }

    #[test]
    fn test_increment_later_schedules_delay() {
        let (after, cmd) = update(CounterMsg::IncrementLater, counter(3));

        assert_eq!(after.count, 3);
        assert!(matches!(
            &cmd,
            Cmd::Delay { duration, msg } if *duration == LATER && **msg == CounterMsg::Increment
        ));
    }

    #[test]
    fn test_subscriptions_follow_auto() {
        assert!(subscriptions(&counter(0)).is_none());

        let (auto, _) = update(CounterMsg::ToggleAuto, counter(0));
        assert_eq!(subscriptions(&auto).keys(), vec!["c/tick"]);
    }

    #[test]
    fn test_view_buttons() {
        let html = view(&counter(7));

        assert_eq!(
            html.render(),
            "<div id=\"c\"><button on:click>-</button>7<button on:click>+</button></div>"
        );
        assert_eq!(
            html.dispatch("click", ""),
            vec![CounterMsg::Decrement, CounterMsg::Increment]
        );
    }
}
