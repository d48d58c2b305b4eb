//! Counters example binary
//!
//! Drives the composed application through the host loop and prints the
//! rendered view after every step.

use chrono::{DateTime, Utc};
use composable_glue::environment::Clock;
use counters::host::Host;
use counters::{CounterMsg, Counters, Msg, stats};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Wall-clock time
struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

fn show(step: &str, host: &Host<Counters, SystemClock>) {
    println!("\n>>> {step}");
    println!("{}", host.view().render());
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "counters=debug,composable_glue=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Counters Example: Composable Glue ===");

    let mut host = Host::<Counters, SystemClock>::start(SystemClock);
    host.settle().await;
    show("Initial view", &host);

    host.send(Msg::Left(CounterMsg::Increment));
    host.send(Msg::Right(CounterMsg::Increment));
    host.settle().await;
    show("Sent Left(Increment), Right(Increment)", &host);

    let fired = host.fire("click", "");
    host.settle().await;
    show(&format!("Clicked every button ({fired} handlers)"), &host);

    host.send(Msg::Left(CounterMsg::IncrementLater));
    host.send(Msg::Left(CounterMsg::Increment));
    host.settle().await;
    show("Sent Left(IncrementLater), Left(Increment)", &host);

    host.send(Msg::OpenStats(Utc::now()));
    host.settle().await;
    show("Opened stats", &host);

    host.event(stats::KEYS, "r");
    host.event(stats::KEYS, "x");
    host.settle().await;
    show("Pressed r, x", &host);

    host.send(Msg::Right(CounterMsg::ToggleAuto));
    host.settle().await;
    host.tick("right/tick");
    host.tick("left/tick");
    host.settle().await;
    show("Right ticks by itself; fired both tickers", &host);

    println!("\n=== Processed {} messages ===", host.processed());
    println!("\nKey concepts demonstrated:");
    println!("  • Glue: get/set/embed linking a child into its parent");
    println!("  • SimpleGlue: a message-less child");
    println!("  • Poly glue: a child speaking the parent's message type");
    println!("  • LazyGlue: a child created on demand");
    println!("  • Re-tagging: child commands, subscriptions and views emit parent messages");
}
