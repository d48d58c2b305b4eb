//! A minimal host loop
//!
//! The host owns the model, feeds messages through the application's
//! `update`, and executes the returned commands on tokio. Messages produced
//! by commands are queued and processed in arrival order; no two updates
//! ever run concurrently.

use composable_glue::environment::Clock;
use composable_glue::{Cmd, Html, Sub};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, mpsc};

/// A Model-Update-View-Subscriptions application
pub trait App {
    /// Application model
    type Model: Clone;
    /// Application message
    type Msg: std::fmt::Debug + Send + 'static;

    /// Initial model and command
    fn init() -> (Self::Model, Cmd<Self::Msg>);

    /// Fold one message into the model
    fn update(msg: Self::Msg, model: Self::Model) -> (Self::Model, Cmd<Self::Msg>);

    /// Render the model
    fn view(model: &Self::Model) -> Html<Self::Msg>;

    /// Event sources the model is currently interested in
    fn subscriptions(model: &Self::Model) -> Sub<Self::Msg>;
}

/// Decrements the pending counter when dropped, waking the host once the
/// last running command finishes
struct PendingGuard {
    pending: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_one();
        }
    }
}

fn forward<Msg>(sender: &mpsc::UnboundedSender<Msg>, msg: Msg) {
    if sender.send(msg).is_err() {
        tracing::warn!("Dropped message: host receiver is closed");
    }
}

/// Runs an [`App`] and its commands
pub struct Host<A: App, C: Clock> {
    model: A::Model,
    clock: C,
    sender: mpsc::UnboundedSender<A::Msg>,
    receiver: mpsc::UnboundedReceiver<A::Msg>,
    pending: Arc<AtomicUsize>,
    idle: Arc<Notify>,
    processed: usize,
}

impl<A: App, C: Clock> Host<A, C> {
    /// Initialize the application and start its initial command.
    ///
    /// Must be called within a tokio runtime.
    #[must_use]
    pub fn start(clock: C) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (model, cmd) = A::init();
        let host = Self {
            model,
            clock,
            sender,
            receiver,
            pending: Arc::new(AtomicUsize::new(0)),
            idle: Arc::new(Notify::new()),
            processed: 0,
        };
        host.execute(cmd);
        host
    }

    /// Current model
    #[must_use]
    pub const fn model(&self) -> &A::Model {
        &self.model
    }

    /// Number of messages processed so far
    #[must_use]
    pub const fn processed(&self) -> usize {
        self.processed
    }

    /// Render the current model
    #[must_use]
    pub fn view(&self) -> Html<A::Msg> {
        A::view(self.model())
    }

    /// Queue a message
    pub fn send(&self, msg: A::Msg) {
        forward(&self.sender, msg);
    }

    /// Fire a view event, queueing every message its handlers produce.
    ///
    /// Returns the number of handlers that fired.
    pub fn fire(&self, event: &str, payload: &str) -> usize {
        let messages = self.view().dispatch(event, payload);
        tracing::debug!(event, count = messages.len(), "View event dispatched");
        let count = messages.len();
        for msg in messages {
            self.send(msg);
        }
        count
    }

    /// Fire the timer subscription `key` at the clock's current time
    pub fn tick(&self, key: &str) -> usize {
        let messages = A::subscriptions(self.model()).tick(key, self.clock.now());
        tracing::debug!(key, count = messages.len(), "Timer fired");
        let count = messages.len();
        for msg in messages {
            self.send(msg);
        }
        count
    }

    /// Deliver an external event to the subscription `key`
    pub fn event(&self, key: &str, payload: &str) -> usize {
        let messages = A::subscriptions(self.model()).event(key, payload);
        tracing::debug!(key, count = messages.len(), "External event delivered");
        let count = messages.len();
        for msg in messages {
            self.send(msg);
        }
        count
    }

    /// Process queued messages until no message is queued and no command is
    /// still running
    pub async fn settle(&mut self) {
        loop {
            while let Ok(msg) = self.receiver.try_recv() {
                self.dispatch(msg);
            }

            if self.pending.load(Ordering::SeqCst) == 0 {
                // Running commands send before they finish, so anything they
                // produced is already queued.
                match self.receiver.try_recv() {
                    Ok(msg) => self.dispatch(msg),
                    Err(_) => break,
                }
                continue;
            }

            // A command may finish without producing a message
            let next = tokio::select! {
                msg = self.receiver.recv() => msg,
                () = self.idle.notified() => None,
            };
            if let Some(msg) = next {
                self.dispatch(msg);
            }
        }
        tracing::trace!(processed = self.processed, "Host settled");
    }

    fn dispatch(&mut self, msg: A::Msg) {
        tracing::debug!(?msg, "Processing message");
        let (model, cmd) = A::update(msg, self.model.clone());
        self.model = model;
        self.processed += 1;
        self.execute(cmd);
    }

    fn execute(&self, cmd: Cmd<A::Msg>) {
        for leaf in cmd.into_leaves() {
            match leaf {
                Cmd::None | Cmd::Batch(_) => {},
                Cmd::Msg(msg) => {
                    tracing::trace!("Executing Cmd::Msg");
                    self.send(msg);
                },
                Cmd::Delay { duration, msg } => {
                    tracing::trace!("Executing Cmd::Delay (duration: {:?})", duration);
                    let guard = self.track();
                    let sender = self.sender.clone();
                    tokio::spawn(async move {
                        let _guard = guard;
                        tokio::time::sleep(duration).await;
                        tracing::trace!("Cmd::Delay completed, sending message");
                        forward(&sender, *msg);
                    });
                },
                Cmd::Future(future) => {
                    tracing::trace!("Executing Cmd::Future");
                    let guard = self.track();
                    let sender = self.sender.clone();
                    tokio::spawn(async move {
                        let _guard = guard;
                        if let Some(msg) = future.await {
                            tracing::trace!("Cmd::Future produced a message");
                            forward(&sender, msg);
                        } else {
                            tracing::trace!("Cmd::Future completed with no message");
                        }
                    });
                },
            }
        }
    }

    fn track(&self) -> PendingGuard {
        self.pending.fetch_add(1, Ordering::SeqCst);
        PendingGuard {
            pending: Arc::clone(&self.pending),
            idle: Arc::clone(&self.idle),
        }
    }
}
