//! Ergonomic testing utilities for glued updates
//!
//! This module provides a fluent API for testing parent updates with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // GlueTest is the natural name

use composable_glue::Batch;

/// Type alias for model assertion functions
type ModelAssertion<M> = Box<dyn FnOnce(&M)>;

/// Type alias for command assertion functions
type CmdAssertion<P> = Box<dyn FnOnce(&P)>;

/// Type alias for the step under test
type Step<M, P> = Box<dyn FnOnce((M, P)) -> (M, P)>;

/// Fluent API for testing glued updates with Given-When-Then syntax
///
/// # Example
///
/// ```ignore
/// use composable_glue_testing::GlueTest;
///
/// GlueTest::new()
///     .given_model(Model::default())
///     .given_cmd(Cmd::msg(Msg::Refresh))
///     .when(|pair| counter_glue().update(counter::update, CounterMsg::Increment, pair))
///     .then_model(|model| {
///         assert_eq!(model.counter.count, 1);
///     })
///     .then_cmd(|cmd| {
///         assertions::assert_cmd_messages(cmd, &[Msg::Refresh]);
///     })
///     .run();
/// ```
pub struct GlueTest<M, P> {
    initial_model: Option<M>,
    initial_cmd: Option<P>,
    step: Option<Step<M, P>>,
    model_assertions: Vec<ModelAssertion<M>>,
    cmd_assertions: Vec<CmdAssertion<P>>,
}

impl<M, P> Default for GlueTest<M, P>
where
    P: Batch,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M, P> GlueTest<M, P>
where
    P: Batch,
{
    /// Create a new, empty test
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_model: None,
            initial_cmd: None,
            step: None,
            model_assertions: Vec::new(),
            cmd_assertions: Vec::new(),
        }
    }

    /// Set the initial parent model (Given)
    #[must_use]
    pub fn given_model(mut self, model: M) -> Self {
        self.initial_model = Some(model);
        self
    }

    /// Set the command already pending before the step (Given).
    ///
    /// Defaults to the empty command.
    #[must_use]
    pub fn given_cmd(mut self, cmd: P) -> Self {
        self.initial_cmd = Some(cmd);
        self
    }

    /// Set the step to test (When)
    #[must_use]
    pub fn when<F>(mut self, step: F) -> Self
    where
        F: FnOnce((M, P)) -> (M, P) + 'static,
    {
        self.step = Some(Box::new(step));
        self
    }

    /// Add an assertion about the resulting model (Then)
    #[must_use]
    pub fn then_model<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&M) + 'static,
    {
        self.model_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting command (Then)
    #[must_use]
    pub fn then_cmd<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&P) + 'static,
    {
        self.cmd_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if the initial model or the step is not set,
    /// or if any assertions fail.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let model = self
            .initial_model
            .expect("Initial model must be set with given_model()");

        let step = self.step.expect("Step must be set with when()");

        let cmd = self.initial_cmd.unwrap_or_else(P::none);

        // Execute step
        let (model, cmd) = step((model, cmd));

        // Run model assertions
        for assertion in self.model_assertions {
            assertion(&model);
        }

        // Run command assertions
        for assertion in self.cmd_assertions {
            assertion(&cmd);
        }
    }
}

/// Helper assertions for commands and subscriptions
pub mod assertions {
    use composable_glue::{Cmd, Sub};

    /// Assert that the command does nothing
    ///
    /// # Panics
    ///
    /// Panics if the command has any leaf.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_cmd<Msg: std::fmt::Debug>(cmd: &Cmd<Msg>) {
        assert!(cmd.is_none(), "Expected no command, but found {cmd:?}");
    }

    /// Assert the messages a command dispatches, in order
    ///
    /// # Panics
    ///
    /// Panics if the dispatched messages differ from `expected`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_cmd_messages<Msg>(cmd: &Cmd<Msg>, expected: &[Msg])
    where
        Msg: std::fmt::Debug + PartialEq,
    {
        let actual = cmd.messages();
        let expected: Vec<&Msg> = expected.iter().collect();
        assert_eq!(actual, expected, "Command dispatched unexpected messages");
    }

    /// Assert that the command contains at least one future
    ///
    /// # Panics
    ///
    /// Panics if no future is found.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_has_future_cmd<Msg>(cmd: Cmd<Msg>) {
        assert!(
            cmd.into_leaves().iter().any(|leaf| matches!(leaf, Cmd::Future(_))),
            "Expected at least one Future command, but none found"
        );
    }

    /// Assert the keys of a subscription, in order
    ///
    /// # Panics
    ///
    /// Panics if the keys differ from `expected`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_sub_keys<Msg>(sub: &Sub<Msg>, expected: &[&str]) {
        assert_eq!(sub.keys(), expected, "Subscription has unexpected keys");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use composable_glue::{Cmd, Glue, Sub};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    struct TestModel {
        count: i32,
        name: String,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum CountMsg {
        Increment,
        Decrement,
        Echo,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestMsg {
        Count(CountMsg),
        Rename,
    }

    fn count_update(msg: CountMsg, count: i32) -> (i32, Cmd<CountMsg>) {
        match msg {
            CountMsg::Increment => (count + 1, Cmd::none()),
            CountMsg::Decrement => (count - 1, Cmd::none()),
            CountMsg::Echo => (count, Cmd::msg(CountMsg::Echo)),
        }
    }

    fn count() -> Glue<TestModel, i32, TestMsg, CountMsg> {
        Glue::new(
            TestMsg::Count,
            |model: &TestModel| &model.count,
            |count, model| TestModel { count, ..model },
        )
    }

    fn model(count: i32) -> TestModel {
        TestModel {
            count,
            name: "test".to_string(),
        }
    }

    #[test]
    fn test_glue_test_increment() {
        GlueTest::new()
            .given_model(model(0))
            .when(|pair| count().update(count_update, CountMsg::Increment, pair))
            .then_model(|model| {
                assert_eq!(model.count, 1);
                assert_eq!(model.name, "test");
            })
            .then_cmd(|cmd| {
                assertions::assert_no_cmd(cmd);
            })
            .run();
    }

    #[test]
    fn test_glue_test_keeps_given_cmd_first() {
        GlueTest::new()
            .given_model(model(5))
            .given_cmd(Cmd::msg(TestMsg::Rename))
            .when(|pair| count().update(count_update, CountMsg::Echo, pair))
            .then_model(|model| {
                assert_eq!(model.count, 5);
            })
            .then_cmd(|cmd| {
                assertions::assert_cmd_messages(cmd, &[TestMsg::Rename, TestMsg::Count(CountMsg::Echo)]);
            })
            .run();
    }

    #[test]
    fn test_glue_test_decrement() {
        GlueTest::<TestModel, Cmd<TestMsg>>::new()
            .given_model(model(5))
            .when(|pair| count().update(count_update, CountMsg::Decrement, pair))
            .then_model(|model| {
                assert_eq!(model.count, 4);
            })
            .run();
    }

    #[test]
    fn test_assertions_no_cmd() {
        assertions::assert_no_cmd::<TestMsg>(&Cmd::none());
        assertions::assert_no_cmd::<TestMsg>(&Cmd::Batch(vec![]));
    }

    #[test]
    fn test_assertions_future_cmd() {
        assertions::assert_has_future_cmd(Cmd::msg(1).batch(Cmd::future(async { Some(2) })));
    }

    #[test]
    fn test_assertions_sub_keys() {
        let sub: Sub<TestMsg> = Sub::every("a", Duration::from_secs(1), |_| TestMsg::Rename);
        assertions::assert_sub_keys(&sub, &["a"]);
    }
}
