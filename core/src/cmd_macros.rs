//! Declarative macros for ergonomic command construction
//!
//! These macros reduce boilerplate when building [`crate::Cmd`] and
//! [`crate::Sub`] values inside update functions.

/// Create a `Cmd::Future` from an async block
///
/// # Example
///
/// ```
/// use composable_glue::{cmd_future, Cmd};
///
/// #[derive(Debug)]
/// enum Msg {
///     Fetched(u32),
/// }
///
/// let cmd: Cmd<Msg> = cmd_future! {
///     let value = async { 42 }.await;
///     Some(Msg::Fetched(value))
/// };
/// assert!(matches!(cmd, Cmd::Future(_)));
/// ```
#[macro_export]
macro_rules! cmd_future {
    ($($body:tt)*) => {
        $crate::effect::Cmd::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create a `Cmd::Delay` for scheduling delayed messages
///
/// # Example
///
/// ```
/// use composable_glue::{cmd_delay, Cmd};
/// use std::time::Duration;
///
/// let cmd = cmd_delay! {
///     duration: Duration::from_secs(30),
///     msg: "timeout"
/// };
/// assert_eq!(cmd.messages(), vec![&"timeout"]);
/// ```
#[macro_export]
macro_rules! cmd_delay {
    (
        duration: $duration:expr,
        msg: $msg:expr
    ) => {
        $crate::effect::Cmd::Delay {
            duration: $duration,
            msg: ::std::boxed::Box::new($msg),
        }
    };
}

/// Merge any number of commands or subscriptions, left to right
///
/// # Example
///
/// ```
/// use composable_glue::{batch, Cmd};
///
/// let cmd = batch![Cmd::msg(1), Cmd::none(), Cmd::msg(2)];
/// assert_eq!(cmd.messages(), vec![&1, &2]);
/// ```
#[macro_export]
macro_rules! batch {
    () => {
        $crate::description::Batch::none()
    };
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let merged = $first;
        $(
            let merged = $crate::description::Batch::batch(merged, $rest);
        )*
        merged
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Cmd, Sub};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    enum TestMsg {
        AsyncResult { value: i32 },
        TimeoutExpired,
    }

    #[test]
    fn test_cmd_future_macro() {
        let cmd = cmd_future! {
            Some(TestMsg::AsyncResult { value: 42 })
        };

        assert!(matches!(cmd, Cmd::Future(_)));
    }

    #[test]
    fn test_cmd_delay_macro() {
        let cmd = cmd_delay! {
            duration: Duration::from_secs(30),
            msg: TestMsg::TimeoutExpired
        };

        assert!(matches!(cmd, Cmd::Delay { .. }));
    }

    #[test]
    fn test_batch_macro_keeps_order() {
        let cmd = batch![
            Cmd::msg(TestMsg::TimeoutExpired),
            Cmd::msg(TestMsg::AsyncResult { value: 1 }),
        ];

        assert_eq!(
            cmd.messages(),
            vec![&TestMsg::TimeoutExpired, &TestMsg::AsyncResult { value: 1 }]
        );
    }

    #[test]
    fn test_batch_macro_works_for_subscriptions() {
        let sub: Sub<TestMsg> = batch![
            Sub::on_event("a", |_| None),
            Sub::on_event("b", |_| None)
        ];
        let empty: Sub<TestMsg> = batch![];

        assert_eq!(sub.keys(), vec!["a", "b"]);
        assert!(empty.is_none());
    }
}
