//! A goal that speaks its parent's message type
//!
//! The goal is linked with a poly descriptor: it is generic over the message
//! it reports, so no re-tagging happens.

use composable_glue::Cmd;

/// Goal model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    /// Count to reach
    pub target: i64,
    /// Whether the goal has already been reported
    pub reached: bool,
}

/// Create an unreached goal
#[must_use]
pub const fn init(target: i64) -> Goal {
    Goal {
        target,
        reached: false,
    }
}

/// Emit `on_reached` the first time `count` meets the target
pub fn check<Msg>(goal: &Goal, count: i64, on_reached: Msg) -> Cmd<Msg> {
    if !goal.reached && count >= goal.target {
        Cmd::msg(on_reached)
    } else {
        Cmd::none()
    }
}

/// Mark the goal as reported
#[must_use]
pub const fn reach(goal: Goal) -> Goal {
    Goal {
        reached: true,
        ..goal
    }
}
