//! Tests for #[derive(Glue)] macro

#![allow(clippy::unwrap_used)] // Tests can unwrap

use composable_glue::{Cmd, Glue, LazyGlue, SimpleGlue};
use composable_glue_macros::Glue;
use composable_glue_testing::laws;
use proptest::prelude::*;

#[derive(Clone, Debug, PartialEq)]
enum CounterMsg {
    Increment,
    Reset,
}

#[derive(Clone, Debug, PartialEq)]
enum Msg {
    Counter(CounterMsg),
    Panel(CounterMsg),
    Saved,
}

#[derive(Glue, Clone, Debug, PartialEq)]
struct Model {
    #[glue(embed = Msg::Counter, msg = Msg, sub_msg = CounterMsg)]
    counter: i64,

    #[glue(poly, msg = Msg)]
    draft: String,

    #[glue(simple)]
    label: String,

    #[glue(lazy, embed = Msg::Panel, msg = Msg, sub_msg = CounterMsg)]
    panel: Option<i64>,

    #[glue(lazy, poly, msg = Msg)]
    notes: Option<Vec<String>>,

    visits: u32,
}

fn counter_update(msg: CounterMsg, count: i64) -> (i64, Cmd<CounterMsg>) {
    match msg {
        CounterMsg::Increment => (count + 1, Cmd::msg(CounterMsg::Reset)),
        CounterMsg::Reset => (0, Cmd::none()),
    }
}

fn model() -> Model {
    Model {
        counter: 1,
        draft: "draft".to_string(),
        label: "label".to_string(),
        panel: None,
        notes: None,
        visits: 3,
    }
}

#[test]
fn test_generated_types() {
    let _: Glue<Model, i64, Msg, CounterMsg> = Model::counter_glue();
    let _: Glue<Model, String, Msg, Msg> = Model::draft_glue();
    let _: SimpleGlue<Model, String> = Model::label_glue();
    let _: LazyGlue<Model, i64, Msg, CounterMsg> = Model::panel_glue();
    let _: LazyGlue<Model, Vec<String>, Msg, Msg> = Model::notes_glue();
}

#[test]
fn test_generated_glue_routes_update() {
    let (model, cmd) =
        Model::counter_glue().update(counter_update, CounterMsg::Increment, (model(), Cmd::none()));

    assert_eq!(model.counter, 2);
    assert_eq!(model.visits, 3);
    assert_eq!(cmd.messages(), vec![&Msg::Counter(CounterMsg::Reset)]);
}

#[test]
fn test_generated_poly_glue_bubbles() {
    let (model, cmd) = Model::draft_glue().trigger(
        |draft: &String| {
            if draft.is_empty() {
                Cmd::none()
            } else {
                Cmd::msg(Msg::Saved)
            }
        },
        (model(), Cmd::none()),
    );

    assert_eq!(model.draft, "draft");
    assert_eq!(cmd.messages(), vec![&Msg::Saved]);
}

#[test]
fn test_generated_simple_glue_updates_model() {
    let model = Model::label_glue().update_model_with(|label: String| label.to_uppercase(), model());

    assert_eq!(model.label, "LABEL");
    assert_eq!(model.draft, "draft");
}

#[test]
fn test_generated_lazy_glue_forces_child() {
    let panel = Model::panel_glue();
    let before = model();
    assert!(!panel.is_initialized(&before));

    let (after, cmd) = panel.force_init((10, Cmd::msg(CounterMsg::Reset)), (before, Cmd::none()));
    let (after, _) = panel.update(counter_update, CounterMsg::Increment, (after, cmd));

    assert_eq!(after.panel, Some(11));
    assert_eq!(after.counter, 1);
}

#[test]
fn test_generated_lazy_poly_glue() {
    let notes = Model::notes_glue();
    let model = notes.force_init_model(vec!["first".to_string()], model());
    let model = notes.update_model_with(
        |mut notes: Vec<String>| {
            notes.push("second".to_string());
            notes
        },
        model,
    );

    assert_eq!(model.notes.unwrap(), vec!["first", "second"]);
}

#[test]
fn test_generated_glue_is_lawful_for_fixed_input() {
    assert_eq!(laws::check_laws(&Model::label_glue(), "new".to_string(), model()), Ok(()));
    assert_eq!(
        laws::check_laws(&Model::panel_glue().glue().as_simple(), Some(4), model()),
        Ok(())
    );
}

proptest! {
    #[test]
    fn prop_generated_glue_is_lawful(counter in any::<i64>(), sub in any::<i64>(), visits in any::<u32>()) {
        let model = Model { counter, visits, ..model() };
        prop_assert_eq!(laws::check_laws(&Model::counter_glue().as_simple(), sub, model), Ok(()));
    }

    #[test]
    fn prop_generated_poly_glue_is_lawful(draft in "[a-z]{0,12}", sub in "[a-z]{0,12}") {
        let model = Model { draft, ..model() };
        prop_assert_eq!(laws::check_laws(&Model::draft_glue().as_simple(), sub, model), Ok(()));
    }
}

#[test]
fn test_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/generic_model.rs");
}
