use composable_glue::{Cmd, Glue};
use composable_glue_macros::Glue;

#[derive(Debug, PartialEq)]
enum Msg<T> {
    Item(T),
}

#[derive(Glue, Debug, PartialEq)]
struct Model<T> {
    #[glue(embed = Msg::Item, msg = Msg<T>, sub_msg = T)]
    item: T,
    r#type: u8,
}

fn main() {
    let item: Glue<Model<u8>, u8, Msg<u8>, u8> = Model::item_glue();
    let model = Model { item: 1, r#type: 0 };

    let (model, cmd) = item.update(|n: u8, i: u8| (i + n, Cmd::msg(n)), 2, (model, Cmd::none()));

    assert_eq!(model, Model { item: 3, r#type: 0 });
    assert_eq!(cmd.messages(), vec![&Msg::Item(2)]);
}
