use console::Style;
use once_cell::sync::Lazy;
use shoplist::model::ItemState;

pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static META: Lazy<Style> = Lazy::new(|| Style::new().color256(246).italic());

pub static CHECKED: Lazy<Style> = Lazy::new(|| Style::new().green());
pub static UNCHECKED: Lazy<Style> = Lazy::new(Style::new);
pub static HIDDEN: Lazy<Style> = Lazy::new(|| Style::new().dim());

pub fn for_state(state: ItemState) -> &'static Style {
    match state {
        ItemState::Checked => &*CHECKED,
        ItemState::Unchecked => &*UNCHECKED,
        ItemState::Hidden => &*HIDDEN,
    }
}
