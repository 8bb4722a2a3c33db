//! Turns command results into terminal text.
//!
//! Layout (markers, padding, truncation) is computed here with Unicode-aware
//! widths; colors come from [`super::styles`] and are dropped automatically when
//! the output is not a terminal.

use super::styles::{for_state, META, TITLE};
use colored::Colorize;
use shoplist::api::{CmdMessage, MessageLevel};
use shoplist::catalog::ListEntry;
use shoplist::commands::action::item_label;
use shoplist::model::{Item, ItemState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
const MULTI_LINE_MARKER: &str = "¶";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_lists(entries: &[ListEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let marker = if entry.multi_line {
            MULTI_LINE_MARKER
        } else {
            " "
        };
        out.push_str(&format!("  {} {}", marker, TITLE.apply_to(&entry.display_name)));
        if entry.display_name != entry.name {
            out.push_str(&format!("  {}", META.apply_to(&entry.name)));
        }
        out.push('\n');
    }
    out
}

fn state_marker(state: ItemState) -> &'static str {
    match state {
        ItemState::Unchecked => "[ ]",
        ItemState::Checked => "[x]",
        ItemState::Hidden => "[-]",
    }
}

pub(super) fn render_items(entry: &ListEntry, items: &[Item]) -> String {
    let mut out = format!("{}\n", TITLE.apply_to(&entry.display_name));
    for item in items {
        let marker = state_marker(item.state);
        let label = item_label(&item.name);
        let prefix = format!("  {} ", marker);
        let available = LINE_WIDTH.saturating_sub(prefix.width());
        let style = for_state(item.state);
        out.push_str(&format!(
            "{}{}\n",
            style.apply_to(prefix),
            style.apply_to(truncate_to_width(&label, available))
        ));
    }
    out
}

pub(super) fn render_config(pairs: &[(&str, String)]) -> String {
    let key_width = pairs.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:<width$} = {}\n", k, v, width = key_width))
        .collect()
}

pub(super) fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
