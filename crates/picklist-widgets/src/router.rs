//! Turns raw key presses and clicks into controller operations.
//!
//! Focus decides which rules apply. With focus outside the control nothing
//! happens. With focus on an option of an open list, the option keys below
//! apply. Otherwise Space, Enter, Down and Up open a closed list and focus
//! its first option. Esc also closes a list that was opened by clicking
//! while the trigger keeps focus.
//!
//! | Key (option focused, open) | Effect |
//! |----------------------------|--------|
//! | Down / Up | next / previous option, wrapping |
//! | Home / End | first / last option |
//! | Space / Enter | commit the focused option |
//! | Esc | close, focus the trigger |
//! | Tab / BackTab | close, let the host move focus |

use crate::controller::Controller;
use picklist_core::{EventResult, Focus, Hit, Position, Surface};
use crossterm::event::{KeyCode, KeyEvent};

/// Route one key-down.
pub fn route_key<S: Surface>(ctrl: &mut Controller<S>, key: &KeyEvent) -> EventResult {
    let Some(focus) = ctrl.focus() else {
        return EventResult::Ignored;
    };
    tracing::trace!(control = ?ctrl.id(), code = ?key.code, ?focus, "key");

    if ctrl.is_open() {
        match focus {
            Focus::Item(current) => {
                if let Some(result) = option_key(ctrl, current, key.code) {
                    return result;
                }
            }
            Focus::Trigger if key.code == KeyCode::Esc => {
                ctrl.close();
                return EventResult::Consumed;
            }
            Focus::Trigger => {}
        }
    }

    if opens_list(key.code) {
        if !ctrl.is_open() {
            ctrl.open();
            if let Some(first) = first(ctrl.item_count()) {
                ctrl.set_focus(Some(Focus::Item(first)));
            }
        }
        return EventResult::Consumed;
    }
    EventResult::Ignored
}

/// Route one primary-button click at `position`.
pub fn route_click<S: Surface>(ctrl: &mut Controller<S>, position: Position) -> EventResult {
    match ctrl.surface().hit_test(position) {
        Hit::Trigger => {
            ctrl.set_focus(Some(Focus::Trigger));
            ctrl.toggle();
            EventResult::Consumed
        }
        Hit::Item(index) => {
            if let Some(item) = ctrl.item(index) {
                ctrl.select_item(item);
            }
            ctrl.set_focus(Some(Focus::Trigger));
            EventResult::Consumed
        }
        Hit::Inside => EventResult::Consumed,
        Hit::Outside => {
            if ctrl.is_open() {
                ctrl.close();
            }
            if ctrl.focus().is_some() {
                ctrl.set_focus(None);
            }
            EventResult::Ignored
        }
    }
}

/// Keys that open a closed list from anywhere inside the control.
fn opens_list(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Down | KeyCode::Up
    )
}

/// Handle a key while an option is focused and the list is open.
///
/// `None` means the key is not an option key and falls through.
fn option_key<S: Surface>(
    ctrl: &mut Controller<S>,
    current: usize,
    code: KeyCode,
) -> Option<EventResult> {
    let count = ctrl.item_count();
    let current = (current < count).then_some(current);

    let target = match code {
        KeyCode::Down => next(current, count),
        KeyCode::Up => prev(current, count),
        KeyCode::Home => first(count),
        KeyCode::End => last(count),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(item) = current.and_then(|i| ctrl.item(i)) {
                ctrl.select_item(item);
                ctrl.set_focus(Some(Focus::Trigger));
            }
            return Some(EventResult::Consumed);
        }
        KeyCode::Esc => {
            ctrl.close();
            ctrl.set_focus(Some(Focus::Trigger));
            return Some(EventResult::Consumed);
        }
        KeyCode::Tab | KeyCode::BackTab => {
            ctrl.close();
            return Some(EventResult::Ignored);
        }
        _ => return None,
    };

    if let Some(index) = target {
        ctrl.set_focus(Some(Focus::Item(index)));
    }
    Some(EventResult::Consumed)
}

/// One past `current`, wrapping to the first. An unknown position starts at
/// the first option.
fn next(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(0, |i| (i + 1) % count))
}

/// One before `current`, wrapping to the last. An unknown position starts at
/// the last option.
fn prev(current: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(current.map_or(count - 1, |i| (i + count - 1) % count))
}

fn first(count: usize) -> Option<usize> {
    (count > 0).then_some(0)
}

fn last(count: usize) -> Option<usize> {
    count.checked_sub(1)
}
