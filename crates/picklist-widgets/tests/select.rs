use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use picklist_core::testing::MockSurface;
use picklist_core::{Document, EventResult, Focus, HostTarget, InputEvent};
use picklist_widgets::{Select, SelectConfig, SelectError, CHANGE};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Option {i}")).collect()
}

fn build(document: &Document, options: Vec<String>) -> Select<MockSurface> {
    Select::new(
        SelectConfig::new(options).with_placeholder("Options..."),
        MockSurface::new(),
        document,
        HostTarget::Body,
    )
}

fn record(select: &Select<MockSurface>, event: &str) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    select.subscribe(event, move |payload| sink.borrow_mut().push(payload.clone()));
    seen
}

fn press(document: &Document, code: KeyCode) -> EventResult {
    document.dispatch(&InputEvent::Key(key(code)))
}

#[test]
fn select_by_index_updates_selection_and_publishes_once() {
    let document = Document::new();
    let select = build(&document, vec!["A".into(), "B".into(), "C".into()]);
    let changes = record(&select, CHANGE);

    assert_eq!(select.get_selection(), "Options...");
    select.select_by_index(1).unwrap();

    assert_eq!(select.get_selection(), "B");
    assert_eq!(*changes.borrow(), vec!["B".to_string()]);
    assert!(!select.is_open());
}

#[test]
fn arrow_up_from_first_option_wraps_to_last() {
    let document = Document::new();
    let select = build(&document, labels(3));
    select.focus();
    press(&document, KeyCode::Enter);
    assert_eq!(select.focused(), Some(Focus::Item(0)));

    assert_eq!(press(&document, KeyCode::Up), EventResult::Consumed);
    assert_eq!(select.focused(), Some(Focus::Item(2)));
    assert_eq!(select.selected_index(), None);
}

#[test]
fn subscribers_run_once_in_registration_order() {
    let document = Document::new();
    let select = build(&document, labels(3));
    let order = Rc::new(RefCell::new(Vec::new()));
    for name in ["first", "second"] {
        let order = Rc::clone(&order);
        select.subscribe(CHANGE, move |label| {
            order.borrow_mut().push(format!("{name}:{label}"));
        });
    }

    select.select_by_index(0).unwrap();
    assert_eq!(
        *order.borrow(),
        vec!["first:Option 0".to_string(), "second:Option 0".to_string()]
    );
}

#[test]
fn destroy_twice_reports_once() {
    let document = Document::new();
    let mut select = build(&document, labels(2));
    assert!(document.is_attached(select.id()));

    assert!(select.destroy());
    assert!(!select.destroy());
    assert!(!document.is_attached(select.id()));
    assert_eq!(document.listener_count(), 0);
}

#[test]
fn keyboard_session_through_the_document() {
    let document = Document::new();
    let select = build(&document, labels(4));
    let changes = record(&select, CHANGE);
    select.focus();

    press(&document, KeyCode::Char(' '));
    press(&document, KeyCode::End);
    press(&document, KeyCode::Down);
    press(&document, KeyCode::Down);
    assert_eq!(select.focused(), Some(Focus::Item(1)));
    press(&document, KeyCode::Enter);

    assert_eq!(select.get_selection(), "Option 1");
    assert_eq!(select.focused(), Some(Focus::Trigger));
    assert!(select.surface().is_item_selected(1));
    assert_eq!(*changes.borrow(), vec!["Option 1".to_string()]);
}

#[test]
fn clicks_through_the_document() {
    let document = Document::new();
    let select = build(&document, labels(3));

    let click = |at| document.dispatch(&InputEvent::Click(at));
    assert_eq!(click(MockSurface::trigger_position()), EventResult::Consumed);
    assert!(select.is_open());
    assert_eq!(click(MockSurface::item_position(2)), EventResult::Consumed);
    assert_eq!(select.get_selection(), "Option 2");
    assert!(!select.is_open());

    click(MockSurface::trigger_position());
    assert_eq!(click(MockSurface::outside_position()), EventResult::Ignored);
    assert!(!select.is_open());
    assert_eq!(select.focused(), None);
}

#[test]
fn only_the_focused_control_reacts_to_keys() {
    let document = Document::new();
    let left = build(&document, labels(2));
    let right = build(&document, labels(2));
    right.focus();

    press(&document, KeyCode::Down);
    assert!(!left.is_open());
    assert!(right.is_open());
}

#[test]
fn empty_list_degrades_to_noops() {
    let document = Document::new();
    let select = build(&document, Vec::new());
    select.focus();

    press(&document, KeyCode::Down);
    press(&document, KeyCode::Down);
    press(&document, KeyCode::Enter);
    assert_eq!(select.get_selection(), "Options...");
    assert_eq!(
        select.select_by_index(0),
        Err(SelectError::InvalidIndex { index: 0, len: 0 })
    );
}

#[derive(Debug, Clone)]
enum Op {
    Toggle,
    Open,
    Close,
    Focus,
    Select(usize),
    Key(KeyCode),
    ClickTrigger,
    ClickItem(usize),
    ClickOutside,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Toggle),
        Just(Op::Open),
        Just(Op::Close),
        Just(Op::Focus),
        (0usize..8).prop_map(Op::Select),
        prop::sample::select(vec![
            KeyCode::Up,
            KeyCode::Down,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::Enter,
            KeyCode::Char(' '),
            KeyCode::Esc,
            KeyCode::Tab,
        ])
        .prop_map(Op::Key),
        Just(Op::ClickTrigger),
        (0usize..8).prop_map(Op::ClickItem),
        Just(Op::ClickOutside),
    ]
}

fn apply(document: &Document, select: &Select<MockSurface>, op: &Op) {
    match op {
        Op::Toggle => select.toggle(),
        Op::Open => select.open(),
        Op::Close => select.close(),
        Op::Focus => select.focus(),
        Op::Select(index) => {
            let _ = select.select_by_index(*index);
        }
        Op::Key(code) => {
            press(document, *code);
        }
        Op::ClickTrigger => {
            document.dispatch(&InputEvent::Click(MockSurface::trigger_position()));
        }
        Op::ClickItem(index) => {
            document.dispatch(&InputEvent::Click(MockSurface::item_position(*index)));
        }
        Op::ClickOutside => {
            document.dispatch(&InputEvent::Click(MockSurface::outside_position()));
        }
    }
}

proptest! {
    #[test]
    fn toggle_alternates_from_closed(toggles in 1usize..32) {
        let document = Document::new();
        let select = build(&document, labels(3));
        prop_assert!(!select.is_open());
        for i in 1..=toggles {
            select.toggle();
            prop_assert_eq!(select.is_open(), i % 2 == 1);
        }
    }

    #[test]
    fn open_is_idempotent(ops in prop::collection::vec(op(), 0..16)) {
        let (first, second) = (Document::new(), Document::new());
        let once = build(&first, labels(5));
        let twice = build(&second, labels(5));
        for op in &ops {
            apply(&first, &once, op);
            apply(&second, &twice, op);
        }

        once.open();
        twice.open();
        twice.open();
        prop_assert_eq!(once.is_open(), twice.is_open());
        prop_assert_eq!(once.value(), twice.value());
        prop_assert_eq!(once.surface().open_flags(), twice.surface().open_flags());
    }

    #[test]
    fn navigation_wraps_both_ways(n in 1usize..12) {
        let document = Document::new();
        let select = build(&document, labels(n));
        select.focus();
        press(&document, KeyCode::Enter);

        press(&document, KeyCode::End);
        prop_assert_eq!(select.focused(), Some(Focus::Item(n - 1)));
        press(&document, KeyCode::Down);
        prop_assert_eq!(select.focused(), Some(Focus::Item(0)));
        press(&document, KeyCode::Up);
        prop_assert_eq!(select.focused(), Some(Focus::Item(n - 1)));
    }

    #[test]
    fn select_by_index_validates(n in 0usize..8, index in 0usize..16) {
        let document = Document::new();
        let select = build(&document, labels(n));
        let changes = record(&select, CHANGE);
        let before = select.get_selection();

        let result = select.select_by_index(index);
        if index < n {
            prop_assert!(result.is_ok());
            prop_assert_eq!(select.get_selection(), format!("Option {index}"));
            prop_assert_eq!(changes.borrow().clone(), vec![format!("Option {index}")]);
        } else {
            prop_assert_eq!(result, Err(SelectError::InvalidIndex { index, len: n }));
            prop_assert_eq!(select.get_selection(), before);
            prop_assert!(changes.borrow().is_empty());
        }
    }

    #[test]
    fn item_click_always_closes(ops in prop::collection::vec(op(), 0..16), item in 0usize..5) {
        let document = Document::new();
        let select = build(&document, labels(5));
        for op in &ops {
            apply(&document, &select, op);
        }
        document.dispatch(&InputEvent::Click(MockSurface::item_position(item)));
        prop_assert!(!select.is_open());
    }

    #[test]
    fn escape_closes_without_touching_selection(ops in prop::collection::vec(op(), 0..16)) {
        let document = Document::new();
        let select = build(&document, labels(5));
        for op in &ops {
            apply(&document, &select, op);
        }
        select.focus();
        select.open();
        let selected = select.selected_index();

        press(&document, KeyCode::Esc);
        prop_assert!(!select.is_open());
        prop_assert_eq!(select.selected_index(), selected);
    }
}
