use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// A cell on the host surface, in terminal columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Zero-based column.
    pub column: u16,
    /// Zero-based row.
    pub row: u16,
}

impl Position {
    /// Create a position from a column and a row.
    pub const fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// Input delivered to a [`Document`](crate::Document).
///
/// Only the two signals a select control reacts to survive the conversion
/// from a raw crossterm [`Event`]: key presses and primary-button clicks.
///
/// # Example
///
/// ```rust,ignore
/// use picklist_core::InputEvent;
///
/// while let Some(Ok(raw)) = events.next().await {
///     if let Some(input) = InputEvent::from_terminal(&raw) {
///         document.dispatch(&input);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press (or auto-repeat).
    Key(KeyEvent),
    /// The primary pointer button went down at a position.
    Click(Position),
}

impl InputEvent {
    /// Convert a raw terminal event, dropping everything a select ignores.
    ///
    /// Key releases, mouse moves, drags, scrolls, non-left buttons, resizes,
    /// focus changes and pastes all map to `None`.
    pub fn from_terminal(event: &Event) -> Option<Self> {
        match event {
            Event::Key(key) if is_key_down(key) => Some(InputEvent::Key(*key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(InputEvent::Click(Position::new(mouse.column, mouse.row)))
                }
                _ => None,
            },
            _ => None,
        }
    }
}

/// Whether a key event counts as a key-down.
pub fn is_key_down(key: &KeyEvent) -> bool {
    matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
}

/// What a listener did with an event.
///
/// `Consumed` is the terminal equivalent of suppressing the default action:
/// the host should not apply its own handling (scrolling, focus cycling,
/// submitting) for that event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResult {
    /// The event was handled and its default action must be suppressed.
    Consumed,
    /// The event was not handled; the host may apply its default action.
    #[default]
    Ignored,
}

impl EventResult {
    /// Whether the default action was suppressed.
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }

    /// Combine two results: consumed if either was.
    pub fn or(self, other: EventResult) -> EventResult {
        if self.is_consumed() || other.is_consumed() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
