use crate::event::Position;

/// Which part of a control holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    /// The always-visible trigger.
    Trigger,
    /// The option at this index.
    Item(usize),
}

/// Result of hit-testing a pointer position against a rendered control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hit {
    /// The trigger was hit.
    Trigger,
    /// The option at this index was hit.
    Item(usize),
    /// Inside the control but on neither the trigger nor an option
    /// (a list border, padding).
    Inside,
    /// Not part of the control.
    Outside,
}

/// The rendering side of a select control.
///
/// A surface builds the visual elements once from the placeholder and the
/// option labels, then exposes them back as an ordered, indexable item list
/// and a handful of boolean presentation flags. The controller drives every
/// flag; a surface never changes them on its own.
///
/// The trait is the seam between the interaction logic and whatever draws
/// it. [`MockSurface`](crate::testing::MockSurface) records calls for tests;
/// `picklist_widgets::terminal::TerminalSurface` draws with ratatui.
pub trait Surface {
    /// Build the trigger and the item list. Called exactly once, before any
    /// other method.
    fn mount(&mut self, placeholder: &str, options: &[String]);

    /// Number of items in the list.
    fn item_count(&self) -> usize;

    /// Label of the item at `index`, or `None` past the end.
    fn item_label(&self, index: usize) -> Option<&str>;

    /// Replace the text shown on the trigger.
    fn set_trigger_text(&mut self, text: &str);

    /// Trigger "active" flag.
    fn set_trigger_active(&mut self, active: bool);

    /// Arrow "turned" flag.
    fn set_arrow_turned(&mut self, turned: bool);

    /// List "shown" flag.
    fn set_list_shown(&mut self, shown: bool);

    /// Accessible expanded state of the trigger.
    fn set_expanded(&mut self, expanded: bool);

    /// Per-item "selected" flag, also its accessible selected state.
    fn set_item_selected(&mut self, index: usize, selected: bool);

    /// Move the focus indicator. `None` means focus left the control.
    fn set_focus(&mut self, focus: Option<Focus>);

    /// Map a pointer position to the element under it.
    fn hit_test(&self, position: Position) -> Hit;
}
