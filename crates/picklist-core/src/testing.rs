use crate::event::Position;
use crate::surface::{Focus, Hit, Surface};

/// Column width of the region [`MockSurface`] treats as inside the control.
pub const MOCK_WIDTH: u16 = 20;

/// One call a [`MockSurface`] received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Mount,
    TriggerText(String),
    TriggerActive(bool),
    ArrowTurned(bool),
    ListShown(bool),
    Expanded(bool),
    ItemSelected(usize, bool),
    Focus(Option<Focus>),
}

/// A headless [`Surface`] that records every call for assertions.
///
/// `MockSurface` lets the controller and router run in a plain `#[test]`
/// without a terminal. It keeps the current value of every presentation flag
/// and a log of calls in order.
///
/// Hit-testing uses a fixed layout: row 0 is the trigger and, while the list
/// is shown, row `1 + i` is item `i`. Columns `0..MOCK_WIDTH` are inside the
/// control; the list's bottom border row (row `1 + count`) is
/// [`Hit::Inside`]; everything else is [`Hit::Outside`].
///
/// # Example
///
/// ```
/// use picklist_core::testing::MockSurface;
/// use picklist_core::{Hit, Surface};
///
/// let mut surface = MockSurface::new();
/// surface.mount("Options...", &["A".to_string(), "B".to_string()]);
/// surface.set_list_shown(true);
///
/// assert_eq!(surface.hit_test(MockSurface::item_position(1)), Hit::Item(1));
/// assert_eq!(surface.hit_test(MockSurface::outside_position()), Hit::Outside);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    placeholder: String,
    labels: Vec<String>,
    trigger_text: String,
    trigger_active: bool,
    arrow_turned: bool,
    list_shown: bool,
    expanded: bool,
    selected: Vec<bool>,
    focus: Option<Focus>,
    mounts: usize,
    calls: Vec<SurfaceCall>,
}

impl MockSurface {
    /// Create an unmounted surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the trigger in the mock layout.
    pub fn trigger_position() -> Position {
        Position::new(0, 0)
    }

    /// Position of item `index` in the mock layout.
    pub fn item_position(index: usize) -> Position {
        Position::new(1, 1 + index as u16)
    }

    /// A position that is never part of the control.
    pub fn outside_position() -> Position {
        Position::new(MOCK_WIDTH + 5, 0)
    }

    /// The placeholder passed to `mount`.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Current trigger text.
    pub fn trigger_text(&self) -> &str {
        &self.trigger_text
    }

    pub fn is_trigger_active(&self) -> bool {
        self.trigger_active
    }

    pub fn is_arrow_turned(&self) -> bool {
        self.arrow_turned
    }

    pub fn is_list_shown(&self) -> bool {
        self.list_shown
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// The four flags tied to the open state, in the order
    /// trigger active, arrow turned, list shown, expanded.
    pub fn open_flags(&self) -> [bool; 4] {
        [
            self.trigger_active,
            self.arrow_turned,
            self.list_shown,
            self.expanded,
        ]
    }

    /// Whether item `index` carries the selected flag.
    pub fn is_item_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Indices of every item carrying the selected flag.
    pub fn selected_items(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.then_some(i))
            .collect()
    }

    /// Where the focus indicator currently is.
    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// How many times `mount` ran.
    pub fn mounts(&self) -> usize {
        self.mounts
    }

    /// Every call received so far.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Forget recorded calls, keeping current flag values.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Surface for MockSurface {
    fn mount(&mut self, placeholder: &str, options: &[String]) {
        self.placeholder = placeholder.to_string();
        self.trigger_text = placeholder.to_string();
        self.labels = options.to_vec();
        self.selected = vec![false; options.len()];
        self.mounts += 1;
        self.calls.push(SurfaceCall::Mount);
    }

    fn item_count(&self) -> usize {
        self.labels.len()
    }

    fn item_label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    fn set_trigger_text(&mut self, text: &str) {
        self.trigger_text = text.to_string();
        self.calls.push(SurfaceCall::TriggerText(text.to_string()));
    }

    fn set_trigger_active(&mut self, active: bool) {
        self.trigger_active = active;
        self.calls.push(SurfaceCall::TriggerActive(active));
    }

    fn set_arrow_turned(&mut self, turned: bool) {
        self.arrow_turned = turned;
        self.calls.push(SurfaceCall::ArrowTurned(turned));
    }

    fn set_list_shown(&mut self, shown: bool) {
        self.list_shown = shown;
        self.calls.push(SurfaceCall::ListShown(shown));
    }

    fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
        self.calls.push(SurfaceCall::Expanded(expanded));
    }

    fn set_item_selected(&mut self, index: usize, selected: bool) {
        if let Some(slot) = self.selected.get_mut(index) {
            *slot = selected;
        }
        self.calls.push(SurfaceCall::ItemSelected(index, selected));
    }

    fn set_focus(&mut self, focus: Option<Focus>) {
        self.focus = focus;
        self.calls.push(SurfaceCall::Focus(focus));
    }

    fn hit_test(&self, position: Position) -> Hit {
        if position.column >= MOCK_WIDTH {
            return Hit::Outside;
        }
        let row = position.row as usize;
        if row == 0 {
            return Hit::Trigger;
        }
        if !self.list_shown {
            return Hit::Outside;
        }
        match row - 1 {
            i if i < self.labels.len() => Hit::Item(i),
            i if i == self.labels.len() => Hit::Inside,
            _ => Hit::Outside,
        }
    }
}
