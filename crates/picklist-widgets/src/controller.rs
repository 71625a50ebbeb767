//! The selection state machine.
//!
//! A [`Controller`] owns the [`ControlState`], the surface and the focus
//! position. It never calls subscribers directly: every event it wants to
//! publish is queued as a [`Notification`] and drained by the owner once the
//! controller is no longer borrowed, so a subscriber can safely call back
//! into the control.
//!
//! A commit happens in two steps. The selection is applied and `change` is
//! queued with the list still open; the close is held back until the owner
//! has delivered `change` and calls [`Controller::finish_commit`].

use crate::config::SelectConfig;
use crate::error::SelectError;
use crate::state::ControlState;
use picklist_core::{ControlId, Focus, Surface};

/// Published with the new label after every successful selection.
pub const CHANGE: &str = "change";
/// Published with the current label when the list opens.
pub const OPEN: &str = "open";
/// Published with the current label when the list closes.
pub const CLOSE: &str = "close";

/// Reference to one item of one control's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub control: ControlId,
    pub index: usize,
}

/// An event waiting to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub event: &'static str,
    pub payload: String,
}

/// The current selection as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Text shown on the trigger: the chosen label or the placeholder.
    pub label: String,
    /// Position of the chosen option, if any.
    pub index: Option<usize>,
}

/// Selection state machine over a [`Surface`].
pub struct Controller<S> {
    id: ControlId,
    surface: S,
    options: Vec<String>,
    placeholder: String,
    display: String,
    state: ControlState,
    focus: Option<Focus>,
    outbox: Vec<Notification>,
    close_pending: bool,
}

impl<S: Surface> Controller<S> {
    /// Mount `surface` with the configured labels and start closed.
    pub fn new(id: ControlId, config: SelectConfig, mut surface: S) -> Self {
        let (options, placeholder) = config.into_parts();
        surface.mount(&placeholder, &options);
        surface.set_trigger_text(&placeholder);

        let state = ControlState::new();
        state.flags().apply(&mut surface);

        Self {
            id,
            surface,
            display: placeholder.clone(),
            options,
            placeholder,
            state,
            focus: None,
            outbox: Vec::new(),
            close_pending: false,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected()
    }

    /// The displayed label, or the placeholder before any selection.
    pub fn selection(&self) -> &str {
        &self.display
    }

    pub fn value(&self) -> Selection {
        Selection {
            label: self.display.clone(),
            index: self.state.selected(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Number of items the surface exposes.
    pub fn item_count(&self) -> usize {
        self.surface.item_count()
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// A reference to item `index` of this control, if it exists.
    pub fn item(&self, index: usize) -> Option<ItemRef> {
        (index < self.item_count()).then_some(ItemRef {
            control: self.id,
            index,
        })
    }

    /// Show the list. Idempotent.
    pub fn open(&mut self) {
        if self.state.open() {
            tracing::debug!(control = ?self.id, "opened");
            self.notify(OPEN, self.display.clone());
        }
        self.state.flags().apply(&mut self.surface);
    }

    /// Hide the list. Idempotent.
    pub fn close(&mut self) {
        self.close_pending = false;
        if self.state.close() {
            tracing::debug!(control = ?self.id, "closed");
            self.notify(CLOSE, self.display.clone());
        }
        self.state.flags().apply(&mut self.surface);
    }

    pub fn toggle(&mut self) {
        if self.state.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Commit the referenced item.
    ///
    /// A reference to another control's item, or to an index past the end,
    /// is ignored. Returns whether a selection was committed.
    pub fn select_item(&mut self, item: ItemRef) -> bool {
        if item.control != self.id || item.index >= self.item_count() {
            tracing::debug!(control = ?self.id, ?item, "ignoring foreign item");
            return false;
        }
        self.commit(item.index).is_ok()
    }

    /// Commit the item at `index`. The list stays open until
    /// [`finish_commit`](Self::finish_commit).
    ///
    /// Out-of-range indices are reported and leave everything untouched.
    pub fn select_by_index(&mut self, index: usize) -> Result<(), SelectError> {
        self.commit(index).inspect_err(|err| {
            tracing::warn!(control = ?self.id, %err, "rejected selection");
        })
    }

    /// Move focus within the control. Item indices past the end are ignored.
    pub fn set_focus(&mut self, focus: Option<Focus>) {
        if let Some(Focus::Item(index)) = focus {
            if index >= self.item_count() {
                return;
            }
        }
        self.focus = focus;
        self.surface.set_focus(focus);
    }

    /// Whether a commit is waiting for [`finish_commit`](Self::finish_commit).
    pub fn is_close_pending(&self) -> bool {
        self.close_pending
    }

    /// Run the close that ends a commit. Returns `false` when no commit is
    /// waiting. The list ends closed even if a `change` subscriber reopened
    /// it in between.
    pub fn finish_commit(&mut self) -> bool {
        if !self.close_pending {
            return false;
        }
        self.close();
        true
    }

    /// Drain queued notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    fn commit(&mut self, index: usize) -> Result<(), SelectError> {
        let len = self.item_count();
        let label = match self.surface.item_label(index) {
            Some(label) if index < len => label.to_string(),
            _ => return Err(SelectError::InvalidIndex { index, len }),
        };
        self.state.select(index, len)?;

        for i in 0..len {
            self.surface.set_item_selected(i, false);
        }
        self.surface.set_item_selected(index, true);
        self.surface.set_trigger_text(&label);
        self.display = label;

        tracing::debug!(control = ?self.id, index, label = %self.display, "selected");
        self.notify(CHANGE, self.display.clone());
        self.close_pending = true;
        Ok(())
    }

    fn notify(&mut self, event: &'static str, payload: String) {
        self.outbox.push(Notification { event, payload });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_core::testing::{MockSurface, SurfaceCall};

    fn controller() -> Controller<MockSurface> {
        Controller::new(
            ControlId::next(),
            SelectConfig::from(["A", "B", "C"]),
            MockSurface::new(),
        )
    }

    fn events(ctrl: &mut Controller<MockSurface>) -> Vec<(&'static str, String)> {
        ctrl.take_notifications()
            .into_iter()
            .map(|n| (n.event, n.payload))
            .collect()
    }

    #[test]
    fn new_mounts_closed_with_placeholder() {
        let ctrl = controller();
        assert!(!ctrl.is_open());
        assert_eq!(ctrl.selection(), "Options...");
        assert_eq!(ctrl.surface().trigger_text(), "Options...");
        assert_eq!(ctrl.surface().mounts(), 1);
        assert_eq!(ctrl.surface().open_flags(), [false; 4]);
    }

    #[test]
    fn open_sets_every_flag() {
        let mut ctrl = controller();
        ctrl.open();
        assert!(ctrl.is_open());
        assert_eq!(ctrl.surface().open_flags(), [true; 4]);
        assert_eq!(events(&mut ctrl), vec![(OPEN, "Options...".to_string())]);
    }

    #[test]
    fn open_twice_is_idempotent() {
        let mut once = controller();
        once.open();
        let mut twice = controller();
        twice.open();
        twice.open();

        assert_eq!(once.state(), twice.state());
        assert_eq!(once.surface().open_flags(), twice.surface().open_flags());
        assert_eq!(events(&mut twice).len(), 1);
    }

    #[test]
    fn close_when_closed_publishes_nothing() {
        let mut ctrl = controller();
        ctrl.close();
        assert!(events(&mut ctrl).is_empty());
        assert_eq!(ctrl.surface().open_flags(), [false; 4]);
    }

    #[test]
    fn toggle_alternates() {
        let mut ctrl = controller();
        ctrl.toggle();
        assert!(ctrl.is_open());
        ctrl.toggle();
        assert!(!ctrl.is_open());
    }

    #[test]
    fn select_by_index_commits_then_closes() {
        let mut ctrl = controller();
        ctrl.open();
        ctrl.take_notifications();

        assert_eq!(ctrl.select_by_index(1), Ok(()));
        assert_eq!(ctrl.selection(), "B");
        assert_eq!(ctrl.selected_index(), Some(1));
        assert_eq!(ctrl.surface().trigger_text(), "B");
        assert_eq!(ctrl.surface().selected_items(), vec![1]);
        assert!(ctrl.is_open());
        assert!(ctrl.is_close_pending());
        assert_eq!(events(&mut ctrl), vec![(CHANGE, "B".to_string())]);

        assert!(ctrl.finish_commit());
        assert!(!ctrl.is_open());
        assert!(!ctrl.is_close_pending());
        assert_eq!(events(&mut ctrl), vec![(CLOSE, "B".to_string())]);
        assert!(!ctrl.finish_commit());
    }

    #[test]
    fn finish_commit_closes_a_list_reopened_after_change() {
        let mut ctrl = controller();
        ctrl.open();
        ctrl.select_by_index(0).unwrap();
        ctrl.open();

        assert!(ctrl.finish_commit());
        assert!(!ctrl.is_open());
        assert_eq!(ctrl.surface().open_flags(), [false; 4]);
    }

    #[test]
    fn explicit_close_settles_a_pending_commit() {
        let mut ctrl = controller();
        ctrl.open();
        ctrl.select_by_index(2).unwrap();
        ctrl.close();
        assert!(!ctrl.is_close_pending());
        assert!(!ctrl.finish_commit());
    }

    #[test]
    fn invalid_index_changes_nothing() {
        let mut ctrl = controller();
        ctrl.select_by_index(0).unwrap();
        ctrl.take_notifications();
        ctrl.surface_mut().clear_calls();

        assert_eq!(
            ctrl.select_by_index(7),
            Err(SelectError::InvalidIndex { index: 7, len: 3 })
        );
        assert_eq!(ctrl.selection(), "A");
        assert_eq!(ctrl.selected_index(), Some(0));
        assert!(events(&mut ctrl).is_empty());
        assert!(ctrl.surface().calls().is_empty());
    }

    #[test]
    fn reselecting_moves_the_selected_flag() {
        let mut ctrl = controller();
        ctrl.select_by_index(0).unwrap();
        ctrl.select_by_index(2).unwrap();
        assert_eq!(ctrl.surface().selected_items(), vec![2]);
        assert_eq!(ctrl.value(), Selection { label: "C".into(), index: Some(2) });
    }

    #[test]
    fn select_item_ignores_foreign_references() {
        let mut ctrl = controller();
        let other = controller();
        let foreign = other.item(1).unwrap();

        assert!(!ctrl.select_item(foreign));
        assert!(!ctrl.select_item(ItemRef { control: ctrl.id(), index: 9 }));
        assert_eq!(ctrl.selected_index(), None);
        assert!(events(&mut ctrl).is_empty());

        let own = ctrl.item(2).unwrap();
        assert!(ctrl.select_item(own));
        assert_eq!(ctrl.selection(), "C");
    }

    #[test]
    fn item_refs_stop_at_the_end() {
        let ctrl = controller();
        assert!(ctrl.item(2).is_some());
        assert!(ctrl.item(3).is_none());
    }

    #[test]
    fn focus_past_the_end_is_ignored() {
        let mut ctrl = controller();
        ctrl.set_focus(Some(Focus::Item(1)));
        ctrl.set_focus(Some(Focus::Item(5)));
        assert_eq!(ctrl.focus(), Some(Focus::Item(1)));
        assert_eq!(ctrl.surface().focus(), Some(Focus::Item(1)));
    }

    #[test]
    fn flags_change_in_the_same_call() {
        let mut ctrl = controller();
        ctrl.surface_mut().clear_calls();
        ctrl.open();
        assert_eq!(
            ctrl.surface().calls(),
            &[
                SurfaceCall::TriggerActive(true),
                SurfaceCall::ArrowTurned(true),
                SurfaceCall::ListShown(true),
                SurfaceCall::Expanded(true),
            ]
        );
    }

    #[test]
    fn empty_list_rejects_every_index() {
        let mut ctrl = Controller::new(
            ControlId::next(),
            SelectConfig::default(),
            MockSurface::new(),
        );
        assert_eq!(
            ctrl.select_by_index(0),
            Err(SelectError::InvalidIndex { index: 0, len: 0 })
        );
        assert_eq!(ctrl.selection(), "Options...");
    }
}
