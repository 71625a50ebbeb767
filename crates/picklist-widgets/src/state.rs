//! Open/closed state and the presentation flags derived from it.

use crate::error::SelectError;
use picklist_core::Surface;

/// The flags a surface shows for a given open state.
///
/// All four are derived from the same boolean, so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenFlags {
    pub trigger_active: bool,
    pub arrow_turned: bool,
    pub list_shown: bool,
    pub expanded: bool,
}

impl OpenFlags {
    fn from_open(open: bool) -> Self {
        Self {
            trigger_active: open,
            arrow_turned: open,
            list_shown: open,
            expanded: open,
        }
    }

    /// Push every flag to `surface`.
    pub fn apply(self, surface: &mut impl Surface) {
        surface.set_trigger_active(self.trigger_active);
        surface.set_arrow_turned(self.arrow_turned);
        surface.set_list_shown(self.list_shown);
        surface.set_expanded(self.expanded);
    }
}

/// Whether the list is open and which option is chosen.
///
/// `open` and `close` are the only way to change the open state, and they
/// report whether anything changed so callers can publish transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    open: bool,
    selected: Option<usize>,
}

impl ControlState {
    /// Closed, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Open. Returns `true` if the state was closed.
    pub fn open(&mut self) -> bool {
        !std::mem::replace(&mut self.open, true)
    }

    /// Close. Returns `true` if the state was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Record `index` as selected if it is below `len`.
    pub fn select(&mut self, index: usize, len: usize) -> Result<(), SelectError> {
        if index >= len {
            return Err(SelectError::InvalidIndex { index, len });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Flags matching the current open state.
    pub fn flags(&self) -> OpenFlags {
        OpenFlags::from_open(self.open)
    }
}
