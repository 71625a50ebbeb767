//! The select control: a trigger that opens a list of options.
//!
//! [`Select`] wires a [`Controller`] to a [`Document`]: building one attaches
//! it to a container and registers its key-down and click listeners, and
//! [`destroy`](Select::destroy) (or dropping it) undoes both.

use crate::config::SelectConfig;
use crate::controller::{Controller, ItemRef, Notification, Selection};
use crate::error::SelectError;
use crate::router;
use crossterm::event::KeyEvent;
use picklist_core::{
    Attachment, ControlId, Document, EventEmitter, EventResult, Focus, HostTarget,
    ListenerGuard, Position, Surface,
};
use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

/// State shared between the handle and its document listeners.
struct Shared<S> {
    controller: RefCell<Controller<S>>,
    emitter: EventEmitter<String>,
    depth: Cell<usize>,
}

/// Counts one level of `Shared::update` nesting, also while unwinding.
struct Nested<'a>(&'a Cell<usize>);

impl<'a> Nested<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for Nested<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl<S: Surface> Shared<S> {
    /// Run `f` against the controller and publish what it queued. If `f`
    /// committed a selection, `change` is delivered while the list is still
    /// open and the close runs afterwards.
    ///
    /// Calls made by subscribers nest inside the outer update, which owns
    /// the close of a pending commit.
    fn update<R>(&self, f: impl FnOnce(&mut Controller<S>) -> R) -> R {
        let result = {
            let _nested = Nested::enter(&self.depth);
            self.step(f)
        };
        if self.depth.get() == 0 {
            self.step(Controller::finish_commit);
        }
        result
    }

    /// The controller borrow ends before any subscriber runs.
    fn step<R>(&self, f: impl FnOnce(&mut Controller<S>) -> R) -> R {
        let (result, pending) = {
            let mut controller = self.controller.borrow_mut();
            let result = f(&mut controller);
            (result, controller.take_notifications())
        };
        for Notification { event, payload } in pending {
            self.emitter.publish(event, &payload);
        }
        result
    }
}

/// Registrations that exist while the control is alive.
struct Mounted {
    attachment: Attachment,
    _keys: ListenerGuard,
    _clicks: ListenerGuard,
}

/// A dropdown select control.
///
/// # Example
///
/// ```
/// use picklist_core::testing::MockSurface;
/// use picklist_core::{Document, HostTarget};
/// use picklist_widgets::select::Select;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let document = Document::new();
/// let mut select = Select::new(
///     vec!["A", "B", "C"],
///     MockSurface::new(),
///     &document,
///     HostTarget::Body,
/// );
///
/// let changes = Rc::new(RefCell::new(Vec::new()));
/// let sink = changes.clone();
/// select.subscribe("change", move |label| sink.borrow_mut().push(label.clone()));
///
/// assert_eq!(select.get_selection(), "Options...");
/// select.select_by_index(1).unwrap();
/// assert_eq!(select.get_selection(), "B");
/// assert_eq!(*changes.borrow(), vec!["B".to_string()]);
///
/// assert!(select.destroy());
/// assert!(!select.destroy());
/// ```
pub struct Select<S: Surface> {
    shared: Rc<Shared<S>>,
    id: ControlId,
    mounted: Option<Mounted>,
}

impl<S: Surface + 'static> Select<S> {
    /// Build the control, attach it to `host` and start listening on
    /// `document`.
    pub fn new(
        config: impl Into<SelectConfig>,
        surface: S,
        document: &Document,
        host: impl Into<HostTarget>,
    ) -> Self {
        let id = ControlId::next();
        let shared = Rc::new(Shared {
            controller: RefCell::new(Controller::new(id, config.into(), surface)),
            emitter: EventEmitter::new(),
            depth: Cell::new(0),
        });

        let container = document.resolve(&host.into());
        let attachment = document.attach(container, id);

        let weak = Rc::downgrade(&shared);
        let keys = document.on_key_down(move |key| {
            with_shared(&weak, |shared| shared.update(|c| router::route_key(c, key)))
        });
        let weak = Rc::downgrade(&shared);
        let clicks = document.on_click(move |position| {
            with_shared(&weak, |shared| {
                shared.update(|c| router::route_click(c, position))
            })
        });

        tracing::debug!(control = ?id, ?container, "select mounted");
        Self {
            shared,
            id,
            mounted: Some(Mounted {
                attachment,
                _keys: keys,
                _clicks: clicks,
            }),
        }
    }
}

impl<S: Surface> Select<S> {
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// Subscribe to `change`, `open` or `close`.
    ///
    /// Callbacks run synchronously, in registration order, before the
    /// operation that triggered them returns. A panicking callback is not
    /// caught.
    pub fn subscribe(&self, event: impl Into<String>, callback: impl Fn(&String) + 'static) {
        self.shared.emitter.subscribe(event, callback);
    }

    /// The displayed label, or the placeholder before any selection.
    pub fn get_selection(&self) -> String {
        self.controller().selection().to_string()
    }

    /// Label and index of the current selection.
    pub fn value(&self) -> Selection {
        self.controller().value()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.controller().selected_index()
    }

    pub fn is_open(&self) -> bool {
        self.controller().is_open()
    }

    pub fn placeholder(&self) -> String {
        self.controller().placeholder().to_string()
    }

    pub fn options(&self) -> Vec<String> {
        self.controller().options().to_vec()
    }

    /// Where focus is inside this control.
    pub fn focused(&self) -> Option<Focus> {
        self.controller().focus()
    }

    /// Read access to the surface, e.g. for rendering.
    pub fn surface(&self) -> Ref<'_, S> {
        Ref::map(self.shared.controller.borrow(), Controller::surface)
    }

    /// A reference to item `index`, for [`select_item`](Select::select_item).
    pub fn item(&self, index: usize) -> Option<ItemRef> {
        self.controller().item(index)
    }

    pub fn open(&self) {
        self.shared.update(Controller::open);
    }

    pub fn close(&self) {
        self.shared.update(Controller::close);
    }

    pub fn toggle(&self) {
        self.shared.update(Controller::toggle);
    }

    /// Commit the option at `index`.
    ///
    /// An out-of-range index returns [`SelectError::InvalidIndex`], is logged,
    /// and changes nothing.
    pub fn select_by_index(&self, index: usize) -> Result<(), SelectError> {
        self.shared.update(|c| c.select_by_index(index))
    }

    /// Commit the referenced item. References to another control's items are
    /// ignored. Returns whether a selection was committed.
    pub fn select_item(&self, item: ItemRef) -> bool {
        self.shared.update(|c| c.select_item(item))
    }

    /// Give keyboard focus to the trigger.
    pub fn focus(&self) {
        self.shared.update(|c| c.set_focus(Some(Focus::Trigger)));
    }

    /// Take keyboard focus away from the control.
    pub fn blur(&self) {
        self.shared.update(|c| c.set_focus(None));
    }

    /// Route a key-down directly, without going through the document.
    /// Inert once destroyed.
    pub fn handle_key(&self, key: &KeyEvent) -> EventResult {
        if self.mounted.is_none() {
            return EventResult::Ignored;
        }
        self.shared.update(|c| router::route_key(c, key))
    }

    /// Route a click directly, without going through the document.
    /// Inert once destroyed.
    pub fn handle_click(&self, position: Position) -> EventResult {
        if self.mounted.is_none() {
            return EventResult::Ignored;
        }
        self.shared.update(|c| router::route_click(c, position))
    }

    /// Whether the control is still attached to its container.
    pub fn is_attached(&self) -> bool {
        self.mounted.is_some()
    }

    /// Detach from the container and remove the document listeners.
    ///
    /// Returns `true` the first time and `false` on every later call.
    pub fn destroy(&mut self) -> bool {
        match self.mounted.take() {
            Some(mounted) => {
                tracing::debug!(
                    control = ?self.id,
                    container = ?mounted.attachment.container(),
                    "select destroyed"
                );
                true
            }
            None => false,
        }
    }

    fn controller(&self) -> Ref<'_, Controller<S>> {
        self.shared.controller.borrow()
    }
}

fn with_shared<S: Surface>(
    weak: &Weak<Shared<S>>,
    f: impl FnOnce(&Shared<S>) -> EventResult,
) -> EventResult {
    match weak.upgrade() {
        Some(shared) => f(&shared),
        None => EventResult::Ignored,
    }
}
