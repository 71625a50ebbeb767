//! The host-side event stream and container tree that controls attach to.
//!
//! A [`Document`] stands in for everything a control shares with the rest of
//! the application: the document-level key-down and click listeners, and the
//! containers controls are attached to. Every registration hands back a guard
//! whose `Drop` undoes it, so a control can never leak a listener past its own
//! lifetime.

use crate::event::{is_key_down, EventResult, InputEvent, Position};
use crossterm::event::KeyEvent;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

type KeyListener = Rc<RefCell<dyn FnMut(&KeyEvent) -> EventResult>>;
type ClickListener = Rc<RefCell<dyn FnMut(Position) -> EventResult>>;

/// Process-unique identity of one control instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        ControlId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a container inside one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(usize);

/// Registration key for one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Where a control's root gets attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostTarget {
    /// The document's default container.
    #[default]
    Body,
    /// A container looked up by its identifier. Unknown identifiers fall back
    /// to the body.
    Id(String),
    /// A container handle obtained earlier.
    Container(ContainerId),
}

impl From<&str> for HostTarget {
    fn from(id: &str) -> Self {
        HostTarget::Id(id.to_string())
    }
}

impl From<String> for HostTarget {
    fn from(id: String) -> Self {
        HostTarget::Id(id)
    }
}

impl From<ContainerId> for HostTarget {
    fn from(container: ContainerId) -> Self {
        HostTarget::Container(container)
    }
}

struct Container {
    id: Option<String>,
    children: Vec<ControlId>,
}

struct Registry {
    next_listener: u64,
    keys: Vec<(ListenerId, KeyListener)>,
    clicks: Vec<(ListenerId, ClickListener)>,
    containers: Vec<Container>,
}

impl Registry {
    fn allocate(&mut self) -> ListenerId {
        self.next_listener += 1;
        ListenerId(self.next_listener)
    }

    fn has_key(&self, id: ListenerId) -> bool {
        self.keys.iter().any(|(k, _)| *k == id)
    }

    fn has_click(&self, id: ListenerId) -> bool {
        self.clicks.iter().any(|(k, _)| *k == id)
    }
}

/// Shared, single-threaded host document.
///
/// Cloning is cheap and every clone refers to the same listeners and
/// containers.
///
/// Dispatch follows DOM rules: listeners run in registration order, a
/// listener added during a dispatch first runs on the next one, and a
/// listener released during a dispatch is skipped if it has not run yet.
#[derive(Clone)]
pub struct Document {
    registry: Rc<RefCell<Registry>>,
}

impl Document {
    /// Create a document holding only the body container.
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_listener: 0,
                keys: Vec::new(),
                clicks: Vec::new(),
                containers: vec![Container {
                    id: None,
                    children: Vec::new(),
                }],
            })),
        }
    }

    /// The default container.
    pub fn body(&self) -> ContainerId {
        ContainerId(0)
    }

    /// Create a container named `id`, or return the existing one.
    pub fn create_container(&self, id: impl Into<String>) -> ContainerId {
        let id = id.into();
        if let Some(existing) = self.container(&id) {
            return existing;
        }
        let mut registry = self.registry.borrow_mut();
        registry.containers.push(Container {
            id: Some(id),
            children: Vec::new(),
        });
        ContainerId(registry.containers.len() - 1)
    }

    /// Look a container up by identifier.
    pub fn container(&self, id: &str) -> Option<ContainerId> {
        self.registry
            .borrow()
            .containers
            .iter()
            .position(|c| c.id.as_deref() == Some(id))
            .map(ContainerId)
    }

    /// Resolve a host target to a container, falling back to the body.
    pub fn resolve(&self, target: &HostTarget) -> ContainerId {
        match target {
            HostTarget::Body => self.body(),
            HostTarget::Id(id) => self.container(id).unwrap_or_else(|| {
                tracing::warn!(container = %id, "no such container, attaching to body");
                self.body()
            }),
            HostTarget::Container(container) => {
                if container.0 < self.registry.borrow().containers.len() {
                    *container
                } else {
                    tracing::warn!(?container, "stale container handle, attaching to body");
                    self.body()
                }
            }
        }
    }

    /// Append `control` to `container`. Dropping the returned guard detaches
    /// it again.
    pub fn attach(&self, container: ContainerId, control: ControlId) -> Attachment {
        if let Some(c) = self.registry.borrow_mut().containers.get_mut(container.0) {
            c.children.push(control);
        }
        Attachment {
            registry: Rc::downgrade(&self.registry),
            container,
            control,
        }
    }

    /// Controls attached to `container`, in attach order.
    pub fn attached(&self, container: ContainerId) -> Vec<ControlId> {
        self.registry
            .borrow()
            .containers
            .get(container.0)
            .map(|c| c.children.clone())
            .unwrap_or_default()
    }

    /// Whether `control` is attached anywhere in this document.
    pub fn is_attached(&self, control: ControlId) -> bool {
        self.registry
            .borrow()
            .containers
            .iter()
            .any(|c| c.children.contains(&control))
    }

    /// Register a document-level key-down listener.
    pub fn on_key_down(
        &self,
        listener: impl FnMut(&KeyEvent) -> EventResult + 'static,
    ) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate();
        let listener: KeyListener = Rc::new(RefCell::new(listener));
        registry.keys.push((id, listener));
        tracing::debug!(?id, "key-down listener added");
        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Register a document-level click listener.
    pub fn on_click(&self, listener: impl FnMut(Position) -> EventResult + 'static) -> ListenerGuard {
        let mut registry = self.registry.borrow_mut();
        let id = registry.allocate();
        let listener: ClickListener = Rc::new(RefCell::new(listener));
        registry.clicks.push((id, listener));
        tracing::debug!(?id, "click listener added");
        ListenerGuard {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Total number of registered listeners of both kinds.
    pub fn listener_count(&self) -> usize {
        let registry = self.registry.borrow();
        registry.keys.len() + registry.clicks.len()
    }

    /// Deliver a key event to every key-down listener.
    ///
    /// Key releases are not delivered.
    pub fn dispatch_key(&self, key: &KeyEvent) -> EventResult {
        if !is_key_down(key) {
            return EventResult::Ignored;
        }
        let snapshot: Vec<_> = self.registry.borrow().keys.clone();
        let mut result = EventResult::Ignored;
        for (id, listener) in snapshot {
            if !self.registry.borrow().has_key(id) {
                continue;
            }
            // A listener that re-enters dispatch does not see its own event.
            let Ok(mut listener) = listener.try_borrow_mut() else {
                tracing::trace!(?id, "skipping re-entrant key listener");
                continue;
            };
            result = result.or((&mut *listener)(key));
        }
        result
    }

    /// Deliver a primary-button click to every click listener.
    pub fn dispatch_click(&self, position: Position) -> EventResult {
        let snapshot: Vec<_> = self.registry.borrow().clicks.clone();
        let mut result = EventResult::Ignored;
        for (id, listener) in snapshot {
            if !self.registry.borrow().has_click(id) {
                continue;
            }
            let Ok(mut listener) = listener.try_borrow_mut() else {
                tracing::trace!(?id, "skipping re-entrant click listener");
                continue;
            };
            result = result.or((&mut *listener)(position));
        }
        result
    }

    /// Deliver any input event.
    pub fn dispatch(&self, event: &InputEvent) -> EventResult {
        match event {
            InputEvent::Key(key) => self.dispatch_key(key),
            InputEvent::Click(position) => self.dispatch_click(*position),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("Document")
            .field("key_listeners", &registry.keys.len())
            .field("click_listeners", &registry.clicks.len())
            .field("containers", &registry.containers.len())
            .finish()
    }
}

/// Keeps one listener registered; dropping it removes the listener.
#[must_use = "dropping the guard removes the listener immediately"]
pub struct ListenerGuard {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
}

impl ListenerGuard {
    /// The registration key.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| {
            let registry = registry.borrow();
            registry.has_key(self.id) || registry.has_click(self.id)
        })
    }

    /// Remove the listener now.
    pub fn release(self) {}
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        registry.keys.retain(|(id, _)| *id != self.id);
        registry.clicks.retain(|(id, _)| *id != self.id);
        tracing::debug!(id = ?self.id, "listener removed");
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

/// Keeps one control attached to a container; dropping it detaches.
#[must_use = "dropping the attachment detaches the control immediately"]
pub struct Attachment {
    registry: Weak<RefCell<Registry>>,
    container: ContainerId,
    control: ControlId,
}

impl Attachment {
    /// The container the control is attached to.
    pub fn container(&self) -> ContainerId {
        self.container
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        if let Some(c) = registry.containers.get_mut(self.container.0) {
            c.children.retain(|id| *id != self.control);
        }
        tracing::debug!(control = ?self.control, container = ?self.container, "detached");
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("container", &self.container)
            .field("control", &self.control)
            .finish()
    }
}
