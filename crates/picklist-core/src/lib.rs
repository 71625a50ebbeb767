//! Core plumbing for the **picklist** select control.
//!
//! `picklist-core` holds everything a select control shares with its host and
//! nothing that is specific to the control itself: the event emitter it
//! publishes through, the document it listens on, the surface trait it draws
//! through, and the raw input types.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`EventEmitter`] | Event name to ordered subscriber callbacks |
//! | [`Document`] | Shared key-down/click listeners and attach containers |
//! | [`ListenerGuard`] / [`Attachment`] | Registrations undone on `Drop` |
//! | [`Surface`] | Rendering seam: trigger, items, presentation flags |
//! | [`InputEvent`] | Key presses and clicks converted from crossterm |
//! | [`MockSurface`](testing::MockSurface) | Headless recording surface for tests |
//!
//! # Flow
//!
//! 1. The host converts each crossterm event with
//!    [`InputEvent::from_terminal`] and hands it to
//!    [`Document::dispatch`].
//! 2. Every control registered its own key-down and click listeners on the
//!    document when it was built, and routes what it receives into its state
//!    machine.
//! 3. The control updates its [`Surface`] flags and publishes through its
//!    [`EventEmitter`].
//! 4. The [`EventResult`] tells the host whether to skip its default
//!    handling for the event.

pub mod document;
pub mod emitter;
pub mod event;
pub mod logging;
pub mod surface;
pub mod testing;

pub use document::{
    Attachment, ContainerId, ControlId, Document, HostTarget, ListenerGuard, ListenerId,
};
pub use emitter::{Callback, EventEmitter};
pub use event::{is_key_down, EventResult, InputEvent, Position};
pub use logging::{log_to_file, LoggingError};
pub use surface::{Focus, Hit, Surface};
